use std::io::Write;
use std::path::Path;

use aido_core::dispatch::{apply_response, dispatch};
use aido_core::document::MemoryDocument;
use aido_engine::config;
use aido_engine::provider::build_provider;

use super::settings_or_default;
use super::trigger_ops::parse;
use crate::CliError;

/// Resolve the trigger at the end of `text`, send it to the provider in
/// `provider_file` and print the document with the reply spliced in.
pub fn run(
    provider_file: &Path,
    text: &str,
    settings: Option<&Path>,
    preprompts: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let provider_config = config::load_provider_config(provider_file)?;
    let dispatch_settings = settings_or_default(settings)?.dispatch;
    let Some(result) = parse(text, settings, preprompts)? else {
        return Err(CliError::NoTrigger(text.to_string()));
    };

    let provider = build_provider(&provider_config)?;
    let timeout = provider_config.timeout(&dispatch_settings);
    let reply = dispatch(
        provider.as_ref(),
        &result.final_prompt,
        &dispatch_settings,
        timeout,
    )?;

    let mut doc = MemoryDocument::with_text(text);
    apply_response(&mut doc, &result.span, &reply)?;
    writeln!(out, "{}", doc.text())?;
    Ok(())
}
