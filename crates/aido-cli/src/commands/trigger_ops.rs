use std::io::Write;
use std::path::Path;

use aido_core::trigger::{ParseResult, TriggerParser};
use serde::Serialize;

use super::{preprompts_or_default, settings_or_default};
use crate::CliError;

#[derive(Serialize)]
struct ResolveReport<'a> {
    keyword: &'a str,
    input: &'a str,
    span: &'a str,
    span_len: usize,
    prompt: &'a str,
}

/// Parse `text` as the text before the cursor.
pub fn resolve(
    text: &str,
    settings: Option<&Path>,
    preprompts: Option<&Path>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let Some(result) = parse(text, settings, preprompts)? else {
        if json {
            writeln!(out, "null")?;
        } else {
            writeln!(out, "(no trigger)")?;
        }
        return Ok(());
    };

    let report = ResolveReport {
        keyword: &result.preprompt.keyword,
        input: &result.input,
        span: result.span.text(),
        span_len: result.span_len(),
        prompt: &result.final_prompt,
    };
    if json {
        let line = serde_json::to_string(&report).map_err(std::io::Error::other)?;
        writeln!(out, "{line}")?;
    } else {
        writeln!(out, "keyword:  {}", report.keyword)?;
        writeln!(out, "input:    {:?}", report.input)?;
        writeln!(out, "span:     {:?} ({} chars)", report.span, report.span_len)?;
        writeln!(out, "prompt:   {:?}", report.prompt)?;
    }
    Ok(())
}

pub(super) fn parse(
    text: &str,
    settings: Option<&Path>,
    preprompts: Option<&Path>,
) -> Result<Option<ParseResult>, CliError> {
    let settings = settings_or_default(settings)?;
    let preprompts = preprompts_or_default(preprompts, &settings.trigger.marker)?;
    let parser = TriggerParser::from_settings(&settings.trigger);
    Ok(parser.parse(text, &preprompts))
}
