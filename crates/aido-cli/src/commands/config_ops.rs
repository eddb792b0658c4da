use std::io::Write;
use std::path::Path;

use aido_engine::config;

use crate::CliError;

pub fn settings_export(out: &mut impl Write) -> Result<(), CliError> {
    write!(out, "{}", aido_core::settings::default_toml())?;
    Ok(())
}

pub fn settings_validate(file: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let s = config::load_settings(file)?;
    writeln!(
        out,
        "OK: trigger.marker={:?}, trigger.method={:?}, history.undo_capacity={}, dispatch.timeout_ms={}",
        s.trigger.marker, s.trigger.method, s.history.undo_capacity, s.dispatch.timeout_ms
    )?;
    Ok(())
}

pub fn preprompts_export(out: &mut impl Write) -> Result<(), CliError> {
    write!(out, "{}", aido_core::trigger::default_preprompts_toml())?;
    Ok(())
}

pub fn preprompts_validate(file: &Path, marker: &str, out: &mut impl Write) -> Result<(), CliError> {
    let preprompts = config::load_preprompts(file, marker)?;
    let keywords: Vec<&str> = preprompts.iter().map(|p| p.keyword.as_str()).collect();
    writeln!(out, "OK: {} preprompts ({})", preprompts.len(), keywords.join(", "))?;
    Ok(())
}

pub fn provider_validate(file: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let p = config::load_provider_config(file)?;
    writeln!(
        out,
        "OK: kind={:?}, model={}, endpoint={}",
        p.kind,
        p.model,
        p.endpoint.as_deref().unwrap_or("(default)")
    )?;
    Ok(())
}
