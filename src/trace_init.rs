use std::io;
use std::path::Path;

/// Crates whose spans and events are traced at debug level by default.
const TRACED_CRATES: [&str; 3] = ["aido_engine", "aido_core", "aido_session"];

/// Log file written inside the trace directory; one JSON object per line.
pub const TRACE_FILE: &str = "aido-trace.jsonl";

/// Env var that overrides [`default_directives`], in `EnvFilter` syntax.
pub const FILTER_ENV: &str = "AIDO_LOG";

pub fn default_directives() -> String {
    TRACED_CRATES
        .iter()
        .map(|krate| format!("{krate}=debug"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(feature = "trace")]
static INIT: std::sync::Once = std::sync::Once::new();

/// Install a JSON-lines subscriber appending to `<log_dir>/aido-trace.jsonl`.
///
/// Creates `log_dir` if needed. Only the first successful call installs a
/// subscriber; the writer's guard is leaked so buffered lines are flushed for
/// the life of the process.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> io::Result<()> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)?;
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        std::mem::forget(guard);

        let filter = EnvFilter::try_from_env(FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directives()));
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
    Ok(())
}

/// Without the `trace` feature nothing is recorded.
#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> io::Result<()> {
    Ok(())
}
