use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use aido_cli::commands::{config_ops, dispatch_ops, suggest_ops, trigger_ops};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "aidotool", about = "Writing-assistant keyboard diagnostics")]
struct Cli {
    /// Write a JSON trace to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Complete a partially typed word
    Complete {
        /// Word prefix
        prefix: String,
        /// Word list TSV (default: built-in list)
        #[arg(long)]
        words: Option<PathBuf>,
        /// Recently accepted word, most recent first (repeatable)
        #[arg(long)]
        recent: Vec<String>,
        /// Maximum number of suggestions
        #[arg(short, long, default_value = "6")]
        n: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict words that follow a completed word
    Predict {
        /// The last completed word
        word: String,
        /// Word list TSV (default: built-in list)
        #[arg(long)]
        words: Option<PathBuf>,
        /// Maximum number of suggestions
        #[arg(short, long, default_value = "6")]
        n: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect and resolve a trigger at the end of the text
    Resolve {
        /// Text before the cursor
        text: String,
        /// Settings TOML (default: built-in)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Preprompts TOML (default: built-in)
        #[arg(long)]
        preprompts: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a trigger and send it to a provider
    Dispatch {
        /// Provider TOML (kind, api_key, model)
        provider: PathBuf,
        /// Text before the cursor
        text: String,
        /// Settings TOML (default: built-in)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Preprompts TOML (default: built-in)
        #[arg(long)]
        preprompts: Option<PathBuf>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: PathBuf,
    },
    /// Export default preprompts as TOML
    PrepromptsExport,
    /// Validate a custom preprompts TOML file
    PrepromptsValidate {
        /// Path to the TOML file
        file: PathBuf,
        /// Trigger marker keywords are checked against
        #[arg(long, default_value = "@")]
        marker: String,
    },
    /// Validate a provider TOML file
    ProviderValidate {
        /// Path to the TOML file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        die!(
            aido_engine::trace_init::init_tracing(dir),
            "cannot write trace to {}: {}",
            dir.display()
        );
    }

    let mut out = io::stdout().lock();
    let result = match cli.command {
        Command::Complete {
            prefix,
            words,
            recent,
            n,
            json,
        } => suggest_ops::complete(words.as_deref(), &prefix, &recent, n, json, &mut out),
        Command::Predict {
            word,
            words,
            n,
            json,
        } => suggest_ops::predict(words.as_deref(), &word, n, json, &mut out),
        Command::Resolve {
            text,
            settings,
            preprompts,
            json,
        } => trigger_ops::resolve(
            &text,
            settings.as_deref(),
            preprompts.as_deref(),
            json,
            &mut out,
        ),
        Command::Dispatch {
            provider,
            text,
            settings,
            preprompts,
        } => dispatch_ops::run(
            &provider,
            &text,
            settings.as_deref(),
            preprompts.as_deref(),
            &mut out,
        ),
        Command::SettingsExport => config_ops::settings_export(&mut out),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file, &mut out),
        Command::PrepromptsExport => config_ops::preprompts_export(&mut out),
        Command::PrepromptsValidate { file, marker } => {
            config_ops::preprompts_validate(&file, &marker, &mut out)
        }
        Command::ProviderValidate { file } => config_ops::provider_validate(&file, &mut out),
    };
    die!(result, "Error: {}");
}
