mod commands;

use clap::{Parser, Subcommand};
use commands::{EXIT_CONFIG_ERROR, EXIT_FAILURE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "bundlemap",
    version,
    about = "Deterministic build manifest generator for front-end asset bundles"
)]
struct Cli {
    /// Path to the settings file; its directory is the project base.
    #[arg(short, long, default_value = bundlemap_schema::SETTINGS_FILE, global = true)]
    config: PathBuf,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the manifest and write build.lock.
    Build,
    /// Print the merged resource configs.
    Configs,
    /// Compare a fresh build against build.lock without writing it.
    Check,
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("BUNDLEMAP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;
    let result = match cli.command {
        Commands::Build => commands::build::run(&cli.config, json_output),
        Commands::Configs => commands::configs::run(&cli.config, json_output),
        Commands::Check => commands::check::run(&cli.config, json_output),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config error:") {
                EXIT_CONFIG_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
