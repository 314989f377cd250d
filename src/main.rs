use modforge::cli::CliArgs;
use modforge::fs::RealFileSystem;
use modforge::generator::generate;
use modforge::runner::{run_make, write_outputs};
use modforge::VERSION;

use anyhow::Result;
use clap::Parser;
use std::env;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("modforge v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            1
        }
    };

    std::process::exit(exit_code);
}

/// Generates the build script, writes the work directory and hands off to
/// the build executor, whose exit code becomes ours.
fn run(args: &CliArgs) -> Result<i32> {
    let config = args.to_config();
    debug!("{}", config);

    let script = generate(&RealFileSystem::new(), &config)?;
    debug!(
        accelerated = script.accelerated_count,
        direct = script.direct_count,
        "Synthesized rule records"
    );

    write_outputs(&config, &script.text)?;
    run_make(&config)
}

fn init_logging_from_args(args: &CliArgs) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else {
            let level_str = env::var("MODFORGE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter.add_directive(format!("modforge={}", level).parse().unwrap());
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
