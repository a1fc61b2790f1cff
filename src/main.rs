//! demorunner CLI Entry Point
//!
//! Runs the StudySync demo. With no arguments the built-in configuration
//! is used.
//!
//! # Usage
//!
//! ```bash
//! # Run the demo
//! demorunner
//!
//! # Override commands and URLs from a file
//! demorunner --config demo.yaml
//!
//! # Print the commands without running them
//! demorunner --dry-run
//! ```
//!
//! Ctrl-C at any point stops the current step, tears the services down and
//! exits with status 0.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

use demorunner::console::ConsoleReporter;
use demorunner::execution::{
    exit_status, run_demo, spawn_listener, CommandExecutor, DemoRunner, DryRunExecutor,
    ShellExecutor,
};
use demorunner::{CancellationToken, DemoConfig, DemoError, RunOutcome, APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug, Default, PartialEq)]
struct Config {
    config_path: Option<PathBuf>,
    dry_run: bool,
    color: bool,
    verbose: bool,
}

/// What the arguments ask for.
#[derive(Debug, PartialEq)]
enum Invocation {
    Run(Config),
    Help,
    Version,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: demorunner [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config PATH   Load demo configuration overrides from a YAML file");
    println!("  --dry-run       Print commands without executing them");
    println!("  --no-color      Disable colored output");
    println!("  --verbose       Enable debug logging");
    println!("  --help          Show this help message");
    println!("  --version       Show version information");
    println!();
    println!("Examples:");
    println!("  demorunner");
    println!("  demorunner --config demo.yaml --verbose");
}

/// Parses command-line arguments.
fn parse_arguments(args: &[String]) -> Result<Invocation, String> {
    let mut config = Config {
        color: true,
        ..Config::default()
    };
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => return Ok(Invocation::Help),
            "--version" | "-V" => return Ok(Invocation::Version),
            "--dry-run" => config.dry_run = true,
            "--no-color" => config.color = false,
            "--verbose" | "-v" => config.verbose = true,
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a path argument".to_string());
                }
                config.config_path = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
        i += 1;
    }

    Ok(Invocation::Run(config))
}

fn load_config(path: Option<&PathBuf>) -> demorunner::Result<DemoConfig> {
    match path {
        Some(path) => DemoConfig::load(path),
        None => Ok(DemoConfig::default()),
    }
}

/// Runs the demo and performs cleanup on completion or interrupt.
async fn run(config: Config) -> demorunner::Result<RunOutcome> {
    let demo_config = load_config(config.config_path.as_ref())?;

    let executor: Arc<dyn CommandExecutor> = if config.dry_run {
        info!("Mode: DRY RUN (commands will not execute)");
        Arc::new(DryRunExecutor)
    } else {
        Arc::new(ShellExecutor::new())
    };
    let reporter = Arc::new(ConsoleReporter::new(config.color));
    let runner = DemoRunner::new(demo_config, executor, reporter.clone());

    let token = CancellationToken::new();
    let listener = spawn_listener(token.clone())?;

    let outcome = run_demo(&runner, reporter.as_ref(), &token).await;

    // Stop the listener if it is still waiting for a signal
    token.cancel();
    if let Err(e) = listener.await {
        error!("Interrupt listener failed: {}", e);
    }

    outcome
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let config = match parse_arguments(&args) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("{} {}", APP_NAME, VERSION);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", DemoError::Arguments(e));
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    setup_logging(config.verbose);

    let result = run(config).await;
    if let Err(e) = &result {
        eprintln!();
        eprintln!("Demo failed: {}", e);
    }
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("demorunner")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_arguments_runs_defaults() {
        let invocation = parse_arguments(&args(&[])).unwrap();
        assert_eq!(
            invocation,
            Invocation::Run(Config {
                config_path: None,
                dry_run: false,
                color: true,
                verbose: false,
            })
        );
    }

    #[test]
    fn test_all_flags() {
        let invocation =
            parse_arguments(&args(&["--config", "demo.yaml", "--dry-run", "--no-color", "-v"]))
                .unwrap();

        let Invocation::Run(config) = invocation else {
            panic!("expected run invocation");
        };
        assert_eq!(config.config_path, Some(PathBuf::from("demo.yaml")));
        assert!(config.dry_run);
        assert!(!config.color);
        assert!(config.verbose);
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_arguments(&args(&["--help"])).unwrap(), Invocation::Help);
        assert_eq!(parse_arguments(&args(&["-V"])).unwrap(), Invocation::Version);
    }

    #[test]
    fn test_config_requires_path() {
        let err = parse_arguments(&args(&["--config"])).unwrap_err();
        assert!(err.contains("requires a path"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = parse_arguments(&args(&["--parallel"])).unwrap_err();
        assert_eq!(err, "Unknown option: --parallel");
    }

    #[test]
    fn test_positional_rejected() {
        assert!(parse_arguments(&args(&["workflow.yaml"])).is_err());
    }

    #[test]
    fn test_load_config_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let missing = PathBuf::from("/nonexistent/demo.yaml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
