#![forbid(unsafe_code)]

mod cmd;
mod config;
mod draw;
mod output;
mod scenario;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use rag_core::ErrorCode;
use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "RAG_LOG";
const LOG_FORMAT_ENV: &str = "RAG_LOG_FORMAT";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rag: resource allocation graph deadlock analyzer",
    long_about = None
)]
struct Cli {
    /// Log at debug level unless `RAG_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (defaults to ./rag.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Detect deadlock in a scenario",
        long_about = "Build the resource allocation graph described by a scenario file and report whether it is deadlocked.",
        after_help = "EXAMPLES:\n    # Analyze a scenario\n    rag analyze scenarios/circular_wait.toml\n\n    # Fail the build when a deadlock is present\n    rag analyze scenarios/circular_wait.toml --fail-on-deadlock\n\n    # Emit machine-readable output\n    rag analyze scenarios/circular_wait.toml --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Presentation",
        about = "List nodes and edges",
        long_about = "List the scenario's nodes and edges with their categories, or emit Graphviz DOT.",
        after_help = "EXAMPLES:\n    # Edge list\n    rag graph scenarios/circular_wait.toml\n\n    # Render with Graphviz\n    rag graph scenarios/circular_wait.toml --dot | dot -Tpng -o rag.png"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Presentation",
        about = "Emit drawing commands",
        long_about = "Lay out the scenario and emit the drawing commands for its picture.",
        after_help = "EXAMPLES:\n    # Drawing commands as JSON\n    rag draw scenarios/circular_wait.toml --format json"
    )]
    Draw(cmd::draw::DrawArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    rag completions bash\n\n    # Generate zsh completions\n    rag completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Filter directives come from `RAG_LOG`. Without it, `--verbose` or a set
/// `DEBUG` variable turns on debug output for the rag crates.
fn init_tracing(verbose: bool) {
    let default_directives = if verbose || env::var_os("DEBUG").is_some() {
        "rag=debug,info"
    } else {
        "rag=info,warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives));
    let json = env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let cwd = env::current_dir()?;
    let config = match config::load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            // The config could not supply an output preference.
            let mode = output::resolve_output_mode(cli.format, cli.json, None);
            output::report_error(
                mode,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            debug!(error = %format!("{err:#}"), "config rejected");
            return Ok(ExitCode::FAILURE);
        }
    };
    let output = output::resolve_output_mode(cli.format, cli.json, config.output.as_deref());

    let result = match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output),
        Commands::Graph(ref args) => {
            cmd::graph::run_graph(args, output).map(|()| ExitCode::SUCCESS)
        }
        Commands::Draw(ref args) => {
            cmd::draw::run_draw(args, &config.layout, output).map(|()| ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Err(err) if err.is::<output::Reported>() => Ok(ExitCode::FAILURE),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::parse_from(["rag", "graph", "s.toml", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Graph(_)));
    }

    #[test]
    fn config_flag_before_subcommand() {
        let cli = Cli::parse_from(["rag", "--config", "c.toml", "draw", "x.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Draw(_)));
    }

    #[test]
    fn completions_take_a_shell() {
        let cli = Cli::parse_from(["rag", "completions", "zsh"]);
        let Commands::Completions(args) = cli.command else {
            panic!("expected completions");
        };
        assert_eq!(args.shell, clap_complete::Shell::Zsh);
    }

    #[test]
    fn accepted_invocations() {
        for args in [
            &["rag", "analyze", "x.toml"][..],
            &["rag", "-v", "analyze", "x.toml", "--fail-on-deadlock"],
            &["rag", "graph", "x.toml", "--dot"],
            &["rag", "draw", "x.json", "--json"],
        ] {
            if let Err(err) = Cli::try_parse_from(args) {
                panic!("{args:?} rejected: {err}");
            }
        }
    }

    #[test]
    fn scenario_argument_is_required() {
        assert!(Cli::try_parse_from(["rag", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["rag", "analyze", "x.toml", "--bogus"]).is_err());
    }
}
