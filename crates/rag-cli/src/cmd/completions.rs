//! `rag completions` — shell completion scripts.

use std::io::Write;

use clap::Args;
use clap_complete::{Shell, generate};
use tracing::debug;

/// Name the scripts complete for; matches the `[[bin]]` name.
const BIN_NAME: &str = "rag";

/// Arguments for `rag completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_completions(shell, command, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    debug!(%shell, "generating completions");
    generate(shell, command, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> clap::Command {
        clap::Command::new(BIN_NAME)
            .subcommand(clap::Command::new("analyze"))
            .subcommand(clap::Command::new("graph"))
    }

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut sample_command(), &mut out);
        let script = String::from_utf8(out).expect("utf8");
        assert!(script.contains("analyze"));
        assert!(script.contains("graph"));
    }

    #[test]
    fn every_shell_produces_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut out = Vec::new();
            write_completions(shell, &mut sample_command(), &mut out);
            assert!(!out.is_empty(), "{shell} script is empty");
        }
    }
}
