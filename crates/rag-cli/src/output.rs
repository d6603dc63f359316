//! Output modes and rendering shared by every `rag` subcommand.
//!
//! A command builds one serializable value implementing [`Report`] and hands
//! it to [`emit`]. JSON mode serializes the value; the two human modes call
//! the report's writers.
//!
//! The mode is picked by the first source that yields a known value:
//! `--format`, the hidden `--json` alias, the `FORMAT` environment variable,
//! the config file's `output` key. With none of those, a terminal gets
//! [`OutputMode::Pretty`] and a pipe gets [`OutputMode::Text`].

use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use rag_core::{ErrorCode, RagError};
use serde::Serialize;

const RULE_WIDTH: usize = 72;
const KEY_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Sections and rules for reading in a terminal.
    Pretty,
    /// One fact per line, for pipes and scripts.
    Text,
    /// Stable JSON on stdout.
    Json,
}

impl OutputMode {
    fn from_name(raw: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(raw.trim(), true).ok()
    }
}

/// Pick the output mode. `env_format` is the raw `FORMAT` value.
fn pick_mode(
    flag: Option<OutputMode>,
    json_alias: bool,
    env_format: Option<&str>,
    config_output: Option<&str>,
    stdout_is_tty: bool,
) -> OutputMode {
    flag.or_else(|| json_alias.then_some(OutputMode::Json))
        .or_else(|| env_format.and_then(OutputMode::from_name))
        .or_else(|| config_output.and_then(OutputMode::from_name))
        .unwrap_or(if stdout_is_tty {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Resolve the mode for this process from flags, `FORMAT`, config and
/// whether stdout is a terminal.
pub fn resolve_output_mode(
    flag: Option<OutputMode>,
    json_alias: bool,
    config_output: Option<&str>,
) -> OutputMode {
    let env_format = std::env::var("FORMAT").ok();
    pick_mode(
        flag,
        json_alias,
        env_format.as_deref(),
        config_output,
        io::stdout().is_terminal(),
    )
}

/// A command result that can be written for humans as well as serialized.
pub trait Report: Serialize {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Defaults to the text rendering.
    fn write_pretty(&self, w: &mut dyn Write) -> io::Result<()> {
        self.write_text(w)
    }
}

/// Write `report` to stdout in `mode`.
pub fn emit<R: Report + ?Sized>(mode: OutputMode, report: &R) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(mode, report, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_report<R: Report + ?Sized>(
    mode: OutputMode,
    report: &R,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputMode::Text => report.write_text(out)?,
        OutputMode::Pretty => report.write_pretty(out)?,
    }
    Ok(())
}

/// `=` rule under pretty headings and at the end of pretty reports.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))
}

pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// `Key:        value`, keys padded to a fixed column.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    let label = format!("{key}:");
    writeln!(w, "{label:<width$} {}", value.as_ref(), width = KEY_WIDTH)
}

/// Error payload written to stderr. In JSON mode it is wrapped as
/// `{"error": {...}}`.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// `E####` code from [`ErrorCode`].
    pub error_code: String,
}

impl CliError {
    /// Attach the code's identifier and hint to `message`.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: code.code().to_string(),
        }
    }
}

impl From<&RagError> for CliError {
    fn from(err: &RagError) -> Self {
        Self::from_code(err.error_code(), err.to_string())
    }
}

/// Returned once a failure has been written by [`report_error`]; `main`
/// turns it into a bare non-zero exit so nothing more reaches stderr.
#[derive(Debug, thiserror::Error)]
#[error("error already reported")]
pub struct Reported;

/// Write `error` to stderr in `mode`.
pub fn report_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "error[{}]: {}", error.error_code, error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(out, "  hint: {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_core::NodeKind;

    #[derive(Serialize)]
    struct Sample {
        count: u32,
    }

    impl Report for Sample {
        fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "count {}", self.count)
        }
    }

    fn written(mode: OutputMode, report: &Sample) -> String {
        let mut out = Vec::new();
        write_report(mode, report, &mut out).expect("write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn explicit_flag_beats_every_other_source() {
        let mode = pick_mode(Some(OutputMode::Text), true, Some("json"), Some("pretty"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn json_alias_beats_environment() {
        assert_eq!(
            pick_mode(None, true, Some("pretty"), None, true),
            OutputMode::Json
        );
    }

    #[test]
    fn environment_is_case_insensitive_and_beats_config() {
        assert_eq!(
            pick_mode(None, false, Some(" JSON "), Some("text"), true),
            OutputMode::Json
        );
    }

    #[test]
    fn unknown_names_are_skipped() {
        assert_eq!(
            pick_mode(None, false, Some("fancy"), Some("text"), true),
            OutputMode::Text
        );
        assert_eq!(
            pick_mode(None, false, None, Some("fancy"), false),
            OutputMode::Text
        );
    }

    #[test]
    fn terminal_decides_when_nothing_is_set() {
        assert_eq!(pick_mode(None, false, None, None, true), OutputMode::Pretty);
        assert_eq!(pick_mode(None, false, None, None, false), OutputMode::Text);
    }

    #[test]
    fn pretty_falls_back_to_text_writer() {
        let report = Sample { count: 3 };
        assert_eq!(written(OutputMode::Pretty, &report), "count 3\n");
        assert_eq!(written(OutputMode::Text, &report), "count 3\n");
    }

    #[test]
    fn json_mode_serializes_report() {
        let json: serde_json::Value =
            serde_json::from_str(&written(OutputMode::Json, &Sample { count: 3 })).expect("json");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn kv_pads_key_column() {
        let mut out = Vec::new();
        pretty_kv(&mut out, "Cycle", "none").expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "Cycle:       none\n");
    }

    #[test]
    fn rag_error_keeps_code_and_hint() {
        let err = RagError::InvalidEdgeKind {
            from: "R1".to_string(),
            to: "R2".to_string(),
            kind: NodeKind::Resource,
        };
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code, "E2003");
        assert!(cli.suggestion.is_some());
        assert!(cli.message.contains("'R1' → 'R2'"));
    }

    #[test]
    fn json_error_is_wrapped() {
        let err = CliError::from_code(ErrorCode::ScenarioParseError, "boom");
        let mut out = Vec::new();
        write_error(OutputMode::Json, &err, &mut out).expect("write");
        let json: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(json["error"]["message"], "boom");
        assert_eq!(json["error"]["error_code"], "E1001");
    }

    #[test]
    fn human_error_shows_code_without_hint() {
        let err = CliError::from_code(ErrorCode::LockPoisoned, "lock gone");
        let mut out = Vec::new();
        write_error(OutputMode::Text, &err, &mut out).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "error[E5001]: lock gone\n"
        );
    }
}
