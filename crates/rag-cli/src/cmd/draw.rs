//! `rag draw` — drawing commands for the scenario picture.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::draw::{DrawCommand, LayoutConfig, draw};
use crate::output::{OutputMode, Report, emit};

/// Arguments for `rag draw`.
#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Scenario file (TOML, or JSON by `.json` extension).
    pub scenario: PathBuf,
}

/// Execute `rag draw`.
pub fn run_draw(args: &DrawArgs, layout: &LayoutConfig, output: OutputMode) -> anyhow::Result<()> {
    let (_, rag) = super::load_graph(&args.scenario, output)?;
    let commands = draw(&rag, &rag.detect(), layout);
    emit(output, commands.as_slice())
}

impl Report for [DrawCommand] {
    fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        for command in self {
            match command {
                DrawCommand::Arrow {
                    from,
                    to,
                    color,
                    on_cycle,
                    ..
                } => {
                    let mark = if *on_cycle { " cycle" } else { "" };
                    writeln!(
                        w,
                        "arrow {:.1},{:.1} -> {:.1},{:.1} {color:?}{mark}",
                        from.x, from.y, to.x, to.y
                    )?;
                }
                DrawCommand::Circle { id, center, .. } => {
                    writeln!(w, "circle {id} {:.1},{:.1}", center.x, center.y)?;
                }
                DrawCommand::Square { id, center, .. } => {
                    writeln!(w, "square {id} {:.1},{:.1}", center.x, center.y)?;
                }
                DrawCommand::Text { text, .. } => writeln!(w, "text {text}")?,
            }
        }
        Ok(())
    }
}
