//! Layout inspection (`proxygen fit`).

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use proxygen::{BreakKind, LayoutResult, SYMBOLS};

use crate::cli::common::FitInputArgs;
use crate::cli::utils::{fit_input, write_output};

/// Args for `proxygen fit`.
#[derive(Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: FitInputArgs,
    /// Print the layout as JSON.
    #[arg(long)]
    pub json: bool,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn handle(args: FitArgs) -> Result<()> {
    let fitted = fit_input(args.input)?;
    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&fitted.layout)
            .context("failed to serialize layout")?;
        json.push('\n');
        json
    } else {
        describe_layout(&fitted.layout, fitted.text_box.height)
    };
    match args.output {
        Some(path) => {
            write_output(&path, &output)?;
            log::info!("wrote {} layout to {}", fitted.kind, path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Human-readable listing of a fitted layout.
pub fn describe_layout(layout: &LayoutResult, box_height: u32) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "font size {} ({} attempt{}, {:.1}px of {}px{})",
        layout.font_size,
        layout.attempts,
        if layout.attempts == 1 { "" } else { "s" },
        layout.block_height,
        box_height,
        if layout.fits { "" } else { ", overflows" }
    )
    .ok();
    for (idx, line) in layout.lines.iter().enumerate() {
        let label = match line.break_kind {
            BreakKind::Short => "",
            BreakKind::Long => "  [paragraph]",
            BreakKind::End => "",
        };
        writeln!(
            &mut out,
            "{:>3} {:>4}px | {}{}",
            idx + 1,
            line.extent.width,
            show_icons(&line.text),
            label
        )
        .ok();
    }
    out
}

/// Swap the font's private icon code points back to their markup names.
fn show_icons(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        let icon = SYMBOLS.iter().find(|sym| {
            let mut chars = sym.replacement.trim_end().chars();
            chars.next() == Some(ch) && chars.next().is_none() && !ch.is_ascii_graphic()
        });
        match icon {
            Some(sym) => out.push_str(sym.token),
            None => out.push(ch),
        }
    }
    out
}
