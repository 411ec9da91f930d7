//! Layout table commands (`proxygen layout ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use proxygen::{CardKind, FieldAnchor, LayoutConfig, TextBox};
use serde::Serialize;

use crate::cli::common::CardKindArg;
use crate::cli::utils::load_config;

/// Layout subcommands.
#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    /// List the text box of every card kind.
    List(LayoutListArgs),
    /// Show the text box and font sizes for one card kind.
    Show(LayoutShowArgs),
}

/// Arguments for `proxygen layout list`.
#[derive(Args, Debug)]
pub struct LayoutListArgs {
    /// TOML layout config (defaults to the built-in table).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `proxygen layout show`.
#[derive(Args, Debug)]
pub struct LayoutShowArgs {
    /// Card kind to display.
    #[arg(value_enum)]
    pub kind: CardKindArg,
    /// TOML layout config (defaults to the built-in table).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the layout as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Everything `layout show --json` reports for one card kind.
#[derive(Serialize)]
struct KindLayout<'a> {
    kind: CardKind,
    text_box: TextBox,
    fields: &'a [FieldAnchor],
    start_font_size: u32,
    min_font_size: u32,
    long_break_spacing: f32,
}

/// Execute a layout command.
pub fn handle(command: LayoutCommand) -> Result<()> {
    match command {
        LayoutCommand::List(args) => list(args),
        LayoutCommand::Show(args) => show(args),
    }
}

fn list(args: LayoutListArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!(
        "Text boxes (font size {} down to {}):",
        config.start_font_size, config.min_font_size
    );
    for (kind, text_box) in config.text_boxes() {
        println!("  - {}", box_row(kind, &text_box));
    }
    Ok(())
}

fn show(args: LayoutShowArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let kind = args.kind.into();
    if args.json {
        let json = serde_json::to_string_pretty(&kind_layout(&config, kind))
            .context("failed to serialize layout")?;
        println!("{json}");
    } else {
        print!("{}", describe_kind(&config, kind));
    }
    Ok(())
}

fn kind_layout(config: &LayoutConfig, kind: CardKind) -> KindLayout<'static> {
    KindLayout {
        kind,
        text_box: config.text_box(kind),
        fields: kind.field_anchors(),
        start_font_size: config.start_font_size,
        min_font_size: config.min_font_size,
        long_break_spacing: config.long_break_spacing,
    }
}

fn box_row(kind: CardKind, text_box: &TextBox) -> String {
    format!(
        "{:<16} at ({:>3}, {:>3}) {:>3}x{:<3}",
        kind.name(),
        text_box.x,
        text_box.y,
        text_box.width,
        text_box.height
    )
}

fn describe_kind(config: &LayoutConfig, kind: CardKind) -> String {
    let text_box = config.text_box(kind);
    let font = config
        .text_font
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());
    let mut out = format!(
        "Card kind: {}\nText box: origin ({}, {}), {}x{} px\nFont sizes: {} down to {}\nParagraph spacing: {} line(s)\nFont: {}\nFields:\n",
        kind,
        text_box.x,
        text_box.y,
        text_box.width,
        text_box.height,
        config.start_font_size,
        config.min_font_size,
        config.long_break_spacing,
        font
    );
    for anchor in kind.field_anchors() {
        let style = anchor.field.style();
        out.push_str(&format!(
            "  - {:<24} at ({:>3}, {:>3}) {} {}pt{}\n",
            anchor.field.name(),
            anchor.x,
            anchor.y,
            style.face.name(),
            style.size,
            if anchor.vertical { ", vertical" } else { "" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_default_ice_box() {
        let text = describe_kind(&LayoutConfig::default(), CardKind::Ice);
        assert!(text.starts_with("Card kind: ice\nText box: origin (68, 73), 202x150 px\n"));
        assert!(text.contains("Font sizes: 14 down to 8"));
        assert!(text.contains("Font: (not set)"));
        assert!(text.contains("  - strength                 at (  7, 402) numeral 30pt, vertical\n"));
    }

    #[test]
    fn json_layout_lists_fields() {
        let value = serde_json::to_value(kind_layout(&LayoutConfig::default(), CardKind::Asset))
            .unwrap();
        assert_eq!(value["kind"], "asset");
        assert_eq!(value["text_box"]["width"], 225);
        assert_eq!(value["fields"][3]["field"], "trash-cost");
        assert_eq!(value["fields"][3]["x"], 273);
        assert_eq!(value["fields"][3]["vertical"], false);
        assert_eq!(value["min_font_size"], 8);
    }

    #[test]
    fn formats_table_rows() {
        let row = box_row(CardKind::Event, &CardKind::Event.default_text_box());
        assert_eq!(row, "event            at ( 36, 305) 245x100");
    }
}
