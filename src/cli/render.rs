//! Rendering command (`proxygen render`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use image::Rgba;
use proxygen::{
    TextBoxStyle, parse_hex_color, render_card, render_card_text, render_text_box, template_path,
};

use crate::cli::common::FitInputArgs;
use crate::cli::utils::{fit_input, load_fonts};

/// Args for `proxygen render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: FitInputArgs,
    /// PNG file to write.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Card image to draw onto (defaults to a blank card).
    #[arg(long)]
    pub base: Option<PathBuf>,
    /// Template directory; picks the frame for `--card` by kind and faction.
    #[arg(long, conflicts_with = "base", requires = "card")]
    pub templates: Option<PathBuf>,
    /// Text color as RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "000000", value_parser = parse_color)]
    pub color: Rgba<u8>,
    /// Fill the text box before drawing.
    #[arg(long, value_parser = parse_color)]
    pub background: Option<Rgba<u8>>,
    /// Outline the text box bounds.
    #[arg(long, value_parser = parse_color)]
    pub outline: Option<Rgba<u8>>,
    /// Write only the text box instead of the whole card.
    #[arg(long = "box-only", conflicts_with_all = ["base", "templates"])]
    pub box_only: bool,
}

fn parse_color(input: &str) -> Result<Rgba<u8>, String> {
    parse_hex_color(input).ok_or_else(|| format!("'{input}' is not an RRGGBB[AA] color"))
}

pub fn handle(args: RenderArgs) -> Result<()> {
    let is_png = args
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !is_png {
        return Err(anyhow!("output path must end in .png"));
    }

    let fitted = fit_input(args.input)?;
    let base_path = match (&args.base, &args.templates, &fitted.card) {
        (Some(path), _, _) => Some(path.clone()),
        (None, Some(dir), Some(card)) => Some(template_path(dir, fitted.kind, card.faction)),
        _ => None,
    };
    let base = match &base_path {
        Some(path) => Some(
            image::open(path)
                .with_context(|| format!("failed to open base image {}", path.display()))?,
        ),
        None => None,
    };

    let style = TextBoxStyle {
        text: args.color,
        background: args.background,
        outline: args.outline,
    };

    let image = if args.box_only {
        render_text_box(&fitted.text_box, &fitted.layout, &fitted.font, &style)
    } else if let Some(card) = &fitted.card {
        let fonts = load_fonts(fitted.font, &fitted.config)?;
        render_card(
            base,
            card,
            fitted.kind,
            &fitted.text_box,
            &fitted.layout,
            &fonts,
            &style,
        )
    } else {
        render_card_text(base, &fitted.text_box, &fitted.layout, &fitted.font, &style)
    };

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("rendered {} text at size {}", fitted.kind, fitted.layout.font_size);
    println!(
        "Rendered {} line(s) at font size {} to {}",
        fitted.layout.lines.len(),
        fitted.layout.font_size,
        args.output.display()
    );
    Ok(())
}
