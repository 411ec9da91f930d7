//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use proxygen::{
    CardFace, CardFont, CardKind, FontFace, FontSet, LayoutConfig, LayoutResult, TextBox,
    TextFitter, prepare_text,
};

use crate::cli::common::FitInputArgs;

/// Everything a command needs after fitting one text.
pub struct FittedText {
    pub kind: CardKind,
    pub text_box: TextBox,
    pub config: LayoutConfig,
    pub font: CardFont,
    pub layout: LayoutResult,
    /// Card face the text came from, when given with `--card`.
    pub card: Option<CardFace>,
}

/// Resolve plain-text input for commands that accept either inline strings or files.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Load the layout config, falling back to the built-in table.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("failed to load layout config {}", path.display())),
        None => Ok(LayoutConfig::default()),
    }
}

/// Load the text font named on the command line or in the layout config.
pub fn load_font(font: Option<&Path>, config: &LayoutConfig) -> Result<CardFont> {
    let path = font.or(config.text_font.as_deref()).ok_or_else(|| {
        anyhow!("no font given; pass --font or set text_font in the layout config")
    })?;
    CardFont::load(path).with_context(|| format!("failed to load font {}", path.display()))
}

/// Build the font set for a whole card. Faces without a configured font fall back to `text`.
pub fn load_fonts(text: CardFont, config: &LayoutConfig) -> Result<FontSet> {
    let mut fonts = FontSet::new(text);
    for face in [FontFace::Title, FontFace::Subtype, FontFace::Numeral] {
        if let Some(path) = config.font_path(face) {
            let font = CardFont::load(path)
                .with_context(|| format!("failed to load {} font {}", face.name(), path.display()))?;
            fonts = fonts.with_face(face, font);
        } else {
            log::debug!("no {} font configured, using the text font", face.name());
        }
    }
    Ok(fonts)
}

/// Parse a card face JSON file (`-` for stdin).
pub fn load_card(path: &Path) -> Result<CardFace> {
    let json = read_text_arg(None, Some(path.to_path_buf()))?;
    CardFace::from_json(&json).with_context(|| format!("failed to parse card {}", path.display()))
}

/// Read, preprocess and fit the text described by `args`.
pub fn fit_input(args: FitInputArgs) -> Result<FittedText> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(size) = args.start_size {
        config.start_font_size = size;
    }
    if let Some(size) = args.min_size {
        config.min_font_size = size;
    }
    config.validate().context("invalid font size overrides")?;

    let font = load_font(args.font.as_deref(), &config)?;
    let card = args.card.as_deref().map(load_card).transpose()?;
    let raw = match &card {
        Some(card) => card.text.clone(),
        None => read_text_arg(args.text, args.from)?,
    };
    let text = if args.raw { raw } else { prepare_text(&raw) };

    let kind = match (args.kind, &card) {
        (Some(kind), _) => CardKind::from(kind),
        (None, Some(card)) => card.kind().context("card has no matching frame")?,
        (None, None) => CardKind::Event,
    };
    let text_box = config.text_box(kind);
    let layout = TextFitter::new(config.fit_options(kind))
        .fit(&text, &font)
        .with_context(|| format!("failed to measure text for {kind}"))?;
    if !layout.fits {
        log::warn!(
            "text overflows the {kind} text box at minimum font size {} ({:.0}px > {}px)",
            layout.font_size,
            layout.block_height,
            text_box.height
        );
    }

    Ok(FittedText {
        kind,
        text_box,
        config,
        font,
        layout,
        card,
    })
}
