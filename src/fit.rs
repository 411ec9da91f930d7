//! Auto-fitting text layout for card text boxes.
//!
//! The fitter wraps text greedily against a width budget and shrinks the font
//! one size at a time until the wrapped block fits the height budget, or the
//! minimum size is reached.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Character that marks an author-inserted paragraph break.
pub const PARAGRAPH_BREAK: char = '\n';

/// Extra vertical spacing after a long break, in line heights.
pub const LONG_BREAK_SPACING: f32 = 0.5;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Rendered pixel dimensions of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

impl TextExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Measurement oracle supplied by a rendering backend.
pub trait GlyphMetrics {
    type Error;

    fn measure(&self, text: &str, font_size: u32) -> Result<TextExtent, Self::Error>;
}

impl<F, E> GlyphMetrics for F
where
    F: Fn(&str, u32) -> Result<TextExtent, E>,
{
    type Error = E;

    fn measure(&self, text: &str, font_size: u32) -> Result<TextExtent, E> {
        self(text, font_size)
    }
}

/// How a line of a fitted layout ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// Wrapped because the next token would overflow the width budget.
    Short,
    /// Forced by an explicit paragraph break; gets extra spacing.
    Long,
    /// Last line of the text.
    End,
}

/// A single fitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub text: String,
    pub break_kind: BreakKind,
    pub extent: TextExtent,
}

impl Line {
    /// Vertical distance from this line's top to the next line's top.
    pub fn advance(&self, long_break_spacing: f32) -> f32 {
        let height = self.extent.height as f32;
        match self.break_kind {
            BreakKind::Long => height * (1.0 + long_break_spacing),
            BreakKind::Short | BreakKind::End => height,
        }
    }
}

/// Output of [`TextFitter::fit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    pub font_size: u32,
    /// Number of font sizes tried, including the accepted one.
    pub attempts: u32,
    /// Block height including long-break spacing.
    pub block_height: f32,
    /// Whether the block fits the height budget. Only false at the minimum size.
    pub fits: bool,
    /// Spacing after long breaks used for `block_height`; painters reuse it.
    pub long_break_spacing: f32,
}

impl LayoutResult {
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Budget and font-size range for one text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub width: u32,
    pub height: u32,
    pub start_font_size: u32,
    pub min_font_size: u32,
    pub long_break_spacing: f32,
}

impl FitOptions {
    pub fn new(width: u32, height: u32, start_font_size: u32, min_font_size: u32) -> Self {
        Self {
            width,
            height,
            start_font_size,
            min_font_size,
            long_break_spacing: LONG_BREAK_SPACING,
        }
    }

    pub fn with_long_break_spacing(mut self, spacing: f32) -> Self {
        self.long_break_spacing = spacing;
        self
    }

    /// Font sizes to try, largest first. A start size below the floor is tried once.
    fn font_sizes(&self) -> impl Iterator<Item = u32> {
        let floor = self.min_font_size.min(self.start_font_size);
        (floor..=self.start_font_size).rev()
    }
}

/// Greedy line-breaker with font-shrink retry.
#[derive(Debug, Clone, Copy)]
pub struct TextFitter {
    options: FitOptions,
}

impl TextFitter {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Fit `text` into the configured box, shrinking the font as needed.
    ///
    /// Measurement errors are returned as-is. Overflow at the minimum font
    /// size is not an error; the last layout is returned with `fits == false`.
    pub fn fit<M>(&self, text: &str, metrics: &M) -> Result<LayoutResult, M::Error>
    where
        M: GlyphMetrics + ?Sized,
    {
        let tokens = tokenize(text);
        let mut attempts = 0;
        let mut last = None;

        for font_size in self.options.font_sizes() {
            attempts += 1;
            let lines = wrap(&tokens, font_size, self.options.width, metrics)?;
            let block_height = block_height(&lines, self.options.long_break_spacing);
            let fits = block_height <= self.options.height as f32;
            log::debug!(
                "font size {font_size}: {} line(s), block height {block_height:.1} of {}",
                lines.len(),
                self.options.height
            );

            let layout = LayoutResult {
                lines,
                font_size,
                attempts,
                block_height,
                fits,
                long_break_spacing: self.options.long_break_spacing,
            };
            if fits {
                return Ok(layout);
            }
            last = Some(layout);
        }

        // font_sizes() always yields at least the start size.
        let layout = last.unwrap_or_else(|| empty_layout(&self.options));
        log::debug!(
            "text overflows at minimum font size {} ({:.1} > {})",
            layout.font_size,
            layout.block_height,
            self.options.height
        );
        Ok(layout)
    }
}

/// Fit `text` with a measuring closure. Convenience form of [`TextFitter::fit`].
pub fn fit<F, E>(
    text: &str,
    width: u32,
    height: u32,
    start_font_size: u32,
    min_font_size: u32,
    measure: F,
) -> Result<LayoutResult, E>
where
    F: Fn(&str, u32) -> Result<TextExtent, E>,
{
    TextFitter::new(FitOptions::new(width, height, start_font_size, min_font_size))
        .fit(text, &measure)
}

/// Measure-free variant for oracles that cannot fail.
pub fn fit_infallible<F>(text: &str, options: FitOptions, measure: F) -> LayoutResult
where
    F: Fn(&str, u32) -> TextExtent,
{
    let metrics = |text: &str, size: u32| Ok::<_, Infallible>(measure(text, size));
    match TextFitter::new(options).fit(text, &metrics) {
        Ok(layout) => layout,
        Err(never) => match never {},
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
    Break,
}

impl<'a> Token<'a> {
    fn as_str(&self) -> &'a str {
        match self {
            Token::Word(s) | Token::Space(s) => s,
            Token::Break => "",
        }
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let text = text.trim();
    let mut tokens = Vec::new();
    let mut cursor = 0;
    for run in WHITESPACE.find_iter(text) {
        if run.start() > cursor {
            tokens.push(Token::Word(&text[cursor..run.start()]));
        }
        let space = run.as_str();
        if space.contains(PARAGRAPH_BREAK) {
            tokens.push(Token::Break);
        } else {
            tokens.push(Token::Space(space));
        }
        cursor = run.end();
    }
    if cursor < text.len() {
        tokens.push(Token::Word(&text[cursor..]));
    }
    tokens
}

fn wrap<M>(tokens: &[Token<'_>], font_size: u32, width: u32, metrics: &M) -> Result<Vec<Line>, M::Error>
where
    M: GlyphMetrics + ?Sized,
{
    let mut lines = Vec::new();
    let mut rest = tokens;

    loop {
        // Whitespace left over from a short break does not start a line.
        while let [Token::Space(_), tail @ ..] = rest {
            rest = tail;
        }
        let [first, tail @ ..] = rest else {
            break;
        };
        rest = tail;

        let mut line = String::from(first.as_str());
        let mut break_kind = BreakKind::End;
        while let [next, tail @ ..] = rest {
            if *next == Token::Break {
                rest = tail;
                break_kind = BreakKind::Long;
                break;
            }
            let candidate = format!("{line}{}", next.as_str());
            if metrics.measure(&candidate, font_size)?.width < width {
                line = candidate;
                rest = tail;
            } else {
                break_kind = BreakKind::Short;
                break;
            }
        }

        let text = line.trim().to_string();
        let extent = metrics.measure(&text, font_size)?;
        log::trace!("size {font_size} line {:?} ({break_kind:?}, {}px)", text, extent.width);
        lines.push(Line {
            text,
            break_kind,
            extent,
        });
    }

    Ok(lines)
}

fn block_height(lines: &[Line], long_break_spacing: f32) -> f32 {
    lines.iter().map(|line| line.advance(long_break_spacing)).sum()
}

fn empty_layout(options: &FitOptions) -> LayoutResult {
    LayoutResult {
        lines: Vec::new(),
        font_size: options.start_font_size,
        attempts: 0,
        block_height: 0.0,
        fits: true,
        long_break_spacing: options.long_break_spacing,
    }
}
