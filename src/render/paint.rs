use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::card::{CardFace, FieldStyle};
use crate::fit::LayoutResult;
use crate::layout::{CardKind, FieldAnchor, TextBox};
use crate::render::font::{CardFont, FontSet};

/// Size of a stock card frame, used when no base image is given.
pub const CARD_WIDTH_PX: u32 = 300;
pub const CARD_HEIGHT_PX: u32 = 419;

/// Colors used when painting a text box.
#[derive(Debug, Clone, Copy)]
pub struct TextBoxStyle {
    pub text: Rgba<u8>,
    pub background: Option<Rgba<u8>>,
    /// Draws the box bounds, handy when tuning a layout file.
    pub outline: Option<Rgba<u8>>,
}

impl Default for TextBoxStyle {
    fn default() -> Self {
        Self {
            text: rgba(0x00, 0x00, 0x00, 0xff),
            background: None,
            outline: None,
        }
    }
}

/// Draw every line of `layout` with its top-left corner at (`x`, `y`).
///
/// Lines advance exactly as the fitter measured them, so the returned offset
/// equals `layout.block_height` when `font` is the font the layout was fitted with.
pub fn paint_layout(
    canvas: &mut RgbaImage,
    layout: &LayoutResult,
    font: &CardFont,
    x: i32,
    y: i32,
    style: &TextBoxStyle,
) -> f32 {
    let scale = CardFont::scale(layout.font_size);
    let mut offset = 0.0_f32;
    for line in &layout.lines {
        let line_y = y + offset.round() as i32;
        draw_text_mut(canvas, style.text, x, line_y, scale, font.font(), &line.text);
        offset += line.advance(layout.long_break_spacing);
    }
    offset
}

/// Draw one fixed field. Vertical fields are rotated a quarter turn
/// counter-clockwise so they read bottom to top.
pub fn paint_field(
    canvas: &mut RgbaImage,
    font: &CardFont,
    text: &str,
    anchor: &FieldAnchor,
    style: &FieldStyle,
) {
    let [r, g, b] = style.color;
    let color = rgba(r, g, b, 0xff);
    let scale = CardFont::scale(style.size);
    if !anchor.vertical {
        draw_text_mut(canvas, color, anchor.x, anchor.y, scale, font.font(), text);
        return;
    }
    let (width, _) = text_size(scale, font.font(), text);
    let side = width.max(font.line_height(style.size));
    if side == 0 {
        return;
    }
    let mut strip = RgbaImage::new(side, side);
    draw_text_mut(&mut strip, color, 0, 0, scale, font.font(), text);
    let rotated = imageops::rotate270(&strip);
    imageops::overlay(canvas, &rotated, i64::from(anchor.x), i64::from(anchor.y));
}

/// Draw every field `face` prints on a `kind` frame. Returns how many were drawn.
pub fn paint_card_fields(
    canvas: &mut RgbaImage,
    face: &CardFace,
    kind: CardKind,
    fonts: &FontSet,
) -> usize {
    let mut painted = 0;
    for anchor in kind.field_anchors() {
        let Some(text) = face.field_text(anchor.field, kind) else {
            continue;
        };
        let style = anchor.field.style();
        paint_field(canvas, fonts.face(style.face), &text, anchor, &style);
        painted += 1;
    }
    log::debug!("painted {painted} field(s) for {kind} '{}'", face.title);
    painted
}

fn card_canvas(base: Option<DynamicImage>, text_box: &TextBox) -> RgbaImage {
    match base {
        Some(image) => image.to_rgba8(),
        None => {
            let width = CARD_WIDTH_PX.max(text_box.x.max(0) as u32 + text_box.width);
            let height = CARD_HEIGHT_PX.max(text_box.y.max(0) as u32 + text_box.height);
            ImageBuffer::from_pixel(width, height, rgba(0xff, 0xff, 0xff, 0xff))
        }
    }
}

fn paint_text_box(
    canvas: &mut RgbaImage,
    text_box: &TextBox,
    layout: &LayoutResult,
    font: &CardFont,
    style: &TextBoxStyle,
) {
    // Rect::of_size panics on a zero dimension.
    if text_box.width > 0 && text_box.height > 0 {
        let rect = Rect::at(text_box.x, text_box.y).of_size(text_box.width, text_box.height);
        if let Some(background) = style.background {
            draw_filled_rect_mut(canvas, rect, background);
        }
        if let Some(outline) = style.outline {
            draw_hollow_rect_mut(canvas, rect, outline);
        }
    }
    let used = paint_layout(canvas, layout, font, text_box.x, text_box.y, style);
    log::debug!(
        "painted {} line(s) at size {} using {used:.1}px of {}px",
        layout.lines.len(),
        layout.font_size,
        text_box.height
    );
}

/// Paint the fitted text into `text_box` on top of `base`, or on a blank card.
pub fn render_card_text(
    base: Option<DynamicImage>,
    text_box: &TextBox,
    layout: &LayoutResult,
    font: &CardFont,
    style: &TextBoxStyle,
) -> DynamicImage {
    let mut canvas = card_canvas(base, text_box);
    paint_text_box(&mut canvas, text_box, layout, font, style);
    DynamicImage::ImageRgba8(canvas)
}

/// Paint a whole card face: the fixed fields, then the fitted rules text.
pub fn render_card(
    base: Option<DynamicImage>,
    face: &CardFace,
    kind: CardKind,
    text_box: &TextBox,
    layout: &LayoutResult,
    fonts: &FontSet,
    style: &TextBoxStyle,
) -> DynamicImage {
    let mut canvas = card_canvas(base, text_box);
    paint_card_fields(&mut canvas, face, kind, fonts);
    paint_text_box(&mut canvas, text_box, layout, fonts.text(), style);
    DynamicImage::ImageRgba8(canvas)
}

/// Render only the text box, for previews.
pub fn render_text_box(
    text_box: &TextBox,
    layout: &LayoutResult,
    font: &CardFont,
    style: &TextBoxStyle,
) -> DynamicImage {
    let local = TextBox {
        x: 0,
        y: 0,
        ..*text_box
    };
    let base = ImageBuffer::from_pixel(
        text_box.width,
        text_box.height,
        style.background.unwrap_or(rgba(0xff, 0xff, 0xff, 0xff)),
    );
    render_card_text(Some(DynamicImage::ImageRgba8(base)), &local, layout, font, style)
}

/// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
pub fn parse_hex_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Some(rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}
