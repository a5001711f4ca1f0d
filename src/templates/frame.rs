//! Shared drawing helpers for variant renderers
//!
//! `Frame` owns the canvas-level invariants: fixed size, base fill, and the
//! full-bleed background beneath the darkness overlay. `Column` stacks
//! content top-down so a renderer never computes absolute positions; the
//! frame places the finished column according to the text position.

use std::collections::BTreeMap;

use crate::artifact::{Anchor, Color, ComposedArtifact, Element, TextBlock};
use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH, SIDE_PADDING};
use crate::settings::{ButtonMetrics, TextPosition};

use super::RenderInput;

pub const CENTER_X: f32 = CANVAS_WIDTH as f32 / 2.0;
pub const LEFT_X: f32 = SIDE_PADDING;
pub const CONTENT_WIDTH: f32 = CANVAS_WIDTH as f32 - 2.0 * SIDE_PADDING;

/// Distance kept between a column and the top or bottom canvas edge.
pub const EDGE_MARGIN: f32 = 150.0;

/// Height a column may use between both edge margins.
pub const COLUMN_HEIGHT: f32 = CANVAS_HEIGHT as f32 - 2.0 * EDGE_MARGIN;

pub const INK: Color = Color(17, 17, 17);
pub const ACCENT: Color = Color(255, 196, 0);
pub const ALERT: Color = Color(230, 57, 70);
pub const MUTED: Color = Color(200, 200, 200);
pub const SUCCESS: Color = Color(46, 196, 120);

pub struct Frame {
    artifact: ComposedArtifact,
    position: TextPosition,
}

impl Frame {
    pub fn new(input: &RenderInput<'_>, variant: &str, base: Color) -> Self {
        let mut elements = vec![Element::Rect {
            x: 0.0,
            y: 0.0,
            width: CANVAS_WIDTH as f32,
            height: CANVAS_HEIGHT as f32,
            radius: 0.0,
            fill: base,
            opacity: 1.0,
        }];
        if let Some(image) = input.background {
            elements.push(Element::Background { image: image.clone() });
            elements.push(Element::Overlay { opacity: input.settings.overlay_opacity() });
        }

        Self {
            artifact: ComposedArtifact {
                role: input.role,
                variant: variant.to_string(),
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT,
                sizes: BTreeMap::new(),
                line_count: None,
                elements,
            },
            position: input.settings.shared.text_position,
        }
    }

    pub fn size(&mut self, field: &str, size: f32) {
        self.artifact.sizes.insert(field.to_string(), size);
    }

    pub fn line_count(&mut self, lines: usize) {
        self.artifact.line_count = Some(lines);
    }

    /// Element drawn at a fixed position, outside any column.
    pub fn fixed(&mut self, element: Element) {
        self.artifact.elements.push(element);
    }

    /// Places a column vertically according to the operator's text position.
    ///
    /// A column taller than the text area is scaled down uniformly about the
    /// canvas center line, so nothing it holds can leave the canvas.
    pub fn place(&mut self, column: Column) {
        let (top_edge, bottom_edge) = column.bounds();
        let extent = bottom_edge - top_edge;
        let k = if extent > COLUMN_HEIGHT {
            tracing::warn!(
                variant = %self.artifact.variant,
                height = extent,
                limit = COLUMN_HEIGHT,
                "content exceeds the text area, scaling column down"
            );
            COLUMN_HEIGHT / extent
        } else {
            1.0
        };
        let height = extent * k;

        let top = match self.position {
            TextPosition::Top => EDGE_MARGIN,
            TextPosition::Center => (CANVAS_HEIGHT as f32 - height) / 2.0,
            TextPosition::Bottom => CANVAS_HEIGHT as f32 - EDGE_MARGIN - height,
        };

        for (field, size) in &column.sizes {
            self.artifact.sizes.insert(field.clone(), *size * k);
        }
        for mut element in column.elements {
            transform(&mut element, top_edge, k, top);
            self.artifact.elements.push(element);
        }
    }

    pub fn finish(self) -> ComposedArtifact {
        self.artifact
    }
}

/// Moves a column element from column space (origin `from`) to canvas
/// space at `to`, scaled by `k` about the center line.
fn transform(element: &mut Element, from: f32, k: f32, to: f32) {
    let y_of = |y: f32| to + (y - from) * k;
    let x_of = |x: f32| CENTER_X + (x - CENTER_X) * k;
    match element {
        Element::Rect { x, y, width, height, radius, .. } => {
            *x = x_of(*x);
            *y = y_of(*y);
            *width *= k;
            *height *= k;
            *radius *= k;
        }
        Element::Circle { cx, cy, r, .. } => {
            *cx = x_of(*cx);
            *cy = y_of(*cy);
            *r *= k;
        }
        Element::Text(block) => {
            block.x = x_of(block.x);
            block.y = y_of(block.y);
            block.font_size *= k;
        }
        Element::Background { .. } | Element::Overlay { .. } => {}
    }
}

/// Text style for one block.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub font_size: f32,
    pub line_height: f32,
    pub weight: u16,
    pub italic: bool,
    pub fill: Color,
    pub anchor: Anchor,
}

impl Style {
    pub fn display(font_size: f32, fill: Color) -> Self {
        Self {
            font_size,
            line_height: crate::layout::DISPLAY_LINE_HEIGHT,
            weight: 900,
            italic: false,
            fill,
            anchor: Anchor::Middle,
        }
    }

    pub fn body(font_size: f32, line_height: f32) -> Self {
        Self {
            font_size,
            line_height,
            weight: 500,
            italic: false,
            fill: Color::WHITE,
            anchor: Anchor::Start,
        }
    }

    pub fn label(font_size: f32, fill: Color) -> Self {
        Self {
            font_size,
            line_height: 1.2,
            weight: 700,
            italic: false,
            fill,
            anchor: Anchor::Middle,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Top-down stack of elements with a running cursor.
#[derive(Debug, Default)]
pub struct Column {
    elements: Vec<Element>,
    sizes: BTreeMap<String, f32>,
    cursor: f32,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(&self) -> f32 {
        self.cursor
    }

    /// Vertical span of everything in the column, in column space. Starts
    /// at or above zero and ends at or below the cursor.
    pub fn bounds(&self) -> (f32, f32) {
        self.elements.iter().fold((0.0f32, self.cursor), |(top, bottom), element| {
            let (t, b) = match element {
                Element::Rect { y, height, .. } => (*y, y + height),
                Element::Circle { cy, r, .. } => (cy - r, cy + r),
                Element::Text(block) => (block.y, block.y + block.height()),
                Element::Background { .. } | Element::Overlay { .. } => (top, bottom),
            };
            (top.min(t), bottom.max(b))
        })
    }

    pub fn gap(&mut self, px: f32) {
        self.cursor += px;
    }

    fn block(field: &str, lines: Vec<String>, x: f32, y: f32, style: Style) -> TextBlock {
        TextBlock {
            field: field.to_string(),
            lines,
            x,
            y,
            font_size: style.font_size,
            line_height: style.line_height,
            anchor: style.anchor,
            weight: style.weight,
            italic: style.italic,
            fill: style.fill,
        }
    }

    fn x_for(anchor: Anchor) -> f32 {
        match anchor {
            Anchor::Start => LEFT_X,
            Anchor::Middle => CENTER_X,
        }
    }

    /// Adds a text block and records its size under `field`.
    pub fn text(&mut self, field: &str, lines: Vec<String>, style: Style) {
        if lines.is_empty() {
            return;
        }
        let block = Self::block(field, lines, Self::x_for(style.anchor), self.cursor, style);
        self.cursor += block.height();
        self.sizes.insert(field.to_string(), style.font_size);
        self.elements.push(Element::Text(block));
    }

    /// Text block at an explicit x, e.g. inside a column split.
    pub fn text_at(&mut self, field: &str, lines: Vec<String>, x: f32, style: Style) -> f32 {
        if lines.is_empty() {
            return 0.0;
        }
        let block = Self::block(field, lines, x, self.cursor, style);
        let height = block.height();
        self.sizes.insert(field.to_string(), style.font_size);
        self.elements.push(Element::Text(block));
        height
    }

    /// Pill-shaped label centered on the canvas.
    pub fn pill(&mut self, field: &str, text: &str, style: Style, fill: Color) {
        if text.is_empty() {
            return;
        }
        let padding = style.font_size * 0.6;
        let width = (text.chars().count() as f32 * style.font_size * 0.62 + 2.0 * padding).min(CONTENT_WIDTH);
        let height = style.font_size * style.line_height + padding;
        self.elements.push(Element::Rect {
            x: CENTER_X - width / 2.0,
            y: self.cursor,
            width,
            height,
            radius: height / 2.0,
            fill,
            opacity: 1.0,
        });
        let block = Self::block(
            field,
            vec![text.to_string()],
            CENTER_X,
            self.cursor + padding / 2.0,
            style.anchored(Anchor::Middle),
        );
        self.sizes.insert(field.to_string(), style.font_size);
        self.elements.push(Element::Text(block));
        self.cursor += height;
    }

    /// Call-to-action button centered on the canvas.
    pub fn button(&mut self, field: &str, text: &str, metrics: ButtonMetrics, fill: Color, text_fill: Color) {
        self.elements.push(Element::Rect {
            x: CENTER_X - metrics.width / 2.0,
            y: self.cursor,
            width: metrics.width,
            height: metrics.height,
            radius: metrics.height / 2.0,
            fill,
            opacity: 1.0,
        });
        let style = Style::label(metrics.font_size, text_fill).weight(800);
        let text_height = metrics.font_size * style.line_height;
        let block = Self::block(
            field,
            vec![text.to_string()],
            CENTER_X,
            self.cursor + (metrics.height - text_height) / 2.0,
            style,
        );
        self.sizes.insert(field.to_string(), metrics.font_size);
        self.elements.push(Element::Text(block));
        self.cursor += metrics.height;
    }

    /// A list row: a round marker at the left with optional glyph, text beside it.
    pub fn marker_row(&mut self, field: &str, glyph: &str, marker: Color, text: &str, style: Style) {
        let row_height = style.font_size * style.line_height * crate::layout::line_count(text).max(1) as f32;
        let r = style.font_size * 0.55;
        let cy = self.cursor + style.font_size * style.line_height / 2.0;
        self.elements.push(Element::Circle { cx: LEFT_X + r, cy, r, fill: marker });
        if !glyph.is_empty() {
            let glyph_style = Style::label(style.font_size * 0.7, INK).weight(900);
            let glyph_height = glyph_style.font_size * glyph_style.line_height;
            self.elements.push(Element::Text(Self::block(
                &format!("{field}.marker"),
                vec![glyph.to_string()],
                LEFT_X + r,
                cy - glyph_height / 2.0,
                glyph_style,
            )));
        }
        let lines = crate::layout::split_lines(text);
        let x = LEFT_X + 2.0 * r + style.font_size * 0.6;
        self.text_at(field, lines, x, style.anchored(Anchor::Start));
        self.cursor += row_height;
    }

    /// Horizontal rule across the content width.
    pub fn rule(&mut self, width: f32, thickness: f32, fill: Color) {
        self.elements.push(Element::Rect {
            x: CENTER_X - width / 2.0,
            y: self.cursor,
            width,
            height: thickness,
            radius: thickness / 2.0,
            fill,
            opacity: 1.0,
        });
        self.cursor += thickness;
    }

    /// Raw element at a column-relative y; the cursor does not move.
    pub fn overlay(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn advance(&mut self, px: f32) {
        self.cursor += px;
    }
}

/// Small "swipe" hint pinned to the bottom edge.
pub fn swipe_hint(frame: &mut Frame, label: &str) {
    let style = Style::label(30.0, MUTED).weight(600);
    frame.fixed(Element::Text(TextBlock {
        field: "swipeHint".to_string(),
        lines: vec![label.to_string()],
        x: CENTER_X,
        y: CANVAS_HEIGHT as f32 - 100.0,
        font_size: style.font_size,
        line_height: style.line_height,
        anchor: style.anchor,
        weight: style.weight,
        italic: false,
        fill: style.fill,
    }));
}
