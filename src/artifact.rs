//! Composed Artifacts - the resolved visual result for one slide
//!
//! An artifact is plain data: drawing elements on the fixed 1080×1350
//! canvas plus the sizes the layout engine resolved. It is recomputed on
//! every read and never cached.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::image_input::BackgroundImage;
use crate::role::SlideRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    #[default]
    Middle,
}

/// One or more explicit lines drawn with a single style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// Content field this block was produced from
    pub field: String,
    pub lines: Vec<String>,
    pub x: f32,
    /// Top edge of the block; baselines are derived from it
    pub y: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub anchor: Anchor,
    pub weight: u16,
    pub italic: bool,
    pub fill: Color,
}

impl TextBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.font_size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    /// Full-bleed photo, cropped to cover the canvas
    Background { image: BackgroundImage },
    /// Full-canvas black layer with the given opacity
    Overlay { opacity: f32 },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Color,
        opacity: f32,
    },
    Circle { cx: f32, cy: f32, r: f32, fill: Color },
    Text(TextBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedArtifact {
    pub role: SlideRole,
    pub variant: String,
    pub width: u32,
    pub height: u32,
    /// Font sizes resolved per field
    pub sizes: BTreeMap<String, f32>,
    /// Explicit line count of free-form hook text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    pub elements: Vec<Element>,
}

impl ComposedArtifact {
    pub fn font_size(&self, field: &str) -> Option<f32> {
        self.sizes.get(field).copied()
    }

    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(block) => Some(block),
            _ => None,
        })
    }

    pub fn has_background(&self) -> bool {
        self.elements.iter().any(|e| matches!(e, Element::Background { .. }))
    }

    /// SHA-256 over the canonical JSON form.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        crate::hashing::fingerprint(self)
    }
}
