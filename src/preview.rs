//! Preview - scaled, read-only view of the current slide
//!
//! Holds no session state of its own beyond the area it fits into.

use serde::Serialize;

use crate::artifact::ComposedArtifact;
use crate::composer::SlideComposer;
use crate::layout::fit_scale;
use crate::role::SlideRole;
use crate::svg::render_svg_sized;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewController {
    available_width: f32,
    available_height: f32,
}

/// What the preview shows for one slide.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFrame {
    pub index: usize,
    pub role: SlideRole,
    pub scale: f32,
    pub scaled_width: f32,
    pub scaled_height: f32,
    pub has_previous: bool,
    pub has_next: bool,
    pub artifact: ComposedArtifact,
}

impl PreviewFrame {
    /// SVG at the scaled size; the artifact's coordinates are unchanged.
    pub fn to_svg(&self) -> String {
        render_svg_sized(&self.artifact, self.scaled_width, self.scaled_height)
    }
}

impl PreviewController {
    pub fn new(available_width: f32, available_height: f32) -> Self {
        Self { available_width, available_height }
    }

    /// Same for every role.
    pub fn scale(&self) -> f32 {
        fit_scale(self.available_width, self.available_height)
    }

    /// Frame for the composer's current slide.
    pub fn current(&self, composer: &SlideComposer) -> PreviewFrame {
        self.frame(composer, composer.current_index())
    }

    /// Frame for any slide, without moving the composer.
    pub fn frame(&self, composer: &SlideComposer, index: usize) -> PreviewFrame {
        let role = SlideRole::from_index(index).unwrap_or(SlideRole::Reward);
        let index = role.index();
        let artifact = composer.compose(role);
        let scale = self.scale();

        PreviewFrame {
            index,
            role,
            scale,
            scaled_width: artifact.width as f32 * scale,
            scaled_height: artifact.height as f32 * scale,
            has_previous: index > 0,
            has_next: index < SlideRole::ALL.len() - 1,
            artifact,
        }
    }
}
