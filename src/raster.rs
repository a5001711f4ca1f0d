//! Rasterization - mounted SVG nodes to PNG bytes
//!
//! Rendering is CPU-bound and runs on the blocking pool; callers await it.

use async_trait::async_trait;
use resvg::{tiny_skia, usvg};
use std::sync::Arc;
use thiserror::Error;

use crate::artifact::Color;
use crate::stage::MountedNode;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("SVG could not be parsed: {0}")]
    Parse(String),

    #[error("Cannot allocate a {0}x{1} surface")]
    Surface(u32, u32),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Rasterization worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Output pixels per logical pixel
    pub scale: f32,
    /// Fill behind anything the slide leaves transparent
    pub background: Color,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 2.0, background: Color::BLACK }
    }
}

impl RasterOptions {
    pub fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        let scale = self.scale.max(0.0);
        (
            (width as f32 * scale).round() as u32,
            (height as f32 * scale).round() as u32,
        )
    }
}

/// Turns one mounted node into encoded PNG bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, node: &MountedNode, options: RasterOptions) -> Result<Vec<u8>, RasterError>;
}

/// resvg-backed rasterizer.
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// Rasterizer using the host's installed fonts.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fonts(db)
    }

    pub fn with_fonts(db: usvg::fontdb::Database) -> Self {
        Self { fontdb: Arc::new(db) }
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, node: &MountedNode, options: RasterOptions) -> Result<Vec<u8>, RasterError> {
        let svg = node.svg.clone();
        let (width, height) = (node.width, node.height);
        let fontdb = Arc::clone(&self.fontdb);

        tokio::task::spawn_blocking(move || render_png(&svg, width, height, options, fontdb))
            .await
            .map_err(|e| RasterError::Worker(e.to_string()))?
    }
}

fn render_png(
    svg: &str,
    width: u32,
    height: u32,
    options: RasterOptions,
    fontdb: Arc<usvg::fontdb::Database>,
) -> Result<Vec<u8>, RasterError> {
    let opt = usvg::Options { fontdb, ..usvg::Options::default() };
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RasterError::Parse(e.to_string()))?;

    let (out_w, out_h) = options.output_size(width, height);
    let mut pixmap = tiny_skia::Pixmap::new(out_w, out_h).ok_or(RasterError::Surface(out_w, out_h))?;
    let Color(r, g, b) = options.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        out_w as f32 / size.width(),
        out_h as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::SlideRole;

    fn node(svg: &str) -> MountedNode {
        MountedNode {
            id: "lead-magnet-slide-1".to_string(),
            role: SlideRole::Hook,
            variant: "statement".to_string(),
            width: 1080,
            height: 1350,
            svg: svg.to_string(),
        }
    }

    #[test]
    fn test_output_size_scales() {
        assert_eq!(RasterOptions::default().output_size(1080, 1350), (2160, 2700));
    }

    #[tokio::test]
    async fn test_transparent_gaps_are_black() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1080" height="1350" viewBox="0 0 1080 1350"><rect x="0" y="0" width="540" height="1350" fill="#ffffff"/></svg>"##;
        let rasterizer = SvgRasterizer::with_fonts(usvg::fontdb::Database::new());
        let options = RasterOptions { scale: 0.1, ..Default::default() };
        let png = rasterizer.rasterize(&node(svg), options).await.unwrap();

        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (108, 135));
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(100, 130).0, [0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_invalid_svg_is_an_error() {
        let rasterizer = SvgRasterizer::with_fonts(usvg::fontdb::Database::new());
        let err = rasterizer.rasterize(&node("<not-svg"), RasterOptions::default()).await.unwrap_err();
        assert!(matches!(err, RasterError::Parse(_)));
    }
}
