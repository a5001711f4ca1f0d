//! Carousel Core - slide composition and raster export
//!
//! A carousel is three slides in fixed order: hook, body, reward.
//!
//! # Ground Rules
//! 1. Composition is a pure function of session state
//! 2. Every variant owns its own content
//! 3. Settings are clamped, never rejected
//! 4. The SVG master is what gets exported
//! 5. One export at a time; one slide failing never stops the others

pub mod role;
pub mod settings;
pub mod layout;
pub mod image_input;
pub mod artifact;
pub mod svg;
pub mod hashing;
pub mod templates;
pub mod content;
pub mod composer;
pub mod stage;
pub mod raster;
pub mod sink;
pub mod pipeline;
pub mod preview;
pub mod session;

pub use role::{Content, ContentExt, FieldValue, SlideRole};
pub use settings::{Settings, SettingsModel, SettingsPatch, TextPosition, Spacing, ButtonSize};
pub use image_input::{BackgroundImage, ImageInputError, load_image_file};
pub use artifact::{ComposedArtifact, Element, TextBlock};
pub use hashing::{fingerprint, canonical_json, sha256_hex};
pub use templates::{Template, TemplateId, TemplateRegistry, EmptyCatalog};
pub use content::ContentStore;
pub use composer::SlideComposer;
pub use stage::{OffscreenStage, MountedNode};
pub use raster::{Rasterizer, SvgRasterizer, RasterOptions, RasterError};
pub use sink::{FileSink, DirectorySink, MemorySink};
pub use pipeline::{ExportPipeline, ExportConfig, ExportResult, ExportStatus, ExportReport, ExportError, ExportState};
pub use preview::{PreviewController, PreviewFrame};
pub use session::{SessionFile, SessionError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
