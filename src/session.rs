//! Session files - a whole carousel as one JSON document
//!
//! A session names the variant, content overrides and optional background
//! photo per role, plus a settings patch and export configuration.
//! Background paths are resolved relative to the session file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::composer::SlideComposer;
use crate::image_input::{load_image_file, ImageInputError};
use crate::pipeline::ExportConfig;
use crate::role::{Content, SlideRole};
use crate::settings::SettingsPatch;
use crate::templates::{EmptyCatalog, TemplateRegistry};

/// Newest session format this engine reads.
pub const SUPPORTED_FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid format version: {0}")]
    InvalidVersion(String),

    #[error("Session format {found} is newer than supported {supported}")]
    UnsupportedVersion { found: String, supported: String },

    #[error("Background for {role} slide ({path}): {source}")]
    Background {
        role: SlideRole,
        path: PathBuf,
        #[source]
        source: ImageInputError,
    },

    #[error(transparent)]
    Templates(#[from] EmptyCatalog),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Field overrides on top of the variant's defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    #[serde(default)]
    pub slides: BTreeMap<SlideRole, SlideEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

fn default_format_version() -> String {
    SUPPORTED_FORMAT_VERSION.to_string()
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            format_version: default_format_version(),
            slides: BTreeMap::new(),
            settings: None,
            export: None,
        }
    }
}

impl SessionFile {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let session: SessionFile = serde_json::from_str(json)?;
        session.check_version()?;
        Ok(session)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    fn check_version(&self) -> Result<(), SessionError> {
        let found = semver::Version::parse(&self.format_version)
            .map_err(|_| SessionError::InvalidVersion(self.format_version.clone()))?;
        let supported = semver::Version::parse(SUPPORTED_FORMAT_VERSION)
            .map_err(|_| SessionError::InvalidVersion(SUPPORTED_FORMAT_VERSION.into()))?;

        if found > supported {
            return Err(SessionError::UnsupportedVersion {
                found: self.format_version.clone(),
                supported: SUPPORTED_FORMAT_VERSION.to_string(),
            });
        }
        Ok(())
    }

    pub fn export_config(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }

    /// Builds a composer from this session. Relative background paths are
    /// joined onto `base_dir`.
    pub fn apply(&self, registry: Arc<TemplateRegistry>, base_dir: &Path) -> Result<SlideComposer, SessionError> {
        let mut composer = SlideComposer::new(registry)?;

        for (&role, entry) in &self.slides {
            if let Some(variant) = &entry.variant {
                composer.select_variant(role, variant);
            }
            for (field, value) in &entry.content {
                composer.set_field(role, field, value.clone());
            }
            if let Some(path) = &entry.background {
                let full = base_dir.join(path);
                let image = load_image_file(&full).map_err(|source| SessionError::Background {
                    role,
                    path: full.clone(),
                    source,
                })?;
                composer.set_background_image(role, Some(image));
            }
        }

        if let Some(patch) = &self.settings {
            composer.update_settings(patch.clone());
        }

        info!(session = %composer.id(), slides = self.slides.len(), "applied session file");
        Ok(composer)
    }

    /// Reads a session file and builds its composer over the built-in catalogs.
    pub fn open(path: &Path) -> Result<(Self, SlideComposer), SessionError> {
        let session = Self::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let composer = session.apply(Arc::new(TemplateRegistry::builtin()), base_dir)?;
        Ok((session, composer))
    }

    /// Snapshot of a composer's variants, content and settings. Background
    /// photos have no path and are left out.
    pub fn capture(composer: &SlideComposer) -> Self {
        let slides = SlideRole::ALL
            .into_iter()
            .map(|role| {
                let entry = SlideEntry {
                    variant: Some(composer.selected_variant(role).id.to_string()),
                    content: composer.content(role),
                    background: None,
                };
                (role, entry)
            })
            .collect();

        Self {
            slides,
            settings: Some(composer.settings().to_patch()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::FieldValue;

    #[test]
    fn test_minimal_session_uses_defaults() {
        let session = SessionFile::from_json("{}").unwrap();
        assert_eq!(session.format_version, SUPPORTED_FORMAT_VERSION);
        assert_eq!(session.export_config(), ExportConfig::default());

        let composer = session.apply(Arc::new(TemplateRegistry::builtin()), Path::new(".")).unwrap();
        assert_eq!(composer.selected_variant(SlideRole::Hook).id, "statement");
    }

    #[test]
    fn test_newer_format_is_rejected() {
        let err = SessionFile::from_json(r#"{"formatVersion": "2.0.0"}"#).unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedVersion { .. }));
        let err = SessionFile::from_json(r#"{"formatVersion": "one"}"#).unwrap_err();
        assert!(matches!(err, SessionError::InvalidVersion(_)));
    }

    #[test]
    fn test_apply_sets_variant_content_and_settings() {
        let json = r#"{
            "formatVersion": "1.0.0",
            "slides": {
                "hook": {"variant": "question", "content": {"mainText": "Een\nTwee"}},
                "body": {"content": {"items": ["a", "b"]}}
            },
            "settings": {"fontSize": 400, "overlayDarkness": 44}
        }"#;
        let session = SessionFile::from_json(json).unwrap();
        let composer = session.apply(Arc::new(TemplateRegistry::builtin()), Path::new(".")).unwrap();

        assert_eq!(composer.selected_variant(SlideRole::Hook).id, "question");
        assert_eq!(composer.content(SlideRole::Hook).get("mainText"), Some(&FieldValue::text("Een\nTwee")));
        assert_eq!(composer.content(SlideRole::Body).get("items"), Some(&FieldValue::list(["a", "b"])));
        assert_eq!(composer.settings().hook.font_size, 160);
        assert_eq!(composer.settings().shared.overlay_darkness, 40);
    }

    #[test]
    fn test_background_resolves_relative_to_session() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.png"), crate::image_input::tiny_png()).unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"slides": {"reward": {"background": "photo.png"}}}"#).unwrap();

        let (_, composer) = SessionFile::open(&path).unwrap();
        assert!(composer.background_image(SlideRole::Reward).is_some());
        assert!(composer.background_image(SlideRole::Hook).is_none());
    }

    #[test]
    fn test_missing_background_names_role() {
        let json = r#"{"slides": {"body": {"background": "missing.jpg"}}}"#;
        let session = SessionFile::from_json(json).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = session.apply(Arc::new(TemplateRegistry::builtin()), dir.path()).unwrap_err();
        assert!(matches!(err, SessionError::Background { role: SlideRole::Body, .. }));
    }

    #[test]
    fn test_capture_reproduces_composition() {
        let mut composer = SlideComposer::with_builtin_templates();
        composer.select_variant(SlideRole::Body, "stats");
        composer.set_field(SlideRole::Reward, "keyword", "GIDS");
        composer.update_settings(SettingsPatch { cta_size: Some(100), ..Default::default() });

        let json = serde_json::to_string(&SessionFile::capture(&composer)).unwrap();
        let restored = SessionFile::from_json(&json)
            .unwrap()
            .apply(Arc::new(TemplateRegistry::builtin()), Path::new("."))
            .unwrap();
        assert_eq!(restored.get_composed_slides(), composer.get_composed_slides());
    }
}
