//! Template System - per-role variant catalogs
//!
//! Each role owns an independent catalog. A template pairs canonical
//! default content with a pure renderer; the registry maps
//! `(role, variant id)` to a template and falls back to the role's
//! default variant for unknown ids.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::artifact::ComposedArtifact;
use crate::image_input::BackgroundImage;
use crate::role::{Content, FieldValue, SlideRole};
use crate::settings::Settings;

pub mod frame;
mod hook;
mod body;
mod reward;

pub type TemplateId = &'static str;

/// Everything a renderer may read. Nothing else is visible to it.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub role: SlideRole,
    pub background: Option<&'a BackgroundImage>,
    pub content: &'a Content,
    pub settings: &'a Settings,
}

pub type RenderFn = fn(&RenderInput<'_>) -> ComposedArtifact;

/// Builds a default-content map from literal pairs.
pub(crate) fn fields<const N: usize>(pairs: [(&str, FieldValue); N]) -> Content {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// A variant: its default content shape and its renderer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub role: SlideRole,
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    defaults: fn() -> Content,
    #[serde(skip)]
    render: RenderFn,
}

impl Template {
    pub const fn new(
        role: SlideRole,
        id: TemplateId,
        name: &'static str,
        description: &'static str,
        defaults: fn() -> Content,
        render: RenderFn,
    ) -> Self {
        Self { role, id, name, description, defaults, render }
    }

    /// Canonical starter content for this variant
    pub fn default_content(&self) -> Content {
        (self.defaults)()
    }

    /// Fields every content bucket of this variant carries
    pub fn required_fields(&self) -> Vec<String> {
        self.default_content().into_keys().collect()
    }

    /// Renders one artifact. Missing fields fall back to the defaults.
    pub fn render(
        &self,
        background: Option<&BackgroundImage>,
        content: &Content,
        settings: &Settings,
    ) -> ComposedArtifact {
        let mut merged = self.default_content();
        merged.extend(content.iter().map(|(k, v)| (k.clone(), v.clone())));
        (self.render)(&RenderInput { role: self.role, background, content: &merged, settings })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("role", &self.role)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
#[error("No templates registered for role {0}")]
pub struct EmptyCatalog(pub SlideRole);

/// Template registry - populated once, looked up on every composition
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: HashMap<(SlideRole, TemplateId), &'static Template>,
    catalogs: HashMap<SlideRole, Vec<&'static Template>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self { templates: HashMap::new(), catalogs: HashMap::new() }
    }

    /// Registry holding every built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for template in hook::TEMPLATES.iter().chain(body::TEMPLATES.iter()).chain(reward::TEMPLATES.iter()) {
            registry.register(template);
        }
        registry
    }

    /// Adds a template; the first registered per role is that role's default.
    pub fn register(&mut self, template: &'static Template) {
        let catalog = self.catalogs.entry(template.role).or_default();
        if self.templates.insert((template.role, template.id), template).is_none() {
            catalog.push(template);
        } else if let Some(slot) = catalog.iter_mut().find(|t| t.id == template.id) {
            *slot = template;
        }
    }

    pub fn get(&self, role: SlideRole, id: &str) -> Option<&'static Template> {
        self.catalogs
            .get(&role)
            .and_then(|catalog| catalog.iter().find(|t| t.id == id).copied())
    }

    pub fn default_for(&self, role: SlideRole) -> Option<&'static Template> {
        self.catalogs.get(&role).and_then(|c| c.first().copied())
    }

    /// Resolves a variant, falling back to the role default for unknown ids.
    ///
    /// Fails only for a role with an empty catalog, which the built-in
    /// registry never has.
    pub fn resolve(&self, role: SlideRole, id: &str) -> Result<&'static Template, EmptyCatalog> {
        if let Some(template) = self.get(role, id) {
            return Ok(template);
        }
        let fallback = self.default_for(role).ok_or(EmptyCatalog(role))?;
        tracing::warn!(%role, requested = id, fallback = fallback.id, "unknown variant, using role default");
        Ok(fallback)
    }

    /// Variants of one role in catalog order
    pub fn variants(&self, role: SlideRole) -> &[&'static Template] {
        self.catalogs.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::artifact::Element;
    use crate::settings::{SettingsModel, SettingsPatch, TextPosition};

    /// Every text field twelve lines long, every list twenty-five items.
    fn oversized(template: &Template) -> Content {
        template
            .default_content()
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    FieldValue::Text(_) => FieldValue::Text(vec!["Een veel te lange regel tekst"; 12].join("\n")),
                    FieldValue::List(_) => FieldValue::List((1..=25).map(|i| format!("Punt {i} met uitleg|label")).collect()),
                };
                (field, value)
            })
            .collect()
    }

    #[test]
    fn test_catalog_sizes() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.variants(SlideRole::Hook).len(), 5);
        assert_eq!(registry.variants(SlideRole::Body).len(), 8);
        assert_eq!(registry.variants(SlideRole::Reward).len(), 7);
    }

    #[test]
    fn test_documented_defaults() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.default_for(SlideRole::Hook).unwrap().id, "statement");
        assert_eq!(registry.default_for(SlideRole::Body).unwrap().id, "checklist");
        assert_eq!(registry.default_for(SlideRole::Reward).unwrap().id, "dm-word");
    }

    #[test]
    fn test_unknown_variant_falls_back() {
        let registry = TemplateRegistry::builtin();
        let fallback = registry.resolve(SlideRole::Reward, "nonexistent-id").unwrap();
        let default = registry.resolve(SlideRole::Reward, "dm-word").unwrap();
        assert!(std::ptr::eq(fallback, default));
    }

    #[test]
    fn test_catalogs_are_role_scoped() {
        let registry = TemplateRegistry::builtin();
        assert!(registry.get(SlideRole::Hook, "checklist").is_none());
        assert_eq!(registry.resolve(SlideRole::Hook, "checklist").unwrap().id, "statement");
    }

    #[test]
    fn test_every_renderer_fills_the_canvas() {
        let registry = TemplateRegistry::builtin();
        let settings = SettingsModel::new().get().clone();
        for role in SlideRole::ALL {
            for template in registry.variants(role) {
                let artifact = template.render(None, &Content::new(), &settings);
                assert_eq!((artifact.width, artifact.height), (CANVAS_WIDTH, CANVAS_HEIGHT));
                assert_eq!(artifact.role, role);
                assert_eq!(artifact.variant, template.id);
                assert!(artifact.text_blocks().count() > 0, "{} renders no text", template.id);
                for block in artifact.text_blocks() {
                    assert!(block.y >= 0.0 && block.y + block.height() <= CANVAS_HEIGHT as f32,
                        "{}:{} leaves the canvas", template.id, block.field);
                }
            }
        }
    }

    #[test]
    fn test_oversized_content_stays_on_canvas() {
        let registry = TemplateRegistry::builtin();
        for position in [TextPosition::Top, TextPosition::Center, TextPosition::Bottom] {
            let mut model = SettingsModel::new();
            model.update(SettingsPatch {
                text_position: Some(position),
                font_size: Some(160),
                body_font_size: Some(52),
                cta_size: Some(108),
                ..Default::default()
            });
            for role in SlideRole::ALL {
                for template in registry.variants(role) {
                    let artifact = template.render(None, &oversized(template), model.get());
                    for block in artifact.text_blocks() {
                        assert!(block.font_size > 0.0, "{}:{} has size {}", template.id, block.field, block.font_size);
                        assert!(
                            block.y >= -0.01 && block.y + block.height() <= CANVAS_HEIGHT as f32 + 0.01,
                            "{}:{} spans {}..{} at {:?}",
                            template.id,
                            block.field,
                            block.y,
                            block.y + block.height(),
                            position
                        );
                    }
                    assert!(artifact.sizes.values().all(|s| *s > 0.0), "{}", template.id);
                }
            }
        }
    }

    #[test]
    fn test_registry_debug_lists_templates() {
        let debug = format!("{:?}", TemplateRegistry::builtin());
        assert!(debug.contains("TemplateRegistry"));
        assert!(debug.contains("free-guide"));
    }

    #[test]
    fn test_background_drawn_beneath_overlay() {
        let registry = TemplateRegistry::builtin();
        let settings = SettingsModel::new().get().clone();
        let image = BackgroundImage::from_bytes(crate::image_input::tiny_png()).unwrap();
        for role in SlideRole::ALL {
            for template in registry.variants(role) {
                let artifact = template.render(Some(&image), &Content::new(), &settings);
                let bg = artifact.elements.iter().position(|e| matches!(e, Element::Background { .. }));
                let overlay = artifact.elements.iter().position(|e| matches!(e, Element::Overlay { .. }));
                let (bg, overlay) = (bg.unwrap(), overlay.unwrap());
                assert_eq!(overlay, bg + 1);
                assert!(matches!(artifact.elements[overlay], Element::Overlay { opacity } if (opacity - 0.4).abs() < f32::EPSILON));
                assert!(artifact.elements[..bg].iter().all(|e| !matches!(e, Element::Text(_))));
            }
        }
    }

    #[test]
    fn test_required_fields_match_defaults() {
        let registry = TemplateRegistry::builtin();
        for role in SlideRole::ALL {
            for template in registry.variants(role) {
                let required = template.required_fields();
                assert!(!required.is_empty());
                let defaults = template.default_content();
                assert!(required.iter().all(|f| defaults.contains_key(f)));
            }
        }
    }
}
