//! Slide Composer - the in-memory authoring session
//!
//! Owns the current slide index, the per-role variant selection and
//! content, the settings and the background images. Composition is a pure
//! function of that state: every read re-renders, nothing is cached.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::artifact::ComposedArtifact;
use crate::content::ContentStore;
use crate::image_input::BackgroundImage;
use crate::role::{Content, FieldValue, SlideRole};
use crate::settings::{Settings, SettingsModel, SettingsPatch};
use crate::stage::OffscreenStage;
use crate::templates::{EmptyCatalog, Template, TemplateRegistry};

pub const LAST_INDEX: usize = SlideRole::ALL.len() - 1;

#[derive(Debug)]
pub struct SlideComposer {
    id: Uuid,
    registry: Arc<TemplateRegistry>,
    current: usize,
    content: ContentStore,
    settings: SettingsModel,
    backgrounds: [Option<BackgroundImage>; 3],
}

impl SlideComposer {
    /// Starts a session with every role on its default variant.
    pub fn new(registry: Arc<TemplateRegistry>) -> Result<Self, EmptyCatalog> {
        let content = ContentStore::new(&registry)?;
        Ok(Self::from_parts(registry, content))
    }

    /// Session over the built-in catalogs.
    pub fn with_builtin_templates() -> Self {
        let registry = Arc::new(TemplateRegistry::builtin());
        match ContentStore::new(&registry) {
            Ok(content) => Self::from_parts(registry, content),
            Err(EmptyCatalog(role)) => unreachable!("built-in catalog for {role} is empty"),
        }
    }

    fn from_parts(registry: Arc<TemplateRegistry>, content: ContentStore) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "started carousel session");
        Self {
            id,
            registry,
            current: 0,
            content,
            settings: SettingsModel::new(),
            backgrounds: [None, None, None],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    // --- Navigation ---

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_role(&self) -> SlideRole {
        SlideRole::ALL[self.current]
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current as isize + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.current as isize - 1)
    }

    /// Jumps to a slide; out-of-range indices clamp to the first or last.
    pub fn go_to(&mut self, index: isize) -> usize {
        self.current = index.clamp(0, LAST_INDEX as isize) as usize;
        self.current
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current < LAST_INDEX
    }

    // --- Variants and content ---

    /// Selects a variant; unknown ids resolve to the role's default.
    pub fn select_variant(&mut self, role: SlideRole, variant: &str) -> &'static Template {
        let template = match self.registry.resolve(role, variant) {
            Ok(template) => template,
            // The store was built from this registry, so the role has a catalog.
            Err(_) => self.content.active_variant(role),
        };
        self.content.activate(template);
        debug!(%role, variant = template.id, "selected variant");
        template
    }

    pub fn selected_variant(&self, role: SlideRole) -> &'static Template {
        self.content.active_variant(role)
    }

    /// Content of the role's selected variant, defaults included.
    pub fn content(&self, role: SlideRole) -> Content {
        match self.content.get_content(role) {
            Some(content) => content.clone(),
            None => self.selected_variant(role).default_content(),
        }
    }

    /// Content bucket of any variant of the role that was activated before.
    pub fn content_for(&self, role: SlideRole, variant: &str) -> Option<&Content> {
        self.content.content_for(role, variant)
    }

    pub fn set_field(&mut self, role: SlideRole, field: &str, value: impl Into<FieldValue>) {
        self.content.set_field(role, field, value.into());
    }

    /// Restores the selected variant's canonical content.
    pub fn reset_content(&mut self, role: SlideRole) {
        self.content.reset_to_default(self.selected_variant(role));
    }

    // --- Settings ---

    pub fn settings(&self) -> &Settings {
        self.settings.get()
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> &Settings {
        self.settings.update(patch)
    }

    // --- Backgrounds ---

    /// Replaces exactly one role's background; `None` removes it.
    pub fn set_background_image(&mut self, role: SlideRole, image: Option<BackgroundImage>) {
        debug!(%role, present = image.is_some(), "background image changed");
        self.backgrounds[role.index()] = image;
    }

    pub fn background_image(&self, role: SlideRole) -> Option<&BackgroundImage> {
        self.backgrounds[role.index()].as_ref()
    }

    // --- Composition ---

    /// Renders one role from current state.
    pub fn compose(&self, role: SlideRole) -> ComposedArtifact {
        let template = self.selected_variant(role);
        let content = self.content(role);
        template.render(self.background_image(role), &content, self.settings())
    }

    /// Renders all three roles in carousel order.
    pub fn get_composed_slides(&self) -> [ComposedArtifact; 3] {
        SlideRole::ALL.map(|role| self.compose(role))
    }

    /// Mounts full-size copies of all slides for export.
    pub fn mount_offscreen(&self, stage: &mut OffscreenStage) {
        for artifact in self.get_composed_slides() {
            stage.mount(&artifact);
        }
    }
}
