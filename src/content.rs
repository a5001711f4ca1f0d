//! Content Store - one content bucket per (role, variant)
//!
//! Switching variants never erases another variant's edits. A bucket is
//! seeded from the variant's defaults the first time the pair is activated.

use std::collections::HashMap;

use crate::role::{Content, FieldValue, SlideRole};
use crate::templates::{EmptyCatalog, Template, TemplateRegistry};

#[derive(Debug)]
pub struct ContentStore {
    buckets: HashMap<(SlideRole, &'static str), Content>,
    /// Active variant per role, indexed by role position
    active: [&'static Template; 3],
}

impl ContentStore {
    /// Store with every role's default variant active and seeded.
    pub fn new(registry: &TemplateRegistry) -> Result<Self, EmptyCatalog> {
        let default = |role| registry.default_for(role).ok_or(EmptyCatalog(role));
        let active = [
            default(SlideRole::Hook)?,
            default(SlideRole::Body)?,
            default(SlideRole::Reward)?,
        ];
        let mut store = Self { buckets: HashMap::new(), active };
        for template in active {
            store.activate(template);
        }
        Ok(store)
    }

    /// Makes `template` the active variant of its role, seeding on first use.
    pub fn activate(&mut self, template: &'static Template) {
        if !self.buckets.contains_key(&(template.role, template.id)) {
            self.reset_to_default(template);
        }
        self.active[template.role.index()] = template;
    }

    pub fn active_variant(&self, role: SlideRole) -> &'static Template {
        self.active[role.index()]
    }

    /// Content of the role's active variant.
    pub fn get_content(&self, role: SlideRole) -> Option<&Content> {
        self.buckets.get(&(role, self.active_variant(role).id))
    }

    /// Bucket of a specific variant, if it was ever activated.
    pub fn content_for(&self, role: SlideRole, variant: &str) -> Option<&Content> {
        self.buckets
            .iter()
            .find(|((r, v), _)| *r == role && *v == variant)
            .map(|(_, content)| content)
    }

    /// Writes one field of the active bucket. Values are accepted as-is.
    pub fn set_field(&mut self, role: SlideRole, field: &str, value: FieldValue) {
        let template = self.active_variant(role);
        self.buckets
            .entry((role, template.id))
            .or_insert_with(|| template.default_content())
            .insert(field.to_string(), value);
    }

    /// Replaces a variant's bucket with its canonical defaults.
    pub fn reset_to_default(&mut self, template: &'static Template) {
        self.buckets.insert((template.role, template.id), template.default_content());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_is_rejected() {
        let err = ContentStore::new(&TemplateRegistry::new()).unwrap_err();
        assert_eq!(err.0, SlideRole::Hook);
    }

    #[test]
    fn test_new_store_seeds_role_defaults() {
        let registry = TemplateRegistry::builtin();
        let store = ContentStore::new(&registry).unwrap();
        for role in SlideRole::ALL {
            let template = store.active_variant(role);
            assert_eq!(store.get_content(role), Some(&template.default_content()));
        }
    }

    #[test]
    fn test_variant_buckets_are_isolated() {
        let registry = TemplateRegistry::builtin();
        let mut store = ContentStore::new(&registry).unwrap();
        let statement = registry.get(SlideRole::Hook, "statement").unwrap();
        let problem = registry.get(SlideRole::Hook, "problem").unwrap();

        store.set_field(SlideRole::Hook, "mainText", FieldValue::text("A"));
        store.activate(problem);
        store.set_field(SlideRole::Hook, "mainText", FieldValue::text("B"));
        store.activate(statement);

        let content = store.get_content(SlideRole::Hook).unwrap();
        assert_eq!(content.get("mainText"), Some(&FieldValue::text("A")));
        let problem_content = store.content_for(SlideRole::Hook, "problem").unwrap();
        assert_eq!(problem_content.get("mainText"), Some(&FieldValue::text("B")));
    }

    #[test]
    fn test_reactivation_does_not_reseed() {
        let registry = TemplateRegistry::builtin();
        let mut store = ContentStore::new(&registry).unwrap();
        let steps = registry.get(SlideRole::Body, "steps").unwrap();
        store.activate(steps);
        store.set_field(SlideRole::Body, "title", FieldValue::text("Mijn titel"));
        store.activate(steps);
        assert_eq!(
            store.get_content(SlideRole::Body).unwrap().get("title"),
            Some(&FieldValue::text("Mijn titel"))
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let registry = TemplateRegistry::builtin();
        let mut store = ContentStore::new(&registry).unwrap();
        store.set_field(SlideRole::Reward, "keyword", FieldValue::text("START"));
        let dm_word = registry.get(SlideRole::Reward, "dm-word").unwrap();
        store.reset_to_default(dm_word);
        assert_eq!(store.get_content(SlideRole::Reward), Some(&dm_word.default_content()));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let registry = TemplateRegistry::builtin();
        let mut store = ContentStore::new(&registry).unwrap();
        store.set_field(SlideRole::Body, "note", FieldValue::list(["x"]));
        assert!(store.get_content(SlideRole::Body).unwrap().contains_key("note"));
    }
}
