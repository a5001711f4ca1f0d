//! Off-screen stage - full-size render targets read by the exporter
//!
//! The composer mounts one full-size SVG document per slide under a
//! stable node id. Export reads nodes by id and never renders on its own.

use std::collections::HashMap;

use crate::artifact::ComposedArtifact;
use crate::role::SlideRole;
use crate::svg::render_svg;

/// Node id of a slide's full-size render target.
pub fn node_id(index: usize) -> String {
    format!("lead-magnet-slide-{}", index + 1)
}

/// A mounted, full-size rendering of one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedNode {
    pub id: String,
    pub role: SlideRole,
    pub variant: String,
    pub width: u32,
    pub height: u32,
    pub svg: String,
}

impl MountedNode {
    pub fn from_artifact(artifact: &ComposedArtifact) -> Self {
        Self {
            id: node_id(artifact.role.index()),
            role: artifact.role,
            variant: artifact.variant.clone(),
            width: artifact.width,
            height: artifact.height,
            svg: render_svg(artifact),
        }
    }
}

#[derive(Debug, Default)]
pub struct OffscreenStage {
    nodes: HashMap<String, MountedNode>,
}

impl OffscreenStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts or replaces the node for the artifact's role.
    pub fn mount(&mut self, artifact: &ComposedArtifact) {
        let node = MountedNode::from_artifact(artifact);
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn unmount(&mut self, id: &str) -> Option<MountedNode> {
        self.nodes.remove(id)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn locate(&self, id: &str) -> Option<&MountedNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Content;
    use crate::settings::Settings;
    use crate::templates::TemplateRegistry;

    #[test]
    fn test_node_ids_are_one_based() {
        assert_eq!(node_id(0), "lead-magnet-slide-1");
        assert_eq!(node_id(2), "lead-magnet-slide-3");
    }

    #[test]
    fn test_mount_replaces_in_place() {
        let registry = TemplateRegistry::builtin();
        let settings = Settings::default();
        let mut stage = OffscreenStage::new();

        let first = registry.resolve(SlideRole::Body, "checklist").unwrap();
        stage.mount(&first.render(None, &Content::new(), &settings));
        let second = registry.resolve(SlideRole::Body, "quote").unwrap();
        stage.mount(&second.render(None, &Content::new(), &settings));

        assert_eq!(stage.len(), 1);
        let node = stage.locate("lead-magnet-slide-2").unwrap();
        assert_eq!(node.variant, "quote");
        assert!(node.svg.starts_with("<svg"));
    }

    #[test]
    fn test_unmounted_node_is_missing() {
        let registry = TemplateRegistry::builtin();
        let mut stage = OffscreenStage::new();
        let hook = registry.default_for(SlideRole::Hook).unwrap();
        stage.mount(&hook.render(None, &Content::new(), &Settings::default()));
        assert!(stage.unmount("lead-magnet-slide-1").is_some());
        assert!(stage.locate("lead-magnet-slide-1").is_none());
    }
}
