//! Settings Model - shared and per-role visual parameters
//!
//! The wire contract is a single flat object (`fontSize`, `bodyFontSize`,
//! `ctaSize`, ...). Internally the values are grouped per role so field
//! names cannot collide as the catalogs grow.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const OVERLAY_DARKNESS_RANGE: (u8, u8) = (0, 80);
pub const OVERLAY_DARKNESS_STEP: u8 = 10;
pub const HOOK_FONT_SIZE_RANGE: (u32, u32) = (60, 160);
pub const BODY_FONT_SIZE_RANGE: (u32, u32) = (32, 52);
pub const CTA_SIZE_RANGE: (u32, u32) = (72, 108);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Spacing {
    /// Line-height multiplier applied to body text.
    pub fn line_height(self) -> f32 {
        match self {
            Spacing::Compact => 1.2,
            Spacing::Normal => 1.5,
            Spacing::Spacious => 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Resolved button geometry in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonMetrics {
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
}

impl ButtonSize {
    pub fn metrics(self) -> ButtonMetrics {
        match self {
            ButtonSize::Small => ButtonMetrics { width: 520.0, height: 96.0, font_size: 32.0 },
            ButtonSize::Medium => ButtonMetrics { width: 680.0, height: 120.0, font_size: 40.0 },
            ButtonSize::Large => ButtonMetrics { width: 840.0, height: 148.0, font_size: 50.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSettings {
    pub overlay_darkness: u8,
    pub text_position: TextPosition,
    pub has_subheader: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSettings {
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySettings {
    pub font_size: u32,
    pub spacing: Spacing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSettings {
    pub cta_size: u32,
    pub button_size: ButtonSize,
    pub button_text: String,
}

/// Current settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub shared: SharedSettings,
    pub hook: HookSettings,
    pub body: BodySettings,
    pub reward: RewardSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shared: SharedSettings {
                overlay_darkness: 40,
                text_position: TextPosition::Center,
                has_subheader: true,
            },
            hook: HookSettings { font_size: 110 },
            body: BodySettings { font_size: 40, spacing: Spacing::Normal },
            reward: RewardSettings {
                cta_size: 88,
                button_size: ButtonSize::Medium,
                button_text: "STUUR ME EEN DM".to_string(),
            },
        }
    }
}

impl Settings {
    /// Overlay opacity in [0, 0.8]
    pub fn overlay_opacity(&self) -> f32 {
        f32::from(self.shared.overlay_darkness) / 100.0
    }

    /// Flat view matching the external contract.
    pub fn to_flat(&self) -> FlatSettings {
        FlatSettings {
            overlay_darkness: self.shared.overlay_darkness,
            text_position: self.shared.text_position,
            has_subheader: self.shared.has_subheader,
            font_size: self.hook.font_size,
            body_font_size: self.body.font_size,
            spacing: self.body.spacing,
            cta_size: self.reward.cta_size,
            button_size: self.reward.button_size,
            button_text: self.reward.button_text.clone(),
        }
    }

    /// Patch that sets every field to its current value.
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            overlay_darkness: Some(self.shared.overlay_darkness.into()),
            text_position: Some(self.shared.text_position),
            has_subheader: Some(self.shared.has_subheader),
            font_size: Some(self.hook.font_size.into()),
            body_font_size: Some(self.body.font_size.into()),
            spacing: Some(self.body.spacing),
            cta_size: Some(self.reward.cta_size.into()),
            button_size: Some(self.reward.button_size),
            button_text: Some(self.reward.button_text.clone()),
        }
    }
}

impl Serialize for Settings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_flat().serialize(serializer)
    }
}

/// The flat settings object as read by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSettings {
    pub overlay_darkness: u8,
    pub text_position: TextPosition,
    pub has_subheader: bool,
    pub font_size: u32,
    pub body_font_size: u32,
    pub spacing: Spacing,
    pub cta_size: u32,
    pub button_size: ButtonSize,
    pub button_text: String,
}

/// Partial update; absent fields are left untouched.
///
/// Numeric fields are wide signed integers so any out-of-range request
/// can be expressed and clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_darkness: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_subheader: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_size: Option<ButtonSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

/// Holds the session's settings and applies clamped partial updates.
#[derive(Debug, Clone, Default)]
pub struct SettingsModel {
    settings: Settings,
}

impl SettingsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Shallow merge. Out-of-range numbers are clamped, never rejected.
    pub fn update(&mut self, patch: SettingsPatch) -> &Settings {
        let s = &mut self.settings;

        if let Some(v) = patch.overlay_darkness {
            s.shared.overlay_darkness = snap_darkness(v);
        }
        if let Some(v) = patch.text_position {
            s.shared.text_position = v;
        }
        if let Some(v) = patch.has_subheader {
            s.shared.has_subheader = v;
        }
        if let Some(v) = patch.font_size {
            s.hook.font_size = clamp_field("fontSize", v, HOOK_FONT_SIZE_RANGE);
        }
        if let Some(v) = patch.body_font_size {
            s.body.font_size = clamp_field("bodyFontSize", v, BODY_FONT_SIZE_RANGE);
        }
        if let Some(v) = patch.spacing {
            s.body.spacing = v;
        }
        if let Some(v) = patch.cta_size {
            s.reward.cta_size = clamp_field("ctaSize", v, CTA_SIZE_RANGE);
        }
        if let Some(v) = patch.button_size {
            s.reward.button_size = v;
        }
        if let Some(v) = patch.button_text {
            s.reward.button_text = v;
        }

        &self.settings
    }
}

fn clamp_field(field: &str, value: i64, (min, max): (u32, u32)) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    if clamped != value {
        debug!(field, requested = value, stored = clamped, "clamped settings value");
    }
    // In range of u32 after the clamp above.
    clamped as u32
}

fn snap_darkness(value: i64) -> u8 {
    let (min, max) = OVERLAY_DARKNESS_RANGE;
    let step = i64::from(OVERLAY_DARKNESS_STEP);
    let clamped = value.clamp(i64::from(min), i64::from(max));
    let snapped = ((clamped + step / 2) / step) * step;
    if snapped != value {
        debug!(field = "overlayDarkness", requested = value, stored = snapped, "clamped settings value");
    }
    snapped as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_font_size_clamps_high_and_low() {
        let mut model = SettingsModel::new();
        let s = model.update(SettingsPatch { font_size: Some(300), ..Default::default() });
        assert_eq!(s.hook.font_size, 160);
        let s = model.update(SettingsPatch { font_size: Some(-5), ..Default::default() });
        assert_eq!(s.hook.font_size, 60);
    }

    #[test]
    fn test_valid_values_stored_unchanged() {
        let mut model = SettingsModel::new();
        for x in 60..=160 {
            let s = model.update(SettingsPatch { font_size: Some(x), ..Default::default() });
            assert_eq!(i64::from(s.hook.font_size), x);
        }
    }

    #[test]
    fn test_overlay_snaps_to_step() {
        let mut model = SettingsModel::new();
        assert_eq!(
            model.update(SettingsPatch { overlay_darkness: Some(34), ..Default::default() })
                .shared.overlay_darkness,
            30
        );
        assert_eq!(
            model.update(SettingsPatch { overlay_darkness: Some(95), ..Default::default() })
                .shared.overlay_darkness,
            80
        );
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let mut model = SettingsModel::new();
        model.update(SettingsPatch { body_font_size: Some(50), ..Default::default() });
        let s = model.update(SettingsPatch {
            button_text: Some("DM 'GIDS'".to_string()),
            ..Default::default()
        });
        assert_eq!(s.body.font_size, 50);
        assert_eq!(s.reward.button_text, "DM 'GIDS'");
        assert_eq!(s.hook.font_size, 110);
    }

    #[test]
    fn test_patch_uses_flat_camel_case_names() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"fontSize": 120, "bodyFontSize": 36, "ctaSize": 999}"#).unwrap();
        let mut model = SettingsModel::new();
        let flat = model.update(patch).to_flat();
        assert_eq!((flat.font_size, flat.body_font_size, flat.cta_size), (120, 36, 108));
    }
}
