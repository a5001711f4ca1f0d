//! Contract Invariant Tests
//!
//! These tests verify the composition guarantees through the public API.

use carousel_core::{
    layout::{fit_hook_text, line_count, TITLE_SCALE, CANVAS_HEIGHT, CANVAS_WIDTH},
    settings::{HOOK_FONT_SIZE_RANGE, OVERLAY_DARKNESS_RANGE},
    ExportConfig, FieldValue, SettingsModel, SettingsPatch, SlideComposer, SlideRole, TemplateRegistry,
    TextPosition,
};

#[test]
fn invariant_variant_content_is_isolated() {
    let mut composer = SlideComposer::with_builtin_templates();

    composer.select_variant(SlideRole::Hook, "statement");
    composer.set_field(SlideRole::Hook, "mainText", "A");
    composer.select_variant(SlideRole::Hook, "problem");
    composer.set_field(SlideRole::Hook, "mainText", "B");
    composer.select_variant(SlideRole::Hook, "statement");

    assert_eq!(composer.content(SlideRole::Hook).get("mainText"), Some(&FieldValue::text("A")));
    assert_eq!(
        composer.content_for(SlideRole::Hook, "problem").and_then(|c| c.get("mainText")),
        Some(&FieldValue::text("B"))
    );
}

#[test]
fn invariant_roles_never_share_content() {
    let mut composer = SlideComposer::with_builtin_templates();
    let body_before = composer.content(SlideRole::Body);
    let reward_before = composer.content(SlideRole::Reward);

    composer.set_field(SlideRole::Hook, "title", "Alleen de hook");

    assert_eq!(composer.content(SlideRole::Body), body_before);
    assert_eq!(composer.content(SlideRole::Reward), reward_before);
}

#[test]
fn invariant_settings_are_clamped_not_rejected() {
    let mut model = SettingsModel::new();
    let settings = model.update(SettingsPatch {
        overlay_darkness: Some(95),
        font_size: Some(10),
        body_font_size: Some(1_000),
        cta_size: Some(-5),
        ..Default::default()
    });

    assert_eq!(settings.shared.overlay_darkness, OVERLAY_DARKNESS_RANGE.1);
    assert_eq!(settings.hook.font_size, HOOK_FONT_SIZE_RANGE.0);
    assert_eq!(settings.body.font_size, 52);
    assert_eq!(settings.reward.cta_size, 72);
}

#[test]
fn invariant_overlay_darkness_snaps_to_steps() {
    let mut model = SettingsModel::new();
    for (requested, stored) in [(-20, 0), (4, 0), (36, 40), (55, 60), (79, 80)] {
        let settings = model.update(SettingsPatch { overlay_darkness: Some(requested), ..Default::default() });
        assert_eq!(settings.shared.overlay_darkness, stored, "requested {requested}");
    }
}

#[test]
fn invariant_layout_is_monotonic() {
    let mut text = String::new();
    let mut previous = TITLE_SCALE.size_for(&text);
    for _ in 0..80 {
        text.push('x');
        let size = TITLE_SCALE.size_for(&text);
        assert!(size <= previous);
        assert!((TITLE_SCALE.min..=TITLE_SCALE.max).contains(&size));
        previous = size;
    }

    let mut hook = String::from("Regel");
    let mut previous = fit_hook_text(&hook, 160, 1_000.0).font_size;
    for _ in 0..10 {
        hook.push_str("\nRegel");
        let size = fit_hook_text(&hook, 160, 1_000.0).font_size;
        assert!(size <= previous);
        previous = size;
    }
}

#[test]
fn invariant_line_count_counts_explicit_breaks() {
    assert_eq!(line_count(""), 0);
    assert_eq!(line_count("Een"), 1);
    assert_eq!(line_count("Een\n\nDrie"), 3);
}

#[test]
fn invariant_unknown_variant_falls_back_to_default() {
    let registry = TemplateRegistry::builtin();
    for role in SlideRole::ALL {
        let fallback = registry.resolve(role, "nonexistent-id").unwrap();
        let default = registry.default_for(role).unwrap();
        assert_eq!(fallback.id, default.id);
    }

    let mut composer = SlideComposer::with_builtin_templates();
    composer.select_variant(SlideRole::Body, "nonexistent-id");
    assert_eq!(composer.compose(SlideRole::Body).variant, "checklist");
}

#[test]
fn invariant_composition_is_deterministic() {
    let mut composer = SlideComposer::with_builtin_templates();
    composer.select_variant(SlideRole::Reward, "free-guide");
    composer.update_settings(SettingsPatch { spacing: Some(carousel_core::Spacing::Spacious), ..Default::default() });

    let first = composer.get_composed_slides();
    let second = composer.get_composed_slides();
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}

#[test]
fn invariant_settings_survive_variant_switches() {
    let mut composer = SlideComposer::with_builtin_templates();
    composer.update_settings(SettingsPatch { button_text: Some("DM 'GIDS'".into()), ..Default::default() });
    composer.select_variant(SlideRole::Reward, "follow");
    composer.select_variant(SlideRole::Reward, "dm-word");
    assert_eq!(composer.settings().reward.button_text, "DM 'GIDS'");
}

#[test]
fn invariant_every_variant_fills_the_canvas() {
    let registry = TemplateRegistry::builtin();
    let mut composer = SlideComposer::with_builtin_templates();
    for role in SlideRole::ALL {
        for template in registry.variants(role) {
            composer.select_variant(role, template.id);
            let artifact = composer.compose(role);
            assert_eq!(artifact.role, role);
            assert_eq!(artifact.variant, template.id);
            assert_eq!((artifact.width, artifact.height), (CANVAS_WIDTH, CANVAS_HEIGHT));
        }
    }
}

#[test]
fn invariant_oversized_content_never_leaves_the_canvas() {
    let registry = TemplateRegistry::builtin();
    let long_text = vec!["Dit is een hele lange regel"; 12].join("\n");
    let long_list: Vec<String> = (1..=25).map(|i| format!("{i}0%|Onderdeel {i}")).collect();

    for position in [TextPosition::Top, TextPosition::Center, TextPosition::Bottom] {
        let mut composer = SlideComposer::with_builtin_templates();
        composer.update_settings(SettingsPatch {
            text_position: Some(position),
            font_size: Some(160),
            body_font_size: Some(52),
            cta_size: Some(108),
            ..Default::default()
        });
        for role in SlideRole::ALL {
            for template in registry.variants(role) {
                composer.select_variant(role, template.id);
                for (field, value) in template.default_content() {
                    match value {
                        FieldValue::Text(_) => composer.set_field(role, &field, long_text.as_str()),
                        FieldValue::List(_) => composer.set_field(role, &field, long_list.clone()),
                    }
                }

                let artifact = composer.compose(role);
                for block in artifact.text_blocks() {
                    assert!(block.font_size > 0.0, "{}:{}", template.id, block.field);
                    assert!(block.y >= -0.01, "{}:{} starts at {}", template.id, block.field, block.y);
                    assert!(
                        block.y + block.height() <= CANVAS_HEIGHT as f32 + 0.01,
                        "{}:{} ends at {} ({:?})",
                        template.id,
                        block.field,
                        block.y + block.height(),
                        position
                    );
                }
            }
        }
    }
}

#[test]
fn invariant_question_hook_scenario() {
    let mut composer = SlideComposer::with_builtin_templates();
    composer.select_variant(SlideRole::Hook, "question");
    composer.set_field(SlideRole::Hook, "mainText", "Weet Jij\nWat Echt\nWerkt?");

    let hook = &composer.get_composed_slides()[0];
    assert_eq!(hook.variant, "question");
    assert_eq!(hook.line_count, Some(3));

    let size = hook.font_size("mainText").unwrap();
    let (min, max) = HOOK_FONT_SIZE_RANGE;
    assert!(size >= min as f32 && size <= max as f32);

    assert_eq!(ExportConfig::default().filename(SlideRole::Hook.index()), "lead-magnet-slide-1.png");
}
