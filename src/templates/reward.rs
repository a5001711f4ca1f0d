//! Reward catalog - the call-to-action slide
//!
//! The CTA headline is capped by the operator's CTA size and shrinks with
//! the length of its longest line. The button uses the operator's button
//! size and text.

use crate::artifact::{Color, ComposedArtifact};
use crate::layout::{
    cta_scale, fit_body_block, fit_to_height, split_lines, CALLOUT_SCALE, DISPLAY_LINE_HEIGHT, SUBTITLE_SCALE,
};
use crate::role::{Content, ContentExt, FieldValue, SlideRole};

use super::frame::{Column, Frame, Style, ACCENT, COLUMN_HEIGHT, INK, MUTED, SUCCESS};
use super::{fields, RenderInput, Template};

pub static TEMPLATES: [Template; 7] = [
    Template::new(SlideRole::Reward, "dm-word", "DM Word", "Ask for a DM with a keyword", dm_word_defaults, render_dm_word),
    Template::new(SlideRole::Reward, "comment-word", "Comment Word", "Ask for a comment with a keyword", comment_word_defaults, render_comment_word),
    Template::new(SlideRole::Reward, "link-in-bio", "Link In Bio", "Point to the profile link", link_in_bio_defaults, render_link_in_bio),
    Template::new(SlideRole::Reward, "save-post", "Save Post", "Ask to save the carousel", save_post_defaults, render_save_post),
    Template::new(SlideRole::Reward, "follow", "Follow", "Ask to follow the account", follow_defaults, render_follow),
    Template::new(SlideRole::Reward, "free-guide", "Free Guide", "Promote a free guide with its contents", free_guide_defaults, render_free_guide),
    Template::new(SlideRole::Reward, "book-call", "Book Call", "Invite to book a call", book_call_defaults, render_book_call),
];

fn dm_word_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Wil Je De\nGratis Gids?")),
        ("instruction", FieldValue::text("Stuur me een DM met het woord")),
        ("keyword", FieldValue::text("GIDS")),
    ])
}

fn comment_word_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Wil Je Het\nStappenplan?")),
        ("instruction", FieldValue::text("Reageer hieronder met")),
        ("keyword", FieldValue::text("PLAN")),
    ])
}

fn link_in_bio_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Klaar Om\nTe Starten?")),
        ("subtitle", FieldValue::text("Alles staat klaar op één pagina")),
        ("linkLabel", FieldValue::text("LINK IN BIO")),
    ])
}

fn save_post_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Bewaar\nDeze Post")),
        ("subtitle", FieldValue::text("Zodat je hem terugvindt als je hem nodig hebt")),
    ])
}

fn follow_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Meer Van Dit?")),
        ("subtitle", FieldValue::text("Elke week een nieuwe carrousel")),
        ("handle", FieldValue::text("@jouwnaam")),
    ])
}

fn free_guide_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Gratis Gids")),
        ("guideTitle", FieldValue::text("Van Post Naar Klant")),
        ("bullets", FieldValue::list(["10 hook-formules", "Mijn DM-script", "Checklist per week"])),
    ])
}

fn book_call_defaults() -> Content {
    fields([
        ("ctaText", FieldValue::text("Samen\nSparren?")),
        ("subtitle", FieldValue::text("Gratis kennismakingsgesprek van 20 minuten")),
        ("availability", FieldValue::text("Nog 3 plekken deze maand")),
    ])
}

/// Room kept under the headline: its gap, a subtitle, the largest keyword
/// and the largest button.
const BELOW_HEADLINE: f32 = 540.0;

/// Bullet size before fitting.
const BULLET_SIZE: u32 = 36;
const MIN_BULLET_SIZE: f32 = 24.0;

/// CTA headline sized by its longest line and capped by its line count.
fn headline(col: &mut Column, input: &RenderInput<'_>) {
    let text = input.content.text("ctaText");
    let lines = split_lines(&text);
    let longest = lines.iter().max_by_key(|l| l.chars().count()).cloned().unwrap_or_default();
    let scale = cta_scale(input.settings.reward.cta_size);
    let available = COLUMN_HEIGHT - col.height() - BELOW_HEADLINE;
    let size = fit_to_height(
        scale.size_for(&longest),
        lines.len(),
        DISPLAY_LINE_HEIGHT,
        available,
        scale.min,
        scale.max,
    );
    col.text("ctaText", lines, Style::display(size, Color::WHITE));
    col.gap(48.0);
}

fn subtitle(col: &mut Column, input: &RenderInput<'_>, field: &str) {
    let text = input.content.text(field);
    if text.is_empty() {
        return;
    }
    col.text(field, vec![text.clone()], Style::label(SUBTITLE_SCALE.size_for(&text), MUTED).weight(500));
    col.gap(40.0);
}

fn button(col: &mut Column, input: &RenderInput<'_>, text: &str) {
    let reward = &input.settings.reward;
    col.button("buttonText", text, reward.button_size.metrics(), ACCENT, INK);
}

fn keyword_variant(input: &RenderInput<'_>, variant: &str) -> ComposedArtifact {
    let mut frame = Frame::new(input, variant, INK);
    let mut col = Column::new();
    headline(&mut col, input);
    subtitle(&mut col, input, "instruction");

    let keyword = input.content.text("keyword");
    if !keyword.is_empty() {
        col.text("keyword", vec![keyword.clone()], Style::display(CALLOUT_SCALE.size_for(&keyword).min(180.0), ACCENT));
        col.gap(48.0);
    }
    button(&mut col, input, &input.settings.reward.button_text);

    frame.place(col);
    frame.finish()
}

fn render_dm_word(input: &RenderInput<'_>) -> ComposedArtifact {
    keyword_variant(input, "dm-word")
}

fn render_comment_word(input: &RenderInput<'_>) -> ComposedArtifact {
    keyword_variant(input, "comment-word")
}

fn render_link_in_bio(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "link-in-bio", INK);
    let mut col = Column::new();
    headline(&mut col, input);
    subtitle(&mut col, input, "subtitle");
    let label = input.content.text("linkLabel");
    button(&mut col, input, &label);
    frame.place(col);
    frame.finish()
}

fn render_save_post(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "save-post", INK);
    let mut col = Column::new();
    col.pill("icon", "🔖", Style::label(72.0, INK), ACCENT);
    col.gap(48.0);
    headline(&mut col, input);
    subtitle(&mut col, input, "subtitle");
    button(&mut col, input, &input.settings.reward.button_text);
    frame.place(col);
    frame.finish()
}

fn render_follow(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "follow", INK);
    let mut col = Column::new();
    headline(&mut col, input);
    subtitle(&mut col, input, "subtitle");
    let handle = input.content.text("handle");
    if !handle.is_empty() {
        col.text("handle", vec![handle.clone()], Style::display(SUBTITLE_SCALE.size_for(&handle) * 1.4, ACCENT));
        col.gap(48.0);
    }
    button(&mut col, input, &input.settings.reward.button_text);
    frame.place(col);
    frame.finish()
}

fn render_free_guide(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "free-guide", INK);
    let mut col = Column::new();
    headline(&mut col, input);

    let guide = input.content.text("guideTitle");
    if !guide.is_empty() {
        col.pill("guideTitle", &guide, Style::label(SUBTITLE_SCALE.size_for(&guide), INK).weight(800), ACCENT);
        col.gap(40.0);
    }
    let bullets = input.content.items("bullets");
    let button_height = input.settings.reward.button_size.metrics().height;
    let available = COLUMN_HEIGHT - col.height() - 40.0 - button_height;
    let size = fit_body_block(&bullets, BULLET_SIZE, 1.5, available, MIN_BULLET_SIZE);
    let style = Style::body(size, 1.5);
    for bullet in &bullets {
        col.marker_row("bullets", "✓", SUCCESS, bullet, style);
    }
    col.gap(40.0);
    button(&mut col, input, &input.settings.reward.button_text);
    frame.place(col);
    frame.finish()
}

fn render_book_call(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "book-call", INK);
    let mut col = Column::new();
    headline(&mut col, input);
    subtitle(&mut col, input, "subtitle");
    button(&mut col, input, &input.settings.reward.button_text);
    let availability = input.content.text("availability");
    if !availability.is_empty() {
        col.gap(32.0);
        col.text("availability", vec![availability.clone()], Style::label(30.0, ACCENT).weight(600));
    }
    frame.place(col);
    frame.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CANVAS_HEIGHT;
    use crate::settings::{ButtonSize, SettingsModel, SettingsPatch};

    fn render(template: &Template, content: Content, patch: SettingsPatch) -> ComposedArtifact {
        let mut model = SettingsModel::new();
        model.update(patch);
        template.render(None, &content, model.get())
    }

    #[test]
    fn test_cta_capped_by_setting() {
        let content = fields([("ctaText", FieldValue::text("Ja"))]);
        let patch = SettingsPatch { cta_size: Some(72), ..Default::default() };
        let artifact = render(&TEMPLATES[0], content, patch);
        assert_eq!(artifact.font_size("ctaText"), Some(72.0));
    }

    #[test]
    fn test_cta_shrinks_with_longest_line() {
        let short = fields([("ctaText", FieldValue::text("Kort\nKort"))]);
        let long = fields([("ctaText", FieldValue::text("Kort\nEen hele lange regel tekst"))]);
        let a = render(&TEMPLATES[0], short, SettingsPatch::default());
        let b = render(&TEMPLATES[0], long, SettingsPatch::default());
        assert!(a.font_size("ctaText").unwrap() > b.font_size("ctaText").unwrap());
    }

    #[test]
    fn test_cta_shrinks_with_line_count() {
        let content = fields([("ctaText", FieldValue::text(vec!["Regel"; 10].join("\n")))]);
        let artifact = render(&TEMPLATES[0], content, SettingsPatch::default());
        let size = artifact.font_size("ctaText").unwrap();
        assert!(size < 72.0);
        assert!(size >= cta_scale(72).min);
        let button = artifact.text_blocks().find(|b| b.field == "buttonText").unwrap();
        assert!(button.y + button.height() <= CANVAS_HEIGHT as f32);
    }

    #[test]
    fn test_guide_bullets_shrink_to_fit() {
        let bullets: Vec<String> = (1..=14).map(|i| format!("Onderdeel {i}")).collect();
        let content = fields([
            ("ctaText", FieldValue::text("Gratis Gids")),
            ("guideTitle", FieldValue::text("Van Post Naar Klant")),
            ("bullets", FieldValue::List(bullets)),
        ]);
        let artifact = render(&TEMPLATES[5], content, SettingsPatch::default());
        assert!(artifact.font_size("bullets").unwrap() < BULLET_SIZE as f32);
        for block in artifact.text_blocks() {
            assert!(block.y >= 0.0 && block.y + block.height() <= CANVAS_HEIGHT as f32, "{}", block.field);
        }
    }

    #[test]
    fn test_button_follows_settings() {
        let patch = SettingsPatch {
            button_size: Some(ButtonSize::Large),
            button_text: Some("DM 'START'".to_string()),
            ..Default::default()
        };
        let artifact = render(&TEMPLATES[0], Content::new(), patch);
        let button = artifact.text_blocks().find(|b| b.field == "buttonText").unwrap();
        assert_eq!(button.lines, vec!["DM 'START'".to_string()]);
        assert_eq!(button.font_size, ButtonSize::Large.metrics().font_size);
    }
}
