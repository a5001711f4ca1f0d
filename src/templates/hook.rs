//! Hook catalog - the scroll-stopping first slide

use crate::artifact::{Color, ComposedArtifact, Element};
use crate::layout::{fit_hook_text, split_lines, CALLOUT_SCALE, SUBTITLE_SCALE, TITLE_SCALE};
use crate::role::{ContentExt, FieldValue, SlideRole};

use super::frame::{swipe_hint, Column, Frame, Style, ACCENT, ALERT, CENTER_X, COLUMN_HEIGHT, INK, MUTED};
use super::{fields, RenderInput, Template};

pub static TEMPLATES: [Template; 5] = [
    Template::new(
        SlideRole::Hook,
        "statement",
        "Statement",
        "Bold multi-line statement with an accent rule",
        statement_defaults,
        render_statement,
    ),
    Template::new(
        SlideRole::Hook,
        "problem",
        "Problem",
        "Names the reader's problem under a red label",
        problem_defaults,
        render_problem,
    ),
    Template::new(
        SlideRole::Hook,
        "question",
        "Question",
        "A direct question under a question-mark badge",
        question_defaults,
        render_question,
    ),
    Template::new(
        SlideRole::Hook,
        "big-number",
        "Big Number",
        "A large statistic followed by its meaning",
        big_number_defaults,
        render_big_number,
    ),
    Template::new(
        SlideRole::Hook,
        "myth",
        "Myth Buster",
        "A struck-through myth and the correction",
        myth_defaults,
        render_myth,
    ),
];

const SWIPE: &str = "SWIPE →";

fn statement_defaults() -> crate::role::Content {
    fields([
        ("subheader", FieldValue::text("VOOR COACHES & TRAINERS")),
        ("mainText", FieldValue::text("Stop Met\nGratis\nAdvies Geven")),
    ])
}

fn problem_defaults() -> crate::role::Content {
    fields([
        ("label", FieldValue::text("HET PROBLEEM")),
        ("subheader", FieldValue::text("HERKENBAAR?")),
        ("mainText", FieldValue::text("Je Post Elke Dag\nMaar Niemand\nKoopt Iets")),
    ])
}

fn question_defaults() -> crate::role::Content {
    fields([
        ("subheader", FieldValue::text("EERLIJKE VRAAG")),
        ("mainText", FieldValue::text("Weet Jij\nWat Echt\nWerkt?")),
    ])
}

fn big_number_defaults() -> crate::role::Content {
    fields([
        ("number", FieldValue::text("93%")),
        ("subheader", FieldValue::text("VAN ALLE COACHES")),
        ("mainText", FieldValue::text("Mist Deze\nEne Stap")),
    ])
}

fn myth_defaults() -> crate::role::Content {
    fields([
        ("subheader", FieldValue::text("MYTHE")),
        ("myth", FieldValue::text("Meer posten = meer klanten")),
        ("mainText", FieldValue::text("Klopt\nNiet.")),
    ])
}

/// Optional kicker line above the main text.
fn subheader(col: &mut Column, input: &RenderInput<'_>, fill: Color) {
    if !input.settings.shared.has_subheader {
        return;
    }
    let text = input.content.text("subheader");
    if text.is_empty() {
        return;
    }
    let size = SUBTITLE_SCALE.size_for(&text);
    col.text("subheader", vec![text], Style::label(size, fill).weight(800));
    col.gap(36.0);
}

/// Free-form main text, sized into whatever height the column has left.
fn main_text(frame: &mut Frame, col: &mut Column, input: &RenderInput<'_>, reserve: f32) {
    let text = input.content.text("mainText");
    let available = COLUMN_HEIGHT - col.height() - reserve;
    let fit = fit_hook_text(&text, input.settings.hook.font_size, available);
    frame.line_count(fit.lines);
    col.text("mainText", split_lines(&text), Style::display(fit.font_size, Color::WHITE));
}

fn render_statement(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "statement", INK);
    let mut col = Column::new();

    subheader(&mut col, input, ACCENT);
    main_text(&mut frame, &mut col, input, 60.0);
    col.gap(44.0);
    col.rule(160.0, 12.0, ACCENT);

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_problem(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "problem", INK);
    let mut col = Column::new();

    let label = input.content.text("label");
    if !label.is_empty() {
        col.pill("label", &label, Style::label(SUBTITLE_SCALE.size_for(&label), Color::WHITE).weight(800), ALERT);
        col.gap(40.0);
    }
    subheader(&mut col, input, MUTED);
    main_text(&mut frame, &mut col, input, 0.0);

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_question(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "question", INK);
    let mut col = Column::new();

    let r = 70.0;
    col.overlay(Element::Circle { cx: CENTER_X, cy: r, r, fill: ACCENT });
    let glyph = Style::display(96.0, INK);
    let glyph_top = r - glyph.font_size * glyph.line_height / 2.0;
    col.advance(glyph_top);
    col.text("badge", vec!["?".to_string()], glyph);
    col.advance(2.0 * r - col.cursor());
    col.gap(40.0);

    subheader(&mut col, input, ACCENT);
    main_text(&mut frame, &mut col, input, 0.0);

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_big_number(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "big-number", INK);
    let mut col = Column::new();

    let number = input.content.text("number");
    if !number.is_empty() {
        col.text("number", vec![number.clone()], Style::display(CALLOUT_SCALE.size_for(&number), ACCENT));
        col.gap(16.0);
    }
    subheader(&mut col, input, MUTED);
    main_text(&mut frame, &mut col, input, 0.0);

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_myth(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "myth", INK);
    let mut col = Column::new();

    subheader(&mut col, input, ALERT);

    let myth = input.content.text("myth");
    if !myth.is_empty() {
        let size = TITLE_SCALE.size_for(&myth).min(56.0);
        let style = Style::label(size, MUTED).weight(600);
        let top = col.cursor();
        col.text("myth", vec![myth.clone()], style);
        let width = (myth.chars().count() as f32 * size * 0.55).min(crate::templates::frame::CONTENT_WIDTH);
        col.overlay(Element::Rect {
            x: CENTER_X - width / 2.0,
            y: top + size * style.line_height / 2.0 - 3.0,
            width,
            height: 6.0,
            radius: 3.0,
            fill: ALERT,
            opacity: 1.0,
        });
        col.gap(48.0);
    }
    main_text(&mut frame, &mut col, input, 0.0);

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}
