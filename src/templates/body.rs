//! Body catalog - the value slide
//!
//! Body text uses the operator's body font size and spacing, shrunk
//! uniformly when the list would not fit the remaining column height.

use crate::artifact::{Anchor, Color, ComposedArtifact, Element};
use crate::layout::{
    fit_body_block, fit_to_height, split_lines, DISPLAY_LINE_HEIGHT, QUOTE_SCALE, SUBTITLE_SCALE, TITLE_SCALE,
};
use crate::role::{Content, ContentExt, FieldValue, SlideRole};

use super::frame::{
    swipe_hint, Column, Frame, Style, ACCENT, ALERT, CENTER_X, COLUMN_HEIGHT, INK, LEFT_X, MUTED, SUCCESS,
};
use super::{fields, RenderInput, Template};

pub static TEMPLATES: [Template; 8] = [
    Template::new(SlideRole::Body, "checklist", "Checklist", "Title with checked items", checklist_defaults, render_checklist),
    Template::new(SlideRole::Body, "steps", "Steps", "Numbered steps", steps_defaults, render_steps),
    Template::new(SlideRole::Body, "comparison", "Comparison", "Without / with columns", comparison_defaults, render_comparison),
    Template::new(SlideRole::Body, "tips", "Tips", "Title, subtitle and bullet tips", tips_defaults, render_tips),
    Template::new(SlideRole::Body, "quote", "Quote", "A quote with attribution", quote_defaults, render_quote),
    Template::new(SlideRole::Body, "stats", "Stats", "Stacked statistics, `value|label` per item", stats_defaults, render_stats),
    Template::new(SlideRole::Body, "timeline", "Timeline", "Milestones on a vertical line", timeline_defaults, render_timeline),
    Template::new(SlideRole::Body, "mistakes", "Mistakes", "Common mistakes marked with crosses", mistakes_defaults, render_mistakes),
];

const SWIPE: &str = "SWIPE →";
const MIN_BODY_SIZE: f32 = 24.0;

fn checklist_defaults() -> Content {
    fields([
        ("title", FieldValue::text("Dit Werkt Wel")),
        ("items", FieldValue::list([
            "Eén duidelijke doelgroep",
            "Een gratis weggever",
            "Een simpel DM-woord",
            "Elke week dezelfde dag posten",
        ])),
    ])
}

fn steps_defaults() -> Content {
    fields([
        ("title", FieldValue::text("In 3 Stappen")),
        ("steps", FieldValue::list([
            "Kies één probleem",
            "Maak er een gratis gids van",
            "Vraag om een DM",
        ])),
    ])
}

fn comparison_defaults() -> Content {
    fields([
        ("title", FieldValue::text("Het Verschil")),
        ("leftLabel", FieldValue::text("ZONDER")),
        ("leftItems", FieldValue::list(["Losse tips", "Geen leads", "Gokken"])),
        ("rightLabel", FieldValue::text("MET")),
        ("rightItems", FieldValue::list(["Eén systeem", "Dagelijks DM's", "Voorspelbaar"])),
    ])
}

fn tips_defaults() -> Content {
    fields([
        ("title", FieldValue::text("3 Snelle Tips")),
        ("subtitle", FieldValue::text("Direct toe te passen")),
        ("tips", FieldValue::list([
            "Begin met het resultaat",
            "Eén idee per slide",
            "Eindig met een vraag",
        ])),
    ])
}

fn quote_defaults() -> Content {
    fields([
        ("quote", FieldValue::text("Mensen kopen geen\ncoaching. Ze kopen\nhet resultaat.")),
        ("author", FieldValue::text("— Jouw Naam")),
    ])
}

fn stats_defaults() -> Content {
    fields([
        ("title", FieldValue::text("De Cijfers")),
        ("stats", FieldValue::list(["87%|meer reacties", "3x|meer DM's", "12|nieuwe klanten"])),
    ])
}

fn timeline_defaults() -> Content {
    fields([
        ("title", FieldValue::text("Het Traject")),
        ("milestones", FieldValue::list([
            "Week 1: Doelgroep kiezen",
            "Week 2: Weggever maken",
            "Week 3: Eerste carrousel",
            "Week 4: Eerste klant",
        ])),
    ])
}

fn mistakes_defaults() -> Content {
    fields([
        ("title", FieldValue::text("Vermijd Dit")),
        ("mistakes", FieldValue::list([
            "Alles tegelijk willen",
            "Geen call-to-action",
            "Te veel tekst per slide",
        ])),
    ])
}

fn title(col: &mut Column, input: &RenderInput<'_>) {
    let text = input.content.text("title");
    if text.is_empty() {
        return;
    }
    let size = TITLE_SCALE.size_for(&text);
    col.text("title", split_lines(&text), Style::display(size, Color::WHITE));
    col.gap(56.0);
}

/// Body text size for `items` given what is left of the column.
fn body_size(col: &Column, input: &RenderInput<'_>, items: &[String], reserve: f32) -> f32 {
    let body = &input.settings.body;
    let available = COLUMN_HEIGHT - col.height() - reserve;
    fit_body_block(items, body.font_size, body.spacing.line_height(), available, MIN_BODY_SIZE)
}

fn marker_list(frame: &mut Frame, input: &RenderInput<'_>, field: &str, marker: Color, glyph: impl Fn(usize) -> String) {
    let mut col = Column::new();
    title(&mut col, input);

    let items = input.content.items(field);
    let size = body_size(&col, input, &items, 0.0);
    let style = Style::body(size, input.settings.body.spacing.line_height());
    for (i, item) in items.iter().enumerate() {
        col.marker_row(field, &glyph(i), marker, item, style);
    }
    frame.size(field, size);
    frame.place(col);
}

fn render_checklist(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "checklist", INK);
    marker_list(&mut frame, input, "items", SUCCESS, |_| "✓".to_string());
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_steps(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "steps", INK);
    marker_list(&mut frame, input, "steps", ACCENT, |i| (i + 1).to_string());
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_mistakes(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "mistakes", INK);
    marker_list(&mut frame, input, "mistakes", ALERT, |_| "✕".to_string());
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_tips(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "tips", INK);
    let mut col = Column::new();
    title(&mut col, input);

    let subtitle = input.content.text("subtitle");
    if !subtitle.is_empty() {
        // Pull the subtitle up under the title.
        col.gap(-32.0);
        col.text("subtitle", vec![subtitle.clone()], Style::label(SUBTITLE_SCALE.size_for(&subtitle), MUTED));
        col.gap(48.0);
    }

    let tips = input.content.items("tips");
    let size = body_size(&col, input, &tips, 0.0);
    let style = Style::body(size, input.settings.body.spacing.line_height());
    for tip in &tips {
        col.marker_row("tips", "", ACCENT, tip, style);
    }
    frame.size("tips", size);
    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_comparison(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "comparison", INK);
    let mut col = Column::new();
    title(&mut col, input);

    let left_items = input.content.items("leftItems");
    let right_items = input.content.items("rightItems");
    let label_style = Style::label(36.0, Color::WHITE).weight(800).anchored(Anchor::Start);
    let label_height = label_style.font_size * label_style.line_height + 24.0;

    let longest = if left_items.len() >= right_items.len() { &left_items } else { &right_items };
    let size = body_size(&col, input, longest, label_height).min(input.settings.body.font_size as f32 * 0.9);
    let style = Style::body(size, input.settings.body.spacing.line_height());

    let right_x = CENTER_X + 20.0;
    let top = col.cursor();
    for (x, label_field, label_fill, items) in [
        (LEFT_X, "leftLabel", ALERT, &left_items),
        (right_x, "rightLabel", SUCCESS, &right_items),
    ] {
        let label = input.content.text(label_field);
        col.overlay(Element::Rect {
            x,
            y: top,
            width: CENTER_X - LEFT_X - 40.0,
            height: 8.0,
            radius: 4.0,
            fill: label_fill,
            opacity: 1.0,
        });
        col.advance(16.0);
        col.text_at(label_field, vec![label], x, label_style);
        col.advance(label_height - 16.0);
        col.text_at(if x == LEFT_X { "leftItems" } else { "rightItems" }, items.to_vec(), x, style);
        col.advance(top - col.cursor());
    }
    let rows = left_items.len().max(right_items.len()) as f32;
    col.advance(label_height + rows * size * style.line_height);

    frame.size("leftItems", size);
    frame.size("rightItems", size);
    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_quote(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "quote", INK);
    let mut col = Column::new();

    col.text("mark", vec!["“".to_string()], Style::display(180.0, ACCENT));
    col.gap(-60.0);

    // Author line and its gap stay below the quote.
    let quote = input.content.text("quote");
    let lines = split_lines(&quote);
    let available = COLUMN_HEIGHT - col.height() - 110.0;
    let size = fit_to_height(
        QUOTE_SCALE.size_for(&quote),
        lines.len(),
        DISPLAY_LINE_HEIGHT,
        available,
        QUOTE_SCALE.min,
        QUOTE_SCALE.max,
    );
    col.text("quote", lines, Style::display(size, Color::WHITE).weight(700).italic());
    col.gap(48.0);

    let author = input.content.text("author");
    col.text("author", vec![author.clone()], Style::label(SUBTITLE_SCALE.size_for(&author), MUTED));

    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_stats(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "stats", INK);
    let mut col = Column::new();
    title(&mut col, input);

    let stats: Vec<(String, String)> = input
        .content
        .items("stats")
        .into_iter()
        .map(|s| match s.split_once('|') {
            Some((value, label)) => (value.trim().to_string(), label.trim().to_string()),
            None => (s.trim().to_string(), String::new()),
        })
        .collect();

    // Each stat is a value line plus a label line.
    let rows: Vec<String> = stats.iter().flat_map(|(v, l)| [v.clone(), l.clone()]).collect();
    let size = body_size(&col, input, &rows, 0.0);
    let value_size = (size * 2.2).floor();
    let per_stat = value_size * 1.1 + size * 1.3 + 32.0;
    let value_size = if stats.is_empty() {
        value_size
    } else {
        let available = (COLUMN_HEIGHT - col.height()).max(0.0);
        let needed = per_stat * stats.len() as f32;
        if needed > available { (value_size * available / needed).floor().max(MIN_BODY_SIZE) } else { value_size }
    };

    for (value, label) in &stats {
        col.text("statValue", vec![value.clone()], Style::display(value_size, ACCENT));
        if !label.is_empty() {
            col.text("statLabel", vec![label.clone()], Style::label(size, Color::WHITE).weight(500));
        }
        col.gap(32.0);
    }
    frame.size("stats", size);
    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}

fn render_timeline(input: &RenderInput<'_>) -> ComposedArtifact {
    let mut frame = Frame::new(input, "timeline", INK);
    let mut col = Column::new();
    title(&mut col, input);

    let milestones = input.content.items("milestones");
    let size = body_size(&col, input, &milestones, 0.0);
    let style = Style::body(size, input.settings.body.spacing.line_height());

    let top = col.cursor();
    let row = size * style.line_height;
    let r = size * 0.55;
    if milestones.len() > 1 {
        col.overlay(Element::Rect {
            x: LEFT_X + r - 3.0,
            y: top + row / 2.0,
            width: 6.0,
            height: row * (milestones.len() - 1) as f32,
            radius: 3.0,
            fill: MUTED,
            opacity: 0.6,
        });
    }
    for milestone in &milestones {
        col.marker_row("milestones", "", ACCENT, milestone, style);
    }
    frame.size("milestones", size);
    frame.place(col);
    swipe_hint(&mut frame, SWIPE);
    frame.finish()
}
