//! SVG master serialization
//!
//! Every artifact is written as one SVG document with a 1080×1350 viewBox.
//! Preview and raster export both consume this form.

use std::fmt::Write;

use crate::artifact::{Anchor, ComposedArtifact, Element, TextBlock};

pub const FONT_FAMILY: &str = "Montserrat, Helvetica, Arial, sans-serif";

/// Serializes an artifact at its logical size.
pub fn render_svg(artifact: &ComposedArtifact) -> String {
    render_svg_sized(artifact, artifact.width as f32, artifact.height as f32)
}

/// Serializes an artifact with the given output size; the viewBox stays logical.
pub fn render_svg_sized(artifact: &ComposedArtifact, out_width: f32, out_height: f32) -> String {
    let (w, h) = (artifact.width, artifact.height);
    let mut svg = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}" data-role="{}" data-variant="{}">"#,
        fmt_num(out_width),
        fmt_num(out_height),
        w,
        h,
        artifact.role,
        escape(&artifact.variant),
    );

    for element in &artifact.elements {
        write_element(&mut svg, element, w, h);
    }

    svg.push_str("</svg>");
    svg
}

fn write_element(svg: &mut String, element: &Element, w: u32, h: u32) {
    match element {
        Element::Background { image } => {
            let _ = write!(
                svg,
                r#"<image x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="xMidYMid slice" xlink:href="{}"/>"#,
                image.data_uri()
            );
        }
        Element::Overlay { opacity } => {
            let _ = write!(
                svg,
                r##"<rect x="0" y="0" width="{w}" height="{h}" fill="#000000" fill-opacity="{}"/>"##,
                fmt_num(*opacity)
            );
        }
        Element::Rect { x, y, width, height, radius, fill, opacity } => {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" opacity="{}"/>"#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height),
                fmt_num(*radius),
                fill.to_hex(),
                fmt_num(*opacity),
            );
        }
        Element::Circle { cx, cy, r, fill } => {
            let _ = write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(*r),
                fill.to_hex()
            );
        }
        Element::Text(block) => write_text(svg, block),
    }
}

fn write_text(svg: &mut String, block: &TextBlock) {
    let anchor = match block.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
    };
    let advance = block.font_size * block.line_height;
    // First baseline sits one ascent below the block top.
    let first_baseline = block.y + block.font_size * 0.8 + (advance - block.font_size) / 2.0;

    let _ = write!(
        svg,
        r#"<text data-field="{}" x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" text-anchor="{}" fill="{}">"#,
        escape(&block.field),
        fmt_num(block.x),
        fmt_num(first_baseline),
        FONT_FAMILY,
        fmt_num(block.font_size),
        block.weight,
        if block.italic { "italic" } else { "normal" },
        anchor,
        block.fill.to_hex(),
    );
    for (i, line) in block.lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { advance };
        let _ = write!(
            svg,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            fmt_num(block.x),
            fmt_num(dy),
            escape(line)
        );
    }
    svg.push_str("</text>");
}

fn fmt_num(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

/// XML text/attribute escaping.
///
/// Characters XML 1.0 cannot carry at all (most C0 controls, U+FFFE,
/// U+FFFF) are dropped.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}
