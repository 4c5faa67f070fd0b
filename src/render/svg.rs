use std::fmt::Write as _;

use crate::{
    foundation::core::Affine,
    scene::model::{Element, Paint, Scene, Shape, TextAnchor},
};

const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Serialize a scene snapshot as a standalone SVG document.
///
/// Entrances are ignored; callers sample the scene first.
#[tracing::instrument(skip(scene), fields(elements = scene.elements.len()))]
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(256 + scene.elements.len() * 160);
    let w = num(scene.surface.width);
    let h = num(scene.surface.height);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    if let Some(bg) = scene.background {
        let _ = writeln!(
            out,
            r#"<rect width="{w}" height="{h}" fill="{}"{}/>"#,
            bg.to_hex_rgb(),
            alpha_attr("fill-opacity", bg.alpha_f64())
        );
    }
    for element in &scene.elements {
        write_element(&mut out, element, 1);
    }
    out.push_str("</svg>\n");
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    let id = escape(&element.key);
    let paint = paint_attrs(&element.paint);
    match &element.shape {
        Shape::Rect {
            rect,
            corner_radius,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<rect data-key="{id}" x="{}" y="{}" width="{}" height="{}" rx="{}"{paint}/>"#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width().max(0.0)),
                num(rect.height().max(0.0)),
                num(*corner_radius)
            );
        }
        Shape::Circle { center, radius } => {
            let _ = writeln!(
                out,
                r#"{indent}<circle data-key="{id}" cx="{}" cy="{}" r="{}"{paint}/>"#,
                num(center.x),
                num(center.y),
                num(radius.max(0.0))
            );
        }
        Shape::Arc(arc) => {
            let _ = writeln!(
                out,
                r#"{indent}<path data-key="{id}" d="{}"{paint}/>"#,
                arc.to_path().to_svg()
            );
        }
        Shape::Path(path) => {
            let _ = writeln!(
                out,
                r#"{indent}<path data-key="{id}" d="{}"{paint}/>"#,
                path.to_svg()
            );
        }
        Shape::Line { from, to } => {
            let _ = writeln!(
                out,
                r#"{indent}<line data-key="{id}" x1="{}" y1="{}" x2="{}" y2="{}"{paint}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
        }
        Shape::Text { at, content, style } => {
            let anchor = match style.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = writeln!(
                out,
                r#"{indent}<text data-key="{id}" x="{}" y="{}" dy="{}em" font-family="{FONT_FAMILY}" font-size="{}" font-weight="{}" text-anchor="{anchor}"{paint}>{}</text>"#,
                num(at.x),
                num(at.y),
                num(style.dy_em),
                num(style.size),
                style.weight,
                escape(content)
            );
        }
        Shape::Image { href, rect } => {
            let _ = writeln!(
                out,
                r#"{indent}<image data-key="{id}" href="{}" xlink:href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"{paint}/>"#,
                escape(href),
                escape(href),
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height())
            );
        }
        Shape::Group {
            transform,
            children,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<g data-key="{id}"{}{}>"#,
                transform_attr(*transform),
                alpha_attr("opacity", element.paint.opacity)
            );
            for child in children {
                write_element(out, child, depth + 1);
            }
            let _ = writeln!(out, "{indent}</g>");
        }
    }
}

fn paint_attrs(paint: &Paint) -> String {
    let mut s = String::new();
    match paint.fill {
        Some(c) => {
            let _ = write!(s, r#" fill="{}""#, c.to_hex_rgb());
            s.push_str(&alpha_attr("fill-opacity", c.alpha_f64()));
        }
        None => s.push_str(r#" fill="none""#),
    }
    if let Some(c) = paint.stroke {
        let _ = write!(
            s,
            r#" stroke="{}" stroke-width="{}""#,
            c.to_hex_rgb(),
            num(paint.stroke_width)
        );
        s.push_str(&alpha_attr("stroke-opacity", c.alpha_f64()));
        if let Some(dash) = &paint.dash {
            let parts: Vec<String> = dash.iter().map(|d| num(*d)).collect();
            let _ = write!(
                s,
                r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
                parts.join(","),
                num(paint.dash_offset)
            );
        }
    }
    s.push_str(&alpha_attr("opacity", paint.opacity));
    s
}

fn alpha_attr(name: &str, value: f64) -> String {
    if value >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(value.max(0.0)))
    }
}

fn transform_attr(t: Affine) -> String {
    if t == Affine::IDENTITY {
        return String::new();
    }
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!(
        r#" transform="matrix({} {} {} {} {} {})""#,
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

/// Fixed two-decimal rendering with trailing zeros trimmed.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
