use std::fmt::Write as _;

use crate::render::commands::{DrawCommand, DrawPrimitive};

/// Renders a `DrawCommand` stream to an SVG document string.
///
/// Mirrors the original service's `svgwrite`, `profile="tiny"` output:
/// a fixed canvas, component groups translated/rotated into place, routed
/// wires drawn as black polylines and failed-route fallbacks as red lines.
pub fn render_svg(commands: &[DrawCommand], width: u32, height: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8"?>"#
    );
    let _ = writeln!(
        out,
        r#"<svg baseProfile="tiny" version="1.2" width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
    );

    for command in commands {
        match command {
            DrawCommand::Component {
                component_id,
                transform,
                primitives,
            } => {
                let translate = format!("translate({},{})", transform.translate.x, transform.translate.y);
                let transform_attr = if transform.rotation_deg != 0.0 {
                    format!("{translate} rotate({})", transform.rotation_deg)
                } else {
                    translate
                };
                let _ = writeln!(
                    out,
                    r#"<g id="{id}" transform="{transform_attr}">"#,
                    id = xml_escape(component_id),
                );
                for primitive in primitives {
                    write_primitive(&mut out, primitive);
                }
                let _ = writeln!(out, "</g>");
            }
            DrawCommand::Wire {
                points, failed, ..
            } => {
                let stroke = if *failed { "red" } else { "black" };
                let point_list: Vec<String> = points
                    .iter()
                    .map(|p| format!("{},{}", p.x, p.y))
                    .collect();
                let _ = writeln!(
                    out,
                    r#"<polyline points="{points}" stroke="{stroke}" fill="none" />"#,
                    points = point_list.join(" "),
                );
            }
        }
    }

    let _ = writeln!(out, "</svg>");
    out
}

fn write_primitive(out: &mut String, primitive: &DrawPrimitive) {
    match primitive {
        DrawPrimitive::Line { start, end, style } => {
            let _ = writeln!(
                out,
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{width}" />"#,
                x1 = start.x,
                y1 = start.y,
                x2 = end.x,
                y2 = end.y,
                stroke = style.stroke,
                width = style.stroke_width,
            );
        }
        DrawPrimitive::Polyline { points, style } => {
            let point_list: Vec<String> =
                points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
            let _ = writeln!(
                out,
                r#"<polyline points="{points}" stroke="{stroke}" fill="{fill}" stroke-width="{width}" />"#,
                points = point_list.join(" "),
                stroke = style.stroke,
                fill = style.fill,
                width = style.stroke_width,
            );
        }
        DrawPrimitive::Rect {
            top_left,
            size,
            style,
        } => {
            let _ = writeln!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" stroke="{stroke}" fill="{fill}" />"#,
                x = top_left.x,
                y = top_left.y,
                w = size.0,
                h = size.1,
                stroke = style.stroke,
                fill = style.fill,
            );
        }
        DrawPrimitive::Circle {
            center,
            radius,
            style,
        } => {
            let _ = writeln!(
                out,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" stroke="{stroke}" fill="{fill}" />"#,
                cx = center.x,
                cy = center.y,
                r = radius,
                stroke = style.stroke,
                fill = style.fill,
            );
        }
        DrawPrimitive::Polygon { points, style } => {
            let point_list: Vec<String> =
                points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
            let _ = writeln!(
                out,
                r#"<polygon points="{points}" stroke="{stroke}" fill="{fill}" />"#,
                points = point_list.join(" "),
                stroke = style.stroke,
                fill = style.fill,
            );
        }
    }
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
