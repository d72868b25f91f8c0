//! Concrete per-component-type renderers.
//!
//! Port offsets and bounding boxes are grounded in the original service's
//! `*_svg_renderer.py` files. All positions are local-frame, centered on the
//! component's placement position, pre-rotation.

use crate::model::circuit::{Component, Position};
use crate::render::commands::{DrawPrimitive, Style};
use crate::render::geometry::Direction;
use crate::render::registry::ComponentRenderer;

pub struct JunctionRenderer;

impl ComponentRenderer for JunctionRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["center"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![DrawPrimitive::Circle {
            center: Position::new(0.0, 0.0),
            radius: 2.0,
            style: Style::filled("black"),
        }]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(0.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (0.0, 0.0)
    }
}

pub struct ResistorRenderer;

impl ComponentRenderer for ResistorRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["left", "right"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![
            DrawPrimitive::Line {
                start: Position::new(-15.0, 0.0),
                end: Position::new(-9.0, 0.0),
                style: Style::outline(),
            },
            DrawPrimitive::Polyline {
                points: vec![
                    Position::new(-9.0, 0.0),
                    Position::new(-6.5, -4.0),
                    Position::new(-1.5, 4.0),
                    Position::new(3.5, -4.0),
                    Position::new(8.5, 4.0),
                    Position::new(9.0, 0.0),
                ],
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(9.0, 0.0),
                end: Position::new(15.0, 0.0),
                style: Style::outline(),
            },
        ]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-15.0, 0.0), Direction::Left)),
            1 => Some((Position::new(15.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (30.0, 10.0)
    }
}

pub struct LedRenderer;

impl ComponentRenderer for LedRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["left", "right"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![
            DrawPrimitive::Line {
                start: Position::new(-20.0, 0.0),
                end: Position::new(-9.0, 0.0),
                style: Style::outline(),
            },
            DrawPrimitive::Polygon {
                points: vec![
                    Position::new(-9.0, -9.0),
                    Position::new(-9.0, 9.0),
                    Position::new(9.0, 0.0),
                ],
                style: Style::filled("none"),
            },
            DrawPrimitive::Line {
                start: Position::new(9.0, -9.0),
                end: Position::new(9.0, 9.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(9.0, 0.0),
                end: Position::new(20.0, 0.0),
                style: Style::outline(),
            },
        ]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-20.0, 0.0), Direction::Left)),
            1 => Some((Position::new(20.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (40.0, 20.0)
    }
}

pub struct BatteryRenderer;

impl ComponentRenderer for BatteryRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["positive", "negative"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![
            DrawPrimitive::Line {
                start: Position::new(-15.0, 0.0),
                end: Position::new(-4.0, 0.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(-4.0, -10.0),
                end: Position::new(-4.0, 10.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(4.0, -5.0),
                end: Position::new(4.0, 5.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(4.0, 0.0),
                end: Position::new(15.0, 0.0),
                style: Style::outline(),
            },
        ]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-15.0, 0.0), Direction::Left)),
            1 => Some((Position::new(15.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (30.0, 20.0)
    }
}

pub struct CapacitorRenderer;

impl ComponentRenderer for CapacitorRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["left", "right"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![
            DrawPrimitive::Line {
                start: Position::new(-15.0, 0.0),
                end: Position::new(-3.0, 0.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(-3.0, -10.0),
                end: Position::new(-3.0, 10.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(3.0, -10.0),
                end: Position::new(3.0, 10.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(3.0, 0.0),
                end: Position::new(15.0, 0.0),
                style: Style::outline(),
            },
        ]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-15.0, 0.0), Direction::Left)),
            1 => Some((Position::new(15.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (30.0, 20.0)
    }
}

pub struct CoilRenderer;

impl ComponentRenderer for CoilRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["left", "right"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        let mut primitives = vec![DrawPrimitive::Line {
            start: Position::new(-25.0, 0.0),
            end: Position::new(-15.0, 0.0),
            style: Style::outline(),
        }];
        for i in 0..4 {
            let cx = -15.0 + 7.5 + (i as f64) * 7.5;
            primitives.push(DrawPrimitive::Circle {
                center: Position::new(cx, 0.0),
                radius: 3.75,
                style: Style::outline(),
            });
        }
        primitives.push(DrawPrimitive::Line {
            start: Position::new(15.0, 0.0),
            end: Position::new(25.0, 0.0),
            style: Style::outline(),
        });
        primitives
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-25.0, 0.0), Direction::Left)),
            1 => Some((Position::new(25.0, 0.0), Direction::Right)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (50.0, 10.0)
    }
}

pub struct TransistorNpnRenderer;

impl ComponentRenderer for TransistorNpnRenderer {
    fn ports(&self) -> &'static [&'static str] {
        &["base", "collector", "emitter"]
    }

    fn draw(&self, _component: &Component) -> Vec<DrawPrimitive> {
        vec![
            DrawPrimitive::Line {
                start: Position::new(-20.0, 0.0),
                end: Position::new(-7.0, 0.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(-7.0, -18.0),
                end: Position::new(-7.0, 18.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(-7.0, -9.0),
                end: Position::new(0.0, -30.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(-7.0, 9.0),
                end: Position::new(0.0, 30.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(0.0, -30.0),
                end: Position::new(0.0, -15.0),
                style: Style::outline(),
            },
            DrawPrimitive::Line {
                start: Position::new(0.0, 15.0),
                end: Position::new(0.0, 30.0),
                style: Style::outline(),
            },
        ]
    }

    fn port(&self, _component: &Component, index: usize) -> Option<(Position, Direction)> {
        match index {
            0 => Some((Position::new(-20.0, 0.0), Direction::Left)),
            1 => Some((Position::new(0.0, -30.0), Direction::Up)),
            2 => Some((Position::new(0.0, 30.0), Direction::Down)),
            _ => None,
        }
    }

    fn bounding_box(&self, _component: &Component) -> (f64, f64) {
        (40.0, 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::circuit::ComponentProperties;

    fn dummy_component() -> Component {
        Component {
            id: "x1".into(),
            type_name: "resistor".into(),
            properties: ComponentProperties {
                position: Some(Position::new(0.0, 0.0)),
                rotation: None,
                attributes: Default::default(),
            },
        }
    }

    #[test]
    fn resistor_ports_match_bounding_box_extents() {
        let r = ResistorRenderer;
        let c = dummy_component();
        let (width, _height) = r.bounding_box(&c);
        let (left, _) = r.port(&c, 0).unwrap();
        let (right, _) = r.port(&c, 1).unwrap();
        assert_eq!(right.x - left.x, width);
    }

    #[test]
    fn transistor_has_three_named_ports() {
        let t = TransistorNpnRenderer;
        assert_eq!(t.ports(), &["base", "collector", "emitter"]);
        let c = dummy_component();
        assert!(t.port(&c, 3).is_none());
    }
}
