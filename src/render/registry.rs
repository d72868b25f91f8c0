use std::collections::HashMap;

use crate::model::circuit::{Component, Position};
use crate::render::commands::DrawPrimitive;
use crate::render::geometry::Direction;
use crate::render::renderers;

/// A single component type's drawing and port geometry.
///
/// All positions returned by `draw` and `port` are in the component's local,
/// pre-rotation frame (an offset from the component's placement position);
/// the geometry service is responsible for applying rotation.
pub trait ComponentRenderer: Send + Sync {
    /// Ordered, case-sensitive symbolic port names for this component type.
    /// Index into this slice is the `port_index` connections reference.
    fn ports(&self) -> &'static [&'static str];

    /// Local-frame drawing primitives for one instance of this component.
    fn draw(&self, component: &Component) -> Vec<DrawPrimitive>;

    /// Local-frame world offset and canonical egress direction for `index`.
    fn port(&self, component: &Component, index: usize) -> Option<(Position, Direction)>;

    /// Local (unrotated) axis-aligned bounding box size, `(width, height)`.
    fn bounding_box(&self, component: &Component) -> (f64, f64);
}

/// Maps case-insensitive component type names to their renderer.
///
/// Built once, at process start, and threaded through the pipeline by
/// reference — there is no global mutable singleton.
pub struct RendererRegistry {
    renderers: HashMap<&'static str, Box<dyn ComponentRenderer>>,
}

impl RendererRegistry {
    pub fn get(&self, type_name: &str) -> Option<&dyn ComponentRenderer> {
        self.renderers
            .get(type_name.to_lowercase().as_str())
            .map(|boxed| boxed.as_ref())
    }

    /// Resolves a port name to its index for a given component type.
    pub fn port_index_by_name(&self, type_name: &str, name: &str) -> Option<usize> {
        self.get(type_name)?.ports().iter().position(|p| *p == name)
    }
}

/// Builds the static renderer table for every component type this crate
/// knows how to draw and route against.
pub fn default_registry() -> RendererRegistry {
    let mut renderers: HashMap<&'static str, Box<dyn ComponentRenderer>> = HashMap::new();
    renderers.insert("junction", Box::new(renderers::JunctionRenderer));
    renderers.insert("resistor", Box::new(renderers::ResistorRenderer));
    renderers.insert("led", Box::new(renderers::LedRenderer));
    renderers.insert("battery", Box::new(renderers::BatteryRenderer));
    renderers.insert("capacitor", Box::new(renderers::CapacitorRenderer));
    renderers.insert("coil", Box::new(renderers::CoilRenderer));
    renderers.insert("transistor_npn", Box::new(renderers::TransistorNpnRenderer));
    RendererRegistry { renderers }
}
