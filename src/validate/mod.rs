use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graphmap::UnGraphMap;
use serde::Serialize;

use crate::model::circuit::{Circuit, Component, ConnectionEndpoint, PortRef};
use crate::render::registry::RendererRegistry;

/// The closed set of diagnostic categories the validator can report.
///
/// Identifiers match the host contract's fixed error-code strings exactly
/// (`VISUAL_COMPONENT_OVERLAP`, ...), since callers match on these by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "VISUAL_COMPONENT_OVERLAP")]
    OverlappingComponents,
    #[serde(rename = "VISUAL_MINIMUM_SPACING")]
    MinimumSpacingViolation,
    #[serde(rename = "VISUAL_CONVENTION_VCC_HIGH")]
    LayoutConvention,
    #[serde(rename = "LOGIC_FLOATING_PORT")]
    FloatingPort,
    #[serde(rename = "LOGIC_SHORT_CIRCUIT")]
    ShortCircuit,
    #[serde(rename = "LOGIC_NO_POWER_LOOP")]
    NoPowerLoop,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorCode::OverlappingComponents => "VISUAL_COMPONENT_OVERLAP",
            ErrorCode::MinimumSpacingViolation => "VISUAL_MINIMUM_SPACING",
            ErrorCode::LayoutConvention => "VISUAL_CONVENTION_VCC_HIGH",
            ErrorCode::FloatingPort => "LOGIC_FLOATING_PORT",
            ErrorCode::ShortCircuit => "LOGIC_SHORT_CIRCUIT",
            ErrorCode::NoPowerLoop => "LOGIC_NO_POWER_LOOP",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
    pub component_ids: Vec<String>,
}

const MIN_SPACING: f64 = 10.0;
const TWO_TERMINAL_TYPES: [&str; 4] = ["resistor", "led", "capacitor", "coil"];

type PortKey = (String, Option<usize>);

/// Assigns stable small integer ids to `(component_id, port_index)` pairs so
/// they can live in `petgraph::graphmap::UnGraphMap`, which requires `Copy`
/// node weights.
#[derive(Default)]
struct NodeTable {
    ids: HashMap<PortKey, usize>,
    labels: Vec<PortKey>,
}

impl NodeTable {
    fn id(&mut self, key: PortKey) -> usize {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(key.clone());
        self.ids.insert(key, id);
        id
    }
}

fn resolved_port_index(
    registry: &RendererRegistry,
    component: &Component,
    endpoint: &ConnectionEndpoint,
) -> Option<usize> {
    match &endpoint.port {
        PortRef::Anchor => None,
        PortRef::Index(i) => Some(*i),
        PortRef::Name(name) => registry.port_index_by_name(&component.type_name, name),
    }
}

fn swapped_bbox(rotation_deg: f64, bbox: (f64, f64)) -> (f64, f64) {
    let normalized = rotation_deg.rem_euclid(360.0);
    if (normalized - 90.0).abs() < f64::EPSILON || (normalized - 270.0).abs() < f64::EPSILON {
        (bbox.1, bbox.0)
    } else {
        bbox
    }
}

fn aabb(component: &Component, registry: &RendererRegistry) -> Option<(f64, f64, f64, f64)> {
    let renderer = registry.get(&component.type_name)?;
    let (width, height) = swapped_bbox(component.rotation(), renderer.bounding_box(component));
    let position = component.position();
    Some((
        position.x - width / 2.0,
        position.y - height / 2.0,
        position.x + width / 2.0,
        position.y + height / 2.0,
    ))
}

fn overlaps(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

fn inflate(b: (f64, f64, f64, f64), margin: f64) -> (f64, f64, f64, f64) {
    (b.0 - margin, b.1 - margin, b.2 + margin, b.3 + margin)
}

/// Runs every structural and electrical check over `circuit` and returns the
/// full list of diagnostics found; an empty vector means the circuit is
/// clean.
pub fn validate(circuit: &Circuit, registry: &RendererRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_overlap_and_spacing(circuit, registry));
    errors.extend(check_floating_ports(circuit, registry));
    errors.extend(check_electrical(circuit, registry));
    errors.extend(check_layout_convention(circuit));
    errors
}

fn check_overlap_and_spacing(
    circuit: &Circuit,
    registry: &RendererRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let boxes: Vec<(&Component, (f64, f64, f64, f64))> = circuit
        .components
        .iter()
        .filter_map(|c| aabb(c, registry).map(|b| (c, b)))
        .collect();

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let (ca, ba) = boxes[i];
            let (cb, bb) = boxes[j];
            // Two independent passes, not an if/else-if: a pair that
            // genuinely overlaps is also closer than the minimum spacing, and
            // the original reports both diagnostics for it.
            if overlaps(ba, bb) {
                errors.push(ValidationError {
                    code: ErrorCode::OverlappingComponents,
                    message: format!("components {} and {} overlap", ca.id, cb.id),
                    component_ids: vec![ca.id.clone(), cb.id.clone()],
                });
            }
            if overlaps(inflate(ba, MIN_SPACING), bb) {
                errors.push(ValidationError {
                    code: ErrorCode::MinimumSpacingViolation,
                    message: format!(
                        "components {} and {} are closer than the minimum spacing",
                        ca.id, cb.id
                    ),
                    component_ids: vec![ca.id.clone(), cb.id.clone()],
                });
            }
        }
    }
    errors
}

fn check_floating_ports(circuit: &Circuit, registry: &RendererRegistry) -> Vec<ValidationError> {
    let mut connected: HashSet<(String, usize)> = HashSet::new();
    for connection in &circuit.connections {
        for endpoint in [&connection.source, &connection.target] {
            if let Some(component) = circuit.component(&endpoint.component_id) {
                if let Some(index) = resolved_port_index(registry, component, endpoint) {
                    connected.insert((component.id.clone(), index));
                }
            }
        }
    }

    let mut errors = Vec::new();
    for component in &circuit.components {
        if component.type_name.eq_ignore_ascii_case("junction") {
            continue;
        }
        let Some(renderer) = registry.get(&component.type_name) else {
            continue;
        };
        for (index, name) in renderer.ports().iter().enumerate() {
            if !connected.contains(&(component.id.clone(), index)) {
                errors.push(ValidationError {
                    code: ErrorCode::FloatingPort,
                    message: format!("port {name} ({index}) of {} is not connected", component.id),
                    component_ids: vec![component.id.clone()],
                });
            }
        }
    }
    errors
}

/// Builds the single port graph every electrical check walks: wires between
/// connection endpoints, bare-junction fan-out (an endpoint with no explicit
/// port wires every *other* endpoint attached to the same anchor directly
/// together, bypassing the junction node), and intra-component pass-through
/// edges for two-terminal parts and the transistor's collector-emitter path.
fn build_port_graph(circuit: &Circuit, registry: &RendererRegistry) -> (NodeTable, UnGraphMap<usize, ()>) {
    let mut nodes = NodeTable::default();
    let mut graph = UnGraphMap::new();

    let key_for = |endpoint: &ConnectionEndpoint| -> PortKey {
        let port_index = circuit
            .component(&endpoint.component_id)
            .and_then(|c| resolved_port_index(registry, c, endpoint));
        (endpoint.component_id.clone(), port_index)
    };

    for connection in &circuit.connections {
        let a = nodes.id(key_for(&connection.source));
        let b = nodes.id(key_for(&connection.target));
        graph.add_edge(a, b, ());
    }

    let mut junction_members: HashMap<String, Vec<PortKey>> = HashMap::new();
    for connection in &circuit.connections {
        let source_is_anchor = matches!(connection.source.port, PortRef::Anchor);
        let target_is_anchor = matches!(connection.target.port, PortRef::Anchor);
        if !source_is_anchor && target_is_anchor {
            junction_members
                .entry(connection.target.component_id.clone())
                .or_default()
                .push(key_for(&connection.source));
        } else if source_is_anchor && !target_is_anchor {
            junction_members
                .entry(connection.source.component_id.clone())
                .or_default()
                .push(key_for(&connection.target));
        }
    }
    for members in junction_members.values() {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let a = nodes.id(members[i].clone());
                let b = nodes.id(members[j].clone());
                graph.add_edge(a, b, ());
            }
        }
    }

    for component in &circuit.components {
        if TWO_TERMINAL_TYPES.contains(&component.type_name.to_lowercase().as_str()) {
            let a = nodes.id((component.id.clone(), Some(0)));
            let b = nodes.id((component.id.clone(), Some(1)));
            graph.add_edge(a, b, ());
        } else if component.type_name.eq_ignore_ascii_case("transistor_npn") {
            let collector = nodes.id((component.id.clone(), Some(1)));
            let emitter = nodes.id((component.id.clone(), Some(2)));
            graph.add_edge(collector, emitter, ());
        }
    }

    (nodes, graph)
}

/// Breadth-first search from `start` to `end`, returning the node sequence
/// of the first path found (the BFS tree's shortest path), or `None` if
/// `end` is unreachable.
fn bfs_shortest_path(graph: &UnGraphMap<usize, ()>, start: usize, end: usize) -> Option<Vec<usize>> {
    if start == end {
        return Some(vec![start]);
    }
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);
    let mut predecessor: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor) {
                predecessor.insert(neighbor, current);
                if neighbor == end {
                    let mut path = vec![end];
                    let mut cursor = end;
                    while cursor != start {
                        cursor = predecessor[&cursor];
                        path.push(cursor);
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(neighbor);
            }
        }
    }
    None
}

/// Any component type that dissipates or controls current; used to tell a
/// legitimate loop from a short.
const LOAD_TYPES: [&str; 4] = ["resistor", "led", "coil", "transistor_npn"];

fn check_electrical(circuit: &Circuit, registry: &RendererRegistry) -> Vec<ValidationError> {
    let (mut nodes, mut graph) = build_port_graph(circuit, registry);
    let mut errors = Vec::new();

    for component in &circuit.components {
        if !component.type_name.eq_ignore_ascii_case("battery") {
            continue;
        }
        let Some(renderer) = registry.get(&component.type_name) else {
            continue;
        };
        let Some(positive_index) = renderer.ports().iter().position(|p| *p == "positive") else {
            continue;
        };
        let Some(negative_index) = renderer.ports().iter().position(|p| *p == "negative") else {
            continue;
        };

        let start = nodes.id((component.id.clone(), Some(positive_index)));
        let end = nodes.id((component.id.clone(), Some(negative_index)));
        graph.add_node(start);
        graph.add_node(end);

        match bfs_shortest_path(&graph, start, end) {
            Some(path) => {
                let has_load = path.iter().any(|&node_id| {
                    let (component_id, _) = &nodes.labels[node_id];
                    circuit
                        .component(component_id)
                        .map(|c| LOAD_TYPES.contains(&c.type_name.to_lowercase().as_str()))
                        .unwrap_or(false)
                });
                if !has_load {
                    errors.push(ValidationError {
                        code: ErrorCode::ShortCircuit,
                        message: format!(
                            "short circuit detected across power source {}",
                            component.id
                        ),
                        component_ids: vec![component.id.clone()],
                    });
                }
            }
            None => {
                errors.push(ValidationError {
                    code: ErrorCode::NoPowerLoop,
                    message: format!(
                        "power source {} does not have a closed loop from positive to negative terminal",
                        component.id
                    ),
                    component_ids: vec![component.id.clone()],
                });
            }
        }
    }

    errors
}

/// Drawing convention: batteries sit above ground junctions, compared by
/// mean Y across each group (lower Y is higher on the canvas).
fn check_layout_convention(circuit: &Circuit) -> Vec<ValidationError> {
    let batteries: Vec<&Component> = circuit
        .components
        .iter()
        .filter(|c| c.type_name.eq_ignore_ascii_case("battery"))
        .collect();
    let grounds: Vec<&Component> = circuit
        .components
        .iter()
        .filter(|c| c.id.to_lowercase().contains("gnd"))
        .collect();

    if batteries.is_empty() || grounds.is_empty() {
        return Vec::new();
    }

    let mean_y = |components: &[&Component]| -> f64 {
        components.iter().map(|c| c.position().y).sum::<f64>() / components.len() as f64
    };
    let battery_mean = mean_y(&batteries);
    let ground_mean = mean_y(&grounds);

    if battery_mean >= ground_mean {
        let component_ids = batteries
            .iter()
            .chain(grounds.iter())
            .map(|c| c.id.clone())
            .collect();
        return vec![ValidationError {
            code: ErrorCode::LayoutConvention,
            message: format!(
                "batteries (mean y={battery_mean:.1}) should be drawn above ground junctions \
                 (mean y={ground_mean:.1})"
            ),
            component_ids,
        }];
    }
    Vec::new()
}
