pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod validate;

pub use error::CircuitError;
pub use model::circuit::{Circuit, Component, Connection, ConnectionEndpoint, PortRef, Position};
pub use render::geometry::Direction;
pub use render::registry::{default_registry, RendererRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::commands::DrawCommand;

    #[test]
    fn two_junctions_clear_path_renders_one_wire() {
        let yaml = r#"
circuit:
  name: "Two junctions"
  components:
    - id: j1
      type: junction
      properties:
        position: { x: 10, y: 10 }
    - id: j2
      type: junction
      properties:
        position: { x: 100, y: 50 }
  connections:
    - source: { component_id: j1 }
      target: { component_id: j2 }
"#;
        let circuit = model::loader::load_str(yaml).expect("circuit should parse");
        let registry = default_registry();
        let cfg = config::AppConfig::default();
        let result = render::orchestrator::render(&circuit, &registry, &cfg);

        let wires: Vec<&DrawCommand> = result
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Wire { .. }))
            .collect();
        assert_eq!(wires.len(), 1, "exactly one wire should be drawn");
        if let DrawCommand::Wire { points, failed, .. } = wires[0] {
            assert!(!*failed);
            assert_eq!(points.first().unwrap(), &Position::new(10.0, 10.0));
            assert_eq!(points.last().unwrap(), &Position::new(100.0, 50.0));
        }
    }

    #[test]
    fn resistor_blocking_the_straight_path_gets_routed_around() {
        let yaml = r#"
circuit:
  name: "Blocked"
  components:
    - id: j1
      type: junction
      properties: { position: { x: 10, y: 100 } }
    - id: j2
      type: junction
      properties: { position: { x: 200, y: 100 } }
    - id: r1
      type: resistor
      properties: { position: { x: 105, y: 100 } }
  connections:
    - source: { component_id: j1 }
      target: { component_id: j2 }
"#;
        let circuit = model::loader::load_str(yaml).expect("circuit should parse");
        let registry = default_registry();
        let cfg = config::AppConfig::default();
        let result = render::orchestrator::render(&circuit, &registry, &cfg);

        let wire = result
            .commands
            .iter()
            .find(|c| matches!(c, DrawCommand::Wire { .. }))
            .expect("a wire should be emitted");
        if let DrawCommand::Wire { failed, .. } = wire {
            assert!(!failed, "router should find a path around the resistor");
        }
    }
}
