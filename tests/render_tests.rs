use arcwire::render::commands::DrawCommand;
use arcwire::render::orchestrator;
use arcwire::{config::AppConfig, default_registry, model::loader};

fn render_yaml(yaml: &str) -> orchestrator::RenderResult {
    let circuit = loader::load_str(yaml).expect("circuit should parse");
    let registry = default_registry();
    let config = AppConfig::default();
    orchestrator::render(&circuit, &registry, &config)
}

#[test]
fn wall_blockade_with_no_path_falls_back_to_a_red_line() {
    // Junctions never block routing (their own port cell always overrides
    // their own footprint), so the wall is built from resistors: their
    // footprint's middle cells carry no port, only the far left/right edges
    // do, leaving a solid obstacle column behind.
    let mut components = String::new();
    components.push_str(
        r#"
    - id: j1
      type: junction
      properties: { position: { x: 10, y: 250 } }
    - id: j2
      type: junction
      properties: { position: { x: 490, y: 250 } }
"#,
    );
    for i in 0..61 {
        let y = 10 + i * 8;
        components.push_str(&format!(
            "    - id: wall{i}\n      type: resistor\n      properties: {{ position: {{ x: 250, y: {y} }} }}\n"
        ));
    }
    let yaml = format!(
        r#"
circuit:
  name: "Wall"
  components:
{components}
  connections:
    - source: {{ component_id: j1 }}
      target: {{ component_id: j2 }}
"#
    );

    let result = render_yaml(&yaml);
    let wire = result
        .commands
        .iter()
        .find(|c| matches!(c, DrawCommand::Wire { .. }))
        .expect("a wire command should be emitted even on failure");
    if let DrawCommand::Wire { points, failed, .. } = wire {
        assert!(*failed, "the router should not find a path through a solid wall");
        assert_eq!(points.len(), 2, "a fallback line has exactly two points");
    }
}

#[test]
fn transistor_switch_routes_all_five_wires() {
    let yaml = r#"
circuit:
  name: "Transistor switch"
  components:
    - id: bat1
      type: battery
      properties: { position: { x: 40, y: 250 } }
    - id: r1
      type: resistor
      properties: { position: { x: 150, y: 150 } }
    - id: q1
      type: transistor_npn
      properties: { position: { x: 250, y: 250 } }
    - id: led1
      type: led
      properties: { position: { x: 250, y: 60 } }
    - id: gnd1
      type: junction
      properties: { position: { x: 40, y: 400 } }
  connections:
    - source: { component_id: bat1, port_index: 0 }
      target: { component_id: r1, port_index: 0 }
    - source: { component_id: r1, port_index: 1 }
      target: { component_id: q1, port: base }
    - source: { component_id: bat1, port_index: 1 }
      target: { component_id: gnd1 }
    - source: { component_id: q1, port: emitter }
      target: { component_id: gnd1 }
    - source: { component_id: q1, port: collector }
      target: { component_id: led1, port_index: 1 }
"#;
    let result = render_yaml(yaml);
    let wires: Vec<&DrawCommand> = result
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Wire { .. }))
        .collect();
    assert_eq!(wires.len(), 5, "every connection should emit exactly one wire command");
    for wire in &wires {
        if let DrawCommand::Wire { failed, .. } = wire {
            assert!(!failed, "all five connections should route successfully, not fall back");
        }
    }
}
