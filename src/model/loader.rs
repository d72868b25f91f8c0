use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CircuitError;
use crate::model::circuit::Circuit;

#[derive(Debug, Deserialize)]
struct Document {
    circuit: Circuit,
}

/// Parses a circuit document from a YAML string.
///
/// Returns exactly one `CircuitError::InvalidDocument` for either a YAML
/// syntax error or a schema/reference violation (duplicate component id,
/// connection referencing an unknown component) — never a partial circuit.
pub fn load_str(yaml: &str) -> Result<Circuit, CircuitError> {
    let document: Document = serde_yaml::from_str(yaml)
        .map_err(|err| CircuitError::InvalidDocument(err.to_string()))?;
    validate_references(&document.circuit)?;
    Ok(document.circuit)
}

pub fn load_path(path: &std::path::Path) -> Result<Circuit, CircuitError> {
    let text = std::fs::read_to_string(path)?;
    load_str(&text)
}

fn validate_references(circuit: &Circuit) -> Result<(), CircuitError> {
    let mut seen = HashSet::new();
    for component in &circuit.components {
        if !seen.insert(component.id.as_str()) {
            return Err(CircuitError::InvalidDocument(format!(
                "duplicate component id: {}",
                component.id
            )));
        }
    }

    for connection in &circuit.connections {
        for endpoint in [&connection.source, &connection.target] {
            if circuit.component(&endpoint.component_id).is_none() {
                return Err(CircuitError::InvalidDocument(format!(
                    "connection references unknown component id: {}",
                    endpoint.component_id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_path_reads_a_circuit_document_from_disk() {
        let yaml = r#"
circuit:
  name: "From disk"
  components:
    - id: j1
      type: junction
      properties: { position: { x: 0, y: 0 } }
"#;
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        std::io::Write::write_all(&mut file, yaml.as_bytes()).expect("write temp file");

        let circuit = load_path(file.path()).expect("circuit should load from disk");
        assert_eq!(circuit.name, "From disk");
        assert_eq!(circuit.components.len(), 1);
    }

    #[test]
    fn loads_minimal_circuit() {
        let yaml = r#"
circuit:
  name: "Minimal"
  components:
    - id: j1
      type: junction
      properties:
        position: { x: 0, y: 0 }
  connections: []
"#;
        let circuit = load_str(yaml).unwrap();
        assert_eq!(circuit.name, "Minimal");
        assert_eq!(circuit.components.len(), 1);
    }

    #[test]
    fn rejects_duplicate_component_ids() {
        let yaml = r#"
circuit:
  name: "Dup"
  components:
    - id: j1
      type: junction
      properties: { position: { x: 0, y: 0 } }
    - id: j1
      type: junction
      properties: { position: { x: 10, y: 10 } }
"#;
        assert!(load_str(yaml).is_err());
    }

    #[test]
    fn rejects_connection_to_unknown_component() {
        let yaml = r#"
circuit:
  name: "Dangling"
  components:
    - id: j1
      type: junction
      properties: { position: { x: 0, y: 0 } }
  connections:
    - source: { component_id: j1 }
      target: { component_id: ghost }
"#;
        assert!(load_str(yaml).is_err());
    }

    #[test]
    fn rotation_defaults_to_zero() {
        let yaml = r#"
circuit:
  name: "Rot"
  components:
    - id: r1
      type: resistor
      properties: { position: { x: 0, y: 0 } }
"#;
        let circuit = load_str(yaml).unwrap();
        assert_eq!(circuit.components[0].rotation(), 0.0);
    }
}
