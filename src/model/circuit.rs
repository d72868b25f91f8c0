use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A point in drawing-space (device-independent units, not pixels or grid cells).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// How a connection endpoint identifies a port on its component.
///
/// `Anchor` covers the case where neither `port_index` nor `port` is present
/// in the document: the endpoint is the component's center with an
/// unspecified egress direction (bare junctions and undecorated wires use
/// this form).
#[derive(Debug, Clone, PartialEq)]
pub enum PortRef {
    Index(usize),
    Name(String),
    Anchor,
}

/// One endpoint of a `Connection`, as written in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEndpoint {
    pub component_id: String,
    pub port: PortRef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct RawEndpoint {
    component_id: String,
    #[serde(default)]
    port_index: Option<usize>,
    #[serde(default)]
    port: Option<String>,
}

impl From<RawEndpoint> for ConnectionEndpoint {
    fn from(raw: RawEndpoint) -> Self {
        let port = match (raw.port_index, raw.port) {
            (Some(i), _) => PortRef::Index(i),
            (None, Some(name)) => PortRef::Name(name),
            (None, None) => PortRef::Anchor,
        };
        ConnectionEndpoint {
            component_id: raw.component_id,
            port,
        }
    }
}

impl<'de> Deserialize<'de> for ConnectionEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawEndpoint::deserialize(deserializer).map(ConnectionEndpoint::from)
    }
}

impl Serialize for ConnectionEndpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let (port_index, port) = match &self.port {
            PortRef::Index(i) => (Some(*i), None),
            PortRef::Name(n) => (None, Some(n.clone())),
            PortRef::Anchor => (None, None),
        };
        RawEndpoint {
            component_id: self.component_id.clone(),
            port_index,
            port,
        }
        .serialize(serializer)
    }
}

/// A wire between two component endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Connection {
    pub source: ConnectionEndpoint,
    pub target: ConnectionEndpoint,
}

/// The free-form attribute bag carried on every component (`resistance`,
/// `voltage`, `color`, ...). Never interpreted by the renderer or router.
pub type Attributes = HashMap<String, serde_yaml::Value>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentProperties {
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: ComponentProperties,
}

impl Default for ComponentProperties {
    fn default() -> Self {
        Self {
            position: None,
            rotation: None,
            attributes: HashMap::new(),
        }
    }
}

impl Component {
    /// The component's placement position, defaulting to the origin when
    /// the document omits it.
    pub fn position(&self) -> Position {
        self.properties.position.unwrap_or_default()
    }

    /// Rotation in degrees, defaulting to `0.0` when absent.
    pub fn rotation(&self) -> f64 {
        self.properties.rotation.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Circuit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Circuit {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}
