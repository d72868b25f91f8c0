use crate::config::AppConfig;
use crate::model::circuit::{Circuit, Component, Connection, ConnectionEndpoint, Position, PortRef};
use crate::render::commands::{DrawCommand, Transform};
use crate::render::geometry::{resolve_world_port, Direction};
use crate::render::grid::Grid;
use crate::render::registry::RendererRegistry;
use crate::render::router;

pub struct RenderResult {
    pub commands: Vec<DrawCommand>,
}

struct ResolvedEndpoint {
    position: Position,
    direction: Option<Direction>,
}

fn resolve_endpoint(
    circuit: &Circuit,
    registry: &RendererRegistry,
    endpoint: &ConnectionEndpoint,
) -> ResolvedEndpoint {
    let component = match circuit.component(&endpoint.component_id) {
        Some(c) => c,
        None => {
            return ResolvedEndpoint {
                position: Position::default(),
                direction: None,
            }
        }
    };

    let index = match &endpoint.port {
        PortRef::Anchor => None,
        PortRef::Index(i) => Some(*i),
        PortRef::Name(name) => registry.port_index_by_name(&component.type_name, name),
    };

    let resolved = index.and_then(|i| {
        registry
            .get(&component.type_name)
            .and_then(|renderer| renderer.port(component, i))
    });

    match resolved {
        Some((local_position, local_direction)) => {
            let (world, direction) = resolve_world_port(
                component.position(),
                component.rotation(),
                local_position,
                local_direction,
            );
            ResolvedEndpoint {
                position: world,
                direction: Some(direction),
            }
        }
        None => ResolvedEndpoint {
            position: component.position(),
            direction: None,
        },
    }
}

fn collect_port_cells(
    circuit: &Circuit,
    registry: &RendererRegistry,
    grid_for_cells: &Grid,
) -> std::collections::HashSet<(i64, i64)> {
    let mut cells = std::collections::HashSet::new();
    for component in &circuit.components {
        if let Some(renderer) = registry.get(&component.type_name) {
            for (index, _name) in renderer.ports().iter().enumerate() {
                if let Some((local_position, local_direction)) = renderer.port(component, index) {
                    let (world, _direction) = resolve_world_port(
                        component.position(),
                        component.rotation(),
                        local_position,
                        local_direction,
                    );
                    cells.insert(grid_for_cells.to_cell(world));
                }
            }
        }
    }
    cells
}

fn stamp_components(grid: &mut Grid, circuit: &Circuit, registry: &RendererRegistry, config: &AppConfig) {
    for component in &circuit.components {
        if let Some(renderer) = registry.get(&component.type_name) {
            let bbox = renderer.bounding_box(component);
            grid.add_obstacle(
                component.position(),
                bbox,
                config.hard_margin,
                config.soft_margin,
            );
        }
    }
}

fn component_draw_commands(circuit: &Circuit, registry: &RendererRegistry) -> Vec<DrawCommand> {
    circuit
        .components
        .iter()
        .filter_map(|component: &Component| {
            registry.get(&component.type_name).map(|renderer| DrawCommand::Component {
                component_id: component.id.clone(),
                transform: Transform {
                    translate: component.position(),
                    rotation_deg: component.rotation(),
                },
                primitives: renderer.draw(component),
            })
        })
        .collect()
}

/// Runs the full render pipeline: builds the obstacle grid, stamps every
/// component, then routes connections in strict priority order (longest
/// Manhattan distance first), escalating down the soft-cost schedule on
/// failure and falling back to a straight red line if every attempt fails.
pub fn render(circuit: &Circuit, registry: &RendererRegistry, config: &AppConfig) -> RenderResult {
    let bootstrap_grid = Grid::new(
        config.canvas_width as f64,
        config.canvas_height as f64,
        config.cell_size,
        std::collections::HashSet::new(),
    );
    let port_cells = collect_port_cells(circuit, registry, &bootstrap_grid);

    let mut grid = Grid::new(
        config.canvas_width as f64,
        config.canvas_height as f64,
        config.cell_size,
        port_cells,
    );
    stamp_components(&mut grid, circuit, registry, config);

    let mut commands = component_draw_commands(circuit, registry);

    let mut priorities: Vec<(usize, &Connection, ResolvedEndpoint, ResolvedEndpoint)> = circuit
        .connections
        .iter()
        .enumerate()
        .map(|(i, connection)| {
            let source = resolve_endpoint(circuit, registry, &connection.source);
            let target = resolve_endpoint(circuit, registry, &connection.target);
            (i, connection, source, target)
        })
        .collect();
    priorities.sort_by(|a, b| {
        let da = a.2.position.manhattan_distance(&a.3.position);
        let db = b.2.position.manhattan_distance(&b.3.position);
        db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (connection_index, _connection, source, target) in priorities {
        let start_cell = grid.to_cell(source.position);
        let end_cell = grid.to_cell(target.position);

        let mut routed_cells = None;
        for &soft_cost in &config.soft_cost_schedule {
            grid.set_soft_cost(soft_cost);
            if let Some(path) = router::find_path(
                &mut grid,
                start_cell,
                end_cell,
                source.direction,
                target.direction,
            ) {
                routed_cells = Some(path);
                break;
            }
        }

        match routed_cells {
            Some(cells) => {
                let mut points: Vec<Position> =
                    cells.iter().map(|&cell| grid.cell_center(cell)).collect();
                if let Some(first) = points.first_mut() {
                    *first = source.position;
                }
                if let Some(last) = points.last_mut() {
                    *last = target.position;
                }
                grid.add_soft_obstacle_path(&cells);
                commands.push(DrawCommand::Wire {
                    connection_index,
                    points,
                    failed: false,
                });
            }
            None => {
                commands.push(DrawCommand::Wire {
                    connection_index,
                    points: vec![source.position, target.position],
                    failed: true,
                });
            }
        }
    }

    RenderResult { commands }
}
