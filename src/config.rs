use std::path::Path;

use serde::Deserialize;

use crate::error::CircuitError;

/// Render-time tunables: grid resolution, obstacle margins, the soft-cost
/// escalation schedule and output canvas size.
///
/// Loadable from an optional TOML file via the `config` crate, layered over
/// compiled-in defaults that match the original service's behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cell_size: i64,
    pub canvas_width: i64,
    pub canvas_height: i64,
    pub hard_margin: i64,
    pub soft_margin: i64,
    pub soft_cost_schedule: Vec<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            cell_size: 5,
            canvas_width: 500,
            canvas_height: 500,
            hard_margin: 0,
            soft_margin: 1,
            soft_cost_schedule: vec![5.0, 1.0, 0.0],
        }
    }
}

impl AppConfig {
    /// Loads configuration, layering an optional TOML file over compiled-in
    /// defaults. Passing `None` returns the defaults untouched.
    pub fn load(path: Option<&Path>) -> Result<Self, CircuitError> {
        let defaults = AppConfig::default();
        let mut builder = config::Config::builder()
            .set_default("cell_size", defaults.cell_size)?
            .set_default("canvas_width", defaults.canvas_width)?
            .set_default("canvas_height", defaults.canvas_height)?
            .set_default("hard_margin", defaults.hard_margin)?
            .set_default("soft_margin", defaults.soft_margin)?
            .set_default("soft_cost_schedule", defaults.soft_cost_schedule.clone())?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let built = builder.build()?;
        Ok(built.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_render_pipeline() {
        let config = AppConfig::default();
        assert_eq!(config.cell_size, 5);
        assert_eq!(config.soft_cost_schedule, vec![5.0, 1.0, 0.0]);
    }

    #[test]
    fn load_without_a_path_returns_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.canvas_width, 500);
    }
}
