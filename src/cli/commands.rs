use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cli::{CliError, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::model::loader;
use crate::render::{orchestrator, registry, svg};
use crate::validate;

/// Owns the resolved configuration and drives each subcommand. Mirrors the
/// teacher's `CliRunner` shape: a thin struct built once from global flags,
/// with one `run_*` method per subcommand.
pub struct CliRunner {
    verbose: bool,
    config: AppConfig,
}

impl CliRunner {
    pub fn new(verbose: bool, config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config = AppConfig::load(config_path.as_deref())?;
        Ok(CliRunner { verbose, config })
    }

    pub fn run(&self, command: Commands) -> Result<(), CliError> {
        match command {
            Commands::Render { input, output } => self.run_render(input, output),
            Commands::Validate { input, format } => self.run_validate(input, format),
        }
    }

    fn run_render(&self, input: PathBuf, output: Option<PathBuf>) -> Result<(), CliError> {
        self.log(&format!("loading circuit from {}", input.display()));
        let circuit = loader::load_path(&input)?;
        let registry = registry::default_registry();

        debug!(
            components = circuit.components.len(),
            connections = circuit.connections.len(),
            "circuit loaded"
        );
        let result = orchestrator::render(&circuit, &registry, &self.config);
        let failed_wires = result
            .commands
            .iter()
            .filter(|c| matches!(c, crate::render::commands::DrawCommand::Wire { failed: true, .. }))
            .count();
        if failed_wires > 0 {
            warn!(failed_wires, "some connections could not be routed; fallback lines drawn");
        }

        let svg_text = svg::render_svg(
            &result.commands,
            self.config.canvas_width as u32,
            self.config.canvas_height as u32,
        );

        match output {
            Some(path) => {
                std::fs::write(&path, svg_text)?;
                self.log(&format!("wrote {}", path.display()));
            }
            None => println!("{svg_text}"),
        }
        Ok(())
    }

    fn run_validate(&self, input: PathBuf, format: OutputFormat) -> Result<(), CliError> {
        self.log(&format!("validating circuit from {}", input.display()));
        let circuit = loader::load_path(&input)?;
        let registry = registry::default_registry();
        let errors = validate::validate(&circuit, &registry);

        match format {
            OutputFormat::Human => {
                if errors.is_empty() {
                    println!("no issues found");
                } else {
                    for error in &errors {
                        println!("[{}] {}", error.code, error.message);
                    }
                }
            }
            OutputFormat::Json => {
                let text = serde_json::to_string_pretty(&errors)?;
                println!("{text}");
            }
        }

        info!(issue_count = errors.len(), "validation complete");
        Ok(())
    }

    fn log(&self, message: &str) {
        if self.verbose {
            info!("{message}");
        } else {
            debug!("{message}");
        }
    }
}
