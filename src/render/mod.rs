pub mod commands;
pub mod geometry;
pub mod grid;
pub mod orchestrator;
pub mod registry;
pub mod renderers;
pub mod router;
pub mod svg;
