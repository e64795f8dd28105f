// Library exports for bubblegraph

pub mod csv_reader;
pub mod data;
pub mod palette;
pub mod parser;
pub mod render;
pub mod runtime;
pub mod synth;

// Core Pipeline Modules
pub mod aggregate;
pub mod chart;
pub mod error;
pub mod selection;

pub use error::{ChartError, Result};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}
