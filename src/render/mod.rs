//! Display adapter: ratatui stands in for the original pixel matrix

pub mod renderer;

pub use renderer::Renderer;
