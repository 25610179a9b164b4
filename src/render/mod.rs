pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, CellGrid, Paint, draw_cell, draw_scene, erase_cell};
pub use renderer::Renderer;
