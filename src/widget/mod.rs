//! Widget presentation: a pure tree builder and a terminal renderer.

pub mod render;
pub mod tree;

pub use render::{render, RenderOptions};
pub use tree::{build, WidgetSize, WidgetTree};
