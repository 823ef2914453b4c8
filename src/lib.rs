pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod draw;
pub mod frame;
pub mod geometry;
pub mod material;
pub mod math;
pub mod renderer;
pub mod scenes;
pub mod types;

pub use geometry::{Shape, ShapeKind, ShapeLibrary, Topology};
pub use scenes::{create_scene, Action, Scene, SceneKind};
