pub mod bindings;
pub mod controller;
pub mod input_adapter;

pub use bindings::*;
pub use controller::*;
pub use input_adapter::*;
