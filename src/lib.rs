pub mod cmd;
pub mod color;
pub mod env;
pub mod error;
pub mod path;
pub mod pathlist;
pub mod render;
pub mod tracing;
