pub mod config;
pub mod render;
pub mod resolver;
pub mod runner;
pub mod util;

pub use config::*;
pub use render::*;
pub use resolver::*;
pub use runner::*;
pub use util::*;
