//! Lesson model and the pure selection logic shared by the store, source and runner crates.

pub mod clock;
pub mod model;
pub mod selector;

pub use clock::*;
pub use model::*;
pub use selector::*;
