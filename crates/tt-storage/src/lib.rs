pub mod error;
pub mod fs;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::*;
pub use fs::*;
pub use memory::*;
pub use snapshot::*;
pub use traits::*;
