//! Remote timetable source: the fetch contract and its HTTP implementation.

pub mod error;
pub mod http;
pub mod source;
pub mod wire;

pub use error::*;
pub use http::*;
pub use source::*;
