//! Season-long fantasy projections, fetched per position and reduced
//! to a per-game rankings CSV.

pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod query;
pub mod sources;
pub mod storage;
pub mod table;
pub mod types;

pub use types::*;
