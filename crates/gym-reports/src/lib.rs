pub mod datetime;

mod stats;
pub use stats::*;
