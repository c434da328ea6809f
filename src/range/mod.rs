//! Value range tracking
//!
//! Ranges observed for each tensor output are merged by union, which is
//! commutative and associative: calibration results do not depend on the
//! order batches arrive in, nor on how parallel partial results are merged.

mod tracker;
mod types;


pub use tracker::RangeTracker;
pub use types::{TensorId, ValueRange};
