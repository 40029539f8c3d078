//! Pure analysis stages: metric aggregation and revenue estimation.
//!
//! No I/O happens here. Both stages are deterministic functions of their
//! inputs; calling them twice on identical inputs yields identical output.

mod aggregate;
mod estimate;

pub use aggregate::aggregate;
pub use estimate::{estimate, CpmRule, RevenueAssumptions, SubscriberTier};
