pub mod aggregate;
pub mod classify;
pub mod error;
pub mod fact;
pub mod percentile;

pub use aggregate::{aggregate, top_n, top_n_by_delivered, OrderAggregate};
pub use classify::{AdaptivePolicy, Category, ClassificationPolicy, FixedPolicy};
pub use error::{KernelError, KernelResult};
pub use fact::FactRow;
pub use percentile::{percentile, ThresholdSet};
