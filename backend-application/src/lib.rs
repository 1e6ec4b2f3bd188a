// Backend Application Layer

pub mod commands;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::{AlertDispatcher, DispatchOutcome, DispatchSummary};
pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
