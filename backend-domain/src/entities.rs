// Domain entities

pub mod alert;
pub mod config;
pub mod filter;
pub mod metrics;
pub mod sale;

pub use alert::*;
pub use config::*;
pub use filter::*;
pub use metrics::*;
pub use sale::*;
