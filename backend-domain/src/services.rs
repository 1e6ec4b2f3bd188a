// Pure domain services

pub mod aggregator;
pub mod classifier;

pub use aggregator::*;
pub use classifier::*;
