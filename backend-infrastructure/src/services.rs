pub mod health_service;
pub mod refresh_service;
pub mod webhook_notifier;

pub use health_service::*;
pub use refresh_service::*;
pub use webhook_notifier::*;
