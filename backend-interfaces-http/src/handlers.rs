pub mod alert_handlers;
pub mod ops_handlers;
pub mod sales_handlers;

pub use alert_handlers::*;
pub use ops_handlers::*;
pub use sales_handlers::*;
