// Domain value objects
pub mod alert_status;
pub mod period_type;

pub use alert_status::*;
pub use period_type::*;
