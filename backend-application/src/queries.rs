pub mod alert_queries;
pub mod sales_queries;
