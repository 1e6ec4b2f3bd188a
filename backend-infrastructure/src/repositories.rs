pub mod ledger_file;
pub mod supabase_sales;

pub use ledger_file::*;
pub use supabase_sales::*;
