mod mock_account_service;
mod supabase_account_service;

pub use mock_account_service::{MockAccountService, RejectingAccountService};
pub use supabase_account_service::SupabaseAccountService;
