pub mod activate_account;
pub mod admin;
pub mod context;
pub mod password_reset;
pub mod sign_in;
pub mod sign_up;
pub mod signed_links;
pub mod types;

pub use context::AuthContext;
pub use signed_links::LinkStatus;
