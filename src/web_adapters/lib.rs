mod admin;
mod home;
mod middlewares;
mod users;
pub mod utils;

pub use admin::admin_routes;
pub use home::home_routes;
pub use users::auth_routes;

pub use middlewares::{access_level::RequireAccessLevel, csrf::CsrfProtection};
