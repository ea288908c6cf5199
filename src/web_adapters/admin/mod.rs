use actix_web::web::{scope, ServiceConfig};
use entities::custom_methods::user::ADMIN_ACCESS_LEVEL;

use crate::middlewares::access_level::RequireAccessLevel;

mod users;

pub const ADMIN_USERS_PATH: &str = "/admin/users";

/// Everything under `/admin` requires the administrator access level.
pub fn admin_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/admin")
            .wrap(RequireAccessLevel(ADMIN_ACCESS_LEVEL))
            .service(users::list_users_endpoint)
            .service(users::update_access_level_endpoint),
    );
}
