/// Access level given to every account on activation.
pub const DEFAULT_ACCESS_LEVEL: i32 = 1;
/// Access level required by the admin pages.
pub const ADMIN_ACCESS_LEVEL: i32 = 3;
