pub mod access_level;
pub mod csrf;
