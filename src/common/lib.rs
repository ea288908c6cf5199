#[cfg(feature = "crypto")]
pub mod crypto;
#[cfg(feature = "db")]
pub mod db;
#[cfg(feature = "factory")]
pub mod factory;
#[cfg(feature = "mail")]
pub mod mail;
#[cfg(feature = "password")]
pub mod password;
#[cfg(feature = "settings")]
pub mod settings;
