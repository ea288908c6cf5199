use serde::Deserialize;

#[derive(Deserialize, Clone, Default)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub debug: bool,
    pub redis: RedisSettings,
    pub secret: SecretSettings,
    pub email: EmailSettings,
}

impl Settings {
    pub fn base_settings() -> Self {
        Self {
            application: ApplicationSettings {
                port: 8080,
                max_log_files: 14,
                assets_dir: "./assets".to_string(),
                ..Default::default()
            },
            database: DatabaseSettings {
                query_timeout_seconds: 2,
                ..Default::default()
            },
            secret: SecretSettings {
                link_expiration_minutes: 60,
                ..Default::default()
            },
            email: EmailSettings {
                port: 587,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub frontend_url: String,
    pub protocol: String,
    pub max_log_files: usize,
    /// Directory served under `/assets`.
    pub assets_dir: String,
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub query_timeout_seconds: u64,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct RedisSettings {
    pub url: String,
}

/// `secret_key` keys both the link signer and the session-value encryptor,
/// so it has to be exactly 32 bytes. `hmac_secret` keys the session cookie
/// and needs at least 64 bytes.
#[derive(Deserialize, Clone, Default)]
pub struct SecretSettings {
    pub secret_key: String,
    pub hmac_secret: String,
    pub link_expiration_minutes: i64,
}

#[derive(Deserialize, Clone, Default)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    pub host_user: String,
    pub host_user_password: String,
    pub sender: String,
}

pub enum Environment {
    Testing,
    Development,
    Production,
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "testing" => Ok(Self::Testing),
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not a supported environment.", other)),
        }
    }
}
