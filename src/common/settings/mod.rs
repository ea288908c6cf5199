use std::env;

use crate::settings::types::{
    ApplicationSettings, DatabaseSettings, EmailSettings, Environment, RedisSettings,
    SecretSettings, Settings,
};

pub mod types;

/// One year.
const MAX_LINK_EXPIRATION_MINUTES: i64 = 60 * 24 * 365;

/// Loads `env_file_name` (a missing file is fine, the process environment is
/// used as is) and builds `Settings` without checking required values.
pub fn load_settings(env_file_name: &str) -> Result<Settings, String> {
    if let Err(e) = dotenvy::from_filename(env_file_name) {
        if !e.not_found() {
            return Err(format!("Failed to fetch env file: {}", e));
        }
    }

    match Environment::try_from(env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "production".into()))
    {
        Ok(env) => match env {
            Environment::Testing => merge_env(get_testing_settings()),
            Environment::Development => merge_env(get_development_settings()),
            Environment::Production => merge_env(get_production_settings()),
        },
        Err(e) => Err(format!("Failed to parse APP_ENVIRONMENT: {}", e)),
    }
}

pub fn get_settings(env_file_name: &str) -> Result<Settings, String> {
    let settings = load_settings(env_file_name)?;
    settings.validate()?;
    Ok(settings)
}

/// Settings for tests that never touch the environment.
pub fn get_test_settings() -> Settings {
    Settings {
        secret: SecretSettings {
            secret_key: "abcdefghijklmnopqrstuvwxyz012345".to_string(),
            hmac_secret: "x".repeat(64),
            ..get_testing_settings().secret
        },
        application: ApplicationSettings {
            assets_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets").to_string(),
            ..get_testing_settings().application
        },
        email: EmailSettings {
            host: "localhost".to_string(),
            sender: "admin@localhost.test".to_string(),
            ..get_testing_settings().email
        },
        ..get_testing_settings()
    }
}

fn get_testing_settings() -> Settings {
    let b = Settings::base_settings();
    Settings {
        application: ApplicationSettings {
            protocol: "http".to_string(),
            host: "127.0.0.1".to_string(),
            frontend_url: "http://localhost:8080".to_string(),
            ..b.application
        },
        debug: true,
        ..b
    }
}

fn get_development_settings() -> Settings {
    let b = Settings::base_settings();
    Settings {
        application: ApplicationSettings {
            protocol: "http".to_string(),
            host: "127.0.0.1".to_string(),
            frontend_url: "http://localhost:8080".to_string(),
            ..b.application
        },
        debug: true,
        ..b
    }
}

fn get_production_settings() -> Settings {
    let b = Settings::base_settings();
    Settings {
        application: ApplicationSettings {
            protocol: "https".to_string(),
            host: "0.0.0.0".to_string(),
            ..b.application
        },
        debug: false,
        ..b
    }
}

fn merge_env(s: Settings) -> Result<Settings, String> {
    Ok(Settings {
        application: ApplicationSettings {
            port: parse_env_var("APP_APPLICATION__PORT")?.unwrap_or(s.application.port),
            frontend_url: get_env_var("APP_FRONTEND_URL").unwrap_or(s.application.frontend_url),
            max_log_files: parse_env_var("MAX_LOG_FILES")?.unwrap_or(s.application.max_log_files),
            assets_dir: get_env_var("APP_APPLICATION__ASSETS_DIR").unwrap_or(s.application.assets_dir),
            ..s.application
        },
        database: DatabaseSettings {
            url: get_env_var("DATABASE_URL").unwrap_or(s.database.url),
            query_timeout_seconds: parse_env_var("DATABASE_QUERY_TIMEOUT_SECONDS")?
                .unwrap_or(s.database.query_timeout_seconds),
        },
        debug: match env::var("APP_DEBUG") {
            Ok(debug) => &debug == "true",
            Err(_) => s.debug,
        },
        redis: RedisSettings {
            url: get_env_var("REDIS_URL").unwrap_or(s.redis.url),
        },
        secret: SecretSettings {
            secret_key: get_env_var("APP_SECRET__SECRET_KEY").unwrap_or(s.secret.secret_key),
            hmac_secret: get_env_var("APP_SECRET__HMAC_SECRET").unwrap_or(s.secret.hmac_secret),
            link_expiration_minutes: parse_env_var("APP_SECRET__LINK_EXPIRATION_MINUTES")?
                .unwrap_or(s.secret.link_expiration_minutes),
        },
        email: EmailSettings {
            host: get_env_var("APP_EMAIL__HOST").unwrap_or(s.email.host),
            port: parse_env_var("APP_EMAIL__PORT")?.unwrap_or(s.email.port),
            host_user: get_env_var("APP_EMAIL__HOST_USER").unwrap_or(s.email.host_user),
            host_user_password: get_env_var("APP_EMAIL__HOST_USER_PASSWORD")
                .unwrap_or(s.email.host_user_password),
            sender: get_env_var("APP_EMAIL__SENDER").unwrap_or(s.email.sender),
        },
    })
}

impl Settings {
    /// Every value without a sensible default must be present before the
    /// server starts.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("DATABASE_URL", &self.database.url),
            ("REDIS_URL", &self.redis.url),
            ("APP_FRONTEND_URL", &self.application.frontend_url),
            ("APP_SECRET__SECRET_KEY", &self.secret.secret_key),
            ("APP_SECRET__HMAC_SECRET", &self.secret.hmac_secret),
            ("APP_EMAIL__HOST", &self.email.host),
            ("APP_EMAIL__HOST_USER", &self.email.host_user),
            ("APP_EMAIL__HOST_USER_PASSWORD", &self.email.host_user_password),
            ("APP_EMAIL__SENDER", &self.email.sender),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(format!("Missing required settings: {}", missing.join(", ")));
        }
        if !(1..=MAX_LINK_EXPIRATION_MINUTES).contains(&self.secret.link_expiration_minutes) {
            return Err(format!(
                "APP_SECRET__LINK_EXPIRATION_MINUTES must be between 1 and {}",
                MAX_LINK_EXPIRATION_MINUTES
            ));
        }
        Ok(())
    }
}

fn get_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_env_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    get_env_var(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| format!("Failed to parse {}: {}", key, e))
        })
        .transpose()
}
