use chrono::Utc;
use entities::{custom_methods::user::DEFAULT_ACCESS_LEVEL, user};
use sea_orm::Set;

/// Argon2 hash of "password".
pub const HASHED_PASSWORD: &str = "$argon2id$v=19$m=19456,t=2,p=1$r07vWFCaKrbNPrSgUrG/+Q$/2lBaeRWeox6ROMu6qAwOYmttdGXA3o4Uw2YHC/fvfY";

pub fn user(id: i64) -> user::ActiveModel {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(id),
        first_name: Set("Jon".to_string()),
        last_name: Set("Doe".to_string()),
        email: Set(format!("user{}@test.com", id)),
        password: Set(HASHED_PASSWORD.to_string()),
        access_level: Set(DEFAULT_ACCESS_LEVEL),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

pub trait UserFactory {
    fn email(self, email: &str) -> user::ActiveModel;
    fn access_level(self, access_level: i32) -> user::ActiveModel;
}

impl UserFactory for user::ActiveModel {
    fn email(mut self, email: &str) -> user::ActiveModel {
        self.email = Set(email.to_string());
        self
    }

    fn access_level(mut self, access_level: i32) -> user::ActiveModel {
        self.access_level = Set(access_level);
        self
    }
}
