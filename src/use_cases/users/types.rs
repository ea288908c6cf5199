use chrono::{DateTime, FixedOffset};
use entities::user;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserVisible {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub access_level: i32,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserVisible {
    fn from(item: user::Model) -> Self {
        UserVisible {
            id: item.id,
            email: item.email,
            first_name: item.first_name,
            last_name: item.last_name,
            access_level: item.access_level,
            created_at: item.created_at,
        }
    }
}

#[derive(Deserialize, Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Serialize, Clone)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// What the activation page keeps in the session between the link being
/// opened and the password being chosen. `encrypted_email` never leaves the
/// server in plain text.
#[derive(Deserialize, Debug, Serialize, Clone)]
pub struct PendingActivation {
    pub first_name: String,
    pub last_name: String,
    pub encrypted_email: String,
}
