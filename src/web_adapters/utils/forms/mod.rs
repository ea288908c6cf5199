use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

mod errors;

pub use errors::FormErrors;

/// Submitted form values with the validation errors found so far. Checks
/// never stop at the first failure so a page can show every message at once.
#[derive(Serialize, Debug, Clone, Default)]
pub struct Form {
    pub values: HashMap<String, String>,
    pub errors: FormErrors,
}

impl Form {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values,
            errors: FormErrors::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty string when the field was not submitted.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if self.get(field).trim().is_empty() {
                self.errors.add(field, "This field cannot be blank");
            }
        }
    }

    /// Counts characters of the trimmed value.
    pub fn min_length(&mut self, field: &str, length: usize) -> bool {
        if self.get(field).trim().chars().count() < length {
            self.errors.add(
                field,
                &format!("This field must be at least {} characters long", length),
            );
            return false;
        }
        true
    }

    pub fn min_value_i64(&mut self, field: &str, value: i64) -> bool {
        match self.get(field).trim().parse::<i64>() {
            Ok(x) if x >= value => true,
            Ok(_) => {
                self.errors
                    .add(field, &format!("This field must be at least {}", value));
                false
            }
            Err(_) => {
                self.errors.add(field, "This field must be a whole number");
                false
            }
        }
    }

    pub fn min_value_f64(&mut self, field: &str, value: f64) -> bool {
        match self.get(field).trim().parse::<f64>() {
            Ok(x) if x >= value => true,
            Ok(_) => {
                self.errors
                    .add(field, &format!("This field must be at least {}", value));
                false
            }
            Err(_) => {
                self.errors.add(field, "This field must be a number");
                false
            }
        }
    }

    pub fn is_email(&mut self, field: &str) {
        if !is_valid_email(self.get(field)) {
            self.errors.add(field, "Invalid email address");
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email pattern"));

fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
