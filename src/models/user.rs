use serde::{Deserialize, Serialize};

/// One entry of the credentials file.
///
/// `name` is the login identifier. `password` holds either the clear text or a
/// bcrypt hash, depending on the configured [`PasswordScheme`](crate::config::PasswordScheme).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub password: String,
    pub studies: String,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, password: impl Into<String>, studies: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            studies: studies.into(),
        }
    }
}
