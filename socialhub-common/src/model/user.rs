use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The username must not be empty")]
pub struct EmptyUsernameError;

impl Username {
    pub fn new(username: String) -> Result<Self, EmptyUsernameError> {
        if username.is_empty() {
            Err(EmptyUsernameError)
        } else {
            Ok(Username(username))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Username::new(inner).map_err(|_| Error::invalid_value(Unexpected::Str(""), &"Username"))
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Password(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The password must not be empty")]
pub struct EmptyPasswordError;

impl Password {
    pub fn new(password: String) -> Result<Self, EmptyPasswordError> {
        if password.is_empty() {
            Err(EmptyPasswordError)
        } else {
            Ok(Password(password))
        }
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[redacted]").finish()
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Password::new(inner).map_err(|_| Error::invalid_value(Unexpected::Str(""), &"Password"))
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct User {
    pub username: Username,
    password: Password,
}

impl User {
    #[must_use]
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }

    /// Plaintext comparison, byte for byte. Hashing is out of scope here.
    #[must_use]
    pub fn check_password(&self, password: &str) -> bool {
        self.password.0 == password
    }
}

#[cfg(test)]
mod tests {
    use crate::model::user::{Password, User, Username};

    #[test]
    fn empty_fields_are_rejected() {
        assert!(Username::new(String::new()).is_err());
        assert!(Password::new(String::new()).is_err());
        assert!(Username::new("alice".to_owned()).is_ok());
        assert!(Password::new(" ".to_owned()).is_ok());
    }

    fn user(username: &str, password: &str) -> User {
        User::new(
            Username::new(username.to_owned()).unwrap(),
            Password::new(password.to_owned()).unwrap(),
        )
    }

    #[test]
    fn password_check_is_verbatim() {
        let alice = user("alice", "pw1");

        assert!(alice.check_password("pw1"));
        assert!(!alice.check_password("PW1"));
        assert!(!alice.check_password("pw1 "));
        assert!(!alice.check_password(""));
    }

    #[test]
    fn password_debug_is_redacted() {
        let alice = user("alice", "hunter2");

        let debugged = format!("{alice:?}");
        assert!(!debugged.contains("hunter2"));
        assert!(debugged.contains("[redacted]"));
    }
}
