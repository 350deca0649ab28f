use std::{fmt::Display, ops::Deref, str::FromStr};

pub const MAX_LENGTH: usize = 64;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("profile name cannot be empty")]
    Empty,
    #[error("profile name {0:?} is invalid: only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidCharacters(String),
    #[error("profile name is too long: {0} characters (maximum is {MAX_LENGTH})")]
    TooLong(usize),
}

/// Name of a saved profile.
///
/// Parsing is the only way to build one, so any `ProfileName` is safe to use
/// as a file name inside the profiles directory.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileName(String);

impl FromStr for ProfileName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::Empty);
        }
        if !s.chars().all(allowed_char) {
            return Err(Error::InvalidCharacters(s.to_string()));
        }
        let len = s.chars().count();
        if len > MAX_LENGTH {
            return Err(Error::TooLong(len));
        }
        Ok(ProfileName(s.to_string()))
    }
}

fn allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl Deref for ProfileName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ProfileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
