use std::fmt;
use thiserror::Error;

/// Name used to search the SuperHero API. Never empty.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct HeroName {
    value: String,
}

impl HeroName {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for HeroName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<HeroName> for String {
    fn from(value: HeroName) -> Self {
        value.value
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeroNameError {
    #[error("name must not be empty")]
    Empty,
}

impl TryFrom<&str> for HeroName {
    type Error = HeroNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            Err(HeroNameError::Empty)
        } else {
            Ok(Self {
                value: value.to_string(),
            })
        }
    }
}
