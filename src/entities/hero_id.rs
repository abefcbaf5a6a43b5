use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Clone, Copy, Debug, Display, Eq, PartialEq, Hash, PartialOrd, Ord, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HeroId(i32);

/// Identifier as the SuperHero API sends it: usually a string, sometimes a number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawHeroId {
    Number(i64),
    String(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeroIdTryFromError {
    #[error("hero id must be an integer, got {0:?}")]
    NotAnInteger(String),
    #[error("hero id {0} is out of range")]
    OutOfRange(i64),
}

impl TryFrom<RawHeroId> for HeroId {
    type Error = HeroIdTryFromError;

    fn try_from(value: RawHeroId) -> Result<Self, Self::Error> {
        let number = match value {
            RawHeroId::Number(number) => number,
            RawHeroId::String(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| HeroIdTryFromError::NotAnInteger(text.clone()))?,
        };
        i32::try_from(number)
            .map(HeroId)
            .map_err(|_| HeroIdTryFromError::OutOfRange(number))
    }
}

impl From<HeroId> for RawHeroId {
    fn from(id: HeroId) -> Self {
        RawHeroId::Number(i64::from(id.0))
    }
}
