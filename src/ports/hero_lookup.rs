use crate::entities;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("character with given name not found")]
    NotFound,
    #[error("lookup service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait HeroLookup {
    type Error;

    async fn search(
        &self,
        name: &entities::HeroName,
    ) -> Result<Result<Vec<entities::RawHero>, LookupError>, Self::Error>;
}
