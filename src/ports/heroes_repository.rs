use super::common::{HeroFilter, HeroOrder, Page};
use crate::entities;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum InsertBatchError {
    #[error("hero {0} already exists")]
    AlreadyExists(entities::HeroId),
}

#[async_trait]
pub trait HeroesRepository {
    type Error;

    async fn count(&mut self, filters: &[HeroFilter]) -> Result<i64, Self::Error>;

    async fn find_page(
        &mut self,
        filters: &[HeroFilter],
        order: HeroOrder,
        page: Page,
    ) -> Result<Vec<entities::Hero>, Self::Error>;

    /// Inserts every hero or none of them.
    async fn insert_batch(
        &mut self,
        heroes: Vec<entities::Hero>,
    ) -> Result<Result<Vec<entities::Hero>, InsertBatchError>, Self::Error>;

    async fn delete(
        &mut self,
        id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error>;
}
