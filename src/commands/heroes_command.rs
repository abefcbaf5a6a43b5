use anyhow::Context;
use thiserror::Error;

use crate::entities;
use crate::ports::{self, InsertBatchError, LookupError};
use crate::queries::HeroList;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum CreateError {
    #[error("hero not found")]
    NotFound,
    #[error("hero {0} already exists")]
    AlreadyExists(entities::HeroId),
    #[error("superhero api is not available")]
    UpstreamUnavailable,
}

/// Looks `name` up in the SuperHero API and stores every hero it returns.
/// Either the whole batch is stored or nothing is.
pub async fn create<R, L>(
    repo: &mut R,
    lookup: &L,
    name: &entities::HeroName,
) -> anyhow::Result<Result<HeroList, CreateError>>
where
    R: ports::HeroesRepository<Error = anyhow::Error> + Send,
    L: ports::HeroLookup<Error = anyhow::Error> + Sync,
{
    let raw_heroes = match lookup.search(name).await.context("lookup hero")? {
        Ok(raw_heroes) if raw_heroes.is_empty() => return Ok(Err(CreateError::NotFound)),
        Ok(raw_heroes) => raw_heroes,
        Err(LookupError::NotFound) => return Ok(Err(CreateError::NotFound)),
        Err(LookupError::Unavailable(_)) => return Ok(Err(CreateError::UpstreamUnavailable)),
    };

    let heroes = raw_heroes
        .into_iter()
        .map(entities::Hero::try_from)
        .collect::<Result<Vec<_>, _>>()
        .context("normalize hero ids")?;

    let heroes = match repo.insert_batch(heroes).await? {
        Ok(heroes) => heroes,
        Err(InsertBatchError::AlreadyExists(id)) => {
            return Ok(Err(CreateError::AlreadyExists(id)));
        }
    };

    tracing::info!(name = %name, count = heroes.len(), "created heroes");

    let count = i64::try_from(heroes.len())?;
    Ok(Ok(HeroList { count, heroes }))
}
