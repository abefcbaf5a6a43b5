use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::{self, StatKind};
use crate::ports::{self, HeroFilter, HeroOrder, HeroOrderField, InsertBatchError, Page};

const HERO_COLUMNS: &str =
    "id, name, powerstats, biography, appearance, work, connections, image";

#[derive(Debug, Clone, sqlx::FromRow)]
struct HeroModel {
    id: i32,
    name: String,
    powerstats: serde_json::Value,
    biography: serde_json::Value,
    appearance: serde_json::Value,
    work: serde_json::Value,
    connections: serde_json::Value,
    image: serde_json::Value,
}

impl HeroModel {
    fn from_entity(hero: &entities::Hero) -> anyhow::Result<Self> {
        Ok(Self {
            id: i32::from(hero.id),
            name: hero.name.clone(),
            powerstats: serde_json::to_value(hero.powerstats)?,
            biography: serde_json::to_value(&hero.biography)?,
            appearance: serde_json::to_value(&hero.appearance)?,
            work: serde_json::to_value(&hero.work)?,
            connections: serde_json::to_value(&hero.connections)?,
            image: serde_json::to_value(&hero.image)?,
        })
    }

    fn into_entity(self) -> anyhow::Result<entities::Hero> {
        Ok(entities::Hero {
            id: entities::HeroId::from(self.id),
            name: self.name,
            powerstats: serde_json::from_value(self.powerstats).context("powerstats")?,
            biography: serde_json::from_value(self.biography).context("biography")?,
            appearance: serde_json::from_value(self.appearance).context("appearance")?,
            work: serde_json::from_value(self.work).context("work")?,
            connections: serde_json::from_value(self.connections).context("connections")?,
            image: serde_json::from_value(self.image).context("image")?,
        })
    }
}

/// Integer value of a stat, or NULL when the stat holds the unknown marker.
/// CASE keeps the cast from ever seeing the marker.
fn stat_expr(kind: StatKind) -> String {
    format!(
        "(CASE WHEN powerstats ->> '{key}' <> '{marker}' THEN (powerstats ->> '{key}')::integer END)",
        key = kind.key(),
        marker = entities::UNKNOWN_MARKER,
    )
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &[HeroFilter]) {
    builder.push(" WHERE TRUE");
    for filter in filters {
        builder.push(" AND ");
        match filter {
            HeroFilter::NameEquals(name) => {
                builder.push("name = ").push_bind(name.clone());
            }
            HeroFilter::Stat {
                kind,
                comparison,
                value,
            } => {
                builder
                    .push(stat_expr(*kind))
                    .push(comparison.as_sql())
                    .push_bind(*value);
            }
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, order: HeroOrder) {
    let direction = if order.ascending { "ASC" } else { "DESC" };
    match order.field {
        HeroOrderField::Id => {
            builder.push(format!(" ORDER BY id {}", direction));
        }
        HeroOrderField::Name => {
            builder.push(format!(" ORDER BY name {}, id ASC", direction));
        }
        HeroOrderField::Stat(kind) => {
            builder.push(format!(
                " ORDER BY {} {} NULLS LAST, id ASC",
                stat_expr(kind),
                direction
            ));
        }
    }
}

fn select_page_query<'a>(
    filters: &[HeroFilter],
    order: HeroOrder,
    page: Page,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM heroes", HERO_COLUMNS));
    push_filters(&mut builder, filters);
    push_order(&mut builder, order);
    builder
        .push(" LIMIT ")
        .push_bind(i64::from(page.limit.value()))
        .push(" OFFSET ")
        .push_bind(i64::from(page.offset));
    builder
}

#[derive(Debug, Clone)]
pub struct HeroesRepositoryImpl {
    pool: PgPool,
}

impl HeroesRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ports::HeroesRepository for HeroesRepositoryImpl {
    type Error = anyhow::Error;

    async fn count(&mut self, filters: &[HeroFilter]) -> Result<i64, Self::Error> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM heroes");
        push_filters(&mut builder, filters);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("count heroes")?;

        Ok(count)
    }

    async fn find_page(
        &mut self,
        filters: &[HeroFilter],
        order: HeroOrder,
        page: Page,
    ) -> Result<Vec<entities::Hero>, Self::Error> {
        let models = select_page_query(filters, order, page)
            .build_query_as::<HeroModel>()
            .fetch_all(&self.pool)
            .await
            .context("fetch heroes")?;

        models
            .into_iter()
            .map(|model| model.into_entity())
            .collect::<anyhow::Result<Vec<_>>>()
            .context("convert Hero")
    }

    async fn insert_batch(
        &mut self,
        heroes: Vec<entities::Hero>,
    ) -> Result<Result<Vec<entities::Hero>, InsertBatchError>, Self::Error> {
        if heroes.is_empty() {
            return Ok(Ok(Vec::new()));
        }
        if let Some(id) = duplicate_in_batch(&heroes) {
            return Ok(Err(InsertBatchError::AlreadyExists(id)));
        }

        let models = heroes
            .iter()
            .map(HeroModel::from_entity)
            .collect::<anyhow::Result<Vec<_>>>()
            .context("convert HeroModel")?;

        let mut trx = self.pool.begin().await?;

        let mut builder = QueryBuilder::new(format!("INSERT INTO heroes ({}) ", HERO_COLUMNS));
        builder.push_values(models, |mut row, model| {
            row.push_bind(model.id)
                .push_bind(model.name)
                .push_bind(model.powerstats)
                .push_bind(model.biography)
                .push_bind(model.appearance)
                .push_bind(model.work)
                .push_bind(model.connections)
                .push_bind(model.image);
        });
        builder.push(format!(" RETURNING {}", HERO_COLUMNS));

        let result = builder
            .build_query_as::<HeroModel>()
            .fetch_all(&mut *trx)
            .await;
        let inserted = match result {
            Ok(inserted) => inserted,
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                // The connection must go back to the pool before looking up the colliding id.
                trx.rollback().await.context("rollback heroes insert")?;
                let id = find_existing(&self.pool, &heroes)
                    .await?
                    .unwrap_or(heroes[0].id);
                return Ok(Err(InsertBatchError::AlreadyExists(id)));
            }
            Err(err) => return Err(anyhow::Error::new(err).context("insert heroes")),
        };

        trx.commit().await?;

        inserted
            .into_iter()
            .map(|model| model.into_entity())
            .collect::<anyhow::Result<Vec<_>>>()
            .context("convert Hero")
            .map(Ok)
    }

    async fn delete(
        &mut self,
        id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error> {
        let model = sqlx::query_as::<_, HeroModel>(&format!(
            "DELETE FROM heroes WHERE id = $1 RETURNING {}",
            HERO_COLUMNS
        ))
        .bind(i32::from(id))
        .fetch_optional(&self.pool)
        .await
        .context("delete hero")?;

        model.map(|model| model.into_entity()).transpose()
    }
}

/// First id that appears twice in the batch.
fn duplicate_in_batch(heroes: &[entities::Hero]) -> Option<entities::HeroId> {
    let mut seen = HashSet::new();
    heroes
        .iter()
        .map(|hero| hero.id)
        .find(|id| !seen.insert(*id))
}

/// Lowest id of the batch that is already stored, for the conflict message.
async fn find_existing(
    pool: &PgPool,
    heroes: &[entities::Hero],
) -> anyhow::Result<Option<entities::HeroId>> {
    let ids = heroes
        .iter()
        .map(|hero| i32::from(hero.id))
        .collect::<Vec<_>>();

    let id: Option<i32> =
        sqlx::query_scalar("SELECT id FROM heroes WHERE id = ANY($1) ORDER BY id LIMIT 1")
            .bind(ids)
            .fetch_optional(pool)
            .await
            .context("find existing hero")?;

    Ok(id.map(entities::HeroId::from))
}
