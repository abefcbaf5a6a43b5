use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::{ApiError, AppCtx};
use crate::commands::heroes_command;
use crate::entities::{self, StatKind};
use crate::ports::{self, HeroOrder, HeroOrderField, Page};
use crate::queries::{self, HeroQuery, StatBounds};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroQueryParams {
    pub name: Option<String>,

    pub intelligence: Option<i32>,
    pub intelligence_min: Option<i32>,
    pub intelligence_max: Option<i32>,

    pub strength: Option<i32>,
    pub strength_min: Option<i32>,
    pub strength_max: Option<i32>,

    pub speed: Option<i32>,
    pub speed_min: Option<i32>,
    pub speed_max: Option<i32>,

    pub durability: Option<i32>,
    pub durability_min: Option<i32>,
    pub durability_max: Option<i32>,

    pub power: Option<i32>,
    pub power_min: Option<i32>,
    pub power_max: Option<i32>,

    pub combat: Option<i32>,
    pub combat_min: Option<i32>,
    pub combat_max: Option<i32>,

    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub order_by: Option<String>,
    pub asc: Option<bool>,
}

impl HeroQueryParams {
    fn bounds(&self, kind: StatKind) -> StatBounds {
        let (exact, min, max) = match kind {
            StatKind::Intelligence => (self.intelligence, self.intelligence_min, self.intelligence_max),
            StatKind::Strength => (self.strength, self.strength_min, self.strength_max),
            StatKind::Speed => (self.speed, self.speed_min, self.speed_max),
            StatKind::Durability => (self.durability, self.durability_min, self.durability_max),
            StatKind::Power => (self.power, self.power_min, self.power_max),
            StatKind::Combat => (self.combat, self.combat_min, self.combat_max),
        };
        StatBounds { exact, min, max }
    }

    pub fn into_query(self) -> Result<HeroQuery, ApiError> {
        let stats = StatKind::ALL
            .into_iter()
            .map(|kind| (kind, self.bounds(kind)))
            .filter(|(_, bounds)| *bounds != StatBounds::default())
            .collect::<HashMap<_, _>>();

        let field = match self.order_by.as_deref() {
            Some(field) => HeroOrderField::try_from(field)?,
            None => HeroOrderField::default(),
        };

        let limit = match self.limit {
            Some(limit) => entities::Limit::new(limit)?,
            None => entities::Limit::default(),
        };

        Ok(HeroQuery {
            name: self.name,
            stats,
            order: HeroOrder {
                field,
                ascending: self.asc.unwrap_or(true),
            },
            page: Page {
                offset: self.offset.unwrap_or(0),
                limit,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHeroParams {
    pub name: String,
}

pub async fn get_heroes<R, L>(
    ctx: web::Data<AppCtx<R, L>>,
    params: web::Query<HeroQueryParams>,
) -> Result<HttpResponse, ApiError>
where
    R: ports::HeroesRepository<Error = anyhow::Error> + Clone + Send + 'static,
    L: 'static,
{
    let query = params.into_inner().into_query()?;
    let mut repo = ctx.repository.clone();

    let list = queries::get_heroes(&mut repo, &query).await??;
    Ok(HttpResponse::Ok().json(list))
}

pub async fn create_hero<R, L>(
    ctx: web::Data<AppCtx<R, L>>,
    params: web::Query<CreateHeroParams>,
) -> Result<HttpResponse, ApiError>
where
    R: ports::HeroesRepository<Error = anyhow::Error> + Clone + Send + 'static,
    L: ports::HeroLookup<Error = anyhow::Error> + Sync + 'static,
{
    let name = entities::HeroName::try_from(params.name.as_str())?;
    let mut repo = ctx.repository.clone();

    let list = heroes_command::create(&mut repo, &ctx.lookup, &name).await??;
    Ok(HttpResponse::Created().json(list))
}
