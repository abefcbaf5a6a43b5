use super::{
    Appearance, Biography, Connections, HeroId, HeroIdTryFromError, Image, PowerStats, RawHeroId,
    Work,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub powerstats: PowerStats,
    pub biography: Biography,
    pub appearance: Appearance,
    pub work: Work,
    pub connections: Connections,
    pub image: Image,
}

/// A hero as returned by the SuperHero API, before its id is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHero {
    pub id: RawHeroId,
    pub name: String,
    pub powerstats: PowerStats,
    pub biography: Biography,
    pub appearance: Appearance,
    pub work: Work,
    pub connections: Connections,
    pub image: Image,
}

impl TryFrom<RawHero> for Hero {
    type Error = HeroIdTryFromError;

    fn try_from(raw: RawHero) -> Result<Self, Self::Error> {
        Ok(Hero {
            id: HeroId::try_from(raw.id)?,
            name: raw.name,
            powerstats: raw.powerstats,
            biography: raw.biography,
            appearance: raw.appearance,
            work: raw.work,
            connections: raw.connections,
            image: raw.image,
        })
    }
}

impl From<Hero> for RawHero {
    fn from(hero: Hero) -> Self {
        RawHero {
            id: RawHeroId::from(hero.id),
            name: hero.name,
            powerstats: hero.powerstats,
            biography: hero.biography,
            appearance: hero.appearance,
            work: hero.work,
            connections: hero.connections,
            image: hero.image,
        }
    }
}
