use std::cmp::Ordering;

use thiserror::Error;

use crate::entities::{self, StatKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
}

impl Comparison {
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => " = ",
            Comparison::Ge => " >= ",
            Comparison::Le => " <= ",
        }
    }

    pub fn holds(self, stored: i32, value: i32) -> bool {
        match self {
            Comparison::Eq => stored == value,
            Comparison::Ge => stored >= value,
            Comparison::Le => stored <= value,
        }
    }
}

/// One predicate of a hero query. A query matches the intersection of its filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeroFilter {
    NameEquals(String),
    /// Only heroes whose stat is known take part in the comparison.
    Stat {
        kind: StatKind,
        comparison: Comparison,
        value: i32,
    },
}

impl HeroFilter {
    pub fn matches(&self, hero: &entities::Hero) -> bool {
        match self {
            HeroFilter::NameEquals(name) => hero.name == *name,
            HeroFilter::Stat {
                kind,
                comparison,
                value,
            } => hero
                .powerstats
                .get(*kind)
                .known()
                .map_or(false, |stored| comparison.holds(stored, *value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeroOrderField {
    #[default]
    Id,
    Name,
    Stat(StatKind),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderFieldError {
    #[error("unknown order field {0:?}")]
    Unknown(String),
}

impl TryFrom<&str> for HeroOrderField {
    type Error = OrderFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "id" => Ok(HeroOrderField::Id),
            "name" => Ok(HeroOrderField::Name),
            other => StatKind::ALL
                .into_iter()
                .find(|kind| kind.key() == other)
                .map(HeroOrderField::Stat)
                .ok_or_else(|| OrderFieldError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeroOrder {
    pub field: HeroOrderField,
    pub ascending: bool,
}

impl Default for HeroOrder {
    fn default() -> Self {
        Self {
            field: HeroOrderField::Id,
            ascending: true,
        }
    }
}

impl HeroOrder {
    /// Total order used for paging: the requested field first, then id ascending.
    /// Unknown stats sort last in both directions.
    pub fn compare(&self, a: &entities::Hero, b: &entities::Hero) -> Ordering {
        let directed = |ordering: Ordering| {
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        };

        let primary = match self.field {
            HeroOrderField::Id => directed(a.id.cmp(&b.id)),
            HeroOrderField::Name => directed(a.name.cmp(&b.name)),
            HeroOrderField::Stat(kind) => {
                match (a.powerstats.get(kind).known(), b.powerstats.get(kind).known()) {
                    (Some(x), Some(y)) => directed(x.cmp(&y)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Page {
    pub offset: u32,
    pub limit: entities::Limit,
}
