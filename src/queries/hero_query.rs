use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::entities::{self, StatKind};
use crate::ports::{self, Comparison, HeroFilter, HeroOrder, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatBounds {
    pub exact: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Structured hero search: a name plus exact/min/max bounds per stat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeroQuery {
    pub name: Option<String>,
    pub stats: HashMap<StatKind, StatBounds>,
    pub order: HeroOrder,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroList {
    pub count: i64,
    pub heroes: Vec<entities::Hero>,
}

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum GetHeroesError {
    #[error("hero not found")]
    NotFound,
}

fn stat_filter(kind: StatKind, comparison: Comparison, value: i32) -> HeroFilter {
    HeroFilter::Stat {
        kind,
        comparison,
        value,
    }
}

pub fn build_filters(query: &HeroQuery) -> Vec<HeroFilter> {
    let mut filters = Vec::new();

    for kind in StatKind::ALL {
        let Some(bounds) = query.stats.get(&kind) else {
            continue;
        };

        if let Some(exact) = bounds.exact {
            filters.push(stat_filter(kind, Comparison::Eq, exact));
        } else {
            if let Some(min) = bounds.min {
                filters.push(stat_filter(kind, Comparison::Ge, min));
            }
            if let Some(max) = bounds.max {
                filters.push(stat_filter(kind, Comparison::Le, max));
            }
        }
    }

    if let Some(name) = &query.name {
        filters.push(HeroFilter::NameEquals(name.clone()));
    }

    filters
}

pub async fn get_heroes<R>(
    repo: &mut R,
    query: &HeroQuery,
) -> anyhow::Result<Result<HeroList, GetHeroesError>>
where
    R: ports::HeroesRepository<Error = anyhow::Error> + Send,
{
    let filters = build_filters(query);
    tracing::debug!(?filters, order = ?query.order, page = ?query.page, "get heroes");

    let count = repo.count(&filters).await?;
    if count == 0 {
        return Ok(Err(GetHeroesError::NotFound));
    }

    let heroes = repo.find_page(&filters, query.order, query.page).await?;
    Ok(Ok(HeroList { count, heroes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryHeroesRepository;
    use crate::entities::Limit;
    use crate::ports::HeroOrderField;
    use crate::test_utils::{batman_beyond, hero_with_stats};

    fn query_with(kind: StatKind, bounds: StatBounds) -> HeroQuery {
        HeroQuery {
            stats: HashMap::from([(kind, bounds)]),
            ..HeroQuery::default()
        }
    }

    fn ids(list: &HeroList) -> Vec<i32> {
        list.heroes.iter().map(|hero| i32::from(hero.id)).collect()
    }

    fn catalog() -> InMemoryHeroesRepository {
        InMemoryHeroesRepository::with_heroes([
            batman_beyond(70),
            batman_beyond(69),
            hero_with_stats(1, "A-Bomb", [Some(38), Some(100), Some(17), Some(80), Some(24), Some(64)]),
            hero_with_stats(2, "Abe Sapien", [Some(88), Some(28), Some(35), Some(65), Some(100), Some(85)]),
            hero_with_stats(3, "Abin Sur", [Some(50), Some(90), Some(53), Some(64), Some(99), Some(65)]),
            hero_with_stats(4, "Abomination", [None, None, None, None, None, None]),
        ])
    }

    #[test]
    fn empty_query_has_no_filters() {
        assert!(build_filters(&HeroQuery::default()).is_empty());
    }

    #[test]
    fn exact_value_wins_over_min_and_max() {
        let query = query_with(
            StatKind::Speed,
            StatBounds {
                exact: Some(35),
                min: Some(90),
                max: Some(10),
            },
        );
        assert_eq!(
            build_filters(&query),
            vec![stat_filter(StatKind::Speed, Comparison::Eq, 35)]
        );
    }

    #[test]
    fn min_and_max_combine() {
        let query = query_with(
            StatKind::Power,
            StatBounds {
                exact: None,
                min: Some(20),
                max: Some(99),
            },
        );
        assert_eq!(
            build_filters(&query),
            vec![
                stat_filter(StatKind::Power, Comparison::Ge, 20),
                stat_filter(StatKind::Power, Comparison::Le, 99),
            ]
        );
    }

    #[test]
    fn name_filter_is_exact() {
        let query = HeroQuery {
            name: Some("Batman".to_string()),
            ..HeroQuery::default()
        };
        assert_eq!(
            build_filters(&query),
            vec![HeroFilter::NameEquals("Batman".to_string())]
        );
    }

    #[tokio::test]
    async fn batmen_come_back_in_id_order() {
        let mut repo = catalog();
        let query = HeroQuery {
            name: Some("Batman".to_string()),
            ..HeroQuery::default()
        };

        let list = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(ids(&list), vec![69, 70]);
        assert!(list.heroes.iter().all(|hero| hero.name == "Batman"));
    }

    #[tokio::test]
    async fn name_match_is_case_sensitive() {
        let mut repo = catalog();
        let query = HeroQuery {
            name: Some("batman".to_string()),
            ..HeroQuery::default()
        };
        assert_eq!(
            get_heroes(&mut repo, &query).await.unwrap(),
            Err(GetHeroesError::NotFound)
        );
    }

    #[tokio::test]
    async fn no_match_is_not_found() {
        let mut repo = catalog();
        let query = query_with(
            StatKind::Intelligence,
            StatBounds {
                exact: None,
                min: Some(101),
                max: None,
            },
        );
        assert_eq!(
            get_heroes(&mut repo, &query).await.unwrap(),
            Err(GetHeroesError::NotFound)
        );
    }

    #[tokio::test]
    async fn unknown_stats_are_excluded_from_range_filters() {
        let mut repo = catalog();
        let query = query_with(
            StatKind::Combat,
            StatBounds {
                exact: None,
                min: None,
                max: Some(100),
            },
        );
        let list = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        assert!(!ids(&list).contains(&4));
        assert_eq!(list.count, 5);
    }

    #[tokio::test]
    async fn page_length_is_min_of_count_and_limit() {
        let mut repo = catalog();
        for limit in [0, 1, 3, 6, 100] {
            let query = HeroQuery {
                page: Page {
                    offset: 0,
                    limit: Limit::new(limit).unwrap(),
                },
                ..HeroQuery::default()
            };
            let list = get_heroes(&mut repo, &query).await.unwrap().unwrap();
            assert_eq!(list.count, 6);
            assert_eq!(list.heroes.len(), std::cmp::min(6, limit as usize));
        }
    }

    #[tokio::test]
    async fn pagination_is_stable_across_calls() {
        let mut repo = catalog();
        let query = HeroQuery {
            order: HeroOrder {
                field: HeroOrderField::Name,
                ascending: true,
            },
            page: Page {
                offset: 1,
                limit: Limit::new(3).unwrap(),
            },
            ..HeroQuery::default()
        };

        let first = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        let second = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        assert_eq!(first, second);
        // A-Bomb, Abe Sapien, Abin Sur, Abomination, Batman(69), Batman(70)
        assert_eq!(ids(&first), vec![2, 3, 4]);

        let query = HeroQuery {
            page: Page {
                offset: 4,
                limit: Limit::new(2).unwrap(),
            },
            ..query
        };
        let tail = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        assert_eq!(ids(&tail), vec![69, 70]);
    }

    #[tokio::test]
    async fn descending_id_order() {
        let mut repo = catalog();
        let query = HeroQuery {
            order: HeroOrder {
                field: HeroOrderField::Id,
                ascending: false,
            },
            ..HeroQuery::default()
        };
        let list = get_heroes(&mut repo, &query).await.unwrap().unwrap();
        assert_eq!(ids(&list), vec![70, 69, 4, 3, 2, 1]);
    }
}
