use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::entities;
use crate::ports::{self, HeroFilter, HeroOrder, InsertBatchError, Page};

/// Heroes kept in process memory. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHeroesRepository {
    heroes: Arc<Mutex<BTreeMap<entities::HeroId, entities::Hero>>>,
}

impl InMemoryHeroesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heroes(heroes: impl IntoIterator<Item = entities::Hero>) -> Self {
        let heroes = heroes.into_iter().map(|hero| (hero.id, hero)).collect();
        Self {
            heroes: Arc::new(Mutex::new(heroes)),
        }
    }
}

fn matches_all(filters: &[HeroFilter], hero: &entities::Hero) -> bool {
    filters.iter().all(|filter| filter.matches(hero))
}

#[async_trait]
impl ports::HeroesRepository for InMemoryHeroesRepository {
    type Error = anyhow::Error;

    async fn count(&mut self, filters: &[HeroFilter]) -> Result<i64, Self::Error> {
        let heroes = self.heroes.lock().await;
        let count = heroes
            .values()
            .filter(|hero| matches_all(filters, hero))
            .count();
        Ok(i64::try_from(count)?)
    }

    async fn find_page(
        &mut self,
        filters: &[HeroFilter],
        order: HeroOrder,
        page: Page,
    ) -> Result<Vec<entities::Hero>, Self::Error> {
        let heroes = self.heroes.lock().await;
        let mut matched = heroes
            .values()
            .filter(|hero| matches_all(filters, hero))
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|a, b| order.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit.value() as usize)
            .collect())
    }

    async fn insert_batch(
        &mut self,
        heroes: Vec<entities::Hero>,
    ) -> Result<Result<Vec<entities::Hero>, InsertBatchError>, Self::Error> {
        let mut stored = self.heroes.lock().await;

        let mut seen = std::collections::BTreeSet::new();
        for hero in &heroes {
            if stored.contains_key(&hero.id) || !seen.insert(hero.id) {
                return Ok(Err(InsertBatchError::AlreadyExists(hero.id)));
            }
        }

        for hero in &heroes {
            stored.insert(hero.id, hero.clone());
        }
        Ok(Ok(heroes))
    }

    async fn delete(
        &mut self,
        id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error> {
        Ok(self.heroes.lock().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{HeroId, Limit, StatKind};
    use crate::ports::{Comparison, HeroOrderField, HeroesRepository};
    use crate::test_utils::{batman_beyond, hero_with_stats};

    fn ids(heroes: &[entities::Hero]) -> Vec<i32> {
        heroes.iter().map(|hero| i32::from(hero.id)).collect()
    }

    #[tokio::test]
    async fn unknown_stats_never_match_a_stat_filter() {
        let mut repo = InMemoryHeroesRepository::with_heroes([
            hero_with_stats(1, "A", [Some(0), None, None, None, None, None]),
            hero_with_stats(2, "B", [None, None, None, None, None, None]),
        ]);

        for comparison in [Comparison::Eq, Comparison::Ge, Comparison::Le] {
            let filter = HeroFilter::Stat {
                kind: StatKind::Intelligence,
                comparison,
                value: 0,
            };
            assert_eq!(repo.count(&[filter]).await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn stat_order_puts_unknown_last_and_breaks_ties_by_id() {
        let mut repo = InMemoryHeroesRepository::with_heroes([
            hero_with_stats(5, "E", [None, Some(10), None, None, None, None]),
            hero_with_stats(4, "D", [None, None, None, None, None, None]),
            hero_with_stats(3, "C", [None, Some(50), None, None, None, None]),
            hero_with_stats(2, "B", [None, Some(10), None, None, None, None]),
        ]);
        let field = HeroOrderField::Stat(StatKind::Strength);

        let ascending = repo
            .find_page(&[], HeroOrder { field, ascending: true }, Page::default())
            .await
            .unwrap();
        assert_eq!(ids(&ascending), vec![2, 5, 3, 4]);

        let descending = repo
            .find_page(&[], HeroOrder { field, ascending: false }, Page::default())
            .await
            .unwrap();
        assert_eq!(ids(&descending), vec![3, 2, 5, 4]);
    }

    #[tokio::test]
    async fn page_skips_offset_and_honours_limit() {
        let mut repo = InMemoryHeroesRepository::with_heroes((1..=10).map(batman_beyond));
        let page = Page {
            offset: 3,
            limit: Limit::new(4).unwrap(),
        };
        let heroes = repo
            .find_page(&[], HeroOrder::default(), page)
            .await
            .unwrap();
        assert_eq!(ids(&heroes), vec![4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn duplicate_inside_batch_rejects_the_batch() {
        let mut repo = InMemoryHeroesRepository::new();
        let result = repo
            .insert_batch(vec![batman_beyond(1), batman_beyond(2), batman_beyond(1)])
            .await
            .unwrap();
        assert_eq!(result, Err(InsertBatchError::AlreadyExists(HeroId::from(1))));
        assert_eq!(repo.count(&[]).await.unwrap(), 0);
    }
}
