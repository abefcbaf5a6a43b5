mod hero_query;

pub use hero_query::{build_filters, get_heroes, GetHeroesError, HeroList, HeroQuery, StatBounds};
