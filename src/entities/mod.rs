mod hero;
mod hero_id;
mod hero_name;
mod hero_profile;
mod limit;
mod power_stats;

pub use hero::{Hero, RawHero};
pub use hero_id::{HeroId, HeroIdTryFromError, RawHeroId};
pub use hero_name::{HeroName, HeroNameError};
pub use hero_profile::{Appearance, Biography, Connections, Image, Work};
pub use limit::{CreateLimitError, Limit, DEFAULT_LIMIT, MAX_LIMIT};
pub use power_stats::{PowerStats, StatKind, StatValue, UNKNOWN_MARKER};
