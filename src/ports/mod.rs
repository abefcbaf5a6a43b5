mod common;
mod hero_lookup;
mod heroes_repository;

pub use common::*;
pub use hero_lookup::*;
pub use heroes_repository::*;
