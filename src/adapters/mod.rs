mod heroes_repository_impl;
mod in_memory_heroes_repository;
mod superhero_api_impl;

pub use heroes_repository_impl::HeroesRepositoryImpl;
pub use in_memory_heroes_repository::InMemoryHeroesRepository;
pub use superhero_api_impl::SuperheroApiImpl;
