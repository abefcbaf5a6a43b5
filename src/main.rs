use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use superhero_catalog::adapters::{HeroesRepositoryImpl, SuperheroApiImpl};
use superhero_catalog::app_config::AppConfig;
use superhero_catalog::rest::{self, AppCtx};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env()?;

    let host = config.host.clone();
    let port = config.port;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections())
        .connect(&config.database.url)
        .await
        .context("connect database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("run migrations")?;

    let ctx = web::Data::new(AppCtx {
        repository: HeroesRepositoryImpl::new(pool),
        lookup: SuperheroApiImpl::new(&config.superhero_api)?,
    });

    tracing::info!(mode = ?config.mode, "listening on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .wrap(middleware::Logger::default())
            .wrap(rest::cors())
            .configure(rest::configure::<HeroesRepositoryImpl, SuperheroApiImpl>)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
