use actix_cors::Cors;
use actix_web::{error, http, web, HttpResponse};

mod app_ctx;
mod common;
mod heroes;

pub use app_ctx::AppCtx;
pub use common::ApiError;
pub use heroes::{CreateHeroParams, HeroQueryParams};

use crate::ports;

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            r#"
    <html>
    <head><title>SuperHero API</title></head>
    <body>
    <h1>SuperHero API</h1>
    <ul>
    <li><code>GET /api/v1/heroes</code> list heroes</li>
    <li><code>POST /api/v1/heroes?name=...</code> import heroes from superheroapi.com</li>
    </ul>
    </body>
    </html>
    "#,
        )
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_any_header()
        .supports_credentials()
}

pub fn configure<R, L>(cfg: &mut web::ServiceConfig)
where
    R: ports::HeroesRepository<Error = anyhow::Error> + Clone + Send + 'static,
    L: ports::HeroLookup<Error = anyhow::Error> + Sync + 'static,
{
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::Validation(err.to_string()))
    }))
    .service(web::resource("/").route(web::get().to(home)))
    .service(
        web::scope("/api/v1").service(
            web::resource("/heroes")
                .route(web::get().to(heroes::get_heroes::<R, L>))
                .route(web::post().to(heroes::create_hero::<R, L>)),
        ),
    );
}
