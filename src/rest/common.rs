use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::commands::heroes_command::CreateError;
use crate::entities::{CreateLimitError, HeroNameError};
use crate::ports::OrderFieldError;
use crate::queries::GetHeroesError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    UpstreamUnavailable(String),
    #[error("{0}")]
    Validation(String),
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(err) = self {
            tracing::error!("{:?}", err);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

impl From<GetHeroesError> for ApiError {
    fn from(err: GetHeroesError) -> Self {
        match err {
            GetHeroesError::NotFound => ApiError::NotFound("Hero not found".to_string()),
        }
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::NotFound => ApiError::NotFound("Hero not found".to_string()),
            CreateError::AlreadyExists(id) => {
                ApiError::Conflict(format!("Hero with id {} already exists", id))
            }
            CreateError::UpstreamUnavailable => {
                ApiError::UpstreamUnavailable("SuperHero API is not available".to_string())
            }
        }
    }
}

impl From<CreateLimitError> for ApiError {
    fn from(err: CreateLimitError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<HeroNameError> for ApiError {
    fn from(err: HeroNameError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<OrderFieldError> for ApiError {
    fn from(err: OrderFieldError) -> Self {
        ApiError::Validation(err.to_string())
    }
}
