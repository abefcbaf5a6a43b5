use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::app_config::SuperheroApiConfig;
use crate::entities;
use crate::ports::{self, LookupError};

const NOT_FOUND_MESSAGE: &str = "character with given name not found";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Option<Vec<entities::RawHero>>,
}

/// Turns a `/search/{name}` answer into heroes or a lookup failure.
fn decode_search_response(
    status: StatusCode,
    body: &[u8],
) -> anyhow::Result<Result<Vec<entities::RawHero>, LookupError>> {
    if status != StatusCode::OK {
        return Ok(Err(LookupError::Unavailable(format!("status {}", status))));
    }

    let envelope: SearchEnvelope =
        serde_json::from_slice(body).context("decode superhero api response")?;

    match envelope.response.as_str() {
        "success" => envelope
            .results
            .map(Ok)
            .ok_or_else(|| anyhow!("success response without results")),
        "error" => match envelope.error.as_deref() {
            Some(NOT_FOUND_MESSAGE) => Ok(Err(LookupError::NotFound)),
            Some(message) => Ok(Err(LookupError::Unavailable(message.to_string()))),
            None => Ok(Err(LookupError::Unavailable("error without message".to_string()))),
        },
        other => Err(anyhow!("unexpected response kind {:?}", other)),
    }
}

/// Client of <https://superheroapi.com>.
#[derive(Debug, Clone)]
pub struct SuperheroApiImpl {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl SuperheroApiImpl {
    pub fn new(config: &SuperheroApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn search_url(&self, name: &entities::HeroName) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("superhero api base url cannot be a base"))?
            .pop_if_empty()
            .extend([self.token.as_str(), "search", name.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl ports::HeroLookup for SuperheroApiImpl {
    type Error = anyhow::Error;

    async fn search(
        &self,
        name: &entities::HeroName,
    ) -> Result<Result<Vec<entities::RawHero>, LookupError>, Self::Error> {
        let url = self.search_url(name)?;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("superhero api request failed: {}", err);
                return Ok(Err(LookupError::Unavailable(err.to_string())));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("superhero api body read failed: {}", err);
                return Ok(Err(LookupError::Unavailable(err.to_string())));
            }
        };

        let result = decode_search_response(status, &body)?;
        if let Err(err) = &result {
            tracing::warn!(name = %name, "superhero api lookup failed: {}", err);
        }
        Ok(result)
    }
}
