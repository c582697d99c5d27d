use log::warn;
use serde::Deserialize;

use crate::client::fallback;
use crate::error_handling::types::ClientError;
use crate::storage::types::Animal;

pub const DOG_FACTS_URL: &str = "https://dog-api.kinduff.com/api/facts";
pub const CAT_FACT_URL: &str = "https://catfact.ninja/fact";

/// The dog provider answers `{"facts": ["..."]}`.
#[derive(Debug, Deserialize)]
struct DogFactsPayload {
    facts: Vec<String>,
}

/// The cat provider answers `{"fact": "..."}`.
#[derive(Debug, Deserialize)]
struct CatFactPayload {
    fact: String,
}

/// Fetches random facts from the external providers.
///
/// The providers are best-effort: any network error, bad status, or shape
/// deviation falls back to a canned fact, so `random_fact` always produces
/// something to display.
pub struct FactProvider {
    http: reqwest::Client,
    dog_url: String,
    cat_url: String,
}

impl FactProvider {
    pub fn new() -> Self {
        Self::with_urls(DOG_FACTS_URL, CAT_FACT_URL)
    }

    pub fn with_urls(dog_url: impl Into<String>, cat_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            dog_url: dog_url.into(),
            cat_url: cat_url.into(),
        }
    }

    /// Returns a fact for the given animal, falling back to the local list
    /// on any provider failure.
    pub async fn random_fact(&self, animal: Animal) -> String {
        match self.fetch_fact(animal).await {
            Ok(fact) => fact,
            Err(e) => {
                warn!(
                    "{} fact provider failed ({}), using a local fact",
                    animal.as_str(),
                    e
                );
                fallback::local_fact(animal).to_string()
            }
        }
    }

    async fn fetch_fact(&self, animal: Animal) -> Result<String, ClientError> {
        match animal {
            Animal::Dog => {
                let payload: DogFactsPayload = self.get_json(&self.dog_url).await?;
                first_dog_fact(payload)
                    .ok_or_else(|| ClientError::Api("provider returned no facts".to_string()))
            }
            Animal::Cat => {
                let payload: CatFactPayload = self.get_json(&self.cat_url).await?;
                cat_fact(payload)
                    .ok_or_else(|| ClientError::Api("provider returned an empty fact".to_string()))
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .json()
            .await
            .map_err(|e| ClientError::Api(e.to_string()))
    }
}

impl Default for FactProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn first_dog_fact(payload: DogFactsPayload) -> Option<String> {
    payload
        .facts
        .into_iter()
        .next()
        .filter(|fact| !fact.trim().is_empty())
}

fn cat_fact(payload: CatFactPayload) -> Option<String> {
    let fact = payload.fact.trim();
    if fact.is_empty() {
        None
    } else {
        Some(fact.to_string())
    }
}
