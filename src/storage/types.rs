use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Animal tag on a fact. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    #[default]
    Cat,
    Dog,
}

impl Animal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animal::Cat => "cat",
            Animal::Dog => "dog",
        }
    }
}

impl std::str::FromStr for Animal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(Animal::Cat),
            "dog" => Ok(Animal::Dog),
            other => Err(format!("unknown animal '{}', expected cat or dog", other)),
        }
    }
}

/// A stored fact. `id` and `created_at` are assigned by the backend on
/// insertion and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactRecord {
    pub id: String,
    pub text: String,
    pub animal: Animal,
    pub created_at: DateTime<Utc>,
}

/// Input to `Storage::insert_fact`. `text` has already been checked
/// non-empty by the caller.
#[derive(Debug, Clone)]
pub struct NewFact {
    pub text: String,
    pub animal: Animal,
}
