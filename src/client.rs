//! Fact client
//!
//! Talks to the external fact providers (with canned fallback lists for
//! when they are unreachable) and to the fact store service API.

pub mod fallback;
pub mod providers;
pub mod store_api;

pub use providers::FactProvider;
pub use store_api::StoreClient;
