use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::configuration::config::Config;
use crate::error_handling::types::WebError;
use crate::storage::storage_trait::Storage;
use crate::web_interface::routes;
use crate::web_interface::types::ApiMessage;

/// Web server for the fact store HTTP API
pub struct WebServer {
    storage: Arc<dyn Storage>,
    config: Config,
}

impl WebServer {
    /// Create a new WebServer instance
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        Self { storage, config }
    }

    /// Start the web server on the configured address and port
    pub async fn start(&self) -> Result<(), WebError> {
        // Origins were validated at config load; allow_origins panics on
        // malformed entries
        let cors = warp::cors()
            .allow_origins(self.config.allowed_origins.iter().map(|s| s.as_str()))
            .allow_methods(vec!["GET", "POST", "DELETE"])
            .allow_headers(vec!["content-type"])
            .allow_credentials(true);

        let api = routes::index_route()
            .or(routes::list_facts_route(self.storage.clone()))
            .or(routes::create_fact_route(self.storage.clone()))
            .or(routes::delete_fact_route(self.storage.clone()))
            .or(routes::health_route(self.storage.clone()))
            .recover(handle_rejection)
            .with(cors);

        let addr: SocketAddr = format!("{}:{}", self.config.bind_address, self.config.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| WebError::BadAddress(e.to_string()))?;
        info!("Serving the fact API on http://{}/api/facts", addr);

        // Start server (warp 0.4)
        warp::Server::bind(&addr).run(api).await;

        Ok(())
    }
}

/// Renders warp rejections (unknown route, malformed body) in the same
/// `{message}` shape as handler errors.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Unhandled error".to_string())
    };
    Ok(reply::with_status(reply::json(&ApiMessage { message }), code))
}
