use std::sync::Arc;

use chrono::Utc;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::Storage;
use crate::storage::types::NewFact;
use crate::web_interface::types::{ApiMessage, CreateFactRequest, HealthResponse};

/// Runs a storage operation off the async executor. The database backend
/// blocks on its own runtime, which would abort a tokio worker thread if
/// called inline.
async fn run_storage<T, F>(op: F) -> Result<T, StorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
}

fn storage_error_reply(err: StorageError) -> warp::reply::Response {
    reply::with_status(
        reply::json(&ApiMessage {
            message: err.to_string(),
        }),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}

/// GET /
pub fn index_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(|| async move {
        let html = r#"<html><head><title>pawfacts</title></head>
                <body><h1>pawfacts is running</h1><p>See /api/facts for JSON.</p></body></html>"#;
        Ok::<_, Rejection>(reply::html(html))
    })
}

/// GET /api/facts
pub fn list_facts_route(
    storage: Arc<dyn Storage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "facts")
        .and(warp::get())
        .and_then(move || {
            let storage = storage.clone();
            async move {
                match run_storage(move || storage.list_facts()).await {
                    Ok(list) => {
                        let res =
                            reply::with_status(reply::json(&list), StatusCode::OK).into_response();
                        Ok::<_, Rejection>(res)
                    }
                    Err(e) => Ok::<_, Rejection>(storage_error_reply(e)),
                }
            }
        })
}

/// POST /api/facts
pub fn create_fact_route(
    storage: Arc<dyn Storage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "facts")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |body: CreateFactRequest| {
            let storage = storage.clone();
            async move {
                let text = match body.text.as_deref().map(str::trim) {
                    Some(t) if !t.is_empty() => t.to_string(),
                    _ => {
                        let res = reply::with_status(
                            reply::json(&ApiMessage {
                                message: "Fact text is required".to_string(),
                            }),
                            StatusCode::BAD_REQUEST,
                        )
                        .into_response();
                        return Ok::<_, Rejection>(res);
                    }
                };
                let new_fact = NewFact {
                    text,
                    animal: body.animal.unwrap_or_default(),
                };
                match run_storage(move || storage.insert_fact(new_fact)).await {
                    Ok(record) => {
                        let res = reply::with_status(reply::json(&record), StatusCode::CREATED)
                            .into_response();
                        Ok::<_, Rejection>(res)
                    }
                    Err(e) => Ok::<_, Rejection>(storage_error_reply(e)),
                }
            }
        })
}

/// DELETE /api/facts/:id
pub fn delete_fact_route(
    storage: Arc<dyn Storage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "facts" / String)
        .and(warp::delete())
        .and_then(move |id: String| {
            let storage = storage.clone();
            async move {
                match run_storage(move || storage.delete_fact(&id)).await {
                    Ok(()) => {
                        let res = reply::with_status(
                            reply::json(&ApiMessage {
                                message: "Fact deleted".to_string(),
                            }),
                            StatusCode::OK,
                        )
                        .into_response();
                        Ok::<_, Rejection>(res)
                    }
                    Err(StorageError::NotFound) => {
                        let res = reply::with_status(
                            reply::json(&ApiMessage {
                                message: "Fact not found".to_string(),
                            }),
                            StatusCode::NOT_FOUND,
                        )
                        .into_response();
                        Ok::<_, Rejection>(res)
                    }
                    Err(e) => Ok::<_, Rejection>(storage_error_reply(e)),
                }
            }
        })
}

/// GET /api/health
pub fn health_route(
    storage: Arc<dyn Storage>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "health")
        .and(warp::get())
        .and_then(move || {
            let storage = storage.clone();
            async move {
                let health = HealthResponse {
                    status: "ok".to_string(),
                    backend_connected: storage.backend_connected(),
                    timestamp: Utc::now(),
                };
                Ok::<_, Rejection>(reply::with_status(reply::json(&health), StatusCode::OK))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::MemoryStorage;
    use serde_json::{json, Value};

    fn api(storage: Arc<dyn Storage>) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone
    {
        list_facts_route(storage.clone())
            .or(create_fact_route(storage.clone()))
            .or(delete_fact_route(storage.clone()))
            .or(health_route(storage))
    }

    macro_rules! post_fact {
        ($api:expr, $body:expr) => {{
            let res = warp::test::request()
                .method("POST")
                .path("/api/facts")
                .json(&$body)
                .reply($api)
                .await;
            let parsed: Value = serde_json::from_slice(res.body()).unwrap_or(Value::Null);
            (res.status(), parsed)
        }};
    }

    macro_rules! list_facts {
        ($api:expr) => {{
            let res = warp::test::request()
                .method("GET")
                .path("/api/facts")
                .reply($api)
                .await;
            assert_eq!(res.status(), StatusCode::OK);
            let parsed: Value = serde_json::from_slice(res.body()).unwrap();
            parsed
        }};
    }

    #[tokio::test]
    async fn create_list_delete_roundtrip() {
        let api = api(Arc::new(MemoryStorage::new()));

        let (status, created) =
            post_fact!(&api, json!({ "text": "Cats sleep a lot", "animal": "cat" }));
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["text"], "Cats sleep a lot");
        assert_eq!(created["animal"], "cat");
        assert!(created["createdAt"].is_string());

        let listed = list_facts!(&api);
        assert_eq!(listed[0]["id"], id.as_str());

        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/api/facts/{}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "Fact deleted");

        assert_eq!(list_facts!(&api).as_array().unwrap().len(), 0);

        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/api/facts/{}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["message"], "Fact not found");
    }

    #[tokio::test]
    async fn create_without_animal_defaults_to_cat() {
        let api = api(Arc::new(MemoryStorage::new()));
        let (status, created) = post_fact!(&api, json!({ "text": "Dogs are fine too" }));
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["animal"], "cat");
    }

    #[tokio::test]
    async fn create_rejects_missing_or_blank_text() {
        let api = api(Arc::new(MemoryStorage::new()));

        let (status, body) = post_fact!(&api, json!({ "animal": "dog" }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Fact text is required");

        let (status, _) = post_fact!(&api, json!({ "text": "   " }));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Nothing was stored by the rejected requests
        assert_eq!(list_facts!(&api).as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let api = api(Arc::new(MemoryStorage::new()));
        for text in ["one", "two", "three"] {
            let (status, _) = post_fact!(&api, json!({ "text": text }));
            assert_eq!(status, StatusCode::CREATED);
        }
        let listed = list_facts!(&api);
        let texts: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn health_reports_memory_backend() {
        let api = api(Arc::new(MemoryStorage::new()));
        let res = warp::test::request()
            .method("GET")
            .path("/api/health")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backendConnected"], false);
        assert!(body["timestamp"].is_string());
    }
}
