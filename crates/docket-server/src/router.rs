use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Serialize;

use docket_registry::Registry;
use docket_store::Store;

use crate::error::ServerResult;
use crate::handler;

/// Build the document endpoints for one payload type over an explicitly
/// owned store.
///
/// Routes, relative to wherever the router is mounted:
/// - `GET /` — list (optional `?limit=`), `POST /` — create with a fresh id
/// - `GET /{id}`, `POST /{id}`, `PUT /{id}`, `DELETE /{id}`
pub fn document_routes<T>(store: Arc<Store<T>>) -> Router
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handler::list_documents::<T>).post(handler::create_document::<T>),
        )
        .route(
            "/:id",
            get(handler::get_document::<T>)
                .post(handler::put_document::<T>)
                .put(handler::put_document::<T>)
                .delete(handler::delete_document::<T>),
        )
        .with_state(store)
}

/// Build the document endpoints for one payload type over the
/// process-wide default store for that type.
pub fn registry_routes<T>() -> ServerResult<Router>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let store = Registry::global().store_of::<T>()?;
    Ok(document_routes(store))
}
