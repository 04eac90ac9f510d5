use std::sync::Arc;

use axum::extract::{Path, Query as HttpQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use docket_registry::RegistryError;
use docket_store::{Document, Query, Store, StoreError};
use docket_types::DocId;

/// Store-level failure translated to a transport status code.
///
/// Mapping: missing document → 404, empty id or type mismatch → 400,
/// anything else → 500.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    TypeMismatch(&'static str),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Store(e) => Self::Store(e),
            RegistryError::TypeMismatch { requested } => Self::TypeMismatch(requested),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(StoreError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("document not found: {id}"))
            }
            Self::Store(StoreError::EmptyDocId) => {
                (StatusCode::BAD_REQUEST, "empty document id".to_string())
            }
            Self::TypeMismatch(requested) => (
                StatusCode::BAD_REQUEST,
                format!("document type mismatch: {requested}"),
            ),
            Self::Store(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Response body for writes that generated a fresh id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: DocId,
}

/// Query-string parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// Response body for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub documents: Vec<Document<T>>,
    pub total: usize,
}

/// `POST /{id}` / `PUT /{id}` — whole-record insert or replace.
pub(crate) async fn put_document<T>(
    State(store): State<Arc<Store<T>>>,
    Path(id): Path<String>,
    Json(data): Json<T>,
) -> Result<StatusCode, ApiError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    store.put(Document::new(id, data))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /` — insert under a freshly generated id.
pub(crate) async fn create_document<T>(
    State(store): State<Arc<Store<T>>>,
    Json(data): Json<T>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let id = DocId::generate();
    store.put(Document::new(id.clone(), data))?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /{id}` — fetch one document.
pub(crate) async fn get_document<T>(
    State(store): State<Arc<Store<T>>>,
    Path(id): Path<String>,
) -> Result<Json<Document<T>>, ApiError>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    let doc = store.get(&DocId::new(id))?;
    Ok(Json(doc))
}

/// `DELETE /{id}` — remove one document.
pub(crate) async fn delete_document<T>(
    State(store): State<Arc<Store<T>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    T: Send + Sync + 'static,
{
    store.delete(&DocId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /` — list documents, optionally truncated by `?limit=`.
pub(crate) async fn list_documents<T>(
    State(store): State<Arc<Store<T>>>,
    HttpQuery(params): HttpQuery<ListParams>,
) -> Json<ListResponse<T>>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    let mut query = Query::new();
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }
    let result = store.select(&query);
    Json(ListResponse {
        documents: result.documents,
        total: result.total,
    })
}
