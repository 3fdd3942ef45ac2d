/**
 * Request Extractors
 *
 * Wrappers around axum's `Path`, `Query`, `Json` and `Form` extractors that
 * turn their rejections into `BackendError`, so a malformed id, query or
 * body is answered with the same `{"error", "status"}` JSON as every other
 * failure.
 */

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
        Form, FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for BackendError {
                fn from(rejection: $rejection) -> Self {
                    BackendError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(PathRejection, QueryRejection, JsonRejection, FormRejection);

/// Path parameters
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

/// Query string parameters
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

/// JSON request body
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Form-encoded request body
#[derive(Debug)]
pub struct ApiForm<T>(pub T);

impl<S, T> FromRequest<S> for ApiForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        Ok(ApiForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;
    use axum::http::StatusCode;

    #[derive(Debug, serde::Deserialize)]
    struct Paging {
        #[allow(dead_code)]
        page: u32,
    }

    #[tokio::test]
    async fn test_query_rejection_becomes_backend_error() {
        let (mut parts, _) = Request::builder()
            .uri("/orders?page=first")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        assert_matches!(
            ApiQuery::<Paging>::from_request_parts(&mut parts, &()).await,
            Err(BackendError::Rejected { status: StatusCode::BAD_REQUEST, .. })
        );
    }

    #[tokio::test]
    async fn test_json_rejection_keeps_status() {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(r#"{"page": "first"}"#))
            .unwrap();

        assert_matches!(
            ApiJson::<Paging>::from_request(request, &()).await,
            Err(BackendError::Rejected { status: StatusCode::UNPROCESSABLE_ENTITY, .. })
        );
    }
}
