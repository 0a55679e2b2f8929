//! JSON body extractor that reports every decode failure as a bad request.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use common::AppError;

/// JSON body extractor.
///
/// Unlike `axum::Json`, the content type is not checked and both syntax
/// and shape errors reject with `AppError::BadRequest`.
///
/// # Example
///
/// ```rust,ignore
/// use domain::UserPayload;
/// use user_service_lib::extractors::PayloadJson;
///
/// async fn create_user(PayloadJson(payload): PayloadJson<UserPayload>) {
///     // payload decoded from the raw body
/// }
/// ```
pub struct PayloadJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for PayloadJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::bad_request(format!("Malformed user payload: {}", e))
        })?;

        Ok(PayloadJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use domain::UserPayload;

    async fn extract(body: &'static str) -> Result<PayloadJson<UserPayload>, AppError> {
        let request = Request::builder()
            .method("POST")
            .uri("/user")
            .body(Body::from(body))
            .unwrap();
        PayloadJson::<UserPayload>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_decodes_without_content_type() {
        let PayloadJson(payload) = extract(r#"{"Name":"Alice"}"#).await.unwrap();
        assert_eq!(payload, UserPayload::new(0, "Alice"));
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let err = extract("{not json").await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_wrong_shape() {
        let err = extract(r#"{"Id":"seven","Name":1}"#).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
