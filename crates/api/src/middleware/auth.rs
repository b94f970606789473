//! Caller identity extraction.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! id in the `X-User-Id` header. Requests without a parseable id are
//! rejected with 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::response::ApiError;
use fintrack_shared::AppError;

/// Header carrying the gateway-verified user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the calling user's id.
///
/// Use this in handlers to scope every query to the caller:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    /// Returns the user id.
    #[must_use]
    pub const fn user_id(self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .map(Self)
            .ok_or_else(|| {
                ApiError(AppError::Unauthorized(
                    "X-User-Id header with a valid user id is required".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(USER_ID_HEADER, HeaderValue::from_str(v).unwrap());
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_header_extracts_user_id() {
        let id = Uuid::new_v4();
        let mut parts = parts_with_header(Some(&id.to_string()));
        let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth.user_id(), id);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let mut parts = parts_with_header(None);
        assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        let mut parts = parts_with_header(Some("not-a-uuid"));
        assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
    }
}
