//! Authenticated-user context extractor.
//!
//! Authentication happens upstream (API gateway); requests arrive with
//! `X-User-Id` and `X-User-Role` headers already verified. This core
//! trusts that context and only parses it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::user::UserRole;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the verified acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the verified acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The acting user, as asserted by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl UserAuth {
    /// Parses the auth context out of request headers.
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Result<Self, ApiError> {
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))?;

        let role = headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Role header".to_string()))?
            .parse::<UserRole>()
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Role header".to_string()))?;

        Ok(Self { user_id, role })
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn headers(id: &str, role: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(id).unwrap());
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_str(role).unwrap());
        headers
    }

    #[test]
    fn test_parses_valid_context() {
        let id = Uuid::new_v4();
        let auth = UserAuth::from_headers(&headers(&id.to_string(), "artist")).unwrap();
        assert_eq!(auth.user_id, id);
        assert_eq!(auth.role, UserRole::Artist);
    }

    #[test]
    fn test_rejects_missing_user_id() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("fan"));
        assert!(matches!(
            UserAuth::from_headers(&headers),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_user_id() {
        let result = UserAuth::from_headers(&headers("not-a-uuid", "fan"));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_rejects_unknown_role() {
        let id = Uuid::new_v4().to_string();
        let result = UserAuth::from_headers(&headers(&id, "admin"));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
