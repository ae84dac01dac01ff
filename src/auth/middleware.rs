// Authentication extractors for protected routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::error::AuthError;
use crate::auth::token::{Role, TokenService};

/// Authenticated user extractor for protected routes
///
/// This is the identity interface of the booking core: the external identity
/// service issues the token, and `user_id` here is the authenticated user id
/// every booking is recorded against.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // Verify Bearer token format
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let token_service = TokenService::from_env()?;
        let claims = token_service.validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Extractor for routes that require the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(AuthError::InsufficientPermissions {
                required: Role::Admin,
                actual: user.role,
            });
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::TokenService;
    use axum::http::Request;

    // Helper to create test parts with Authorization header
    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    fn test_token_service() -> TokenService {
        std::env::set_var("JWT_SECRET", "test_secret_key_for_testing_purposes");
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let service = test_token_service();
        let user_id = 42;
        let email = "test@example.com";

        let token = service
            .generate_access_token(user_id, email, Role::User)
            .unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;

        let user = result.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email, email);
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let _service = test_token_service();
        let mut parts = create_parts_without_auth();
        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let _service = test_token_service();

        let malformed_tokens = vec![
            "Bearer invalid_token",
            "Bearer not.a.valid.jwt",
            "Basic dXNlcjpwYXNz",
            "token_without_bearer",
        ];

        for token in malformed_tokens {
            let mut parts = create_parts_with_auth(token);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;

            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_admin_extractor_denies_user_role() {
        let service = test_token_service();
        let token = service
            .generate_access_token(1, "user@example.com", Role::User)
            .unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AdminUser::from_request_parts(&mut parts, &()).await;

        match result {
            Err(AuthError::InsufficientPermissions { required, actual }) => {
                assert_eq!(required, Role::Admin);
                assert_eq!(actual, Role::User);
            }
            other => panic!("Expected InsufficientPermissions, got {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_admin_extractor_allows_admin_role() {
        let service = test_token_service();
        let token = service
            .generate_access_token(7, "admin@example.com", Role::Admin)
            .unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AdminUser::from_request_parts(&mut parts, &()).await;

        let AdminUser(user) = result.unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::Admin);
    }
}
