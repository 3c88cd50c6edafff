use crate::AppState;
use crate::config::AuthConfig;
use crate::db::enums::UserRole;
use crate::db::models::AuthUser;
use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, request::Parts},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Issues and verifies access tokens. The token is the whole session: the
/// role it carries is trusted until it expires.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: Duration::from_secs(config.access_token_expires_in),
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expiration.as_secs()
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal(format!("System clock error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: now + self.expiration.as_secs(),
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Marks a request whose bearer token failed verification, so extractors can
/// tell a bad token apart from a missing one.
#[derive(Clone, Copy, Debug)]
pub struct TokenRejected;

/// Resolves the caller's identity when a bearer token is present. Public routes
/// still run without one; the role extractors below enforce 401/403.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        // 验证token
        match state.jwt.verify_token(&token) {
            Ok(claims) => {
                // 将用户信息添加到请求扩展中
                request.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(e) => {
                tracing::debug!("Rejected access token: {}", e);
                request.extensions_mut().insert(TokenRejected);
            }
        }
    }

    next.run(request).await
}

fn authenticated(parts: &Parts) -> Result<AuthUser, AppError> {
    if let Some(user) = parts.extensions.get::<AuthUser>() {
        return Ok(user.clone());
    }
    if parts.extensions.get::<TokenRejected>().is_some() {
        return Err(AppError::auth("Invalid or expired token"));
    }
    Err(AppError::auth("Authentication required"))
}

/// Any signed-in account.
pub struct CurrentUser(pub AuthUser);

/// `admin` or `superAdmin`.
pub struct AdminUser(pub AuthUser);

/// `superAdmin` only.
pub struct SuperAdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticated(parts).map(CurrentUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.role.can_manage_content() {
            return Err(AppError::forbidden("Admin role required"));
        }
        Ok(AdminUser(user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SuperAdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.role.can_manage_users() {
            return Err(AppError::forbidden("Super admin role required"));
        }
        Ok(SuperAdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    fn service(expires_in: u64) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            access_token_expires_in: expires_in,
        })
    }

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: uuid::Uuid::new_v4(),
            email: "hr@example.com".to_string(),
            name: "HR Admin".to_string(),
            role,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_role() {
        let jwt = service(3600);
        let original = user(UserRole::SuperAdmin);
        let token = jwt.generate_access_token(&original).unwrap();
        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.sub, original.id);
        assert_eq!(claims.exp - claims.iat, 3600);

        let restored = AuthUser::from(claims);
        assert_eq!(restored.role, UserRole::SuperAdmin);
        assert_eq!(restored.email, original.email);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service(3600).generate_access_token(&user(UserRole::Admin)).unwrap();
        let other = JwtService::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            access_token_expires_in: 3600,
        });
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));
    }

    fn parts_with(user: Option<AuthUser>, rejected: bool) -> Parts {
        let (mut parts, _) = Request::new(()).into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        if rejected {
            parts.extensions.insert(TokenRejected);
        }
        parts
    }

    #[tokio::test]
    async fn test_extractors_enforce_roles() {
        let mut parts = parts_with(None, false);
        let err = CurrentUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert!(err.to_string().contains("Authentication required"));

        let mut parts = parts_with(None, true);
        let err = AdminUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert!(err.to_string().contains("Invalid or expired token"));

        let mut parts = parts_with(Some(user(UserRole::User)), false);
        assert!(CurrentUser::from_request_parts(&mut parts, &()).await.is_ok());
        let err = AdminUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);

        let mut parts = parts_with(Some(user(UserRole::Admin)), false);
        assert!(AdminUser::from_request_parts(&mut parts, &()).await.is_ok());
        assert!(SuperAdminUser::from_request_parts(&mut parts, &()).await.is_err());

        let mut parts = parts_with(Some(user(UserRole::SuperAdmin)), false);
        assert!(SuperAdminUser::from_request_parts(&mut parts, &()).await.is_ok());
    }
}
