use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::incoming::use_cases::AuthorizeAccessError;
use crate::auth::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TokenType,
};
use crate::shared::api::ApiResponse;
use crate::user::application::domain::entities::Role;
use crate::AppState;

/// Caller holding a valid access token for a session that is still live.
///
/// Every request re-checks the session and its owner, so logout, account
/// deactivation and deletion take effect before the token expires. `roles`
/// are the user's current roles.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn invalid_token() -> ActixError {
    create_api_error(ApiResponse::unauthorized(
        "INVALID_TOKEN",
        "Invalid or expired token",
    ))
}

async fn authenticate(req: HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let token_provider = req
        .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        .ok_or_else(|| {
            tracing::error!("TokenProvider missing from app data");
            create_api_error(ApiResponse::internal_error())
        })?;

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState missing from app data");
        create_api_error(ApiResponse::internal_error())
    })?;

    let token = extract_token_from_header(&req).ok_or_else(|| {
        create_api_error(ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        ))
    })?;

    let claims = token_provider
        .verify_token_of_type(&token, TokenType::Access)
        .map_err(|e| {
            create_api_error(match e {
                TokenError::TokenExpired => {
                    ApiResponse::unauthorized("TOKEN_EXPIRED", "Access token has expired")
                }
                TokenError::InvalidTokenType(_) => {
                    ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "Invalid token type")
                }
                _ => ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token"),
            })
        })?;

    let session_id = claims.sid.ok_or_else(invalid_token)?;

    let grant = state
        .auth
        .authorize
        .execute(claims.sub, session_id)
        .await
        .map_err(|e| match e {
            AuthorizeAccessError::SessionRevoked => create_api_error(ApiResponse::unauthorized(
                "SESSION_REVOKED",
                "Session has been revoked",
            )),
            AuthorizeAccessError::UserInactive => create_api_error(ApiResponse::unauthorized(
                "USER_INACTIVE",
                "User account is inactive",
            )),
            AuthorizeAccessError::RepositoryError(msg) => {
                tracing::error!(session_id = %session_id, "Session lookup failed: {}", msg);
                create_api_error(ApiResponse::internal_error())
            }
        })?;

    Ok(AuthenticatedUser {
        user_id: grant.user_id,
        session_id: grant.session_id,
        roles: grant.roles,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        Box::pin(authenticate(req.clone()))
    }
}

/// Authenticated caller whose account currently holds the `admin` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl AdminUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = authenticate(req.clone()).await?;
            if user.is_admin() {
                Ok(AdminUser(user))
            } else {
                tracing::warn!(user_id = %user.user_id, path = %req.path(), "Admin route refused");
                Err(create_api_error(ApiResponse::forbidden(
                    "FORBIDDEN",
                    "Administrator role required",
                )))
            }
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
