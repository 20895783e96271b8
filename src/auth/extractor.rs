//! Actix-web extractor for the logged-in user.

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::session::{SESSION_COOKIE, verify_session_token};
use crate::config::Config;
use crate::db::DbPool;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Missing or invalid session on a route that needs one.
#[derive(Debug)]
pub struct LoginRequired {
    next: String,
}

impl LoginRequired {
    fn for_request(req: &HttpRequest) -> Self {
        Self {
            next: req.path().to_string(),
        }
    }

    /// Login URL that returns to the original page afterwards.
    pub fn location(&self) -> String {
        format!("{}?next={}", LOGIN_PATH, urlencoding::encode(&self.next))
    }
}

impl std::fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Login required to access {}", self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}

/// The caller, as established by a valid session cookie for an account
/// that still exists.
///
/// Handlers that take this extractor are login-gated:
/// ```ignore
/// async fn protected_handler(user: CurrentUser) -> impl Responder {
///     // user.user_id is the authenticated caller
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i32,
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let login_required = LoginRequired::for_request(req);
        let config = req.app_data::<web::Data<Config>>().cloned();
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let (Some(config), Some(pool), Some(token)) = (config, pool, token) else {
                return Err(login_required.into());
            };

            let claims = match verify_session_token(&token, &config.session.secret) {
                Ok(claims) => claims,
                Err(e) => {
                    debug!(path = %login_required.next, "Rejected session cookie: {}", e);
                    return Err(login_required.into());
                }
            };

            // Sessions outlive accounts; a deleted user is logged out.
            match pool.find_user_by_id(claims.user_id).await {
                Ok(Some(user)) => Ok(CurrentUser {
                    user_id: user.id,
                    username: user.username,
                }),
                Ok(None) => {
                    debug!(user_id = claims.user_id, "Session for deleted user");
                    Err(login_required.into())
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}
