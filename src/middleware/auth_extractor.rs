// src/middleware/auth_extractor.rs
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::error::{ApiError, AuthError};
use crate::models::User;
use crate::AppState;

/// The signed-in user behind the request's bearer token.
///
/// Use `Option<AuthenticatedUser>` for endpoints that also serve anonymous
/// visitors.
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token.ok_or_else(ApiError::sign_in_required)?;
            let state = state.ok_or_else(|| {
                ApiError::Auth(AuthError::Other("application state is not registered".to_string()))
            })?;

            match state.auth.current_user(&token).await? {
                Some(user) => Ok(AuthenticatedUser {
                    user,
                    access_token: token,
                }),
                None => {
                    log::debug!("bearer token did not resolve to a live session");
                    Err(ApiError::sign_in_required())
                }
            }
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "bearer   xyz "))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("xyz"));
    }

    #[test]
    fn ignores_other_schemes_and_blank_tokens() {
        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);

        let blank = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&blank), None);

        assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
    }
}
