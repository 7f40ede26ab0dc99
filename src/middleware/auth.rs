use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    dto::auth::UserRole,
    error::{AppError, AppResult},
    state::AppState,
};

/// Caller identity decoded from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

pub fn ensure_role(user: &AuthUser, role: UserRole) -> AppResult<()> {
    if user.role != role {
        return Err(AppError::Forbidden(format!("{} access required", role)));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> AppResult<()> {
    ensure_role(user, UserRole::Admin)
}

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.tokens.verify(token)?;

        let user_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;
        let role = claims
            .user_type
            .parse::<UserRole>()
            .map_err(|_| AppError::Unauthorized("Invalid user type in token".into()))?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/user/profile");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
        assert!(matches!(
            bearer_token(&parts(Some("Token abc"))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Bearer "))),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(bearer_token(&parts(None)), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn wrong_role_is_forbidden() {
        let user = AuthUser {
            user_id: 7,
            email: "client@example.com".into(),
            role: UserRole::Client,
        };
        assert!(matches!(ensure_admin(&user), Err(AppError::Forbidden(_))));
        assert!(ensure_role(&user, UserRole::Client).is_ok());
    }
}
