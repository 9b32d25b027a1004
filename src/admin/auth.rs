use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use crate::actions::{ActionContext, ActionError, AdminContext};
use crate::config::AuthConfig;
use crate::routing::Helper;

/// Requires `Authorization: Bearer <api key>` of a configured admin.
pub struct UserMustAuth;

#[async_trait]
impl Helper for UserMustAuth {
    fn name(&self) -> &'static str {
        "user_must_auth"
    }

    fn is_auth(&self) -> bool {
        true
    }

    async fn before_action(&self, ctx: &mut ActionContext) -> Result<(), ActionError> {
        let admin = authenticate(ctx.headers(), &ctx.config().auth)?;
        ctx.set_admin(admin);
        Ok(())
    }
}

pub fn authenticate(headers: &HeaderMap, auth: &AuthConfig) -> Result<AdminContext, ActionError> {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(key) = provided else {
        tracing::warn!("Missing bearer token");
        return Err(ActionError::Unauthorized);
    };

    match auth.admins.iter().find(|a| a.api_key == key) {
        Some(admin) => Ok(AdminContext {
            id: admin.id,
            username: admin.username.clone(),
        }),
        None => {
            tracing::warn!("Invalid API key provided");
            Err(ActionError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminCredential;
    use axum::http::HeaderValue;

    fn auth() -> AuthConfig {
        AuthConfig {
            admins: vec![AdminCredential {
                id: 1,
                username: "admin".to_string(),
                api_key: "secret-key".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_key() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer secret-key"));
        let admin = authenticate(&headers, &auth()).unwrap();
        assert_eq!(admin.id, 1);
        assert_eq!(admin.username, "admin");
    }

    #[test]
    fn test_missing_or_wrong_key() {
        let headers = HeaderMap::new();
        assert!(matches!(authenticate(&headers, &auth()), Err(ActionError::Unauthorized)));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(matches!(authenticate(&headers, &auth()), Err(ActionError::Unauthorized)));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("secret-key"));
        assert!(matches!(authenticate(&headers, &auth()), Err(ActionError::Unauthorized)));
    }
}
