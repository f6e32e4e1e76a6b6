use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Installs the HS256 secret the middleware verifies bearer tokens with.
/// Called once from `main` after configuration loads.
pub fn init_auth(secret: String) {
    let _ = JWT_SECRET.set(secret);
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Bearer-token middleware. On success the authenticated user id is inserted
/// as a `String` request extension; without a valid token the request is
/// answered with 401 so the client can redirect to sign-in.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let Some(secret) = JWT_SECRET.get() else {
        warn!("Auth middleware invoked before init_auth");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication is not configured",
        );
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return error_response(StatusCode::UNAUTHORIZED, "Sign-in required");
    };

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => {
            debug!("Authenticated request for user {}", data.claims.sub);
            req.extensions_mut().insert(data.claims.sub);
            next.run(req).await
        }
        Err(e) => {
            warn!("Rejected bearer token: {}", e);
            error_response(StatusCode::UNAUTHORIZED, "Sign-in required")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": message })),
    )
        .into_response()
}

#[cfg(any(test, feature = "test_utils"))]
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Installs the well-known test secret so routers under test accept tokens
/// minted by `create_test_request`.
#[cfg(any(test, feature = "test_utils"))]
pub fn init_test_auth() {
    init_auth(TEST_JWT_SECRET.to_string());
}

/// Builds a request carrying a bearer token for `user_id`, signed with the
/// test secret.
#[cfg(any(test, feature = "test_utils"))]
pub fn create_test_request(
    method: &str,
    path: &str,
    user_id: &str,
    body: Option<serde_json::Value>,
) -> Request {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token");

    let builder = axum::http::Request::builder()
        .method(method)
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json");

    match body {
        Some(json) => builder
            .body(axum::body::Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[test]
    fn claims_roundtrip() {
        let secret = "roundtrip-secret";
        let claims = Claims {
            sub: "user-1".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, "user-1");
    }
}
