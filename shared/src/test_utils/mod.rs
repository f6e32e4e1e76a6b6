pub mod http_test_utils {
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::Value;

    /// Collects a response body and parses it as JSON. An empty body parses
    /// as `Value::Null`.
    pub async fn response_to_json(response: Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();
        if bytes.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(&bytes).expect("response body was not valid JSON")
    }

    /// Builds an unauthenticated JSON request.
    pub fn create_request(
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> axum::http::Request<axum::body::Body> {
        let builder = axum::http::Request::builder()
            .method(method)
            .uri(path)
            .header(axum::http::header::CONTENT_TYPE, "application/json");
        match body {
            Some(json) => builder
                .body(axum::body::Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(axum::body::Body::empty()).unwrap(),
        }
    }
}

pub mod test_logging {
    /// Initializes env_logger once for the test binary; repeated calls are
    /// no-ops.
    pub fn init_test_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
