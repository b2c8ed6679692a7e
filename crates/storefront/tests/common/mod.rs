//! Shared helpers for storefront integration tests.
//!
//! Tests drive the real router (full middleware stack) in-process with
//! `tower::ServiceExt::oneshot`, carrying the session cookie between
//! requests the way a browser would.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use tower::ServiceExt;

use bento_bop_storefront::config::StorefrontConfig;
use bento_bop_storefront::content::ContentStore;
use bento_bop_storefront::state::AppState;

/// A test client: the app router plus the session cookie it has been given.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Build the full application with a test configuration.
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid loopback address"),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("kD8#mQ2$vX5!nR9@wT4^zL7&pB3*jF6%"),
            content_dir: "content".into(),
            static_dir: "static".into(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        Self {
            app: bento_bop_storefront::app(AppState::new(config, ContentStore::empty())),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.request("GET", uri, None, false);
        self.send(request).await
    }

    /// Send a form POST request.
    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let request = self.request("POST", uri, Some(encode_form(fields)), false);
        self.send(request).await
    }

    /// Send a form POST request with the `HX-Request` header set.
    pub async fn post_htmx(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let request = self.request("POST", uri, Some(encode_form(fields)), true);
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str, body: Option<String>, htmx: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            // The rate limiter keys on the forwarded client IP
            .header("x-forwarded-for", "127.0.0.1");

        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        if htmx {
            builder = builder.header("hx-request", "true");
        }

        match body {
            Some(body) => builder
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("request builds")
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        // Adopt any session cookie the server hands us
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            if let Some(pair) = set_cookie.split(';').next() {
                self.cookie = Some(pair.to_string());
            }
        }

        response
    }
}

/// Read a response body to a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

/// Minimal urlencoding for test form bodies.
fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'.' | b'_' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
