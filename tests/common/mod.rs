//! Shared utilities for integration testing.
//!
//! Builds a small API from the toolkit's pieces and serves it on an
//! ephemeral port so tests can assert on real wire behavior.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Query;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use apikit::errors::{
    bad_request_response, failed_validation_response, invalid_authentication_token_response,
    method_not_allowed_response, not_found_response, server_error_response, ErrorOptions,
};
use apikit::request::{read_int, read_json, read_json_with_limit};
use apikit::response::{write_json, Envelope};
use apikit::validator::{permitted_value, unique, Validator};

/// Body cap used by the `/echo-small` route.
pub const SMALL_BODY_LIMIT: usize = 64;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EchoBody {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateWidget {
    name: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
}

async fn echo(body: Body) -> Response {
    match read_json::<EchoBody>(body).await {
        Ok(input) => write_json(
            StatusCode::OK,
            &Envelope::data(json!(input.data)),
            HeaderMap::new(),
        ),
        Err(err) => bad_request_response(err),
    }
}

async fn echo_small(body: Body) -> Response {
    match read_json_with_limit::<EchoBody>(body, SMALL_BODY_LIMIT).await {
        Ok(input) => write_json(
            StatusCode::OK,
            &Envelope::data(json!(input.data)),
            HeaderMap::new(),
        ),
        Err(err) => bad_request_response(err),
    }
}

async fn create_widget(body: Body) -> Response {
    let input: CreateWidget = match read_json(body).await {
        Ok(input) => input,
        Err(err) => return bad_request_response(err),
    };

    let mut v = Validator::new();
    v.check(!input.name.is_empty(), "name", "must be provided");
    v.check(
        permitted_value(&input.category.as_str(), &["sensor", "actuator"]),
        "category",
        "must be one of sensor or actuator",
    );
    v.check(unique(&input.tags), "tags", "must not contain duplicate values");
    if !v.is_valid() {
        return failed_validation_response(v.into_errors());
    }

    write_json(
        StatusCode::CREATED,
        &Envelope::data(json!({"name": input.name})),
        HeaderMap::new(),
    )
}

async fn list_widgets(Query(qs): Query<HashMap<String, String>>) -> Response {
    let mut v = Validator::new();
    let limit = read_int(&qs, "limit", 20, &mut v);
    if !v.is_valid() {
        return failed_validation_response(v.into_errors());
    }
    write_json(
        StatusCode::OK,
        &Envelope::data(json!({"widgets": [], "limit": limit})),
        HeaderMap::new(),
    )
}

async fn protected(headers: HeaderMap) -> Response {
    if headers.get("authorization").is_none() {
        return invalid_authentication_token_response();
    }
    write_json(
        StatusCode::OK,
        &Envelope::data(json!("welcome")),
        HeaderMap::new(),
    )
}

async fn boom() -> Response {
    server_error_response(&ErrorOptions::default(), "simulated failure")
}

async fn not_found() -> Response {
    not_found_response()
}

async fn method_not_allowed(method: Method) -> Response {
    method_not_allowed_response(&method)
}

fn router() -> Router {
    Router::new()
        .route("/echo", post(echo).fallback(method_not_allowed))
        .route("/echo-small", post(echo_small))
        .route(
            "/widgets",
            post(create_widget)
                .get(list_widgets)
                .fallback(method_not_allowed),
        )
        .route("/protected", get(protected))
        .route("/boom", get(boom))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(10))),
        )
}

/// Serve the test API on an ephemeral port, returning its address.
pub async fn spawn_app() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });

    addr
}
