//! Demo JSON API wired from the toolkit.
//!
//! Serves a small widget API that exercises the strict body reader, the
//! validator, the parameter readers, the identifier generator, and the
//! error-response catalog. Useful for poking the wire behavior:
//!
//! ```text
//! cargo run --bin demo -- --bind 127.0.0.1:8080
//! curl -d '{"name":"thermo","category":"sensor","contact_email":"a@b.io"}' \
//!      localhost:8080/v1/widgets
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use apikit::config::{load_config, ApiConfig};
use apikit::errors::{
    bad_request_response, failed_validation_response, method_not_allowed_response,
    not_found_response,
};
use apikit::id::generate_id;
use apikit::observability::logging;
use apikit::request::{parse_id_param, read_csv, read_int, read_string, read_json_with_limit};
use apikit::response::{write_json, Envelope};
use apikit::validator::{matches, permitted_value, unique, Validator, EMAIL_RE};

#[derive(Parser)]
#[command(name = "demo")]
#[command(about = "Demo JSON API built on the apikit toolkit", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Clone)]
struct AppState {
    config: Arc<ApiConfig>,
}

const PERMITTED_CATEGORIES: [&str; 3] = ["sensor", "actuator", "gateway"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateWidget {
    name: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    contact_email: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    logging::init(&format!("apikit={0},demo={0},tower_http=debug", config.log_level));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "demo API starting");

    axum::serve(listener, router(AppState { config: Arc::new(config) })).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(healthcheck))
        .route(
            "/v1/widgets",
            post(create_widget)
                .get(list_widgets)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/widgets/{id}",
            get(get_widget).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
}

async fn healthcheck() -> Response {
    write_json(
        StatusCode::OK,
        &Envelope::data(json!({
            "status": "available",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        HeaderMap::new(),
    )
}

async fn create_widget(State(state): State<AppState>, body: Body) -> Response {
    let input: CreateWidget =
        match read_json_with_limit(body, state.config.max_body_bytes).await {
            Ok(input) => input,
            Err(err) => return bad_request_response(err),
        };

    let mut v = Validator::new();
    v.check(!input.name.trim().is_empty(), "name", "must be provided");
    v.check(
        input.name.len() <= 100,
        "name",
        "must not be more than 100 characters long",
    );
    v.check(
        permitted_value(&input.category.as_str(), &PERMITTED_CATEGORIES),
        "category",
        "must be one of sensor, actuator or gateway",
    );
    v.check(
        input.tags.len() <= 5,
        "tags",
        "must not contain more than 5 entries",
    );
    v.check(unique(&input.tags), "tags", "must not contain duplicate values");
    v.check(
        matches(&input.contact_email, &EMAIL_RE),
        "contact_email",
        "must be a valid email address",
    );
    if !v.is_valid() {
        return failed_validation_response(v.into_errors());
    }

    let id = generate_id(10);
    tracing::info!(%id, name = %input.name, "widget created");

    write_json(
        StatusCode::CREATED,
        &Envelope::data(json!({
            "id": id,
            "name": input.name,
            "category": input.category,
            "tags": input.tags,
            "contact_email": input.contact_email,
        })),
        HeaderMap::new(),
    )
}

async fn list_widgets(Query(qs): Query<HashMap<String, String>>) -> Response {
    let mut v = Validator::new();

    let page = read_int(&qs, "page", 1, &mut v);
    let limit = read_int(&qs, "limit", 20, &mut v);
    let sort = read_string(&qs, "sort", "id");
    let tags = read_csv(&qs, "tags", Vec::new());

    v.check(page >= 1, "page", "must be at least 1");
    v.check(
        (1..=100).contains(&limit),
        "limit",
        "must be between 1 and 100",
    );
    if !v.is_valid() {
        return failed_validation_response(v.into_errors());
    }

    write_json(
        StatusCode::OK,
        &Envelope::data(json!({
            "widgets": [],
            "page": page,
            "limit": limit,
            "sort": sort,
            "tags": tags,
        })),
        HeaderMap::new(),
    )
}

async fn get_widget(Path(id): Path<String>) -> Response {
    let id = match parse_id_param(&id) {
        Ok(id) => id,
        Err(_) => return not_found_response(),
    };

    write_json(
        StatusCode::OK,
        &Envelope::data(json!({
            "id": id,
            "name": format!("widget-{id}"),
        })),
        HeaderMap::new(),
    )
}

async fn not_found() -> Response {
    not_found_response()
}

async fn method_not_allowed(method: Method) -> Response {
    method_not_allowed_response(&method)
}
