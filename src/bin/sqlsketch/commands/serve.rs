//! Runs the local server behind the browser form.
//!
//! The form holds the inputs; on every keystroke it POSTs the whole
//! description here and prints whatever comes back. No state lives on this
//! side, so rapid typing can never make two requests step on each other.
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use sqlsketch::validate::{validate, Problem};
use sqlsketch::{compile, QueryDescription};
use tokio::runtime::Builder;
use tower_http::cors::{Any, CorsLayer};

/// The form assumes this port unless told otherwise.
pub const DEFAULT_PORT: u16 = 33433;

pub fn run(port: u16) {
    // Single threaded is plenty for a server with exactly one user typing
    // into exactly one form.
    let tokio = Builder::new_current_thread()
        .enable_io()
        .build()
        .expect("Cannot build tokio runtime");

    let app = Router::new()
        .route("/api/v1/health", get(|| async { "ok" }))
        .route("/api/v1/compile", post(compile_description))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST]),
        );

    tokio.block_on(async {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .expect("Cannot start server: network bind failed.");

        log::info!("listening on 0.0.0.0:{port}");

        axum::serve(listener, app)
            .await
            .expect("Cannot start server: cannot run app");
    });
}

#[derive(Serialize)]
struct CompileResponse {
    sql: String,
    problems: Vec<Problem>,
}

async fn compile_description(Json(description): Json<QueryDescription>) -> Json<CompileResponse> {
    Json(CompileResponse {
        sql: compile(&description),
        problems: validate(&description),
    })
}
