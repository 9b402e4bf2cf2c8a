use anyhow::{anyhow, Context};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controllers::paste;
use crate::render;
use crate::App;

#[derive(Debug, Deserialize)]
struct CreatePaste {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

pub async fn run(app: App) -> anyhow::Result<()> {
    app.database.init_schema().await?;

    let count = app.database.count_pastes().await?;
    let host = app.config.server.host.clone();
    let port = app.config.server.port;
    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await
        .with_context(|| format!("failed to resolve {host}"))?
        .next()
        .ok_or_else(|| anyhow!("no address for {host}"))?;

    info!("serving {count} pastes on http://{addr}");

    axum::Server::bind(&addr)
        .serve(router(app).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the HTTP routes over the paste store.
pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/create", post(create_paste))
        .route("/raw/:slug", get(get_paste_raw))
        .route("/:slug", get(get_paste))
        .layer(RequestBodyLimitLayer::new(
            app.config.server.max_upload_size,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn shutdown_signal() {
    // an error here means no signal handler; just run until killed
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn index() -> Html<String> {
    Html(render::home())
}

async fn create_paste(
    State(app): State<App>,
    Form(form): Form<CreatePaste>,
) -> crate::ApiResult<Redirect> {
    let slug = paste::create(&app, &form.title, &form.content).await?;
    Ok(Redirect::to(&format!("/{slug}")))
}

async fn get_paste(
    State(app): State<App>,
    Path(slug): Path<String>,
) -> crate::ApiResult<Html<String>> {
    let paste = paste::get(&app, &slug).await?;
    Ok(Html(render::paste(&paste)))
}

async fn get_paste_raw(
    State(app): State<App>,
    Path(slug): Path<String>,
) -> crate::ApiResult<impl IntoResponse> {
    let paste = paste::get(&app, &slug).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        paste.content,
    ))
}
