use axum::{
    extract::Path,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tower_http::trace::TraceLayer;

use crate::db::entities::creator::Model;
use crate::db::services::CreatorStore;
use crate::flows::Notice;
use crate::version::VERSION;
use crate::views::nav::{nav_links, Route};
pub use self::error::AppError;

pub mod error;
pub mod flash;
pub mod routes;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CreatorStore>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(store: Arc<dyn CreatorStore>) -> Result<Self, AppError> {
        Ok(Self {
            store,
            templates: Arc::new(load_templates()?),
        })
    }

    /// Renders `template` inside the shared layout. `current_path` drives the
    /// navigation highlight.
    pub fn render(
        &self,
        template: &str,
        current_path: &str,
        notices: &[Notice],
        mut context: Context,
    ) -> Result<Html<String>, AppError> {
        context.insert("nav", &nav_links(current_path));
        context.insert("notices", notices);
        context.insert("version", VERSION);
        Ok(Html(self.templates.render(template, &context)?))
    }
}

/// Parses every embedded template in one batch so `extends` can resolve.
pub fn load_templates() -> Result<Tera, AppError> {
    let mut sources = Vec::new();
    for name in Templates::iter() {
        let file = Templates::get(&name)
            .ok_or_else(|| AppError::InternalServerError(format!("template {name} vanished")))?;
        let source = String::from_utf8(file.data.into_owned()).map_err(|e| {
            AppError::InternalServerError(format!("template {name} is not UTF-8: {e}"))
        })?;
        sources.push((name.to_string(), source));
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(sources)?;
    Ok(tera)
}

/// What a template needs to show one creator.
#[derive(Debug, Serialize)]
pub struct CreatorCard {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub image_src: String,
    pub detail_href: String,
    pub edit_href: String,
}

impl CreatorCard {
    pub fn new(creator: &Model, image_size: u32) -> Self {
        Self {
            id: creator.id,
            name: creator.name.clone(),
            url: creator.url.clone(),
            description: creator.description.clone(),
            image_src: creator.image_src(image_size),
            detail_href: Route::Detail(creator.id).path(),
            edit_href: Route::Edit(creator.id).path(),
        }
    }
}

async fn health_check_handler() -> &'static str {
    "OK"
}

async fn static_asset_handler(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], content.data).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn fallback_handler(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}

pub fn create_axum_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check_handler))
        .route("/assets/{*path}", get(static_asset_handler))
        .merge(routes::page_routes::create_page_router())
        .merge(routes::creator_routes::create_creator_router())
        .fallback(fallback_handler)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
