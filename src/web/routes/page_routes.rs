use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tera::Context;

use crate::db::entities::creator::{CARD_IMAGE_SIZE, DETAIL_IMAGE_SIZE, RECENT_IMAGE_SIZE};
use crate::views::{DashboardView, DetailView, ListView, Route};
use crate::web::{flash, AppError, AppState, CreatorCard};

// --- Route Handlers ---

async fn dashboard_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, notices) = flash::take(jar);
    let view = DashboardView::load(app_state.store.as_ref()).await;

    let recent: Vec<CreatorCard> = view
        .recent
        .iter()
        .map(|c| CreatorCard::new(c, RECENT_IMAGE_SIZE))
        .collect();
    let mut context = Context::new();
    context.insert("total", &view.total);
    context.insert("recent", &recent);
    context.insert("count_failed", &view.count_failed);
    context.insert("recent_failed", &view.recent_failed);

    let page = app_state.render("dashboard.html", &Route::Dashboard.path(), &notices, context)?;
    Ok((jar, page))
}

async fn list_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, notices) = flash::take(jar);
    let view = ListView::load(app_state.store.as_ref()).await;

    let cards: Vec<CreatorCard> = view
        .creators()
        .iter()
        .map(|c| CreatorCard::new(c, CARD_IMAGE_SIZE))
        .collect();
    let mut context = Context::new();
    context.insert("creators", &cards);
    context.insert("load_failed", &view.load_failed);

    let page = app_state.render("list.html", &Route::List.path(), &notices, context)?;
    Ok((jar, page))
}

async fn detail_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Html<String>), AppError> {
    let (jar, notices) = flash::take(jar);
    let view = DetailView::load(app_state.store.as_ref(), &raw_id).await;

    let mut context = Context::new();
    let status = match &view {
        DetailView::Found(creator) => {
            context.insert("creator", &CreatorCard::new(creator, DETAIL_IMAGE_SIZE));
            StatusCode::OK
        }
        DetailView::NotFound { .. } | DetailView::Loading => StatusCode::NOT_FOUND,
    };

    let current_path = format!("/view-creator/{raw_id}");
    let page = app_state.render("detail.html", &current_path, &notices, context)?;
    Ok((status, jar, page))
}

// --- Router ---

pub fn create_page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/show-creators", get(list_handler))
        .route("/view-creator/{id}", get(detail_handler))
}
