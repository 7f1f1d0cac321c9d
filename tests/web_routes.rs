use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use creatorverse::db::entities::creator::{CreatorId, Draft, Model};
use creatorverse::db::services::{CreatorStore, MemoryStore, StoreError};
use creatorverse::web::flash::FLASH_COOKIE;
use creatorverse::web::{create_axum_router, AppState};

fn app(store: Arc<dyn CreatorStore>) -> Router {
    create_axum_router(Arc::new(AppState::new(store).unwrap()))
}

fn draft(name: &str) -> Draft {
    Draft {
        name: name.to_string(),
        url: format!("https://example.com/{}", name.to_lowercase()),
        description: format!("All about {name}"),
        image_url: String::new(),
    }
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(form).unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

/// The `name=value` pair of the flash cookie set by `response`, if any.
fn flash_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{FLASH_COOKIE}=")) && !pair.ends_with('='))
        .map(str::to_string)
}

/// Follows a 303 the way a browser would, carrying the flash cookie.
async fn follow(app: &Router, response: Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let to = location(&response).to_string();
    let cookie = flash_cookie(&response);
    body_text(get(app, &to, cookie.as_deref()).await).await
}

#[tokio::test]
async fn test_health_and_assets() {
    let app = app(Arc::new(MemoryStore::new()));

    let response = get(&app, "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let response = get(&app, "/assets/app.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let response = get(&app, "/assets/missing.js", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, "/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_shows_total_and_three_recent() {
    let store = Arc::new(MemoryStore::new());
    for name in ["Ada", "Brian", "Grace", "Linus"] {
        store.insert(&draft(name)).await.unwrap();
    }
    let app = app(store);

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"id="total-creators">4</p>"#));
    assert!(body.contains("Recently Added"));
    assert!(body.contains("Linus"));
    assert!(body.contains("Brian"));
    assert!(!body.contains(">Ada<"));
}

#[tokio::test]
async fn test_empty_list_invites_first_creator() {
    let app = app(Arc::new(MemoryStore::new()));
    let body = body_text(get(&app, "/show-creators", None).await).await;
    assert!(body.contains("No creators yet"));
    assert!(!body.contains("card-title"));
}

#[tokio::test]
async fn test_add_creator_redirects_to_list_with_notice() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let response = post_form(
        &app,
        "/add-creator",
        &[
            ("name", "Ada"),
            ("url", "https://a.com"),
            ("description", "Math"),
            ("imageURL", ""),
            ("intent", "save"),
        ],
    )
    .await;
    assert_eq!(location(&response), "/show-creators");

    let body = follow(&app, response).await;
    assert!(body.contains("Creator added successfully!"));
    assert!(body.contains(r#"<h3 class="card-title">Ada</h3>"#));

    let rows = store.list_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ada");
    assert_eq!(rows[0].image_url, "");
}

#[tokio::test]
async fn test_add_rejects_bad_scheme_without_store_call() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let response = post_form(
        &app,
        "/add-creator",
        &[
            ("name", "Ada"),
            ("url", "ftp://a.com"),
            ("description", "Math"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("URL must start with http:"));
    assert!(body.contains("field-error"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_forms_lock_buttons_while_submitting() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store);

    let add = body_text(get(&app, "/add-creator", None).await).await;
    assert!(add.contains("data-guard"));
    assert!(add.contains(r#"data-pending="Adding…""#));
    assert!(add.contains(r#"<script src="/assets/form.js" defer></script>"#));

    let path = format!("/edit-creator/{}", created.id);
    let edit = body_text(get(&app, &path, None).await).await;
    assert!(edit.contains(r#"data-pending="Saving…""#));

    let confirm = post_form(
        &app,
        &path,
        &[
            ("name", "Ada"),
            ("url", "https://example.com/ada"),
            ("description", "All about Ada"),
            ("intent", "delete"),
        ],
    )
    .await;
    assert!(body_text(confirm).await.contains(r#"data-pending="Deleting…""#));

    let response = get(&app, "/assets/form.js", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_text(response).await;
    assert!(script.contains("button.disabled = true"));
    assert!(script.contains(r#"classList.remove("has-error")"#));
    assert!(script.contains("event.submitter"));
}

#[tokio::test]
async fn test_add_cancel_goes_to_list() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let response = post_form(&app, "/add-creator", &[("name", "Ada"), ("intent", "cancel")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/show-creators");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_detail_not_found_for_missing_or_malformed_id() {
    let app = app(Arc::new(MemoryStore::new()));
    for uri in ["/view-creator/999", "/view-creator/abc"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Creator Not Found"));
    }
}

#[tokio::test]
async fn test_detail_shows_placeholder_when_image_missing() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store);

    let response = get(&app, &format!("/view-creator/{}", created.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("All about Ada"));
    assert!(body.contains("192x192"));
    assert!(body.contains("text=A"));
}

#[tokio::test]
async fn test_edit_missing_creator_redirects_with_notice() {
    let app = app(Arc::new(MemoryStore::new()));

    let response = get(&app, "/edit-creator/42", None).await;
    assert_eq!(location(&response), "/show-creators");
    let body = follow(&app, response).await;
    assert!(body.contains("Creator not found"));
}

#[tokio::test]
async fn test_edit_save_rewrites_record() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store.clone());
    let path = format!("/edit-creator/{}", created.id);

    let form = get(&app, &path, None).await;
    assert_eq!(form.status(), StatusCode::OK);
    assert!(body_text(form).await.contains("Edit Creator"));

    let response = post_form(
        &app,
        &path,
        &[
            ("name", "Ada Lovelace"),
            ("url", "https://example.com/ada"),
            ("description", "Poetical science"),
            ("imageURL", "https://img.example.com/ada.png"),
            ("intent", "save"),
        ],
    )
    .await;
    assert_eq!(location(&response), format!("/view-creator/{}", created.id));
    let body = follow(&app, response).await;
    assert!(body.contains("Creator updated successfully!"));

    let stored = store.get_by_id(created.id).await.unwrap();
    assert_eq!(stored.name, "Ada Lovelace");
    assert_eq!(stored.description, "Poetical science");
    assert_eq!(stored.image_url, "https://img.example.com/ada.png");
    assert_eq!(stored.created_at, created.created_at);
}

#[tokio::test]
async fn test_edit_delete_asks_before_deleting() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store.clone());
    let path = format!("/edit-creator/{}", created.id);
    let fields = [
        ("name", "Ada"),
        ("url", "https://example.com/ada"),
        ("description", "All about Ada"),
        ("imageURL", ""),
    ];

    let mut with_intent = fields.to_vec();
    with_intent.push(("intent", "delete"));
    let response = post_form(&app, &path, &with_intent).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Are you sure you want to delete"));
    assert_eq!(store.count().await.unwrap(), 1);

    let mut keep = fields.to_vec();
    keep.push(("intent", "keep-editing"));
    let response = post_form(&app, &path, &keep).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("Are you sure you want to delete"));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_removes_record() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store.clone());

    let response = post_form(
        &app,
        &format!("/edit-creator/{}/delete", created.id),
        &[("name", "Ada")],
    )
    .await;
    assert_eq!(location(&response), "/show-creators");
    let body = follow(&app, response).await;
    assert!(body.contains("Creator deleted successfully!"));
    assert!(!body.contains("Error deleting creator"));
    assert!(store.get_by_id(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_edit_cancel_returns_to_detail() {
    let store = Arc::new(MemoryStore::new());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store.clone());

    let response = post_form(
        &app,
        &format!("/edit-creator/{}", created.id),
        &[("name", "Changed"), ("intent", "cancel")],
    )
    .await;
    assert_eq!(location(&response), format!("/view-creator/{}", created.id));
    assert_eq!(store.get_by_id(created.id).await.unwrap().name, "Ada");
}

/// Deletes always fail; everything else goes to memory.
#[derive(Default)]
struct BrokenDeletes(MemoryStore);

#[async_trait]
impl CreatorStore for BrokenDeletes {
    async fn list_all(&self) -> Result<Vec<Model>, StoreError> {
        self.0.list_all().await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Model>, StoreError> {
        self.0.list_recent(limit).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.0.count().await
    }

    async fn get_by_id(&self, id: CreatorId) -> Result<Model, StoreError> {
        self.0.get_by_id(id).await
    }

    async fn insert(&self, draft: &Draft) -> Result<Model, StoreError> {
        self.0.insert(draft).await
    }

    async fn update_by_id(&self, id: CreatorId, draft: &Draft) -> Result<(), StoreError> {
        self.0.update_by_id(id, draft).await
    }

    async fn delete_by_id(&self, _id: CreatorId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_failed_delete_reports_both_notices_in_order() {
    let store = Arc::new(BrokenDeletes::default());
    let created = store.insert(&draft("Ada")).await.unwrap();
    let app = app(store.clone());

    let response = post_form(
        &app,
        &format!("/edit-creator/{}/delete", created.id),
        &[("name", "Ada")],
    )
    .await;
    assert_eq!(location(&response), "/show-creators");
    let body = follow(&app, response).await;

    let failed = body.find("Error deleting creator. Please try again.").unwrap();
    let deleted = body.find("Creator deleted successfully!").unwrap();
    assert!(failed < deleted);
    assert_eq!(store.count().await.unwrap(), 1);
}
