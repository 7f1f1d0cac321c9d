use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

use crate::db::entities::creator::{CreatorId, Draft};
use crate::flows::{AddFlow, EditFlow, Notice};
use crate::validation::{Field, FieldErrors};
use crate::views::nav::parse_id;
use crate::views::Route;
use crate::web::{flash, AppError, AppState};

// --- Request Structs ---

/// Which button submitted the form.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    #[default]
    Save,
    Cancel,
    Delete,
    KeepEditing,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreatorForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "imageURL", default)]
    image_url: String,
    #[serde(default)]
    intent: Intent,
}

impl CreatorForm {
    fn into_parts(self) -> (Draft, Intent) {
        let draft = Draft {
            name: self.name,
            url: self.url,
            description: self.description,
            image_url: self.image_url,
        };
        (draft, self.intent)
    }
}

// --- Form Rendering ---

#[derive(Serialize)]
struct FormField {
    name: &'static str,
    label: &'static str,
    value: String,
    error: Option<&'static str>,
    placeholder: &'static str,
    multiline: bool,
    optional: bool,
}

fn form_fields(draft: &Draft, errors: &FieldErrors) -> Vec<FormField> {
    Field::ALL
        .iter()
        .map(|&field| {
            let (label, placeholder) = match field {
                Field::Name => ("Name", "Enter creator's name"),
                Field::Url => ("URL", "https://example.com/creator"),
                Field::Description => ("Description", "Describe this creator and their content..."),
                Field::ImageUrl => ("Image URL", "https://example.com/image.jpg"),
            };
            FormField {
                name: field.as_str(),
                label,
                value: field.value(draft).to_string(),
                error: errors.get(field),
                placeholder,
                multiline: field == Field::Description,
                optional: field == Field::ImageUrl,
            }
        })
        .collect()
}

enum FormMode {
    Add,
    Edit { id: CreatorId, confirm_delete: bool },
}

fn render_form(
    app_state: &AppState,
    jar: CookieJar,
    mode: FormMode,
    draft: &Draft,
    errors: &FieldErrors,
    notices: &[Notice],
) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("fields", &form_fields(draft, errors));
    context.insert("draft_name", &draft.name);

    let current_path = match mode {
        FormMode::Add => {
            context.insert("mode", "add");
            context.insert("action", &Route::Add.path());
            context.insert("confirm_delete", &false);
            Route::Add.path()
        }
        FormMode::Edit { id, confirm_delete } => {
            let path = Route::Edit(id).path();
            context.insert("mode", "edit");
            context.insert("action", &path);
            context.insert("delete_action", &format!("{path}/delete"));
            context.insert("creator_id", &id);
            context.insert("confirm_delete", &confirm_delete);
            path
        }
    };

    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let page = app_state.render("form.html", &current_path, notices, context)?;
    Ok((status, jar, page).into_response())
}

fn redirect(jar: CookieJar, to: Route, notices: &[Notice]) -> Response {
    (flash::push(jar, notices), Redirect::to(&to.path())).into_response()
}

/// Earlier notices that were still queued are shown first.
fn merged(mut pending: Vec<Notice>, notices: Vec<Notice>) -> Vec<Notice> {
    pending.extend(notices);
    pending
}

fn respond_add(
    app_state: &AppState,
    jar: CookieJar,
    pending: Vec<Notice>,
    flow: AddFlow,
) -> Result<Response, AppError> {
    match flow {
        AddFlow::Redirected { to, notices } => {
            Ok(redirect(jar, to, &merged(pending, notices)))
        }
        AddFlow::Editing {
            draft,
            errors,
            notices,
        } => render_form(
            app_state,
            jar,
            FormMode::Add,
            &draft,
            &errors,
            &merged(pending, notices),
        ),
        AddFlow::Submitting { .. } => Err(AppError::InternalServerError(
            "add flow stopped while submitting".to_string(),
        )),
    }
}

fn respond_edit(
    app_state: &AppState,
    jar: CookieJar,
    pending: Vec<Notice>,
    flow: EditFlow,
) -> Result<Response, AppError> {
    match flow {
        EditFlow::Redirected { to, notices } => {
            Ok(redirect(jar, to, &merged(pending, notices)))
        }
        EditFlow::Editing {
            id,
            draft,
            errors,
            notices,
        } => render_form(
            app_state,
            jar,
            FormMode::Edit {
                id,
                confirm_delete: false,
            },
            &draft,
            &errors,
            &merged(pending, notices),
        ),
        EditFlow::ConfirmDelete { id, draft, errors } => render_form(
            app_state,
            jar,
            FormMode::Edit {
                id,
                confirm_delete: true,
            },
            &draft,
            &errors,
            &pending,
        ),
        EditFlow::Loading { id } | EditFlow::Saving { id, .. } | EditFlow::Deleting { id, .. } => {
            Err(AppError::InternalServerError(format!(
                "edit flow for creator {id} stopped mid-request"
            )))
        }
    }
}

// --- Route Handlers ---

async fn add_form_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, pending) = flash::take(jar);
    respond_add(&app_state, jar, pending, AddFlow::new())
}

async fn add_submit_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CreatorForm>,
) -> Result<Response, AppError> {
    let (jar, pending) = flash::take(jar);
    let (draft, intent) = form.into_parts();
    let flow = AddFlow::with_draft(draft);
    let flow = match intent {
        Intent::Cancel => flow.cancel(),
        Intent::Save | Intent::Delete | Intent::KeepEditing => {
            flow.submit(app_state.store.as_ref()).await
        }
    };
    respond_add(&app_state, jar, pending, flow)
}

async fn edit_form_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, pending) = flash::take(jar);
    let flow = EditFlow::load_path(app_state.store.as_ref(), &raw_id).await;
    respond_edit(&app_state, jar, pending, flow)
}

async fn edit_submit_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<CreatorForm>,
) -> Result<Response, AppError> {
    let (jar, pending) = flash::take(jar);
    let Some(id) = parse_id(&raw_id) else {
        return respond_edit(&app_state, jar, pending, EditFlow::not_found());
    };

    let (draft, intent) = form.into_parts();
    let flow = match intent {
        Intent::Save => EditFlow::editing(id, draft).save(app_state.store.as_ref()).await,
        Intent::Cancel => EditFlow::editing(id, draft).cancel(),
        Intent::Delete => EditFlow::editing(id, draft).request_delete(),
        Intent::KeepEditing => EditFlow::confirming(id, draft).cancel_delete(),
    };
    respond_edit(&app_state, jar, pending, flow)
}

async fn delete_confirm_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<CreatorForm>,
) -> Result<Response, AppError> {
    let (jar, pending) = flash::take(jar);
    let Some(id) = parse_id(&raw_id) else {
        return respond_edit(&app_state, jar, pending, EditFlow::not_found());
    };

    let (draft, _) = form.into_parts();
    let flow = EditFlow::confirming(id, draft)
        .confirm_delete(app_state.store.as_ref())
        .await;
    respond_edit(&app_state, jar, pending, flow)
}

// --- Router ---

pub fn create_creator_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add-creator", get(add_form_handler).post(add_submit_handler))
        .route(
            "/edit-creator/{id}",
            get(edit_form_handler).post(edit_submit_handler),
        )
        .route("/edit-creator/{id}/delete", post(delete_confirm_handler))
}
