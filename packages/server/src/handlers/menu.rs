use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use menu::catalog;
use menu::{
    AuthState, Category, DraftError, ImageFile, MenuForm, MenuItemDraft, PriceEdit,
    RecordingNavigator, RecordingNotifier, SessionContext, SubmissionWorkflow,
};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::menu::{MenuListResponse, MenuSummaryResponse, SubmitResponse};
use crate::state::AppState;

/// Room for the text fields and multipart framing on top of the image itself.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_image_size as usize + FORM_OVERHEAD)
}

/// Raw fields of the add-dish form.
#[derive(Default)]
struct MenuUpload {
    image: Option<ImageFile>,
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/menu/{category}",
    tag = "Menu",
    operation_id = "createMenuItem",
    summary = "Add a dish to a category",
    description = "Uploads the dish image, then appends the dish to the owner's category document. \
        Multipart fields: `image` (PNG or JPEG file), `name`, `price` (digits, commas allowed), \
        `description`. A category without a listing page is still saved but yields no redirect.",
    params(("category" = String, Path, description = "Category label, e.g. `Main Dish`")),
    request_body(content_type = "multipart/form-data", description = "Dish form"),
    responses(
        (status = 201, description = "Dish saved", body = SubmitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Upload or save failed (SUBMISSION_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(owner = %auth_user.owner_id))]
pub async fn create_menu_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let upload = read_upload(&mut multipart, state.config.storage.max_blob_size).await?;

    let notifier = Arc::new(RecordingNotifier::new());
    let session = SessionContext::new(Arc::new(AuthState::signed_in(auth_user.owner_id)));
    let workflow = SubmissionWorkflow::new(
        state.blob_store.clone(),
        state.documents.clone(),
        session,
        notifier.clone(),
        Arc::new(RecordingNavigator::new()),
    )
    .with_options(state.config.form.workflow_options());

    let mut form = MenuForm::mount(workflow, category);
    fill_draft(form.draft_mut(), upload)?;

    let result = form.submit().await;
    form.unmount();
    let outcome = result?;

    info!(image = %outcome.image_key, "Dish created");
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse::new(outcome, notifier.take())),
    ))
}

async fn read_upload(
    multipart: &mut Multipart,
    max_image_size: u64,
) -> Result<MenuUpload, AppError> {
    let mut upload = MenuUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;

                // Browsers send an empty part when no file was picked.
                if bytes.is_empty() && file_name.is_empty() {
                    continue;
                }
                if bytes.len() as u64 > max_image_size {
                    return Err(AppError::Validation(format!(
                        "Image exceeds {max_image_size} bytes"
                    )));
                }

                let image = ImageFile::new(file_name, content_type.as_deref(), bytes.to_vec())
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                upload.image = Some(image);
            }
            Some("name") => upload.name = Some(read_text(field, "name").await?),
            Some("price") => upload.price = Some(read_text(field, "price").await?),
            Some("description") => {
                upload.description = Some(read_text(field, "description").await?)
            }
            _ => {} // Ignore unknown fields.
        }
    }

    Ok(upload)
}

async fn read_text(field: Field<'_>, label: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {label}: {e}")))
}

/// Replay the uploaded fields as form edits.
fn fill_draft(draft: &mut MenuItemDraft, upload: MenuUpload) -> Result<(), AppError> {
    if let Some(image) = upload.image {
        draft.select_image(image);
    }
    draft.set_dish_name(upload.name.as_deref().unwrap_or_default());
    if draft.set_price(upload.price.as_deref().unwrap_or_default()) == PriceEdit::Rejected {
        return Err(AppError::Validation(DraftError::InvalidPrice.to_string()));
    }
    draft.set_description(upload.description.as_deref().unwrap_or_default());
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/{category}",
    tag = "Menu",
    operation_id = "listMenuItems",
    summary = "List the dishes of a category",
    params(("category" = String, Path, description = "Category label, e.g. `Main Dish`")),
    responses(
        (status = 200, description = "Dishes in insertion order", body = MenuListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown category (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(owner = %auth_user.owner_id))]
pub async fn list_menu_items(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<MenuListResponse>, AppError> {
    let category: Category = category
        .parse()
        .map_err(|e: menu::category::UnknownCategory| AppError::NotFound(e.to_string()))?;

    let entries = catalog::list_entries(
        &*state.documents,
        &state.config.form.collection,
        &auth_user.owner_id,
        category.as_str(),
    )
    .await?;

    Ok(Json(MenuListResponse {
        category: category.to_string(),
        total: entries.len(),
        items: entries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu/summary",
    tag = "Menu",
    operation_id = "menuSummary",
    summary = "Dish counts per category",
    responses(
        (status = 200, description = "Counts for every category", body = MenuSummaryResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(owner = %auth_user.owner_id))]
pub async fn menu_summary(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MenuSummaryResponse>, AppError> {
    let summary = catalog::summarize(
        &*state.documents,
        &state.config.form.collection,
        &auth_user.owner_id,
    )
    .await?;
    Ok(Json(summary.into()))
}
