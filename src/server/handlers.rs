//! Request handlers for the upload form and the JSON API

use crate::output::pages::{FormPage, ResultsPage};
use crate::output::report::BatchReport;
use crate::processing::category::CATEGORY_MAPPING;
use crate::processing::document::UploadedDocument;
use crate::server::error::ApiError;
use crate::server::AppState;
use axum::{
    extract::{Extension, Multipart},
    response::{Html, IntoResponse, Response},
    Json,
};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Fields posted by the upload form
#[derive(Debug, Default)]
pub struct CategorizeForm {
    pub uploads: Vec<UploadedDocument>,
    pub output_dir: String,
    pub skills: String,
}

/// GET / - the upload form
pub async fn index(Extension(state): Extension<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let page = FormPage::new(state.default_output_dir.display().to_string(), "");
    Ok(Html(page.to_html()?))
}

/// POST /categorize - run a batch and render the results page
pub async fn categorize_form(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => return form_error(&state, "", "", e),
    };

    let output_dir = form.output_dir.clone();
    let skills = form.skills.clone();

    let report = match run_batch(&state, form).await {
        Ok(report) => report,
        Err(e) => return form_error(&state, &output_dir, &skills, e),
    };

    match ResultsPage::new(&report, &state.csv_filename).and_then(|page| page.to_html()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/categorize - run a batch and return the report as JSON
pub async fn categorize_api(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<BatchReport>, ApiError> {
    let form = read_form(&mut multipart).await?;
    let report = run_batch(&state, form).await?;
    Ok(Json(report))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "categories": CATEGORY_MAPPING.len(),
    }))
}

pub async fn read_form(multipart: &mut Multipart) -> Result<CategorizeForm, ApiError> {
    let mut form = CategorizeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "resumes" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                // Browsers post an empty part when no file was chosen
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }

                form.uploads.push(UploadedDocument::new(filename, bytes.to_vec()));
            }
            "output_dir" => {
                form.output_dir = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read output_dir: {}", e))
                })?;
            }
            "skills" => {
                form.skills = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read skills: {}", e)))?;
            }
            other => debug!("Ignoring form field: {}", other),
        }
    }

    Ok(form)
}

async fn run_batch(state: &AppState, form: CategorizeForm) -> Result<BatchReport, ApiError> {
    let output_dir = PathBuf::from(form.output_dir.trim());
    info!(
        "Received {} uploads for {}",
        form.uploads.len(),
        output_dir.display()
    );

    let orchestrator = Arc::clone(&state.orchestrator);
    let uploads = form.uploads;
    let batch_dir = output_dir.clone();

    let outcome = tokio::task::spawn_blocking(move || orchestrator.run(&uploads, &batch_dir))
        .await
        .map_err(|e| ApiError::InternalServer(format!("Batch worker failed: {}", e)))??;

    Ok(BatchReport::new(&outcome, Some(&form.skills), &output_dir))
}

/// Re-render the form with the error and the values the user entered
fn form_error(state: &AppState, output_dir: &str, skills: &str, error: ApiError) -> Response {
    warn!("Categorize request rejected: {}", error);

    let output_dir = if output_dir.is_empty() {
        state.default_output_dir.display().to_string()
    } else {
        output_dir.to_string()
    };

    match FormPage::new(output_dir, skills).with_error(error.message()).to_html() {
        Ok(html) => (error.status(), Html(html)).into_response(),
        Err(_) => error.into_response(),
    }
}
