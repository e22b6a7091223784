//! Review & submission route handlers
//!
//! Re-fetches every collection for the selected center on demand and offers
//! inline edit/delete forms that call the stores directly. "Final
//! submission" renders a summary only; it writes no additional state.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Form;
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::export::IntakeExport;
use crate::pricing::{
    DailyForm, DayCampDaily, DayCampPackage, KennelSuite, PackageForm, SuiteEditForm,
};
use crate::routes::{render_page, SelectQuery, Shell};
use crate::AppState;

#[derive(Template)]
#[template(path = "review.html")]
struct ReviewTemplate {
    shell: Shell,
    suites: Vec<KennelSuite>,
    daily: Option<DayCampDaily>,
    packages: Vec<DayCampPackage>,
    has_suites: bool,
    has_packages: bool,
    has_data: bool,
    error: String,
    has_error: bool,
    notice: String,
    has_notice: bool,
    submitted: bool,
    submitted_at: String,
}

struct CenterData {
    suites: Vec<KennelSuite>,
    daily: Vec<DayCampDaily>,
    packages: Vec<DayCampPackage>,
}

/// Fetch all three collections for the selected center.
async fn fetch_center_data(state: &AppState, shell: &Shell) -> Result<CenterData> {
    if shell.center_selected.is_empty() {
        return Ok(CenterData {
            suites: Vec::new(),
            daily: Vec::new(),
            packages: Vec::new(),
        });
    }
    let ctr = shell.center_selected.as_str();
    Ok(CenterData {
        suites: state.suites.fetch_for_center(ctr).await?,
        daily: state.daily.fetch_for_center(ctr).await?,
        packages: state.packages.fetch_for_center(ctr).await?,
    })
}

impl ReviewTemplate {
    fn new(shell: Shell, mut data: CenterData) -> Self {
        let has_data =
            !data.suites.is_empty() || !data.daily.is_empty() || !data.packages.is_empty();
        let daily = if data.daily.is_empty() {
            None
        } else {
            // Newest-first fetch; the first row is the current rates record.
            Some(data.daily.remove(0))
        };
        Self {
            has_suites: !data.suites.is_empty(),
            has_packages: !data.packages.is_empty(),
            has_data,
            suites: data.suites,
            daily,
            packages: data.packages,
            error: String::new(),
            has_error: false,
            notice: String::new(),
            has_notice: false,
            submitted: false,
            submitted_at: String::new(),
            shell,
        }
    }

    fn with_error(mut self, message: String) -> Self {
        self.error = message;
        self.has_error = true;
        self
    }

    fn with_notice(mut self, message: String) -> Self {
        self.notice = message;
        self.has_notice = true;
        self
    }
}

async fn render_review(
    state: &AppState,
    shell: Shell,
    outcome: std::result::Result<String, String>,
) -> Result<Response> {
    let data = fetch_center_data(state, &shell).await?;
    let template = match outcome {
        Ok(notice) => ReviewTemplate::new(shell, data).with_notice(notice),
        Err(error) => ReviewTemplate::new(shell, data).with_error(error),
    };
    render_page(&template, &template.shell)
}

/// Review page listing everything persisted for the center.
pub async fn page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pick): Query<SelectQuery>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &pick).await?;
    let data = fetch_center_data(&state, &shell).await?;
    let template = ReviewTemplate::new(shell, data);
    render_page(&template, &template.shell)
}

pub async fn update_suite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Form(form): Form<SuiteEditForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match form.validate() {
        Err(e) => Err(e.to_string()),
        Ok(patch) => match state.suites.update(id, patch).await {
            Ok(()) => Ok("Suite updated.".to_string()),
            Err(e) => {
                tracing::error!("failed to update suite {}: {}", id, e);
                Err("Could not update the suite; your change was not saved.".to_string())
            }
        },
    };
    render_review(&state, shell, outcome).await
}

pub async fn delete_suite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match state.suites.delete(id).await {
        Ok(()) => Ok("Suite deleted.".to_string()),
        Err(e) => {
            tracing::error!("failed to delete suite {}: {}", id, e);
            Err("Could not delete the suite.".to_string())
        }
    };
    render_review(&state, shell, outcome).await
}

pub async fn update_daily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Form(form): Form<DailyForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match form.validate_patch() {
        Err(e) => Err(e.to_string()),
        Ok(patch) => match state.daily.update(id, patch).await {
            Ok(()) => Ok("Daily options updated.".to_string()),
            Err(e) => {
                tracing::error!("failed to update daily rates {}: {}", id, e);
                Err("Could not update daily options; your change was not saved.".to_string())
            }
        },
    };
    render_review(&state, shell, outcome).await
}

pub async fn delete_daily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match state.daily.delete(id).await {
        Ok(()) => Ok("Daily options deleted.".to_string()),
        Err(e) => {
            tracing::error!("failed to delete daily rates {}: {}", id, e);
            Err("Could not delete daily options.".to_string())
        }
    };
    render_review(&state, shell, outcome).await
}

pub async fn update_package(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Form(form): Form<PackageForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match form.validate_patch() {
        Err(e) => Err(e.to_string()),
        Ok(patch) => match state.packages.update(id, patch).await {
            Ok(()) => Ok("Package updated.".to_string()),
            Err(e) => {
                tracing::error!("failed to update package {}: {}", id, e);
                Err("Could not update the package; your change was not saved.".to_string())
            }
        },
    };
    render_review(&state, shell, outcome).await
}

pub async fn delete_package(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let outcome = match state.packages.delete(id).await {
        Ok(()) => Ok("Package deleted.".to_string()),
        Err(e) => {
            tracing::error!("failed to delete package {}: {}", id, e);
            Err("Could not delete the package.".to_string())
        }
    };
    render_review(&state, shell, outcome).await
}

/// Final submission: summary and confirmation only, no extra persisted
/// state. Revisiting the page shows the same data either way.
pub async fn final_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let data = fetch_center_data(&state, &shell).await?;
    let mut template = ReviewTemplate::new(shell, data);
    if template.has_data {
        template.submitted = true;
        template.submitted_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        template = template.with_notice(
            "Thank you! Your pricing data has been successfully submitted.".to_string(),
        );
    } else {
        template = template.with_error(
            "You don't have any pricing data yet. Please add data before submitting.".to_string(),
        );
    }
    render_page(&template, &template.shell)
}

/// Download the full intake for the center as a JSON artifact.
pub async fn export(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let data = fetch_center_data(&state, &shell).await?;

    let export = IntakeExport::assemble(
        &shell.selection,
        &shell.full_address,
        data.suites,
        data.daily,
        data.packages,
    );
    let body = serde_json::to_vec_pretty(&export)
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;

    let response = (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename()),
            ),
        ],
        body,
    )
        .into_response();
    Ok(response)
}
