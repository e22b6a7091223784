//! Day camp pricing route handlers

use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use crate::error::Result;
use crate::pricing::{DailyForm, DayCampDaily, DayCampPackage, PackageForm};
use crate::routes::{render_page, SelectQuery, Shell};
use crate::AppState;

#[derive(Template)]
#[template(path = "daycamp.html")]
struct DayCampTemplate {
    shell: Shell,
    daily: Option<DayCampDaily>,
    packages: Vec<DayCampPackage>,
    has_packages: bool,
    error: String,
    has_error: bool,
    notice: String,
    has_notice: bool,
}

impl DayCampTemplate {
    fn new(shell: Shell, daily: Option<DayCampDaily>, packages: Vec<DayCampPackage>) -> Self {
        Self {
            has_packages: !packages.is_empty(),
            daily,
            packages,
            error: String::new(),
            has_error: false,
            notice: String::new(),
            has_notice: false,
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

/// Current daily rates for the center: newest record wins.
async fn fetch_current_daily(state: &AppState, shell: &Shell) -> Result<Option<DayCampDaily>> {
    if shell.center_selected.is_empty() {
        return Ok(None);
    }
    let mut rows = state.daily.fetch_for_center(&shell.center_selected).await?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.remove(0))
    })
}

async fn fetch_packages(state: &AppState, shell: &Shell) -> Result<Vec<DayCampPackage>> {
    if shell.center_selected.is_empty() {
        return Ok(Vec::new());
    }
    state
        .packages
        .fetch_for_center(&shell.center_selected)
        .await
}

/// Day camp entry page.
pub async fn page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pick): Query<SelectQuery>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &pick).await?;
    let daily = fetch_current_daily(&state, &shell).await?;
    let packages = fetch_packages(&state, &shell).await?;
    let template = DayCampTemplate::new(shell, daily, packages);
    render_page(&template, &template.shell)
}

/// Submit daily rates for the selected center.
pub async fn submit_daily(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DailyForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let prior_daily = fetch_current_daily(&state, &shell).await?;
    let packages = fetch_packages(&state, &shell).await?;

    let new = match form.validate(&shell.selection, &shell.full_address) {
        Ok(new) => new,
        Err(e) => {
            let template =
                DayCampTemplate::new(shell, prior_daily, packages).with_error(e.to_string());
            return render_page(&template, &template.shell);
        }
    };

    match state.daily.insert(new).await {
        Ok(saved) => {
            let template = DayCampTemplate::new(shell, Some(saved), packages)
                .with_notice("Daily options saved.".to_string());
            render_page(&template, &template.shell)
        }
        Err(e) => {
            tracing::error!("failed to save daily rates: {}", e);
            let template = DayCampTemplate::new(shell, prior_daily, packages).with_error(
                "Could not save daily options. Nothing was changed; please try again.".to_string(),
            );
            render_page(&template, &template.shell)
        }
    }
}

/// Add a day-camp package for the selected center.
pub async fn add_package(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PackageForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let daily = fetch_current_daily(&state, &shell).await?;
    let existing = fetch_packages(&state, &shell).await?;

    let new = match form.validate(&shell.selection, &shell.full_address) {
        Ok(new) => new,
        Err(e) => {
            let template = DayCampTemplate::new(shell, daily, existing).with_error(e.to_string());
            return render_page(&template, &template.shell);
        }
    };

    let days = new.days;
    match state.packages.insert(new).await {
        Ok(_) => {
            let packages = fetch_packages(&state, &shell).await?;
            let template = DayCampTemplate::new(shell, daily, packages)
                .with_notice(format!("Added {}-day package.", days));
            render_page(&template, &template.shell)
        }
        Err(e) => {
            tracing::error!("failed to save {}-day package: {}", days, e);
            let template = DayCampTemplate::new(shell, daily, existing).with_error(
                "Could not save the package. Nothing was added; please try again.".to_string(),
            );
            render_page(&template, &template.shell)
        }
    }
}
