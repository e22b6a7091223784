//! Boarding pricing route handlers

use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use crate::error::Result;
use crate::pricing::forms::SUITE_NAME_OPTIONS;
use crate::pricing::{KennelSuite, SuiteForm};
use crate::routes::{render_page, SelectQuery, Shell};
use crate::AppState;

#[derive(Template)]
#[template(path = "boarding.html")]
struct BoardingTemplate {
    shell: Shell,
    suites: Vec<KennelSuite>,
    has_suites: bool,
    suite_options: Vec<&'static str>,
    error: String,
    has_error: bool,
    notice: String,
    has_notice: bool,
}

impl BoardingTemplate {
    fn new(shell: Shell, suites: Vec<KennelSuite>) -> Self {
        Self {
            has_suites: !suites.is_empty(),
            suites,
            suite_options: SUITE_NAME_OPTIONS.to_vec(),
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

async fn fetch_suites(state: &AppState, shell: &Shell) -> Result<Vec<KennelSuite>> {
    if shell.center_selected.is_empty() {
        return Ok(Vec::new());
    }
    state.suites.fetch_for_center(&shell.center_selected).await
}

/// Kennel suite entry page.
pub async fn page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pick): Query<SelectQuery>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &pick).await?;
    let suites = fetch_suites(&state, &shell).await?;
    let template = BoardingTemplate::new(shell, suites);
    render_page(&template, &template.shell)
}

/// Add a kennel suite for the selected center.
///
/// The list rendered after a failed write is the pre-insert fetch, so a
/// persistence error never shows a row that was not stored.
pub async fn add_suite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SuiteForm>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &SelectQuery::default()).await?;
    let existing = fetch_suites(&state, &shell).await?;

    let new = match form.validate(&shell.selection, &shell.full_address, &existing) {
        Ok(new) => new,
        Err(e) => {
            let template = BoardingTemplate::new(shell, existing).with_error(e.to_string());
            return render_page(&template, &template.shell);
        }
    };

    let suite_name = new.suite_name.clone();
    match state.suites.insert(new).await {
        Ok(_) => {
            let suites = fetch_suites(&state, &shell).await?;
            let template = BoardingTemplate::new(shell, suites)
                .with_notice(format!("Added suite: {}", suite_name));
            render_page(&template, &template.shell)
        }
        Err(e) => {
            tracing::error!("failed to save suite '{}': {}", suite_name, e);
            let template = BoardingTemplate::new(shell, existing).with_error(
                "Could not save the suite. Nothing was added; please try again.".to_string(),
            );
            render_page(&template, &template.shell)
        }
    }
}
