//! Portal home page

use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::error::Result;
use crate::routes::{render_page, SelectQuery, Shell};
use crate::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    shell: Shell,
}

/// Overview page with usage instructions.
pub async fn page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pick): Query<SelectQuery>,
) -> Result<Response> {
    let shell = Shell::resolve(&state, &headers, &pick).await?;
    let template = HomeTemplate { shell };
    render_page(&template, &template.shell)
}
