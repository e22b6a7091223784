//! Page routing and the shared center-selector shell.

use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::directory::Directory;
use crate::error::Result;
use crate::session::{self, Selection};
use crate::AppState;

pub mod boarding;
pub mod daycamp;
pub mod home;
pub mod review;

/// Build the portal router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::page))
        .route("/boarding", get(boarding::page))
        .route("/boarding/suites", post(boarding::add_suite))
        .route("/daycamp", get(daycamp::page))
        .route("/daycamp/daily", post(daycamp::submit_daily))
        .route("/daycamp/packages", post(daycamp::add_package))
        .route("/review", get(review::page))
        .route("/review/suites/:id", post(review::update_suite))
        .route("/review/suites/:id/delete", post(review::delete_suite))
        .route("/review/daily/:id", post(review::update_daily))
        .route("/review/daily/:id/delete", post(review::delete_daily))
        .route("/review/packages/:id", post(review::update_package))
        .route("/review/packages/:id/delete", post(review::delete_package))
        .route("/review/submit", post(review::final_submit))
        .route("/review/export", get(review::export))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Selector query parameters carried by the GET pages.
#[derive(Debug, Default, Deserialize)]
pub struct SelectQuery {
    pub dm: Option<String>,
    pub center: Option<String>,
}

/// Everything the shared selector header needs, resolved per page load.
pub struct Shell {
    pub managers: Vec<String>,
    pub centers: Vec<String>,
    pub dm_selected: String,
    pub center_selected: String,
    pub full_address: String,
    pub source_warning: String,
    pub has_warning: bool,
    pub has_centers: bool,
    pub selection: Selection,
    set_cookie: Option<String>,
}

impl Shell {
    /// Resolve the directory and the caller's session, applying any
    /// selector picks, and persist the resulting selection.
    pub async fn resolve(
        state: &AppState,
        headers: &HeaderMap,
        pick: &SelectQuery,
    ) -> Result<Self> {
        let directory =
            Directory::load(&state.db, &state.config.center_spreadsheet).await?;

        let (session_id, set_cookie) = match session::session_id_from_headers(headers) {
            Some(id) => (id, None),
            None => {
                let id = Uuid::new_v4();
                (id, Some(session::session_cookie(id)))
            }
        };

        let mut selection = match state.sessions.get(session_id).await {
            Some(sel) => sel,
            None => Selection::initial(&directory).unwrap_or_else(Selection::sentinel),
        };
        selection.apply(&directory, pick.dm.as_deref(), pick.center.as_deref());
        state.sessions.insert(session_id, selection.clone()).await;

        let managers = directory.managers();
        let centers = directory.centers_for(&selection.district_manager);
        let full_address = directory
            .address_of(&selection.district_manager, &selection.ctr_name)
            .unwrap_or("No data available")
            .to_string();

        Ok(Self {
            has_centers: !directory.is_empty(),
            has_warning: directory.warning.is_some(),
            source_warning: directory.warning.clone().unwrap_or_default(),
            managers,
            centers,
            dm_selected: selection.district_manager.clone(),
            center_selected: selection.ctr_name.clone(),
            full_address,
            selection,
            set_cookie,
        })
    }
}

/// Render a template into a response, setting the session cookie when the
/// shell created a new session.
pub(crate) fn render_page<T: askama::Template>(template: &T, shell: &Shell) -> Result<Response> {
    let html = template.render()?;
    let mut response = Html(html).into_response();
    if let Some(cookie) = &shell.set_cookie {
        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    Ok(response)
}
