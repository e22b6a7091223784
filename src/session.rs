//! Per-user selection sessions.
//!
//! Each browser session carries a `portal_session` cookie whose id keys a
//! server-side [`Selection`] (district manager + center). The selection
//! persists as the user navigates between pages. Changing the district
//! manager resets the chosen center to the first center under the new
//! manager.

use std::time::Duration;

use axum::http::{header::COOKIE, HeaderMap};
use moka::future::Cache;
use uuid::Uuid;

use crate::directory::Directory;

pub const SESSION_COOKIE: &str = "portal_session";

/// The currently selected manager and center for one user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub district_manager: String,
    pub ctr_name: String,
}

impl Selection {
    /// Default selection: first manager in the directory and the first
    /// center under them. `None` when the directory has no rows.
    pub fn initial(directory: &Directory) -> Option<Self> {
        let manager = directory.managers().into_iter().next()?;
        let ctr_name = directory.first_center_for(&manager)?;
        Some(Self {
            district_manager: manager,
            ctr_name,
        })
    }

    /// Placeholder selection for an empty directory; pages render the
    /// "no data available" state instead of these values.
    pub fn sentinel() -> Self {
        Self {
            district_manager: String::new(),
            ctr_name: String::new(),
        }
    }

    /// Apply a user pick to the selection.
    ///
    /// Picking a different manager resets the center to the first one under
    /// that manager. A center pick is honoured only when it exists under the
    /// current manager; a stale center likewise snaps back to the first.
    pub fn apply(&mut self, directory: &Directory, manager: Option<&str>, center: Option<&str>) {
        if let Some(m) = manager {
            if m != self.district_manager && directory.managers().iter().any(|known| known == m) {
                self.district_manager = m.to_string();
                self.ctr_name = directory.first_center_for(m).unwrap_or_default();
            }
        }

        let centers = directory.centers_for(&self.district_manager);
        if let Some(c) = center {
            if centers.iter().any(|known| known == c) {
                self.ctr_name = c.to_string();
            }
        }
        if !centers.iter().any(|known| *known == self.ctr_name) {
            self.ctr_name = centers.into_iter().next().unwrap_or_default();
        }
    }
}

/// Server-side session store keyed by the session cookie id.
#[derive(Clone)]
pub struct Sessions {
    inner: Cache<Uuid, Selection>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            // Sessions idle out after 8 hours; capacity is generous for an
            // internal tool.
            inner: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(Duration::from_secs(8 * 60 * 60))
                .build(),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Selection> {
        self.inner.get(&id).await
    }

    pub async fn insert(&self, id: Uuid, selection: Selection) {
        self.inner.insert(id, selection).await;
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the session id from the request's cookie header, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// `Set-Cookie` value establishing a new session.
pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Center, DirectorySource};

    fn directory() -> Directory {
        Directory::from_centers(
            vec![
                Center {
                    district_manager: "Pat Jones".to_string(),
                    ctr_name: "Boston".to_string(),
                    full_address: "123 Main St".to_string(),
                },
                Center {
                    district_manager: "Pat Jones".to_string(),
                    ctr_name: "Chicago".to_string(),
                    full_address: "789 Lake Dr".to_string(),
                },
                Center {
                    district_manager: "Alex Smith".to_string(),
                    ctr_name: "Dallas".to_string(),
                    full_address: "500 Elm St".to_string(),
                },
                Center {
                    district_manager: "Alex Smith".to_string(),
                    ctr_name: "Miami".to_string(),
                    full_address: "12 Ocean Dr".to_string(),
                },
            ],
            DirectorySource::Hosted,
        )
    }

    #[test]
    fn initial_selection_is_first_manager_and_center() {
        let sel = Selection::initial(&directory()).unwrap();
        // Managers are sorted, so Alex Smith comes first.
        assert_eq!(sel.district_manager, "Alex Smith");
        assert_eq!(sel.ctr_name, "Dallas");
    }

    #[test]
    fn picking_a_new_manager_resets_center_to_first() {
        let dir = directory();
        let mut sel = Selection {
            district_manager: "Alex Smith".to_string(),
            ctr_name: "Miami".to_string(),
        };
        sel.apply(&dir, Some("Pat Jones"), None);
        assert_eq!(sel.district_manager, "Pat Jones");
        assert_eq!(sel.ctr_name, "Boston");
    }

    #[test]
    fn center_pick_is_honoured_under_same_manager() {
        let dir = directory();
        let mut sel = Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Boston".to_string(),
        };
        sel.apply(&dir, Some("Pat Jones"), Some("Chicago"));
        assert_eq!(sel.ctr_name, "Chicago");
    }

    #[test]
    fn center_from_another_manager_is_rejected() {
        let dir = directory();
        let mut sel = Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Boston".to_string(),
        };
        // Dallas belongs to Alex Smith; the pick must not cross managers.
        sel.apply(&dir, None, Some("Dallas"));
        assert_eq!(sel.district_manager, "Pat Jones");
        assert_eq!(sel.ctr_name, "Boston");
    }

    #[test]
    fn stale_center_snaps_to_first_available() {
        let dir = directory();
        let mut sel = Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Closed Center".to_string(),
        };
        sel.apply(&dir, None, None);
        assert_eq!(sel.ctr_name, "Boston");
    }

    #[test]
    fn unknown_manager_is_ignored() {
        let dir = directory();
        let mut sel = Selection::initial(&dir).unwrap();
        let before = sel.clone();
        sel.apply(&dir, Some("Nobody"), None);
        assert_eq!(sel, before);
    }

    #[test]
    fn session_cookie_round_trip() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("other=1; {}={}", SESSION_COOKIE, id).parse().unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[tokio::test]
    async fn sessions_store_and_return_selections() {
        let sessions = Sessions::new();
        let id = Uuid::new_v4();
        assert!(sessions.get(id).await.is_none());
        let sel = Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Boston".to_string(),
        };
        sessions.insert(id, sel.clone()).await;
        assert_eq!(sessions.get(id).await, Some(sel));
    }
}
