use serde::Serialize;

use crate::db::entities::creator::CreatorId;

/// The five addressable pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    List,
    Add,
    Detail(CreatorId),
    Edit(CreatorId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::List => "/show-creators".to_string(),
            Route::Add => "/add-creator".to_string(),
            Route::Detail(id) => format!("/view-creator/{id}"),
            Route::Edit(id) => format!("/edit-creator/{id}"),
        }
    }

    /// Inverse of [`Route::path`]. A trailing slash is tolerated.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Dashboard);
        }
        let mut segments = trimmed.trim_start_matches('/').split('/');
        let route = match (segments.next(), segments.next()) {
            (Some("show-creators"), None) => Route::List,
            (Some("add-creator"), None) => Route::Add,
            (Some("view-creator"), Some(id)) => Route::Detail(parse_id(id)?),
            (Some("edit-creator"), Some(id)) => Route::Edit(parse_id(id)?),
            _ => return None,
        };
        match segments.next() {
            None => Some(route),
            Some(_) => None,
        }
    }
}

/// Parses a path segment into an id; anything malformed matches no record.
pub fn parse_id(raw: &str) -> Option<CreatorId> {
    raw.trim().parse().ok()
}

/// Highlighting rule for the top bar: home only on an exact match, other
/// entries whenever the current path lives underneath them.
pub fn is_active(current_path: &str, target: &str) -> bool {
    if target == "/" {
        current_path == "/"
    } else {
        current_path.starts_with(target)
    }
}

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    [
        ("Home", Route::Dashboard),
        ("All Creators", Route::List),
        ("Add Creator", Route::Add),
    ]
    .into_iter()
    .map(|(label, route)| {
        let href = route.path();
        NavLink {
            label,
            active: is_active(current_path, &href),
            href,
        }
    })
    .collect()
}
