//! Notices that survive one redirect.
//!
//! They travel in a single cookie that the next rendered page reads and
//! clears, so each notice is shown exactly once and in the order raised.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;

use crate::flows::Notice;

pub const FLASH_COOKIE: &str = "creatorverse_flash";

/// Queues `notices` behind any that are still pending.
pub fn push(jar: CookieJar, notices: &[Notice]) -> CookieJar {
    if notices.is_empty() {
        return jar;
    }
    let mut pending = peek(&jar);
    pending.extend_from_slice(notices);

    let encoded = match serde_json::to_string(&pending) {
        Ok(json) => urlencoding::encode(&json).into_owned(),
        Err(e) => {
            warn!(error = %e, "Failed to encode flash notices.");
            return jar;
        }
    };
    jar.add(
        Cookie::build((FLASH_COOKIE, encoded))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Removes and returns the pending notices.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Notice>) {
    let notices = peek(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, notices);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), notices)
}

fn peek(jar: &CookieJar) -> Vec<Notice> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };
    let decoded = match urlencoding::decode(cookie.value()) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "Discarding undecodable flash cookie.");
            return Vec::new();
        }
    };
    serde_json::from_str(&decoded).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding malformed flash cookie.");
        Vec::new()
    })
}
