/// Build version; `APP_VERSION` at compile time wins over the crate version.
pub const VERSION: &str = match option_env!("APP_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// `User-Agent` sent to the store.
pub fn user_agent() -> String {
    format!("creatorverse/{VERSION}")
}
