use std::env;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub settings: Settings,
}

#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Caps the index listing; unset means unlimited.
    pub index_page_size: Option<i64>,
}

impl Settings {
    pub fn from_env() -> Self {
        let index_page_size = env::var("INDEX_PAGE_SIZE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|&size| size > 0);
        Self { index_page_size }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            settings: Settings::from_env(),
        }
    }
}
