//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Review service used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://kw-api.adlawai.com";

pub const UPLOAD_PATH: &str = "/api/v1/upload-file";
pub const SUBMIT_PATH: &str = "/api/v1/process-file";
pub const TASKS_PATH: &str = "/api/v1/tasks";

/// Multipart field the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// The only status the service uses for a finished, successful task.
pub const SUCCESS_STATUS: &str = "SUCCESS";

pub const TOKEN_ENV: &str = "ADREVIEW_TOKEN";
pub const BASE_URL_ENV: &str = "ADREVIEW_BASE_URL";

/// Default database path: `~/.adreview/adreview.db`.
/// Holds settings only. Tokens are never written here.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".adreview")
        .join("adreview.db")
}

/// Join a base URL and an absolute endpoint path without doubling slashes.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
