//! Startup banner and goodbye line.

use crate::consts::{AUTHOR, DESCRIPTION};
use crate::session::Session;

/// Settings shown in the startup banner.
pub struct BannerInfo<'a> {
    pub base_url: &'a str,
    pub token_status: &'a str,
    pub product_type: &'a str,
    pub config_db: &'a str,
}

pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   adreview {}
   {}

   by        {}
   service   {}
   token     {}
   product   {}
   config    {}

   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        DESCRIPTION,
        AUTHOR,
        info.base_url,
        info.token_status,
        info.product_type,
        info.config_db,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Remind the user of an unfinished task before exiting.
pub fn print_session_summary(session: &Session) {
    if let Some(task_id) = session.task_id()
        && session.findings().is_empty()
    {
        println!("task {task_id} has no results yet; poll it later with `adreview poll {task_id}`");
    }
    println!("goodbye.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lists_settings() {
        let text = banner_text(&BannerInfo {
            base_url: "https://kw-api.adlawai.com",
            token_status: "from environment",
            product_type: "alcohol (酒类)",
            config_db: "/tmp/adreview.db",
        });
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("https://kw-api.adlawai.com"));
        assert!(text.contains("from environment"));
        assert!(text.contains("alcohol (酒类)"));
        assert!(text.contains("/tmp/adreview.db"));
    }

    #[test]
    fn print_session_summary_does_not_panic() {
        print_session_summary(&Session::new());
    }
}
