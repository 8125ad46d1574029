//! Plain-text rendering of session state for the terminal.

use crate::review::Finding;
use crate::session::Session;

/// Render findings as numbered blocks, or a placeholder when there are none.
pub fn format_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "  no results yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, f) in findings.iter().enumerate() {
        out.push_str(&format!("  result {}\n", i + 1));
        out.push_str(&format!("    content     {}\n", f.content));
        out.push_str(&format!("    wording     {}\n", f.wording.join(", ")));
        out.push_str(&format!("    conclusion  {}\n", f.conclusion));
        out.push_str(&format!("    reason      {}\n", f.reason));
        out.push_str(&format!("    provision   {}\n", f.provision));
    }
    out
}

/// One line per session field. Never includes the token itself.
pub fn format_status(session: &Session) -> String {
    let or_dash = |v: Option<&str>| v.unwrap_or("—").to_string();
    let token = if session.has_credential() { "set" } else { "not set" };
    let file = session
        .pending_file()
        .map(|f| format!("{} ({} bytes)", f.name, f.len()));
    let product = session.product_type().map(|p| p.to_string());

    [
        ("stage", session.stage().to_string()),
        ("token", token.to_string()),
        ("file", or_dash(file.as_deref())),
        ("product", or_dash(product.as_deref())),
        ("file url", or_dash(session.file_reference())),
        ("task id", or_dash(session.task_id())),
        ("status", or_dash(session.status().map(|s| s.as_str()))),
        ("results", session.findings().len().to_string()),
    ]
    .iter()
    .map(|(label, value)| format!("  {label:<9} {value}\n"))
    .collect()
}
