//! Scanning of portal HTML pages.
//!
//! The login form and the post-login page are plain server-rendered HTML;
//! the values needed from them are pulled out with small regexes.

use regex_lite::Regex;

/// Extract the value of the `<input>` whose `name` attribute equals `field`.
///
/// Returns `None` when no such input exists or it carries no value.
pub fn extract_input_value(html: &str, field: &str) -> Option<String> {
    let input_re = Regex::new(r"(?is)<input\s[^>]*>").ok()?;
    let attr_re = Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.\[\]]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).ok()?;

    for tag in input_re.find_iter(html) {
        let mut name = None;
        let mut value = None;
        for caps in attr_re.captures_iter(tag.as_str()) {
            let attr_value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match caps[1].to_ascii_lowercase().as_str() {
                "name" => name = Some(attr_value),
                "value" => value = Some(attr_value),
                _ => {}
            }
        }
        if name == Some(field) {
            return value.filter(|v| !v.is_empty()).map(str::to_string);
        }
    }
    None
}

/// Extract the integer assigned to JavaScript variable `variable`.
///
/// Matches `variable = 123`, `variable = "123"` and `variable: 123`. A value
/// that does not fit an `i64` yields `None`, never a truncated id.
pub fn extract_assigned_integer(html: &str, variable: &str) -> Option<i64> {
    let pattern = format!(
        r#"(?:^|[^A-Za-z0-9_$]){}\s*[=:]\s*["']?(\d+)["']?"#,
        regex_lite::escape(variable)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(html)?;
    caps[1].parse::<i64>().ok()
}

/// Whether a page body indicates the portal bounced us back to login.
pub fn is_login_redirect(html: &str, marker: &str) -> bool {
    !marker.is_empty() && html.contains(marker)
}
