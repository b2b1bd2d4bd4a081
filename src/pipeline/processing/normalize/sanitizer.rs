use once_cell::sync::Lazy;
use regex::Regex;

/// Inline tracking handler injected into descriptions by the feed's CMS.
/// `(?s)` so the 150-character window can cross line breaks.
static TRACKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)onclick=&quot.{0,150}; &quot;").expect("tracker pattern is valid")
});

/// Remove every tracker fragment from a description.
pub fn strip_tracking_script(text: &str) -> String {
    TRACKER_REGEX.replace_all(text, "").into_owned()
}

/// Split a comma-separated category list, keeping the first occurrence of each.
pub fn unique_categories(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for category in raw.split(',') {
        if !out.iter().any(|seen| seen == category) {
            out.push(category.to_string());
        }
    }
    out
}

/// Split a comma-separated category list as-is.
pub fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
