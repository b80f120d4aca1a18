//! Category/location extraction from the combined course field

use regex::Regex;
use std::sync::OnceLock;

pub const UNKNOWN: &str = "Unknown";

/// Every level of this course family is taught as one class
pub const FIRST_AID_FAMILY: &str = "First Aid & CPR/AED";

fn course_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Lazy category, then the location inside the outermost trailing parentheses
    PATTERN.get_or_init(|| Regex::new(r"^(.+?)\s*\((.+)\)").expect("valid course pattern"))
}

/// Split `"<category> (<location>)"` into `(category, location)`.
///
/// Text that does not match yields `("Unknown", "Unknown")` so the row
/// still takes part in grouping.
pub fn extract_category_location(text: &str) -> (String, String) {
    let Some(caps) = course_pattern().captures(text) else {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    };

    let mut category = caps[1].trim().to_string();
    let location = caps[2].trim().to_string();

    if category.contains(FIRST_AID_FAMILY) {
        category = FIRST_AID_FAMILY.to_string();
    }

    (category, location)
}
