//! COICOP category codes
//!
//! Uploaded data may carry sub-division codes such as `05.1` or codes that
//! lost their leading zero on the way through a spreadsheet (`5`). Forecasting
//! happens per two-digit division, so every code is reduced to its parent first.

/// Separator between a division and its sub-codes
const SUB_CODE_SEPARATOR: char = '.';

/// Width of a parent division code
const PARENT_WIDTH: usize = 2;

/// COICOP division names, ordered by code
pub const COICOP_LEGEND: [(&str, &str); 12] = [
    ("01", "Food & Non-Alcoholic Beverages"),
    ("02", "Alcoholic Beverages & Tobacco"),
    ("03", "Clothing & Footwear"),
    ("04", "Housing, Water, Electricity, Gas"),
    ("05", "Furnishings & Routine Household Maintenance"),
    ("06", "Health"),
    ("07", "Transport"),
    ("08", "Communication"),
    ("09", "Recreation & Culture"),
    ("10", "Education"),
    ("11", "Restaurants & Hotels"),
    ("12", "Miscellaneous Goods & Services"),
];

/// Reduce a raw category code to its parent division code
///
/// Takes the segment before the first `.` and left-pads it with zeros to two
/// characters. Longer segments are returned unchanged. An empty code becomes
/// `"00"`.
///
/// # Examples
///
/// ```
/// use retail_calendar::parent_of;
///
/// assert_eq!(parent_of("05.1"), "05");
/// assert_eq!(parent_of("5"), "05");
/// assert_eq!(parent_of("12"), "12");
/// ```
pub fn parent_of(code: &str) -> String {
    let leading = code
        .trim()
        .split(SUB_CODE_SEPARATOR)
        .next()
        .unwrap_or_default();

    format!("{:0>width$}", leading, width = PARENT_WIDTH)
}

/// Human readable name of a parent division, if it is a known COICOP code
pub fn category_label(parent_code: &str) -> Option<&'static str> {
    COICOP_LEGEND
        .iter()
        .find(|(code, _)| *code == parent_code)
        .map(|(_, label)| *label)
}
