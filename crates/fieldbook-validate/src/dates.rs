//! Lenient date parsing for spreadsheet cells.

use chrono::NaiveDate;

/// Formats accepted for date cells, tried in order. Spreadsheets exported
/// from different tools disagree on this; ISO is preferred, US-style slashed
/// dates show up in practice.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a raw cell into a date, accepting the formats above.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Datetime strings (e.g. from xlsx rendering) parse by their date part.
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}
