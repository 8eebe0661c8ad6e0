// src/utils/mod.rs

//! Small display and validation helpers.

use std::path::Path;
use std::sync::OnceLock;

use chrono::DateTime;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Truncate a string to `max` grapheme clusters, appending an ellipsis when
/// something was cut.
pub fn truncate_display(s: &str, max: usize) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if graphemes.len() <= max {
        return s.to_string();
    }
    let mut result: String = graphemes[..max.saturating_sub(1)].concat();
    result.push('…');
    result
}

/// Human-readable byte size (1024-based).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// Format an RFC 3339 timestamp as `dd/mm/yyyy`, falling back to the raw
/// string when it does not parse.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Loose email shape check, enough to catch typos before the backend sees
/// them.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    re.is_match(email)
}

/// A recovery code is exactly 6 ASCII digits.
pub fn is_valid_otp(otp: &str) -> bool {
    otp.len() == 6 && otp.bytes().all(|b| b.is_ascii_digit())
}

/// MIME type for a file path, derived from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}
