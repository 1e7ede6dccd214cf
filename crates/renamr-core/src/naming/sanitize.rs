//! Filename sanitization for model-suggested names.

use chrono::{NaiveDate, Utc};

use crate::error::RenameError;

/// Characters that are replaced with `-` in generated names.
pub const FORBIDDEN_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

/// Sanitizes `raw_name` into `<stem>[ (YYYY-MM-DD)].<original_extension>`,
/// dating it with today's UTC date when `include_date` is set.
pub fn sanitize(
    raw_name: &str,
    original_extension: &str,
    include_date: bool,
) -> Result<String, RenameError> {
    let date = include_date.then(|| Utc::now().date_naive());
    sanitize_with_date(raw_name, original_extension, date)
}

/// Same as [`sanitize`] with an explicit date stamp.
///
/// - Cuts `raw_name` at its first `.`, dropping whatever extension the model proposed
/// - Replaces [`FORBIDDEN_CHARS`] and control characters with `-`
/// - Inserts ` (YYYY-MM-DD)` before the extension when `date` is given
/// - Shortens the stem so the whole name fits in 255 bytes
///
/// Fails with `InvalidName` when the stem or the extension is empty, so a
/// suggestion like `.pdf` is declined rather than producing a hidden file.
/// The stem is trimmed on both sides: `"Report .txt"` becomes `"Report.pdf"`.
pub fn sanitize_with_date(
    raw_name: &str,
    original_extension: &str,
    date: Option<NaiveDate>,
) -> Result<String, RenameError> {
    let stem = raw_name.split('.').next().unwrap_or_default();
    let stem = replace_forbidden(stem.trim());
    let stem = stem.trim();
    let ext = replace_forbidden(original_extension);

    if ext.is_empty() {
        return Err(RenameError::invalid_name("missing file extension"));
    }
    if stem.is_empty() {
        return Err(RenameError::invalid_name(format!(
            "nothing usable in suggestion {raw_name:?}"
        )));
    }

    let suffix = match date {
        Some(d) => format!(" ({}).{}", d.format("%Y-%m-%d"), ext),
        None => format!(".{ext}"),
    };

    let budget = NAME_MAX.saturating_sub(suffix.len());
    let mut take = stem.len().min(budget);
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    let stem = stem[..take].trim_end();
    if stem.is_empty() {
        return Err(RenameError::invalid_name("extension leaves no room for a name"));
    }

    Ok(format!("{stem}{suffix}"))
}

fn replace_forbidden(s: &str) -> String {
    s.chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect()
}
