//! Note content normalization
//!
//! Every imported note starts with the name of the file it came from,
//! unless the file already starts with that exact text.

use crate::models::NoteDraft;
use notes_common::time::millis_to_unix_seconds;

/// File name without its extension (text before the final '.')
///
/// A name with no '.' is its own title.
pub fn file_title(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[..index],
        None => file_name,
    }
}

/// Build the note draft for one file
///
/// Prepends the title and a blank line unless `raw` already begins with the
/// title (case-sensitive prefix match). Returns `None` when the resulting
/// content is empty: there is nothing to import.
pub fn normalize(raw: String, file_name: &str, last_modified_ms: i64) -> Option<NoteDraft> {
    let title = file_title(file_name);

    let content = if raw.starts_with(title) {
        raw
    } else {
        format!("{}\n\n{}", title, raw)
    };

    if content.is_empty() {
        return None;
    }

    let modified = millis_to_unix_seconds(last_modified_ms);
    Some(NoteDraft {
        content,
        creation_date: modified,
        modification_date: modified,
    })
}
