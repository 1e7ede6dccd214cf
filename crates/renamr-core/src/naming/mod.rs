//! Turning a model's suggestion into a filename the host can use.
//!
//! The model's text is advisory: only the part before its first period is
//! kept, the download's own extension is re-attached, and characters that
//! common filesystems reject are replaced.

mod extension;
mod prompt;
mod sanitize;

pub use extension::{extension_of, filename_from_url_path};
pub use prompt::build_prompt;
pub use sanitize::{sanitize, sanitize_with_date, FORBIDDEN_CHARS};
