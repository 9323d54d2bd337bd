//! Extension allow-list classification.

use crate::constants::ALLOWED_EXTENSIONS;

/// Lowercase extension of `file_name`, including the leading dot.
///
/// Only the base name is inspected. A name whose only dot is the leading one
/// (`.png`, `.bashrc`) has no extension, and neither does a name without a dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    let stem_len = base.trim_start_matches('.').len();
    let leading_dots = base.len() - stem_len;
    let idx = base[leading_dots..].rfind('.')? + leading_dots;
    Some(base[idx..].to_lowercase())
}

/// Whether `file_name` carries an extension from the image allow-list.
pub fn is_allowed_extension(file_name: &str) -> bool {
    match file_extension(file_name) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}
