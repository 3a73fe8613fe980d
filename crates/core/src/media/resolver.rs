//! Path resolution for stored and default assets.
//!
//! Pure logic converting a stored identifier (bare filename or
//! folder-qualified path) into a fully qualified public URL. No I/O, never
//! fails: absent or malformed input degrades to the default avatar URL.

use opina_shared::CloudinaryConfig;

/// Qualify an identifier against the configured folder.
///
/// An identifier that already contains a path separator is treated as fully
/// qualified and returned verbatim; a bare name is prefixed with the folder.
#[must_use]
pub fn qualify(identifier: &str, folder: &str) -> String {
    if identifier.contains('/') {
        identifier.to_string()
    } else {
        format!("{folder}/{identifier}")
    }
}

/// Resolve an asset identifier to a fully qualified public URL.
///
/// Empty or absent identifiers are substituted with the configured default
/// avatar identifier before qualification.
#[must_use]
pub fn resolve_url(config: &CloudinaryConfig, identifier: Option<&str>) -> String {
    let identifier = identifier
        .filter(|id| !id.is_empty())
        .unwrap_or(&config.default_avatar_path);

    format!("{}{}", config.base_url, qualify(identifier, &config.folder))
}

/// Resolve the default avatar URL.
#[must_use]
pub fn default_avatar_url(config: &CloudinaryConfig) -> String {
    resolve_url(config, None)
}

/// Derive the default avatar identifier from configuration.
///
/// Environment loading may not perform nested variable expansion, so a
/// `${...}` template left in the configured value is reconstructed from the
/// discrete folder/filename pieces instead.
#[must_use]
pub fn default_avatar_id(config: &CloudinaryConfig) -> String {
    let folder = (!config.folder.is_empty()).then_some(config.folder.as_str());
    compose_default_id(
        &config.default_avatar_path,
        folder,
        config.default_avatar_filename.as_deref(),
    )
}

/// Reconstruct a usable default identifier from its configured pieces.
///
/// If the template still contains unexpanded placeholder syntax, compose the
/// identifier from whichever discrete pieces are present. A value that still
/// contains a separator is reduced to its final path segment.
#[must_use]
pub fn compose_default_id(template: &str, folder: Option<&str>, filename: Option<&str>) -> String {
    if template.contains("${") {
        let pieces: Vec<&str> = [folder, filename]
            .into_iter()
            .flatten()
            .filter(|piece| !piece.is_empty())
            .collect();
        if !pieces.is_empty() {
            return pieces.join("/");
        }
    }

    match template.rsplit_once('/') {
        Some((_, last)) => last.to_string(),
        None => template.to_string(),
    }
}
