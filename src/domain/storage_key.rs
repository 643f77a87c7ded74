use std::fmt;

use uuid::Uuid;

const MAX_NAME_CHARS: usize = 100;
const FALLBACK_NAME: &str = "upload";

/// Identifier of a stored upload, unique within its storage area.
///
/// Rendered as `{token}_{name}`: the token is a random UUID v4 and carries
/// the uniqueness, the name is a sanitized copy of the client's display
/// name kept for readability only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn generate(display_name: &str) -> Self {
        Self::with_token(Uuid::new_v4(), display_name)
    }

    pub fn with_token(token: Uuid, display_name: &str) -> Self {
        Self(format!(
            "{}_{}",
            token.simple(),
            sanitize_display_name(display_name)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces an untrusted display name to a single safe path segment.
///
/// Only the last `/` or `\` separated segment survives, characters outside
/// `[A-Za-z0-9._-]` become `_`, and leading dots are dropped so the result
/// can never be `.`, `..` or a hidden file.
pub fn sanitize_display_name(display_name: &str) -> String {
    let basename = display_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed: String = cleaned
        .trim_start_matches('.')
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed
    }
}
