//! Names for resources created without an explicit `Name`.

use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 128;
const SUFFIX_LENGTH: usize = 12;
const FALLBACK_PREFIX: &str = "resource";

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Builds `<logical id>-<suffix>`. The suffix is derived from the client
/// request token, so a retried request produces the same name.
pub fn generate_name(logical_id: Option<&str>, client_request_token: Option<&str>) -> String {
    let prefix: String = logical_id
        .unwrap_or_default()
        .chars()
        .filter(|&c| is_allowed(c))
        .collect();
    let prefix = if prefix.is_empty() {
        FALLBACK_PREFIX.to_owned()
    } else {
        prefix
    };

    let seed = client_request_token.unwrap_or(prefix.as_str());
    let suffix: String = Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes())
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LENGTH)
        .collect();

    let max_prefix = MAX_NAME_LENGTH.saturating_sub(SUFFIX_LENGTH.saturating_add(1));
    let prefix: String = prefix.chars().take(max_prefix).collect();

    format!("{prefix}-{suffix}")
}
