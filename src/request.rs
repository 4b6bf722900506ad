use std::fmt;

use serde::Deserialize;

/// One handler invocation, after the envelope has been decoded into the
/// model type of the targeted resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceHandlerRequest<M> {
    pub desired: M,
    pub previous: Option<M>,
    pub logical_resource_id: Option<String>,
    pub client_request_token: Option<String>,
    pub next_token: Option<String>,
}

impl<M> ResourceHandlerRequest<M> {
    pub fn new(desired: M) -> Self {
        Self {
            desired,
            previous: None,
            logical_resource_id: None,
            client_request_token: None,
            next_token: None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl fmt::Debug for CallerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
