//! The outcome of a handler invocation, as reported back to CloudFormation.

use serde::{Deserialize, Serialize};

use crate::{translator, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    InProgress,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    NotUpdatable,
    InvalidRequest,
    AccessDenied,
    AlreadyExists,
    NotFound,
    ResourceConflict,
    ServiceLimitExceeded,
    ServiceInternalError,
    GeneralServiceException,
    InternalFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub callback_delay_seconds: u32,
}

impl<M> ProgressEvent<M> {
    const fn with_status(status: OperationStatus) -> Self {
        Self {
            status,
            error_code: None,
            message: None,
            resource_model: None,
            resource_models: None,
            next_token: None,
            callback_delay_seconds: 0,
        }
    }

    pub fn success(model: M) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::with_status(OperationStatus::Success)
        }
    }

    pub const fn success_without_model() -> Self {
        Self::with_status(OperationStatus::Success)
    }

    pub fn listed(models: Vec<M>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::with_status(OperationStatus::Success)
        }
    }

    pub fn failed(code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(code),
            message: Some(message.into()),
            ..Self::with_status(OperationStatus::Failed)
        }
    }

    pub fn from_error(error: &Error) -> Self {
        let code = translator::error_code(error);
        tracing::warn!(?code, "operation failed: {error}");
        Self::failed(code, error.to_string())
    }

    /// Collapses a handler result into the event reported to CloudFormation.
    pub fn from_result(result: Result<Self, Error>) -> Self {
        result.unwrap_or_else(|error| Self::from_error(&error))
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }

    /// Replaces the model type, e.g. to serialize the event generically.
    pub fn map_models<N>(self, mut f: impl FnMut(M) -> N) -> ProgressEvent<N> {
        ProgressEvent {
            status: self.status,
            error_code: self.error_code,
            message: self.message,
            resource_model: self.resource_model.map(&mut f),
            resource_models: self
                .resource_models
                .map(|models| models.into_iter().map(&mut f).collect()),
            next_token: self.next_token,
            callback_delay_seconds: self.callback_delay_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_event_json() {
        let event = ProgressEvent::success(json!({"Name": "blocked"}));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "status": "SUCCESS",
                "resourceModel": {"Name": "blocked"},
                "callbackDelaySeconds": 0
            })
        );
    }

    #[test]
    fn failed_event_json() {
        let event: ProgressEvent<()> =
            ProgressEvent::failed(HandlerErrorCode::NotFound, "no such thing");
        assert!(!event.is_success());
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "status": "FAILED",
                "errorCode": "NotFound",
                "message": "no such thing",
                "callbackDelaySeconds": 0
            })
        );
    }

    #[test]
    fn listed_event_carries_next_token() {
        let event = ProgressEvent::listed(vec![1, 2], Some("page-2".to_owned()));
        let event = event.map_models(|n| n * 10);
        assert_eq!(event.resource_models, Some(vec![10, 20]));
        assert_eq!(event.next_token.as_deref(), Some("page-2"));
    }

    #[test]
    fn errors_become_failed_events() {
        let event: ProgressEvent<()> = ProgressEvent::from_result(Err(Error::NotUpdatable {
            properties: vec!["Name"],
        }));
        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotUpdatable));
        assert_eq!(
            event.message.as_deref(),
            Some("cannot update create-only properties: Name")
        );
    }
}
