//! Maps failures onto CloudFormation handler error codes.

use crate::{progress::HandlerErrorCode, Error};

fn service_error_code(error: &aws_sdk_wafv2::Error) -> HandlerErrorCode {
    use aws_sdk_wafv2::Error as E;

    match *error {
        E::WafInternalErrorException(_)
        | E::WafTagOperationException(_)
        | E::WafTagOperationInternalErrorException(_) => HandlerErrorCode::ServiceInternalError,
        E::WafInvalidParameterException(_)
        | E::WafInvalidOperationException(_)
        | E::WafInvalidResourceException(_)
        | E::WafSubscriptionNotFoundException(_) => HandlerErrorCode::InvalidRequest,
        E::WafNonexistentItemException(_) | E::WafUnavailableEntityException(_) => {
            HandlerErrorCode::NotFound
        }
        E::WafDuplicateItemException(_) => HandlerErrorCode::AlreadyExists,
        E::WafOptimisticLockException(_) | E::WafAssociatedItemException(_) => {
            HandlerErrorCode::ResourceConflict
        }
        E::WafLimitsExceededException(_) => HandlerErrorCode::ServiceLimitExceeded,
        E::WafServiceLinkedRoleErrorException(_)
        | E::WafLogDestinationPermissionIssueException(_) => HandlerErrorCode::AccessDenied,
        _ => HandlerErrorCode::GeneralServiceException,
    }
}

pub fn error_code(error: &Error) -> HandlerErrorCode {
    match *error {
        Error::Service(ref service) => service_error_code(service),
        Error::Build(_)
        | Error::MissingProperty { .. }
        | Error::InvalidRequest { .. }
        | Error::InvalidTags(_)
        | Error::Serialization(_) => HandlerErrorCode::InvalidRequest,
        Error::NotFound { .. } => HandlerErrorCode::NotFound,
        Error::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
        Error::NotUpdatable { .. } => HandlerErrorCode::NotUpdatable,
        Error::UnexpectedNoneValue { .. } => HandlerErrorCode::ServiceInternalError,
        Error::UnsupportedVariant { .. } => HandlerErrorCode::GeneralServiceException,
        Error::InvalidConfig { .. } => HandlerErrorCode::InternalFailure,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_wafv2::types::error as exceptions;

    use super::*;

    fn service(error: aws_sdk_wafv2::Error) -> Error {
        Error::Service(Box::new(error))
    }

    #[test]
    fn maps_service_exceptions() {
        let cases = [
            (
                aws_sdk_wafv2::Error::WafInternalErrorException(
                    exceptions::WafInternalErrorException::builder().build(),
                ),
                HandlerErrorCode::ServiceInternalError,
            ),
            (
                aws_sdk_wafv2::Error::WafInvalidParameterException(
                    exceptions::WafInvalidParameterException::builder().build(),
                ),
                HandlerErrorCode::InvalidRequest,
            ),
            (
                aws_sdk_wafv2::Error::WafSubscriptionNotFoundException(
                    exceptions::WafSubscriptionNotFoundException::builder().build(),
                ),
                HandlerErrorCode::InvalidRequest,
            ),
            (
                aws_sdk_wafv2::Error::WafNonexistentItemException(
                    exceptions::WafNonexistentItemException::builder().build(),
                ),
                HandlerErrorCode::NotFound,
            ),
            (
                aws_sdk_wafv2::Error::WafUnavailableEntityException(
                    exceptions::WafUnavailableEntityException::builder().build(),
                ),
                HandlerErrorCode::NotFound,
            ),
            (
                aws_sdk_wafv2::Error::WafDuplicateItemException(
                    exceptions::WafDuplicateItemException::builder().build(),
                ),
                HandlerErrorCode::AlreadyExists,
            ),
            (
                aws_sdk_wafv2::Error::WafOptimisticLockException(
                    exceptions::WafOptimisticLockException::builder().build(),
                ),
                HandlerErrorCode::ResourceConflict,
            ),
            (
                aws_sdk_wafv2::Error::WafAssociatedItemException(
                    exceptions::WafAssociatedItemException::builder().build(),
                ),
                HandlerErrorCode::ResourceConflict,
            ),
            (
                aws_sdk_wafv2::Error::WafLimitsExceededException(
                    exceptions::WafLimitsExceededException::builder().build(),
                ),
                HandlerErrorCode::ServiceLimitExceeded,
            ),
            (
                aws_sdk_wafv2::Error::WafLogDestinationPermissionIssueException(
                    exceptions::WafLogDestinationPermissionIssueException::builder().build(),
                ),
                HandlerErrorCode::AccessDenied,
            ),
            (
                aws_sdk_wafv2::Error::WafTagOperationInternalErrorException(
                    exceptions::WafTagOperationInternalErrorException::builder().build(),
                ),
                HandlerErrorCode::ServiceInternalError,
            ),
            (
                aws_sdk_wafv2::Error::WafInvalidPermissionPolicyException(
                    exceptions::WafInvalidPermissionPolicyException::builder().build(),
                ),
                HandlerErrorCode::GeneralServiceException,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_code(&service(error)), expected);
        }
    }

    #[test]
    fn maps_local_failures() {
        assert_eq!(
            error_code(&Error::MissingProperty { property: "Scope" }),
            HandlerErrorCode::InvalidRequest
        );
        assert_eq!(
            error_code(&Error::UnexpectedNoneValue {
                entity: "GetIpSetOutput.IPSet".to_owned()
            }),
            HandlerErrorCode::ServiceInternalError
        );
        assert_eq!(
            error_code(&Error::NotUpdatable {
                properties: vec!["Scope"]
            }),
            HandlerErrorCode::NotUpdatable
        );
        assert_eq!(
            error_code(&Error::NotFound {
                message: "gone".to_owned()
            }),
            HandlerErrorCode::NotFound
        );
    }
}
