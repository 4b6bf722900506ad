use std::fmt;

use crate::tags::TagListError;

#[derive(Debug)]
pub enum Error {
    /// An error returned by the WAFv2 API or the SDK transport
    Service(Box<aws_sdk_wafv2::Error>),
    /// An SDK builder rejected a request or model because a required member was missing
    Build(aws_sdk_wafv2::error::BuildError),
    UnexpectedNoneValue {
        entity: String,
    },
    MissingProperty {
        property: &'static str,
    },
    InvalidRequest {
        message: String,
    },
    NotFound {
        message: String,
    },
    AlreadyExists {
        message: String,
    },
    NotUpdatable {
        properties: Vec<&'static str>,
    },
    UnsupportedVariant {
        entity: &'static str,
    },
    InvalidTags(TagListError),
    Serialization(serde_json::Error),
    InvalidConfig {
        key: &'static str,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Service(ref e) => write!(f, "{e}"),
            Self::Build(ref e) => write!(f, "invalid request: {e}"),
            Self::UnexpectedNoneValue { ref entity } => {
                write!(f, "entity \"{entity}\" was empty")
            }
            Self::MissingProperty { property } => {
                write!(f, "required property \"{property}\" is missing")
            }
            Self::InvalidRequest { ref message }
            | Self::NotFound { ref message }
            | Self::AlreadyExists { ref message } => {
                write!(f, "{message}")
            }
            Self::NotUpdatable { ref properties } => {
                write!(
                    f,
                    "cannot update create-only properties: {}",
                    properties.join(", ")
                )
            }
            Self::UnsupportedVariant { entity } => {
                write!(f, "{entity} uses a variant that has no CloudFormation representation")
            }
            Self::InvalidTags(ref inner) => write!(f, "{inner}"),
            Self::Serialization(ref e) => write!(f, "invalid resource model: {e}"),
            Self::InvalidConfig { key, ref message } => {
                write!(f, "invalid configuration value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl<E, R> From<aws_sdk_wafv2::error::SdkError<E, R>> for Error
where
    aws_sdk_wafv2::Error: From<aws_sdk_wafv2::error::SdkError<E, R>>,
{
    fn from(value: aws_sdk_wafv2::error::SdkError<E, R>) -> Self {
        Self::Service(Box::new(value.into()))
    }
}

impl From<aws_sdk_wafv2::Error> for Error {
    fn from(value: aws_sdk_wafv2::Error) -> Self {
        Self::Service(Box::new(value))
    }
}

impl From<aws_sdk_wafv2::error::BuildError> for Error {
    fn from(value: aws_sdk_wafv2::error::BuildError) -> Self {
        Self::Build(value)
    }
}

impl From<TagListError> for Error {
    fn from(value: TagListError) -> Self {
        Self::InvalidTags(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
