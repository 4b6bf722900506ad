use serde::{Deserialize, Serialize};

use crate::{
    convert::{string_newtype, Built, Scope, TextTransformationType},
    Error,
};

/// The opaque version stamp WAFv2 hands out with every Get and expects back
/// on Update and Delete.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct LockToken(String);
string_newtype!(LockToken);

/// Returns the value of a property that must be present, or the matching
/// `MissingProperty` error.
pub(crate) fn required<'a, T>(
    value: &'a Option<T>,
    property: &'static str,
) -> Result<&'a T, Error> {
    value.as_ref().ok_or(Error::MissingProperty { property })
}

/// Like [`required()`], but also rejects empty strings.
pub(crate) fn required_str<'a>(
    value: &'a Option<String>,
    property: &'static str,
) -> Result<&'a str, Error> {
    match *value {
        Some(ref s) if !s.is_empty() => Ok(s.as_str()),
        _ => Err(Error::MissingProperty { property }),
    }
}

/// Everything the WAFv2 API needs to address a named, scoped entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub name: String,
    pub scope: Scope,
    pub id: String,
}

/// Models addressed by name, scope and id.
pub trait Identified {
    fn name(&self) -> Option<&String>;
    fn scope(&self) -> Option<&Scope>;
    fn id(&self) -> Option<&String>;

    fn identifier(&self) -> Result<ResourceIdentifier, Error> {
        Ok(ResourceIdentifier {
            name: non_empty(self.name(), "Name")?,
            scope: self
                .scope()
                .ok_or(Error::MissingProperty { property: "Scope" })?
                .clone(),
            id: non_empty(self.id(), "Id")?,
        })
    }
}

fn non_empty(value: Option<&String>, property: &'static str) -> Result<String, Error> {
    match value {
        Some(s) if !s.is_empty() => Ok(s.clone()),
        _ => Err(Error::MissingProperty { property }),
    }
}

macro_rules! impl_identified {
    ($model:ty) => {
        impl $crate::model::Identified for $model {
            fn name(&self) -> Option<&String> {
                self.name.as_ref()
            }

            fn scope(&self) -> Option<&$crate::convert::Scope> {
                self.scope.as_ref()
            }

            fn id(&self) -> Option<&String> {
                self.id.as_ref()
            }
        }
    };
}

pub(crate) use impl_identified;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisibilityConfig {
    pub sampled_requests_enabled: bool,
    pub cloud_watch_metrics_enabled: bool,
    pub metric_name: String,
}

impl TryFrom<&VisibilityConfig> for aws_sdk_wafv2::types::VisibilityConfig {
    type Error = Error;

    fn try_from(config: &VisibilityConfig) -> Result<Self, Self::Error> {
        Ok(Self::builder()
            .sampled_requests_enabled(config.sampled_requests_enabled)
            .cloud_watch_metrics_enabled(config.cloud_watch_metrics_enabled)
            .metric_name(config.metric_name.as_str())
            .build()
            .built()?)
    }
}

impl From<&aws_sdk_wafv2::types::VisibilityConfig> for VisibilityConfig {
    fn from(config: &aws_sdk_wafv2::types::VisibilityConfig) -> Self {
        Self {
            sampled_requests_enabled: config.sampled_requests_enabled(),
            cloud_watch_metrics_enabled: config.cloud_watch_metrics_enabled(),
            metric_name: config.metric_name().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextTransformation {
    pub priority: i32,
    #[serde(rename = "Type")]
    pub kind: TextTransformationType,
}

impl TryFrom<&TextTransformation> for aws_sdk_wafv2::types::TextTransformation {
    type Error = Error;

    fn try_from(transformation: &TextTransformation) -> Result<Self, Self::Error> {
        Ok(Self::builder()
            .priority(transformation.priority)
            .r#type(transformation.kind.inner().clone())
            .build()
            .built()?)
    }
}

impl From<&aws_sdk_wafv2::types::TextTransformation> for TextTransformation {
    fn from(transformation: &aws_sdk_wafv2::types::TextTransformation) -> Self {
        Self {
            priority: transformation.priority(),
            kind: transformation.r#type().into(),
        }
    }
}

pub(crate) fn text_transformations_to_sdk(
    transformations: &[TextTransformation],
) -> Result<Vec<aws_sdk_wafv2::types::TextTransformation>, Error> {
    transformations.iter().map(TryInto::try_into).collect()
}

pub(crate) fn text_transformations_from_sdk(
    transformations: &[aws_sdk_wafv2::types::TextTransformation],
) -> Vec<TextTransformation> {
    transformations.iter().map(Into::into).collect()
}
