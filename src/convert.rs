//! Building blocks shared by the model converters.

use std::fmt;

use aws_sdk_wafv2::error::BuildError;
use serde::{Deserialize, Serialize};

/// SDK builders of shapes with required members return `Result`, all others
/// return the shape directly. This lets the converters treat both the same.
pub(crate) trait Built<T> {
    fn built(self) -> Result<T, BuildError>;
}

impl<T> Built<T> for Result<T, BuildError> {
    fn built(self) -> Self {
        self
    }
}

macro_rules! built_directly {
    ($($name:ident),* $(,)?) => {
        $(
            impl Built<Self> for aws_sdk_wafv2::types::$name {
                fn built(self) -> Result<Self, BuildError> {
                    Ok(self)
                }
            }
        )*
    };
}

built_directly!(
    All,
    AllQueryArguments,
    AllowAction,
    AndStatement,
    BlockAction,
    Body,
    ByteMatchStatement,
    CountAction,
    DefaultAction,
    ExcludedRule,
    FieldToMatch,
    GeoMatchStatement,
    IpSet,
    IpSetReferenceStatement,
    IpSetSummary,
    JsonBody,
    JsonMatchPattern,
    LoggingConfiguration,
    ManagedRuleGroupStatement,
    Method,
    NoneAction,
    NotStatement,
    OrStatement,
    OverrideAction,
    QueryString,
    RateBasedStatement,
    Regex,
    RegexPatternSet,
    RegexPatternSetReferenceStatement,
    RegexPatternSetSummary,
    Rule,
    RuleAction,
    RuleGroup,
    RuleGroupReferenceStatement,
    RuleGroupSummary,
    SingleHeader,
    SingleQueryArgument,
    SizeConstraintStatement,
    SqliMatchStatement,
    Statement,
    Tag,
    TagInfoForResource,
    TextTransformation,
    UriPath,
    VisibilityConfig,
    WebAcl,
    WebAclSummary,
    XssMatchStatement,
);

/// Wraps an SDK enum so it travels through the CloudFormation model as its
/// string constant (`"REGIONAL"`, `"IPV4"`, ...).
macro_rules! wrap_aws_enum {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(aws_sdk_wafv2::types::$name);

        impl $name {
            pub const fn new(from: aws_sdk_wafv2::types::$name) -> Self {
                Self(from)
            }

            pub const fn inner(&self) -> &aws_sdk_wafv2::types::$name {
                &self.0
            }

            pub fn into_inner(self) -> aws_sdk_wafv2::types::$name {
                self.0
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<aws_sdk_wafv2::types::$name> for $name {
            fn from(value: aws_sdk_wafv2::types::$name) -> Self {
                Self(value)
            }
        }

        impl From<&aws_sdk_wafv2::types::$name> for $name {
            fn from(value: &aws_sdk_wafv2::types::$name) -> Self {
                Self(value.clone())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.into())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Ok(Self(String::deserialize(deserializer)?.as_str().into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

wrap_aws_enum!(Scope);
wrap_aws_enum!(IpAddressVersion);
wrap_aws_enum!(PositionalConstraint);
wrap_aws_enum!(TextTransformationType);
wrap_aws_enum!(ComparisonOperator);
wrap_aws_enum!(CountryCode);
wrap_aws_enum!(RateBasedStatementAggregateKeyType);
wrap_aws_enum!(JsonMatchScope);
wrap_aws_enum!(BodyParsingFallbackBehavior);
wrap_aws_enum!(SensitivityLevel);

/// Conversions and accessors for a `struct $name(String)` declared by the
/// caller.
macro_rules! string_newtype {
    ($name:ident) => {
        impl $name {
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use string_newtype;

/// Stands in for SDK shapes that carry no CloudFormation-visible members.
/// Always (de)serializes as `{}`.
#[expect(
    clippy::empty_structs_with_brackets,
    reason = "must serialize as an empty JSON object, not null"
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {}
