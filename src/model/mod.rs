//! The CloudFormation-facing resource models and their conversions to and
//! from the WAFv2 SDK shapes.

mod action;
mod common;
mod field_to_match;
pub(crate) mod ip_set;
pub(crate) mod logging_configuration;
pub(crate) mod regex_pattern_set;
mod rule;
pub(crate) mod rule_group;
mod statement;
pub(crate) mod web_acl;

pub use action::{DefaultAction, OverrideAction, RuleAction};
pub use common::{Identified, LockToken, ResourceIdentifier, TextTransformation, VisibilityConfig};
pub(crate) use common::required;
pub use field_to_match::{FieldToMatch, JsonBody, JsonMatchPattern, NamedField};
pub use ip_set::IpSet;
pub use logging_configuration::LoggingConfiguration;
pub use regex_pattern_set::RegexPatternSet;
pub use rule::Rule;
pub use rule_group::RuleGroup;
pub use statement::{
    ByteMatchStatement, ExcludedRule, GeoMatchStatement, ManagedRuleGroupStatement,
    NotStatement, RateBasedStatement, ReferenceStatement, RegexPatternSetReferenceStatement,
    RuleGroupReferenceStatement, SizeConstraintStatement, SqliMatchStatement, Statement,
    StatementList, XssMatchStatement,
};
pub use web_acl::WebAcl;
