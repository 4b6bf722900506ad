//! Rule statements. CloudFormation carries a statement as an object with
//! exactly one key naming its kind; here each kind is an enum variant.

use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{primitives::Blob, types as sdk};

use super::{
    common::{text_transformations_from_sdk, text_transformations_to_sdk, TextTransformation},
    FieldToMatch,
};
use crate::{
    convert::{
        Built, ComparisonOperator, CountryCode, PositionalConstraint,
        RateBasedStatementAggregateKeyType, SensitivityLevel,
    },
    Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    #[serde(rename = "ByteMatchStatement")]
    ByteMatch(ByteMatchStatement),
    #[serde(rename = "SqliMatchStatement")]
    SqliMatch(SqliMatchStatement),
    #[serde(rename = "XssMatchStatement")]
    XssMatch(XssMatchStatement),
    #[serde(rename = "SizeConstraintStatement")]
    SizeConstraint(SizeConstraintStatement),
    #[serde(rename = "GeoMatchStatement")]
    GeoMatch(GeoMatchStatement),
    #[serde(rename = "IPSetReferenceStatement")]
    IpSetReference(ReferenceStatement),
    #[serde(rename = "RegexPatternSetReferenceStatement")]
    RegexPatternSetReference(RegexPatternSetReferenceStatement),
    #[serde(rename = "RateBasedStatement")]
    RateBased(Box<RateBasedStatement>),
    #[serde(rename = "AndStatement")]
    And(StatementList),
    #[serde(rename = "OrStatement")]
    Or(StatementList),
    #[serde(rename = "NotStatement")]
    Not(Box<NotStatement>),
    #[serde(rename = "ManagedRuleGroupStatement")]
    ManagedRuleGroup(Box<ManagedRuleGroupStatement>),
    #[serde(rename = "RuleGroupReferenceStatement")]
    RuleGroupReference(RuleGroupReferenceStatement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByteMatchStatement {
    pub search_string: String,
    pub field_to_match: FieldToMatch,
    #[serde(default)]
    pub text_transformations: Vec<TextTransformation>,
    pub positional_constraint: PositionalConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqliMatchStatement {
    pub field_to_match: FieldToMatch,
    #[serde(default)]
    pub text_transformations: Vec<TextTransformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_level: Option<SensitivityLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XssMatchStatement {
    pub field_to_match: FieldToMatch,
    #[serde(default)]
    pub text_transformations: Vec<TextTransformation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SizeConstraintStatement {
    pub field_to_match: FieldToMatch,
    pub comparison_operator: ComparisonOperator,
    pub size: i64,
    #[serde(default)]
    pub text_transformations: Vec<TextTransformation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoMatchStatement {
    #[serde(default)]
    pub country_codes: Vec<CountryCode>,
}

/// A statement that points at another WAFv2 entity by ARN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReferenceStatement {
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexPatternSetReferenceStatement {
    pub arn: String,
    pub field_to_match: FieldToMatch,
    #[serde(default)]
    pub text_transformations: Vec<TextTransformation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateBasedStatement {
    pub limit: i64,
    pub aggregate_key_type: RateBasedStatementAggregateKeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_down_statement: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatementList {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotStatement {
    pub statement: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExcludedRule {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedRuleGroupStatement {
    pub name: String,
    pub vendor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_rules: Vec<ExcludedRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_down_statement: Option<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroupReferenceStatement {
    pub arn: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_rules: Vec<ExcludedRule>,
}

fn field_to_match_from_sdk(
    field: Option<&sdk::FieldToMatch>,
    entity: &str,
) -> Result<FieldToMatch, Error> {
    field
        .ok_or_else(|| Error::UnexpectedNoneValue {
            entity: format!("{entity}.FieldToMatch"),
        })
        .and_then(FieldToMatch::try_from)
}

fn statements_to_sdk(statements: &[Statement]) -> Result<Vec<sdk::Statement>, Error> {
    statements.iter().map(sdk::Statement::try_from).collect()
}

fn statements_from_sdk(statements: &[sdk::Statement]) -> Result<Vec<Statement>, Error> {
    statements.iter().map(Statement::try_from).collect()
}

fn excluded_rules_to_sdk(rules: &[ExcludedRule]) -> Result<Option<Vec<sdk::ExcludedRule>>, Error> {
    if rules.is_empty() {
        return Ok(None);
    }
    rules
        .iter()
        .map(|rule| {
            sdk::ExcludedRule::builder()
                .name(rule.name.as_str())
                .build()
                .built()
                .map_err(Error::from)
        })
        .collect::<Result<Vec<_>, Error>>()
        .map(Some)
}

fn excluded_rules_from_sdk(rules: &[sdk::ExcludedRule]) -> Vec<ExcludedRule> {
    rules
        .iter()
        .map(|rule| ExcludedRule {
            name: rule.name().to_owned(),
        })
        .collect()
}

impl TryFrom<&Statement> for sdk::Statement {
    type Error = Error;

    #[expect(clippy::too_many_lines, reason = "one arm per statement kind")]
    fn try_from(statement: &Statement) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let builder = match *statement {
            Statement::ByteMatch(ref inner) => builder.byte_match_statement(
                sdk::ByteMatchStatement::builder()
                    .search_string(Blob::new(inner.search_string.as_bytes()))
                    .field_to_match(sdk::FieldToMatch::try_from(&inner.field_to_match)?)
                    .set_text_transformations(Some(text_transformations_to_sdk(
                        &inner.text_transformations,
                    )?))
                    .positional_constraint(inner.positional_constraint.inner().clone())
                    .build()
                    .built()?,
            ),
            Statement::SqliMatch(ref inner) => builder.sqli_match_statement(
                sdk::SqliMatchStatement::builder()
                    .field_to_match(sdk::FieldToMatch::try_from(&inner.field_to_match)?)
                    .set_text_transformations(Some(text_transformations_to_sdk(
                        &inner.text_transformations,
                    )?))
                    .set_sensitivity_level(
                        inner
                            .sensitivity_level
                            .as_ref()
                            .map(|level| level.inner().clone()),
                    )
                    .build()
                    .built()?,
            ),
            Statement::XssMatch(ref inner) => builder.xss_match_statement(
                sdk::XssMatchStatement::builder()
                    .field_to_match(sdk::FieldToMatch::try_from(&inner.field_to_match)?)
                    .set_text_transformations(Some(text_transformations_to_sdk(
                        &inner.text_transformations,
                    )?))
                    .build()
                    .built()?,
            ),
            Statement::SizeConstraint(ref inner) => builder.size_constraint_statement(
                sdk::SizeConstraintStatement::builder()
                    .field_to_match(sdk::FieldToMatch::try_from(&inner.field_to_match)?)
                    .comparison_operator(inner.comparison_operator.inner().clone())
                    .size(inner.size)
                    .set_text_transformations(Some(text_transformations_to_sdk(
                        &inner.text_transformations,
                    )?))
                    .build()
                    .built()?,
            ),
            Statement::GeoMatch(ref inner) => builder.geo_match_statement(
                sdk::GeoMatchStatement::builder()
                    .set_country_codes(Some(
                        inner
                            .country_codes
                            .iter()
                            .map(|code| code.inner().clone())
                            .collect(),
                    ))
                    .build()
                    .built()?,
            ),
            Statement::IpSetReference(ref inner) => builder.ip_set_reference_statement(
                sdk::IpSetReferenceStatement::builder()
                    .arn(inner.arn.as_str())
                    .build()
                    .built()?,
            ),
            Statement::RegexPatternSetReference(ref inner) => builder
                .regex_pattern_set_reference_statement(
                    sdk::RegexPatternSetReferenceStatement::builder()
                        .arn(inner.arn.as_str())
                        .field_to_match(sdk::FieldToMatch::try_from(&inner.field_to_match)?)
                        .set_text_transformations(Some(text_transformations_to_sdk(
                            &inner.text_transformations,
                        )?))
                        .build()
                        .built()?,
                ),
            Statement::RateBased(ref inner) => {
                let rate_based = sdk::RateBasedStatement::builder()
                    .limit(inner.limit)
                    .aggregate_key_type(inner.aggregate_key_type.inner().clone());
                let rate_based = match inner.scope_down_statement {
                    Some(ref scope_down) => {
                        rate_based.scope_down_statement(Self::try_from(scope_down)?)
                    }
                    None => rate_based,
                };
                builder.rate_based_statement(rate_based.build().built()?)
            }
            Statement::And(ref inner) => builder.and_statement(
                sdk::AndStatement::builder()
                    .set_statements(Some(statements_to_sdk(&inner.statements)?))
                    .build()
                    .built()?,
            ),
            Statement::Or(ref inner) => builder.or_statement(
                sdk::OrStatement::builder()
                    .set_statements(Some(statements_to_sdk(&inner.statements)?))
                    .build()
                    .built()?,
            ),
            Statement::Not(ref inner) => builder.not_statement(
                sdk::NotStatement::builder()
                    .statement(Self::try_from(&inner.statement)?)
                    .build()
                    .built()?,
            ),
            Statement::ManagedRuleGroup(ref inner) => {
                let managed = sdk::ManagedRuleGroupStatement::builder()
                    .vendor_name(inner.vendor_name.as_str())
                    .name(inner.name.as_str())
                    .set_version(inner.version.clone())
                    .set_excluded_rules(excluded_rules_to_sdk(&inner.excluded_rules)?);
                let managed = match inner.scope_down_statement {
                    Some(ref scope_down) => {
                        managed.scope_down_statement(Self::try_from(scope_down)?)
                    }
                    None => managed,
                };
                builder.managed_rule_group_statement(managed.build().built()?)
            }
            Statement::RuleGroupReference(ref inner) => builder.rule_group_reference_statement(
                sdk::RuleGroupReferenceStatement::builder()
                    .arn(inner.arn.as_str())
                    .set_excluded_rules(excluded_rules_to_sdk(&inner.excluded_rules)?)
                    .build()
                    .built()?,
            ),
        };
        Ok(builder.build().built()?)
    }
}

/// The model carries the search string as text, so bytes that are not UTF-8
/// cannot be read back without changing what the rule matches.
fn search_string_from_sdk(search_string: &Blob) -> Result<String, Error> {
    match std::str::from_utf8(search_string.as_ref()) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(Error::UnsupportedVariant {
            entity: "ByteMatchStatement.SearchString",
        }),
    }
}

impl TryFrom<&sdk::Statement> for Statement {
    type Error = Error;

    #[expect(clippy::too_many_lines, reason = "one branch per statement kind")]
    fn try_from(statement: &sdk::Statement) -> Result<Self, Self::Error> {
        if let Some(inner) = statement.byte_match_statement() {
            return Ok(Self::ByteMatch(ByteMatchStatement {
                search_string: search_string_from_sdk(inner.search_string())?,
                field_to_match: field_to_match_from_sdk(
                    inner.field_to_match(),
                    "ByteMatchStatement",
                )?,
                text_transformations: text_transformations_from_sdk(inner.text_transformations()),
                positional_constraint: inner.positional_constraint().into(),
            }));
        }

        if let Some(inner) = statement.sqli_match_statement() {
            return Ok(Self::SqliMatch(SqliMatchStatement {
                field_to_match: field_to_match_from_sdk(
                    inner.field_to_match(),
                    "SqliMatchStatement",
                )?,
                text_transformations: text_transformations_from_sdk(inner.text_transformations()),
                sensitivity_level: inner.sensitivity_level().map(Into::into),
            }));
        }

        if let Some(inner) = statement.xss_match_statement() {
            return Ok(Self::XssMatch(XssMatchStatement {
                field_to_match: field_to_match_from_sdk(
                    inner.field_to_match(),
                    "XssMatchStatement",
                )?,
                text_transformations: text_transformations_from_sdk(inner.text_transformations()),
            }));
        }

        if let Some(inner) = statement.size_constraint_statement() {
            return Ok(Self::SizeConstraint(SizeConstraintStatement {
                field_to_match: field_to_match_from_sdk(
                    inner.field_to_match(),
                    "SizeConstraintStatement",
                )?,
                comparison_operator: inner.comparison_operator().into(),
                size: inner.size(),
                text_transformations: text_transformations_from_sdk(inner.text_transformations()),
            }));
        }

        if let Some(inner) = statement.geo_match_statement() {
            return Ok(Self::GeoMatch(GeoMatchStatement {
                country_codes: inner.country_codes().iter().map(Into::into).collect(),
            }));
        }

        if let Some(inner) = statement.ip_set_reference_statement() {
            return Ok(Self::IpSetReference(ReferenceStatement {
                arn: inner.arn().to_owned(),
            }));
        }

        if let Some(inner) = statement.regex_pattern_set_reference_statement() {
            return Ok(Self::RegexPatternSetReference(
                RegexPatternSetReferenceStatement {
                    arn: inner.arn().to_owned(),
                    field_to_match: field_to_match_from_sdk(
                        inner.field_to_match(),
                        "RegexPatternSetReferenceStatement",
                    )?,
                    text_transformations: text_transformations_from_sdk(
                        inner.text_transformations(),
                    ),
                },
            ));
        }

        if let Some(inner) = statement.rate_based_statement() {
            let scope_down_statement: Option<Self> = inner
                .scope_down_statement()
                .map(Self::try_from)
                .transpose()?;
            return Ok(Self::RateBased(Box::new(RateBasedStatement {
                limit: inner.limit(),
                aggregate_key_type: inner.aggregate_key_type().into(),
                scope_down_statement,
            })));
        }

        if let Some(inner) = statement.and_statement() {
            return Ok(Self::And(StatementList {
                statements: statements_from_sdk(inner.statements())?,
            }));
        }

        if let Some(inner) = statement.or_statement() {
            return Ok(Self::Or(StatementList {
                statements: statements_from_sdk(inner.statements())?,
            }));
        }

        if let Some(inner) = statement.not_statement() {
            let negated = inner
                .statement()
                .ok_or_else(|| Error::UnexpectedNoneValue {
                    entity: "NotStatement.Statement".to_owned(),
                })
                .and_then(Self::try_from)?;
            return Ok(Self::Not(Box::new(NotStatement { statement: negated })));
        }

        if let Some(inner) = statement.managed_rule_group_statement() {
            let scope_down_statement: Option<Self> = inner
                .scope_down_statement()
                .map(Self::try_from)
                .transpose()?;
            return Ok(Self::ManagedRuleGroup(Box::new(ManagedRuleGroupStatement {
                name: inner.name().to_owned(),
                vendor_name: inner.vendor_name().to_owned(),
                version: inner.version().map(ToOwned::to_owned),
                excluded_rules: excluded_rules_from_sdk(inner.excluded_rules()),
                scope_down_statement,
            })));
        }

        if let Some(inner) = statement.rule_group_reference_statement() {
            return Ok(Self::RuleGroupReference(RuleGroupReferenceStatement {
                arn: inner.arn().to_owned(),
                excluded_rules: excluded_rules_from_sdk(inner.excluded_rules()),
            }));
        }

        Err(Error::UnsupportedVariant { entity: "Statement" })
    }
}
