use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::types as sdk;

use super::{OverrideAction, RuleAction, Statement, VisibilityConfig};
use crate::{convert::Built, Error};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    pub name: String,
    pub priority: i32,
    pub statement: Statement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_action: Option<OverrideAction>,
    pub visibility_config: VisibilityConfig,
}

impl TryFrom<&Rule> for sdk::Rule {
    type Error = Error;

    fn try_from(rule: &Rule) -> Result<Self, Self::Error> {
        let action = rule
            .action
            .as_ref()
            .map(sdk::RuleAction::try_from)
            .transpose()?;
        let override_action = rule
            .override_action
            .as_ref()
            .map(sdk::OverrideAction::try_from)
            .transpose()?;

        Ok(Self::builder()
            .name(rule.name.as_str())
            .priority(rule.priority)
            .statement(sdk::Statement::try_from(&rule.statement)?)
            .set_action(action)
            .set_override_action(override_action)
            .visibility_config(sdk::VisibilityConfig::try_from(&rule.visibility_config)?)
            .build()
            .built()?)
    }
}

impl TryFrom<&sdk::Rule> for Rule {
    type Error = Error;

    fn try_from(rule: &sdk::Rule) -> Result<Self, Self::Error> {
        let missing = |member: &str| Error::UnexpectedNoneValue {
            entity: format!("Rule({}).{member}", rule.name()),
        };

        Ok(Self {
            name: rule.name().to_owned(),
            priority: rule.priority(),
            statement: rule
                .statement()
                .ok_or_else(|| missing("Statement"))
                .and_then(Statement::try_from)?,
            action: rule.action().map(RuleAction::try_from).transpose()?,
            override_action: rule
                .override_action()
                .map(OverrideAction::try_from)
                .transpose()?,
            visibility_config: rule
                .visibility_config()
                .ok_or_else(|| missing("VisibilityConfig"))?
                .into(),
        })
    }
}

pub(crate) fn rules_to_sdk(rules: &[Rule]) -> Result<Vec<sdk::Rule>, Error> {
    rules.iter().map(sdk::Rule::try_from).collect()
}

pub(crate) fn rules_from_sdk(rules: &[sdk::Rule]) -> Result<Vec<Rule>, Error> {
    rules.iter().map(Rule::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: &str = r#"{
        "Name": "block-bad-bots",
        "Priority": 1,
        "Statement": {
            "ByteMatchStatement": {
                "SearchString": "badbot",
                "FieldToMatch": {"SingleHeader": {"Name": "user-agent"}},
                "TextTransformations": [{"Priority": 0, "Type": "NONE"}],
                "PositionalConstraint": "CONTAINS"
            }
        },
        "Action": {"Block": {}},
        "VisibilityConfig": {
            "SampledRequestsEnabled": true,
            "CloudWatchMetricsEnabled": false,
            "MetricName": "bad-bots"
        }
    }"#;

    #[test]
    fn rule_round_trips() {
        let rule: Rule = serde_json::from_str(RULE).unwrap();
        let sdk = sdk::Rule::try_from(&rule).unwrap();
        assert_eq!(sdk.name(), "block-bad-bots");
        assert_eq!(sdk.priority(), 1);
        assert!(sdk.action().and_then(|action| action.block()).is_some());

        let back = Rule::try_from(&sdk).unwrap();
        assert_eq!(back, rule);
        assert!(serde_json::to_value(&back)
            .unwrap()
            .get("OverrideAction")
            .is_none());
    }

    #[test]
    fn rule_without_statement_is_rejected() {
        let sdk = sdk::Rule::builder()
            .name("broken")
            .priority(0)
            .build()
            .built()
            .unwrap();
        assert!(matches!(
            Rule::try_from(&sdk),
            Err(Error::UnexpectedNoneValue { .. })
        ));
    }
}
