use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{
    operation::{
        create_rule_group::CreateRuleGroupInput, delete_rule_group::DeleteRuleGroupInput,
        get_rule_group::GetRuleGroupInput, update_rule_group::UpdateRuleGroupInput,
    },
    types as sdk,
};
use wafv2_macros::ResourceModel;

use super::{
    common::{impl_identified, required, LockToken, ResourceIdentifier},
    rule::{rules_from_sdk, rules_to_sdk},
    Rule, VisibilityConfig,
};
use crate::{convert::Scope, tags::TagList, Error};

/// `AWS::WAFv2::RuleGroup`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroup {
    #[resource(create_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[resource(create_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[resource(read_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[resource(read_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[resource(create_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_config: Option<VisibilityConfig>,
    #[serde(default, skip_serializing_if = "TagList::is_empty")]
    pub tags: TagList,
}

impl_identified!(RuleGroup);

impl RuleGroup {
    fn sdk_visibility_config(&self) -> Result<sdk::VisibilityConfig, Error> {
        sdk::VisibilityConfig::try_from(required(&self.visibility_config, "VisibilityConfig")?)
    }

    pub(crate) fn create_input(&self, name: &str) -> Result<CreateRuleGroupInput, Error> {
        Ok(CreateRuleGroupInput::builder()
            .name(name)
            .scope(required(&self.scope, "Scope")?.inner().clone())
            .capacity(*required(&self.capacity, "Capacity")?)
            .set_description(self.description.clone())
            .set_rules(Some(rules_to_sdk(&self.rules)?))
            .visibility_config(self.sdk_visibility_config()?)
            .set_tags(self.tags.to_sdk()?)
            .build()?)
    }

    pub(crate) fn update_input(
        &self,
        identifier: &ResourceIdentifier,
        lock_token: &LockToken,
    ) -> Result<UpdateRuleGroupInput, Error> {
        Ok(UpdateRuleGroupInput::builder()
            .name(identifier.name.as_str())
            .scope(identifier.scope.inner().clone())
            .id(identifier.id.as_str())
            .set_description(self.description.clone())
            .set_rules(Some(rules_to_sdk(&self.rules)?))
            .visibility_config(self.sdk_visibility_config()?)
            .lock_token(lock_token.as_str())
            .build()?)
    }
}

pub(crate) fn get_input(identifier: &ResourceIdentifier) -> Result<GetRuleGroupInput, Error> {
    Ok(GetRuleGroupInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .build()?)
}

pub(crate) fn delete_input(
    identifier: &ResourceIdentifier,
    lock_token: &LockToken,
) -> Result<DeleteRuleGroupInput, Error> {
    Ok(DeleteRuleGroupInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .lock_token(lock_token.as_str())
        .build()?)
}

impl TryFrom<(&sdk::RuleGroup, Scope)> for RuleGroup {
    type Error = Error;

    fn try_from((group, scope): (&sdk::RuleGroup, Scope)) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Some(group.name().to_owned()),
            scope: Some(scope),
            id: Some(group.id().to_owned()),
            arn: Some(group.arn().to_owned()),
            capacity: Some(group.capacity()),
            description: group.description().map(ToOwned::to_owned),
            rules: rules_from_sdk(group.rules())?,
            visibility_config: group.visibility_config().map(Into::into),
            tags: TagList::new(),
        })
    }
}

impl From<(&sdk::RuleGroupSummary, Scope)> for RuleGroup {
    fn from((summary, scope): (&sdk::RuleGroupSummary, Scope)) -> Self {
        Self {
            name: summary.name().map(ToOwned::to_owned),
            scope: Some(scope),
            id: summary.id().map(ToOwned::to_owned),
            arn: summary.arn().map(ToOwned::to_owned),
            description: summary.description().map(ToOwned::to_owned),
            ..Self::default()
        }
    }
}
