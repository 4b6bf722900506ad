use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{
    operation::{
        create_web_acl::CreateWebAclInput, delete_web_acl::DeleteWebAclInput,
        get_web_acl::GetWebAclInput, update_web_acl::UpdateWebAclInput,
    },
    types as sdk,
};
use wafv2_macros::ResourceModel;

use super::{
    common::{impl_identified, required, LockToken, ResourceIdentifier},
    rule::{rules_from_sdk, rules_to_sdk},
    DefaultAction, Rule, VisibilityConfig,
};
use crate::{convert::Scope, tags::TagList, Error};

/// `AWS::WAFv2::WebACL`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
pub struct WebAcl {
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
    #[resource(read_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_config: Option<VisibilityConfig>,
    #[serde(default, skip_serializing_if = "TagList::is_empty")]
    pub tags: TagList,
}

impl_identified!(WebAcl);

impl WebAcl {
    fn sdk_default_action(&self) -> Result<sdk::DefaultAction, Error> {
        sdk::DefaultAction::try_from(required(&self.default_action, "DefaultAction")?)
    }

    fn sdk_visibility_config(&self) -> Result<sdk::VisibilityConfig, Error> {
        sdk::VisibilityConfig::try_from(required(&self.visibility_config, "VisibilityConfig")?)
    }

    pub(crate) fn create_input(&self, name: &str) -> Result<CreateWebAclInput, Error> {
        Ok(CreateWebAclInput::builder()
            .name(name)
            .scope(required(&self.scope, "Scope")?.inner().clone())
            .default_action(self.sdk_default_action()?)
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
    ) -> Result<UpdateWebAclInput, Error> {
        Ok(UpdateWebAclInput::builder()
            .name(identifier.name.as_str())
            .scope(identifier.scope.inner().clone())
            .id(identifier.id.as_str())
            .default_action(self.sdk_default_action()?)
            .set_description(self.description.clone())
            .set_rules(Some(rules_to_sdk(&self.rules)?))
            .visibility_config(self.sdk_visibility_config()?)
            .lock_token(lock_token.as_str())
            .build()?)
    }
}

pub(crate) fn get_input(identifier: &ResourceIdentifier) -> Result<GetWebAclInput, Error> {
    Ok(GetWebAclInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .build()?)
}

pub(crate) fn delete_input(
    identifier: &ResourceIdentifier,
    lock_token: &LockToken,
) -> Result<DeleteWebAclInput, Error> {
    Ok(DeleteWebAclInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .lock_token(lock_token.as_str())
        .build()?)
}

impl TryFrom<(&sdk::WebAcl, Scope)> for WebAcl {
    type Error = Error;

    fn try_from((acl, scope): (&sdk::WebAcl, Scope)) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Some(acl.name().to_owned()),
            scope: Some(scope),
            id: Some(acl.id().to_owned()),
            arn: Some(acl.arn().to_owned()),
            capacity: Some(acl.capacity()),
            default_action: acl
                .default_action()
                .map(DefaultAction::try_from)
                .transpose()?,
            description: acl.description().map(ToOwned::to_owned),
            rules: rules_from_sdk(acl.rules())?,
            visibility_config: acl.visibility_config().map(Into::into),
            tags: TagList::new(),
        })
    }
}

impl From<(&sdk::WebAclSummary, Scope)> for WebAcl {
    fn from((summary, scope): (&sdk::WebAclSummary, Scope)) -> Self {
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
