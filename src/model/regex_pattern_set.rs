use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{
    operation::{
        create_regex_pattern_set::CreateRegexPatternSetInput,
        delete_regex_pattern_set::DeleteRegexPatternSetInput,
        get_regex_pattern_set::GetRegexPatternSetInput,
        update_regex_pattern_set::UpdateRegexPatternSetInput,
    },
    types as sdk,
};
use wafv2_macros::ResourceModel;

use super::common::{impl_identified, required, LockToken, ResourceIdentifier};
use crate::{
    convert::Scope,
    tags::TagList,
    Error,
};

/// `AWS::WAFv2::RegexPatternSet`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
pub struct RegexPatternSet {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub regular_expression_list: Vec<String>,
    #[serde(default, skip_serializing_if = "TagList::is_empty")]
    pub tags: TagList,
}

impl_identified!(RegexPatternSet);

impl RegexPatternSet {
    fn regexes(&self) -> Vec<sdk::Regex> {
        self.regular_expression_list
            .iter()
            .map(|regex| sdk::Regex::builder().regex_string(regex.as_str()).build())
            .collect()
    }

    pub(crate) fn create_input(&self, name: &str) -> Result<CreateRegexPatternSetInput, Error> {
        Ok(CreateRegexPatternSetInput::builder()
            .name(name)
            .scope(required(&self.scope, "Scope")?.inner().clone())
            .set_description(self.description.clone())
            .set_regular_expression_list(Some(self.regexes()))
            .set_tags(self.tags.to_sdk()?)
            .build()?)
    }

    pub(crate) fn update_input(
        &self,
        identifier: &ResourceIdentifier,
        lock_token: &LockToken,
    ) -> Result<UpdateRegexPatternSetInput, Error> {
        Ok(UpdateRegexPatternSetInput::builder()
            .name(identifier.name.as_str())
            .scope(identifier.scope.inner().clone())
            .id(identifier.id.as_str())
            .set_description(self.description.clone())
            .set_regular_expression_list(Some(self.regexes()))
            .lock_token(lock_token.as_str())
            .build()?)
    }
}

pub(crate) fn get_input(identifier: &ResourceIdentifier) -> Result<GetRegexPatternSetInput, Error> {
    Ok(GetRegexPatternSetInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .build()?)
}

pub(crate) fn delete_input(
    identifier: &ResourceIdentifier,
    lock_token: &LockToken,
) -> Result<DeleteRegexPatternSetInput, Error> {
    Ok(DeleteRegexPatternSetInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .lock_token(lock_token.as_str())
        .build()?)
}

impl From<(&sdk::RegexPatternSet, Scope)> for RegexPatternSet {
    fn from((set, scope): (&sdk::RegexPatternSet, Scope)) -> Self {
        Self {
            name: set.name().map(ToOwned::to_owned),
            scope: Some(scope),
            id: set.id().map(ToOwned::to_owned),
            arn: set.arn().map(ToOwned::to_owned),
            description: set.description().map(ToOwned::to_owned),
            regular_expression_list: set
                .regular_expression_list()
                .iter()
                .filter_map(|regex| regex.regex_string().map(ToOwned::to_owned))
                .collect(),
            tags: TagList::new(),
        }
    }
}

impl From<(&sdk::RegexPatternSetSummary, Scope)> for RegexPatternSet {
    fn from((summary, scope): (&sdk::RegexPatternSetSummary, Scope)) -> Self {
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
