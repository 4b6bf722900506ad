use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{
    operation::{
        create_ip_set::CreateIpSetInput, delete_ip_set::DeleteIpSetInput,
        get_ip_set::GetIpSetInput, update_ip_set::UpdateIpSetInput,
    },
    types as sdk,
};
use wafv2_macros::ResourceModel;

use super::common::{impl_identified, required, LockToken, ResourceIdentifier};
use crate::{
    convert::{IpAddressVersion, Scope},
    tags::TagList,
    Error,
};

/// `AWS::WAFv2::IPSet`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
pub struct IpSet {
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
    #[serde(
        rename = "IPAddressVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ip_address_version: Option<IpAddressVersion>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "TagList::is_empty")]
    pub tags: TagList,
}

impl_identified!(IpSet);

impl IpSet {
    pub(crate) fn create_input(&self, name: &str) -> Result<CreateIpSetInput, Error> {
        Ok(CreateIpSetInput::builder()
            .name(name)
            .scope(required(&self.scope, "Scope")?.inner().clone())
            .set_description(self.description.clone())
            .ip_address_version(
                required(&self.ip_address_version, "IPAddressVersion")?
                    .inner()
                    .clone(),
            )
            .set_addresses(Some(self.addresses.clone()))
            .set_tags(self.tags.to_sdk()?)
            .build()?)
    }

    pub(crate) fn update_input(
        &self,
        identifier: &ResourceIdentifier,
        lock_token: &LockToken,
    ) -> Result<UpdateIpSetInput, Error> {
        Ok(UpdateIpSetInput::builder()
            .name(identifier.name.as_str())
            .scope(identifier.scope.inner().clone())
            .id(identifier.id.as_str())
            .set_description(self.description.clone())
            .set_addresses(Some(self.addresses.clone()))
            .lock_token(lock_token.as_str())
            .build()?)
    }
}

pub(crate) fn get_input(identifier: &ResourceIdentifier) -> Result<GetIpSetInput, Error> {
    Ok(GetIpSetInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .build()?)
}

pub(crate) fn delete_input(
    identifier: &ResourceIdentifier,
    lock_token: &LockToken,
) -> Result<DeleteIpSetInput, Error> {
    Ok(DeleteIpSetInput::builder()
        .name(identifier.name.as_str())
        .scope(identifier.scope.inner().clone())
        .id(identifier.id.as_str())
        .lock_token(lock_token.as_str())
        .build()?)
}

impl From<(&sdk::IpSet, Scope)> for IpSet {
    fn from((ip_set, scope): (&sdk::IpSet, Scope)) -> Self {
        Self {
            name: Some(ip_set.name().to_owned()),
            scope: Some(scope),
            id: Some(ip_set.id().to_owned()),
            arn: Some(ip_set.arn().to_owned()),
            description: ip_set.description().map(ToOwned::to_owned),
            ip_address_version: Some(ip_set.ip_address_version().into()),
            addresses: ip_set.addresses().to_vec(),
            tags: TagList::new(),
        }
    }
}

impl From<(&sdk::IpSetSummary, Scope)> for IpSet {
    fn from((summary, scope): (&sdk::IpSetSummary, Scope)) -> Self {
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
