use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::{
    operation::{
        delete_logging_configuration::DeleteLoggingConfigurationInput,
        get_logging_configuration::GetLoggingConfigurationInput,
        put_logging_configuration::PutLoggingConfigurationInput,
    },
    types as sdk,
};
use wafv2_macros::ResourceModel;

use super::{common::required_str, FieldToMatch};
use crate::{convert::Built, Error};

/// `AWS::WAFv2::LoggingConfiguration`. Identified by the ARN of the web ACL
/// it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResourceModel)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfiguration {
    #[resource(create_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[resource(create_only)]
    #[serde(default)]
    pub log_destination_configs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redacted_fields: Vec<FieldToMatch>,
    #[resource(read_only)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by_firewall_manager: Option<bool>,
}

impl LoggingConfiguration {
    pub(crate) fn resource_arn(&self) -> Result<&str, Error> {
        required_str(&self.resource_arn, "ResourceArn")
    }

    pub(crate) fn put_input(&self) -> Result<PutLoggingConfigurationInput, Error> {
        Ok(PutLoggingConfigurationInput::builder()
            .logging_configuration(sdk::LoggingConfiguration::try_from(self)?)
            .build()?)
    }
}

pub(crate) fn get_input(resource_arn: &str) -> Result<GetLoggingConfigurationInput, Error> {
    Ok(GetLoggingConfigurationInput::builder()
        .resource_arn(resource_arn)
        .build()?)
}

pub(crate) fn delete_input(resource_arn: &str) -> Result<DeleteLoggingConfigurationInput, Error> {
    Ok(DeleteLoggingConfigurationInput::builder()
        .resource_arn(resource_arn)
        .build()?)
}

impl TryFrom<&LoggingConfiguration> for sdk::LoggingConfiguration {
    type Error = Error;

    fn try_from(config: &LoggingConfiguration) -> Result<Self, Self::Error> {
        let redacted_fields = config
            .redacted_fields
            .iter()
            .map(sdk::FieldToMatch::try_from)
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self::builder()
            .resource_arn(config.resource_arn()?)
            .set_log_destination_configs(Some(config.log_destination_configs.clone()))
            .set_redacted_fields((!redacted_fields.is_empty()).then_some(redacted_fields))
            .build()
            .built()?)
    }
}

impl TryFrom<&sdk::LoggingConfiguration> for LoggingConfiguration {
    type Error = Error;

    fn try_from(config: &sdk::LoggingConfiguration) -> Result<Self, Self::Error> {
        Ok(Self {
            resource_arn: Some(config.resource_arn().to_owned()),
            log_destination_configs: config.log_destination_configs().to_vec(),
            redacted_fields: config
                .redacted_fields()
                .iter()
                .map(FieldToMatch::try_from)
                .collect::<Result<_, _>>()?,
            managed_by_firewall_manager: Some(config.managed_by_firewall_manager()),
        })
    }
}
