//! The production [`WafProxy`], backed by the AWS SDK.

use std::time::Duration;

use aws_config::{retry::RetryConfig, BehaviorVersion, SdkConfig};
use aws_sdk_wafv2::{
    config::{Credentials, Region, StalledStreamProtectionConfig},
    operation as op,
};

use crate::{config::Config, proxy::WafProxy, request::CallerCredentials, Error};

const CREDENTIALS_PROVIDER: &str = "cloudformation-caller";

/// Loads the shared SDK configuration. Done once per process; the clients
/// for the individual invocations derive from it.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let loader = aws_config::ConfigLoader::default()
        .retry_config(RetryConfig::standard())
        .stalled_stream_protection(
            StalledStreamProtectionConfig::enabled()
                .grace_period(Duration::from_secs(5))
                .build(),
        )
        .behavior_version(BehaviorVersion::latest());

    let loader = match config.endpoint_url {
        Some(ref url) => loader.endpoint_url(url),
        None => loader,
    };

    loader.load().await
}

#[derive(Debug, Clone)]
pub struct WafClient {
    client: aws_sdk_wafv2::Client,
}

impl WafClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_wafv2::Client::new(sdk_config),
        }
    }

    /// A client acting with the credentials and in the region of the
    /// CloudFormation caller. Whatever the invocation leaves out comes from
    /// `sdk_config`.
    pub fn for_invocation(
        sdk_config: &SdkConfig,
        credentials: Option<&CallerCredentials>,
        region: Option<&str>,
    ) -> Self {
        let builder = aws_sdk_wafv2::config::Builder::from(sdk_config);

        let builder = match credentials {
            Some(credentials) => builder.credentials_provider(Credentials::new(
                credentials.access_key_id.as_str(),
                credentials.secret_access_key.as_str(),
                credentials.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER,
            )),
            None => builder,
        };

        let builder = match region {
            Some(region) => builder.region(Region::new(region.to_owned())),
            None => builder,
        };

        Self {
            client: aws_sdk_wafv2::Client::from_conf(builder.build()),
        }
    }
}

impl WafProxy for WafClient {
    async fn create_ip_set(
        &self,
        input: op::create_ip_set::CreateIpSetInput,
    ) -> Result<op::create_ip_set::CreateIpSetOutput, Error> {
        Ok(self
            .client
            .create_ip_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_description(input.description)
            .set_ip_address_version(input.ip_address_version)
            .set_addresses(input.addresses)
            .set_tags(input.tags)
            .send()
            .await?)
    }

    async fn get_ip_set(
        &self,
        input: op::get_ip_set::GetIpSetInput,
    ) -> Result<op::get_ip_set::GetIpSetOutput, Error> {
        Ok(self
            .client
            .get_ip_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .send()
            .await?)
    }

    async fn update_ip_set(
        &self,
        input: op::update_ip_set::UpdateIpSetInput,
    ) -> Result<op::update_ip_set::UpdateIpSetOutput, Error> {
        Ok(self
            .client
            .update_ip_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_description(input.description)
            .set_addresses(input.addresses)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn delete_ip_set(
        &self,
        input: op::delete_ip_set::DeleteIpSetInput,
    ) -> Result<op::delete_ip_set::DeleteIpSetOutput, Error> {
        Ok(self
            .client
            .delete_ip_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn list_ip_sets(
        &self,
        input: op::list_ip_sets::ListIpSetsInput,
    ) -> Result<op::list_ip_sets::ListIpSetsOutput, Error> {
        Ok(self
            .client
            .list_ip_sets()
            .set_scope(input.scope)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn create_regex_pattern_set(
        &self,
        input: op::create_regex_pattern_set::CreateRegexPatternSetInput,
    ) -> Result<op::create_regex_pattern_set::CreateRegexPatternSetOutput, Error> {
        Ok(self
            .client
            .create_regex_pattern_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_description(input.description)
            .set_regular_expression_list(input.regular_expression_list)
            .set_tags(input.tags)
            .send()
            .await?)
    }

    async fn get_regex_pattern_set(
        &self,
        input: op::get_regex_pattern_set::GetRegexPatternSetInput,
    ) -> Result<op::get_regex_pattern_set::GetRegexPatternSetOutput, Error> {
        Ok(self
            .client
            .get_regex_pattern_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .send()
            .await?)
    }

    async fn update_regex_pattern_set(
        &self,
        input: op::update_regex_pattern_set::UpdateRegexPatternSetInput,
    ) -> Result<op::update_regex_pattern_set::UpdateRegexPatternSetOutput, Error> {
        Ok(self
            .client
            .update_regex_pattern_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_description(input.description)
            .set_regular_expression_list(input.regular_expression_list)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn delete_regex_pattern_set(
        &self,
        input: op::delete_regex_pattern_set::DeleteRegexPatternSetInput,
    ) -> Result<op::delete_regex_pattern_set::DeleteRegexPatternSetOutput, Error> {
        Ok(self
            .client
            .delete_regex_pattern_set()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn list_regex_pattern_sets(
        &self,
        input: op::list_regex_pattern_sets::ListRegexPatternSetsInput,
    ) -> Result<op::list_regex_pattern_sets::ListRegexPatternSetsOutput, Error> {
        Ok(self
            .client
            .list_regex_pattern_sets()
            .set_scope(input.scope)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn create_rule_group(
        &self,
        input: op::create_rule_group::CreateRuleGroupInput,
    ) -> Result<op::create_rule_group::CreateRuleGroupOutput, Error> {
        Ok(self
            .client
            .create_rule_group()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_capacity(input.capacity)
            .set_description(input.description)
            .set_rules(input.rules)
            .set_visibility_config(input.visibility_config)
            .set_tags(input.tags)
            .send()
            .await?)
    }

    async fn get_rule_group(
        &self,
        input: op::get_rule_group::GetRuleGroupInput,
    ) -> Result<op::get_rule_group::GetRuleGroupOutput, Error> {
        Ok(self
            .client
            .get_rule_group()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_arn(input.arn)
            .send()
            .await?)
    }

    async fn update_rule_group(
        &self,
        input: op::update_rule_group::UpdateRuleGroupInput,
    ) -> Result<op::update_rule_group::UpdateRuleGroupOutput, Error> {
        Ok(self
            .client
            .update_rule_group()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_description(input.description)
            .set_rules(input.rules)
            .set_visibility_config(input.visibility_config)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn delete_rule_group(
        &self,
        input: op::delete_rule_group::DeleteRuleGroupInput,
    ) -> Result<op::delete_rule_group::DeleteRuleGroupOutput, Error> {
        Ok(self
            .client
            .delete_rule_group()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn list_rule_groups(
        &self,
        input: op::list_rule_groups::ListRuleGroupsInput,
    ) -> Result<op::list_rule_groups::ListRuleGroupsOutput, Error> {
        Ok(self
            .client
            .list_rule_groups()
            .set_scope(input.scope)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn create_web_acl(
        &self,
        input: op::create_web_acl::CreateWebAclInput,
    ) -> Result<op::create_web_acl::CreateWebAclOutput, Error> {
        Ok(self
            .client
            .create_web_acl()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_default_action(input.default_action)
            .set_description(input.description)
            .set_rules(input.rules)
            .set_visibility_config(input.visibility_config)
            .set_tags(input.tags)
            .send()
            .await?)
    }

    async fn get_web_acl(
        &self,
        input: op::get_web_acl::GetWebAclInput,
    ) -> Result<op::get_web_acl::GetWebAclOutput, Error> {
        Ok(self
            .client
            .get_web_acl()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .send()
            .await?)
    }

    async fn update_web_acl(
        &self,
        input: op::update_web_acl::UpdateWebAclInput,
    ) -> Result<op::update_web_acl::UpdateWebAclOutput, Error> {
        Ok(self
            .client
            .update_web_acl()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_default_action(input.default_action)
            .set_description(input.description)
            .set_rules(input.rules)
            .set_visibility_config(input.visibility_config)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn delete_web_acl(
        &self,
        input: op::delete_web_acl::DeleteWebAclInput,
    ) -> Result<op::delete_web_acl::DeleteWebAclOutput, Error> {
        Ok(self
            .client
            .delete_web_acl()
            .set_name(input.name)
            .set_scope(input.scope)
            .set_id(input.id)
            .set_lock_token(input.lock_token)
            .send()
            .await?)
    }

    async fn list_web_acls(
        &self,
        input: op::list_web_acls::ListWebAcLsInput,
    ) -> Result<op::list_web_acls::ListWebAcLsOutput, Error> {
        Ok(self
            .client
            .list_web_acls()
            .set_scope(input.scope)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn put_logging_configuration(
        &self,
        input: op::put_logging_configuration::PutLoggingConfigurationInput,
    ) -> Result<op::put_logging_configuration::PutLoggingConfigurationOutput, Error> {
        Ok(self
            .client
            .put_logging_configuration()
            .set_logging_configuration(input.logging_configuration)
            .send()
            .await?)
    }

    async fn get_logging_configuration(
        &self,
        input: op::get_logging_configuration::GetLoggingConfigurationInput,
    ) -> Result<op::get_logging_configuration::GetLoggingConfigurationOutput, Error> {
        Ok(self
            .client
            .get_logging_configuration()
            .set_resource_arn(input.resource_arn)
            .send()
            .await?)
    }

    async fn delete_logging_configuration(
        &self,
        input: op::delete_logging_configuration::DeleteLoggingConfigurationInput,
    ) -> Result<op::delete_logging_configuration::DeleteLoggingConfigurationOutput, Error> {
        Ok(self
            .client
            .delete_logging_configuration()
            .set_resource_arn(input.resource_arn)
            .send()
            .await?)
    }

    async fn list_logging_configurations(
        &self,
        input: op::list_logging_configurations::ListLoggingConfigurationsInput,
    ) -> Result<op::list_logging_configurations::ListLoggingConfigurationsOutput, Error> {
        Ok(self
            .client
            .list_logging_configurations()
            .set_scope(input.scope)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn list_tags_for_resource(
        &self,
        input: op::list_tags_for_resource::ListTagsForResourceInput,
    ) -> Result<op::list_tags_for_resource::ListTagsForResourceOutput, Error> {
        Ok(self
            .client
            .list_tags_for_resource()
            .set_resource_arn(input.resource_arn)
            .set_next_marker(input.next_marker)
            .set_limit(input.limit)
            .send()
            .await?)
    }

    async fn tag_resource(
        &self,
        input: op::tag_resource::TagResourceInput,
    ) -> Result<op::tag_resource::TagResourceOutput, Error> {
        Ok(self
            .client
            .tag_resource()
            .set_resource_arn(input.resource_arn)
            .set_tags(input.tags)
            .send()
            .await?)
    }

    async fn untag_resource(
        &self,
        input: op::untag_resource::UntagResourceInput,
    ) -> Result<op::untag_resource::UntagResourceOutput, Error> {
        Ok(self
            .client
            .untag_resource()
            .set_resource_arn(input.resource_arn)
            .set_tag_keys(input.tag_keys)
            .send()
            .await?)
    }
}
