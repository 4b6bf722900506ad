//! The seam between the handlers and the WAFv2 API.

use std::future::Future;

use crate::Error;

/// Calls `$callback!` with every WAFv2 operation the handlers use, as
/// `operation_module: InputType -> OutputType;`.
macro_rules! with_operations {
    ($callback:ident) => {
        $callback! {
            create_ip_set: CreateIpSetInput -> CreateIpSetOutput;
            get_ip_set: GetIpSetInput -> GetIpSetOutput;
            update_ip_set: UpdateIpSetInput -> UpdateIpSetOutput;
            delete_ip_set: DeleteIpSetInput -> DeleteIpSetOutput;
            list_ip_sets: ListIpSetsInput -> ListIpSetsOutput;

            create_regex_pattern_set: CreateRegexPatternSetInput -> CreateRegexPatternSetOutput;
            get_regex_pattern_set: GetRegexPatternSetInput -> GetRegexPatternSetOutput;
            update_regex_pattern_set: UpdateRegexPatternSetInput -> UpdateRegexPatternSetOutput;
            delete_regex_pattern_set: DeleteRegexPatternSetInput -> DeleteRegexPatternSetOutput;
            list_regex_pattern_sets: ListRegexPatternSetsInput -> ListRegexPatternSetsOutput;

            create_rule_group: CreateRuleGroupInput -> CreateRuleGroupOutput;
            get_rule_group: GetRuleGroupInput -> GetRuleGroupOutput;
            update_rule_group: UpdateRuleGroupInput -> UpdateRuleGroupOutput;
            delete_rule_group: DeleteRuleGroupInput -> DeleteRuleGroupOutput;
            list_rule_groups: ListRuleGroupsInput -> ListRuleGroupsOutput;

            create_web_acl: CreateWebAclInput -> CreateWebAclOutput;
            get_web_acl: GetWebAclInput -> GetWebAclOutput;
            update_web_acl: UpdateWebAclInput -> UpdateWebAclOutput;
            delete_web_acl: DeleteWebAclInput -> DeleteWebAclOutput;
            list_web_acls: ListWebAcLsInput -> ListWebAcLsOutput;

            put_logging_configuration: PutLoggingConfigurationInput -> PutLoggingConfigurationOutput;
            get_logging_configuration: GetLoggingConfigurationInput -> GetLoggingConfigurationOutput;
            delete_logging_configuration: DeleteLoggingConfigurationInput -> DeleteLoggingConfigurationOutput;
            list_logging_configurations: ListLoggingConfigurationsInput -> ListLoggingConfigurationsOutput;

            list_tags_for_resource: ListTagsForResourceInput -> ListTagsForResourceOutput;
            tag_resource: TagResourceInput -> TagResourceOutput;
            untag_resource: UntagResourceInput -> UntagResourceOutput;
        }
    };
}

pub(crate) use with_operations;

macro_rules! declare_proxy {
    ($($operation:ident: $input:ident -> $output:ident;)*) => {
        /// Everything the handlers need from WAFv2, one method per API
        /// operation. [`WafClient`](crate::WafClient) talks to AWS, tests
        /// substitute a recording fake.
        pub trait WafProxy: Sync {
            $(
                fn $operation(
                    &self,
                    input: aws_sdk_wafv2::operation::$operation::$input,
                ) -> impl Future<
                    Output = Result<aws_sdk_wafv2::operation::$operation::$output, Error>,
                > + Send;
            )*
        }
    };
}

with_operations!(declare_proxy);
