use aws_sdk_wafv2::operation::list_rule_groups::ListRuleGroupsInput;

use super::{ensure_updatable, lock_token, missing, resolve_name, tagging};
use crate::{
    model::{
        rule_group::{delete_input, get_input},
        required, Identified, LockToken, ResourceIdentifier, RuleGroup,
    },
    progress::ProgressEvent,
    proxy::WafProxy,
    request::ResourceHandlerRequest,
    Error,
};

/// The lock token and ARN of the live rule group.
async fn current<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<(LockToken, String), Error> {
    let output = proxy.get_rule_group(get_input(identifier)?).await?;
    let rule_group = output
        .rule_group()
        .ok_or_else(|| missing("GetRuleGroupOutput.RuleGroup"))?;
    let token = lock_token(output.lock_token(), "GetRuleGroupOutput.LockToken")?;
    Ok((token, rule_group.arn().to_owned()))
}

async fn read_model<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<RuleGroup, Error> {
    let output = proxy.get_rule_group(get_input(identifier)?).await?;
    let rule_group = output
        .rule_group()
        .ok_or_else(|| missing("GetRuleGroupOutput.RuleGroup"))?;

    let mut model = RuleGroup::try_from((rule_group, identifier.scope.clone()))?;
    model.tags = tagging::list_tags(proxy, rule_group.arn()).await?;
    Ok(model)
}

async fn try_create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> Result<ProgressEvent<RuleGroup>, Error> {
    let mut model = request.desired;
    let name = resolve_name(
        model.name.take(),
        request.logical_resource_id.as_deref(),
        request.client_request_token.as_deref(),
    );

    let output = proxy.create_rule_group(model.create_input(&name)?).await?;
    let summary = output
        .summary()
        .ok_or_else(|| missing("CreateRuleGroupOutput.Summary"))?;

    model.name = Some(name);
    model.id = summary.id().map(ToOwned::to_owned);
    model.arn = summary.arn().map(ToOwned::to_owned);

    tracing::info!(name = ?model.name, id = ?model.id, "created rule group");
    Ok(ProgressEvent::success(model))
}

async fn try_read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> Result<ProgressEvent<RuleGroup>, Error> {
    let identifier = request.desired.identifier()?;
    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> Result<ProgressEvent<RuleGroup>, Error> {
    let desired = request.desired;
    if let Some(ref previous) = request.previous {
        ensure_updatable(desired.create_only_changes(previous))?;
    }

    let identifier = desired.identifier()?;
    let (token, arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .update_rule_group(desired.update_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "updated rule group");

    let previous_tags = match request.previous {
        Some(previous) => previous.tags,
        None => tagging::list_tags(proxy, &arn).await?,
    };
    tagging::sync_tags(proxy, &arn, &desired.tags, &previous_tags).await?;

    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> Result<ProgressEvent<RuleGroup>, Error> {
    let identifier = request.desired.identifier()?;
    let (token, _arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .delete_rule_group(delete_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "deleted rule group");

    Ok(ProgressEvent::success_without_model())
}

async fn try_list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> Result<ProgressEvent<RuleGroup>, Error> {
    let scope = required(&request.desired.scope, "Scope")?.clone();

    let output = proxy
        .list_rule_groups(
            ListRuleGroupsInput::builder()
                .scope(scope.inner().clone())
                .set_next_marker(request.next_token)
                .build()?,
        )
        .await?;

    let models = output
        .rule_groups()
        .iter()
        .map(|summary| RuleGroup::from((summary, scope.clone())))
        .collect();

    Ok(ProgressEvent::listed(
        models,
        output.next_marker().map(ToOwned::to_owned),
    ))
}

#[tracing::instrument(name = "rule_group_create", skip_all)]
pub async fn create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> ProgressEvent<RuleGroup> {
    ProgressEvent::from_result(try_create(proxy, request).await)
}

#[tracing::instrument(name = "rule_group_read", skip_all)]
pub async fn read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> ProgressEvent<RuleGroup> {
    ProgressEvent::from_result(try_read(proxy, request).await)
}

#[tracing::instrument(name = "rule_group_update", skip_all)]
pub async fn update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> ProgressEvent<RuleGroup> {
    ProgressEvent::from_result(try_update(proxy, request).await)
}

#[tracing::instrument(name = "rule_group_delete", skip_all)]
pub async fn delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> ProgressEvent<RuleGroup> {
    ProgressEvent::from_result(try_delete(proxy, request).await)
}

#[tracing::instrument(name = "rule_group_list", skip_all)]
pub async fn list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RuleGroup>,
) -> ProgressEvent<RuleGroup> {
    ProgressEvent::from_result(try_list(proxy, request).await)
}

#[cfg(test)]
mod tests {
    use aws_sdk_wafv2::{
        operation::{
            create_rule_group::CreateRuleGroupOutput, delete_rule_group::DeleteRuleGroupOutput,
            get_rule_group::GetRuleGroupOutput, list_rule_groups::ListRuleGroupsOutput,
            list_tags_for_resource::ListTagsForResourceOutput,
            update_rule_group::UpdateRuleGroupOutput,
        },
        types as sdk,
    };

    use super::*;
    use crate::{
        convert::{Built, Scope},
        progress::{HandlerErrorCode, OperationStatus},
        testing::{nonexistent_item, FakeProxy},
    };

    const ARN: &str = "arn:aws:wafv2:eu-west-1:123456789012:regional/rulegroup/base/7";

    fn desired() -> RuleGroup {
        serde_json::from_str(
            r#"{
                "Name": "base",
                "Scope": "REGIONAL",
                "Id": "7",
                "Capacity": 50,
                "Rules": [{
                    "Name": "sqli",
                    "Priority": 1,
                    "Statement": {"SqliMatchStatement": {
                        "FieldToMatch": {"Body": {}},
                        "TextTransformations": [{"Priority": 0, "Type": "URL_DECODE"}]
                    }},
                    "Action": {"Block": {}},
                    "VisibilityConfig": {
                        "SampledRequestsEnabled": true,
                        "CloudWatchMetricsEnabled": true,
                        "MetricName": "sqli"
                    }
                }],
                "VisibilityConfig": {
                    "SampledRequestsEnabled": true,
                    "CloudWatchMetricsEnabled": true,
                    "MetricName": "base"
                }
            }"#,
        )
        .unwrap()
    }

    fn get_output(lock_token: &str, statement: sdk::Statement) -> GetRuleGroupOutput {
        let visibility = sdk::VisibilityConfig::builder()
            .sampled_requests_enabled(true)
            .cloud_watch_metrics_enabled(true)
            .metric_name("base")
            .build()
            .built()
            .unwrap();
        let rule = sdk::Rule::builder()
            .name("sqli")
            .priority(1)
            .statement(statement)
            .action(
                sdk::RuleAction::builder()
                    .block(sdk::BlockAction::builder().build())
                    .build(),
            )
            .visibility_config(visibility.clone())
            .build()
            .built()
            .unwrap();

        GetRuleGroupOutput::builder()
            .rule_group(
                sdk::RuleGroup::builder()
                    .name("base")
                    .id("7")
                    .arn(ARN)
                    .capacity(50)
                    .rules(rule)
                    .visibility_config(visibility)
                    .build()
                    .built()
                    .unwrap(),
            )
            .lock_token(lock_token)
            .build()
    }

    fn sqli_statement() -> sdk::Statement {
        let desired = desired();
        sdk::Statement::try_from(&desired.rules.first().unwrap().statement).unwrap()
    }

    #[tokio::test]
    async fn create_generates_name_and_sends_capacity() {
        let proxy = FakeProxy::default();
        proxy.create_rule_group.returns(
            CreateRuleGroupOutput::builder()
                .summary(sdk::RuleGroupSummary::builder().id("7").arn(ARN).build())
                .build(),
        );

        let request = ResourceHandlerRequest {
            logical_resource_id: Some("BaseRules".to_owned()),
            client_request_token: Some("9d1c2b4e-05f3-4f8e-9a57-3c0e5d6b7a81".to_owned()),
            ..ResourceHandlerRequest::new(RuleGroup {
                name: None,
                id: None,
                ..desired()
            })
        };

        let event = create(&proxy, request).await;
        assert!(event.is_success(), "{event:?}");

        let input = proxy.create_rule_group.only_call();
        let name = input.name.unwrap();
        assert!(name.starts_with("BaseRules-"));
        assert_eq!(input.capacity, Some(50));
        assert_eq!(input.scope, Some(sdk::Scope::Regional));
        assert_eq!(input.rules.map(|rules| rules.len()), Some(1));

        let model = event.resource_model.unwrap();
        assert_eq!(model.name, Some(name));
        assert_eq!(model.id.as_deref(), Some("7"));
        assert_eq!(model.arn.as_deref(), Some(ARN));
        assert!(proxy.get_rule_group.calls().is_empty());
    }

    #[tokio::test]
    async fn read_converts_rules() {
        let proxy = FakeProxy::default();
        proxy.get_rule_group.returns(get_output("token-1", sqli_statement()));
        proxy
            .list_tags_for_resource
            .returns(ListTagsForResourceOutput::builder().build());

        let event = read(&proxy, ResourceHandlerRequest::new(desired())).await;
        let model = event.resource_model.unwrap();
        assert_eq!(model.capacity, Some(50));
        assert_eq!(model.rules, desired().rules);
        assert_eq!(model.arn.as_deref(), Some(ARN));
    }

    #[tokio::test]
    async fn read_rejects_unrepresentable_statements() {
        let proxy = FakeProxy::default();
        let label_match = sdk::Statement::builder()
            .label_match_statement(
                sdk::LabelMatchStatement::builder()
                    .scope(sdk::LabelMatchScope::Label)
                    .key("awswaf:managed:aws:bot-control:bot:verified")
                    .build()
                    .built()
                    .unwrap(),
            )
            .build();
        proxy.get_rule_group.returns(get_output("token-1", label_match));

        let event = read(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(
            event.error_code,
            Some(HandlerErrorCode::GeneralServiceException)
        );
    }

    #[tokio::test]
    async fn capacity_change_is_not_updatable() {
        let proxy = FakeProxy::default();
        let request = ResourceHandlerRequest {
            previous: Some(desired()),
            ..ResourceHandlerRequest::new(RuleGroup {
                capacity: Some(500),
                ..desired()
            })
        };

        let event = update(&proxy, request).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotUpdatable));
        assert_eq!(
            event.message.as_deref(),
            Some("cannot update create-only properties: Capacity")
        );
        assert!(proxy.get_rule_group.calls().is_empty());
    }

    #[tokio::test]
    async fn update_sends_rules_with_lock_token() {
        let proxy = FakeProxy::default();
        proxy.get_rule_group.returns(get_output("token-1", sqli_statement()));
        proxy.get_rule_group.returns(get_output("token-2", sqli_statement()));
        proxy
            .update_rule_group
            .returns(UpdateRuleGroupOutput::builder().next_lock_token("token-2").build());
        proxy
            .list_tags_for_resource
            .returns(ListTagsForResourceOutput::builder().build());

        let request = ResourceHandlerRequest {
            previous: Some(desired()),
            ..ResourceHandlerRequest::new(desired())
        };
        let event = update(&proxy, request).await;
        assert!(event.is_success(), "{event:?}");

        let input = proxy.update_rule_group.only_call();
        assert_eq!(input.lock_token.as_deref(), Some("token-1"));
        assert_eq!(input.rules.map(|rules| rules.len()), Some(1));
        assert!(proxy.tag_resource.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_uses_lock_token_from_get() {
        let proxy = FakeProxy::default();
        proxy.get_rule_group.returns(get_output("token-5", sqli_statement()));
        proxy
            .delete_rule_group
            .returns(DeleteRuleGroupOutput::builder().build());

        let event = delete(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert!(event.is_success(), "{event:?}");
        assert!(event.resource_model.is_none());

        let input = proxy.delete_rule_group.only_call();
        assert_eq!(input.lock_token.as_deref(), Some("token-5"));
        assert_eq!(input.name.as_deref(), Some("base"));
        assert_eq!(input.id.as_deref(), Some("7"));
        assert_eq!(input.scope, Some(sdk::Scope::Regional));
    }

    #[tokio::test]
    async fn delete_of_missing_rule_group_is_not_found() {
        let proxy = FakeProxy::default();
        proxy.get_rule_group.fails(nonexistent_item());

        let event = delete(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
        assert!(proxy.delete_rule_group.calls().is_empty());
    }

    #[tokio::test]
    async fn list_uses_scope_of_model() {
        let proxy = FakeProxy::default();
        proxy.list_rule_groups.returns(
            ListRuleGroupsOutput::builder()
                .rule_groups(sdk::RuleGroupSummary::builder().name("base").id("7").build())
                .build(),
        );

        let event = list(
            &proxy,
            ResourceHandlerRequest::new(RuleGroup {
                scope: Some(Scope::from("CLOUDFRONT")),
                ..RuleGroup::default()
            }),
        )
        .await;

        assert!(event.next_token.is_none());
        let models = event.resource_models.unwrap();
        assert_eq!(models.first().unwrap().scope, Some(Scope::from("CLOUDFRONT")));
        assert_eq!(
            proxy.list_rule_groups.only_call().scope,
            Some(sdk::Scope::Cloudfront)
        );
    }

    #[tokio::test]
    async fn list_requires_scope() {
        let proxy = FakeProxy::default();
        let event = list(&proxy, ResourceHandlerRequest::new(RuleGroup::default())).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::InvalidRequest));
        assert!(proxy.list_rule_groups.calls().is_empty());
    }
}
