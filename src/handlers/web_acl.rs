use aws_sdk_wafv2::operation::list_web_acls::ListWebAcLsInput;

use super::{ensure_updatable, lock_token, missing, resolve_name, tagging};
use crate::{
    model::{
        web_acl::{delete_input, get_input},
        required, Identified, LockToken, ResourceIdentifier, WebAcl,
    },
    progress::ProgressEvent,
    proxy::WafProxy,
    request::ResourceHandlerRequest,
    Error,
};

/// The lock token and ARN of the live web ACL.
async fn current<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<(LockToken, String), Error> {
    let output = proxy.get_web_acl(get_input(identifier)?).await?;
    let web_acl = output
        .web_acl()
        .ok_or_else(|| missing("GetWebAclOutput.WebACL"))?;
    let token = lock_token(output.lock_token(), "GetWebAclOutput.LockToken")?;
    Ok((token, web_acl.arn().to_owned()))
}

async fn read_model<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<WebAcl, Error> {
    let output = proxy.get_web_acl(get_input(identifier)?).await?;
    let web_acl = output
        .web_acl()
        .ok_or_else(|| missing("GetWebAclOutput.WebACL"))?;

    let mut model = WebAcl::try_from((web_acl, identifier.scope.clone()))?;
    model.tags = tagging::list_tags(proxy, web_acl.arn()).await?;
    Ok(model)
}

async fn try_create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> Result<ProgressEvent<WebAcl>, Error> {
    let mut model = request.desired;
    let name = resolve_name(
        model.name.take(),
        request.logical_resource_id.as_deref(),
        request.client_request_token.as_deref(),
    );

    let output = proxy.create_web_acl(model.create_input(&name)?).await?;
    let summary = output
        .summary()
        .ok_or_else(|| missing("CreateWebAclOutput.Summary"))?;

    model.name = Some(name);
    model.id = summary.id().map(ToOwned::to_owned);
    model.arn = summary.arn().map(ToOwned::to_owned);

    tracing::info!(name = ?model.name, id = ?model.id, "created web ACL");
    Ok(ProgressEvent::success(model))
}

async fn try_read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> Result<ProgressEvent<WebAcl>, Error> {
    let identifier = request.desired.identifier()?;
    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> Result<ProgressEvent<WebAcl>, Error> {
    let desired = request.desired;
    if let Some(ref previous) = request.previous {
        ensure_updatable(desired.create_only_changes(previous))?;
    }

    let identifier = desired.identifier()?;
    let (token, arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .update_web_acl(desired.update_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "updated web ACL");

    let previous_tags = match request.previous {
        Some(previous) => previous.tags,
        None => tagging::list_tags(proxy, &arn).await?,
    };
    tagging::sync_tags(proxy, &arn, &desired.tags, &previous_tags).await?;

    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> Result<ProgressEvent<WebAcl>, Error> {
    let identifier = request.desired.identifier()?;
    let (token, _arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .delete_web_acl(delete_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "deleted web ACL");

    Ok(ProgressEvent::success_without_model())
}

async fn try_list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> Result<ProgressEvent<WebAcl>, Error> {
    let scope = required(&request.desired.scope, "Scope")?.clone();

    let output = proxy
        .list_web_acls(
            ListWebAcLsInput::builder()
                .scope(scope.inner().clone())
                .set_next_marker(request.next_token)
                .build()?,
        )
        .await?;

    let models = output
        .web_acls()
        .iter()
        .map(|summary| WebAcl::from((summary, scope.clone())))
        .collect();

    Ok(ProgressEvent::listed(
        models,
        output.next_marker().map(ToOwned::to_owned),
    ))
}

#[tracing::instrument(name = "web_acl_create", skip_all)]
pub async fn create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> ProgressEvent<WebAcl> {
    ProgressEvent::from_result(try_create(proxy, request).await)
}

#[tracing::instrument(name = "web_acl_read", skip_all)]
pub async fn read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> ProgressEvent<WebAcl> {
    ProgressEvent::from_result(try_read(proxy, request).await)
}

#[tracing::instrument(name = "web_acl_update", skip_all)]
pub async fn update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> ProgressEvent<WebAcl> {
    ProgressEvent::from_result(try_update(proxy, request).await)
}

#[tracing::instrument(name = "web_acl_delete", skip_all)]
pub async fn delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> ProgressEvent<WebAcl> {
    ProgressEvent::from_result(try_delete(proxy, request).await)
}

#[tracing::instrument(name = "web_acl_list", skip_all)]
pub async fn list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<WebAcl>,
) -> ProgressEvent<WebAcl> {
    ProgressEvent::from_result(try_list(proxy, request).await)
}

#[cfg(test)]
mod tests {
    use aws_sdk_wafv2::{
        operation::{
            create_web_acl::CreateWebAclOutput, delete_web_acl::DeleteWebAclOutput,
            get_web_acl::GetWebAclOutput, list_tags_for_resource::ListTagsForResourceOutput,
            list_web_acls::ListWebAcLsOutput, tag_resource::TagResourceOutput,
            update_web_acl::UpdateWebAclOutput,
        },
        types as sdk,
    };

    use super::*;
    use crate::{
        convert::{Built, Scope},
        progress::HandlerErrorCode,
        tags::Tag,
        testing::{nonexistent_item, FakeProxy},
    };

    const ARN: &str = "arn:aws:wafv2:us-east-1:123456789012:global/webacl/edge/9";

    fn desired() -> WebAcl {
        serde_json::from_str(
            r#"{
                "Name": "edge",
                "Scope": "CLOUDFRONT",
                "Id": "9",
                "DefaultAction": {"Block": {}},
                "Rules": [],
                "VisibilityConfig": {
                    "SampledRequestsEnabled": false,
                    "CloudWatchMetricsEnabled": true,
                    "MetricName": "edge"
                },
                "Tags": [{"Key": "env", "Value": "prod"}]
            }"#,
        )
        .unwrap()
    }

    fn get_output(lock_token: &str) -> GetWebAclOutput {
        GetWebAclOutput::builder()
            .web_acl(
                sdk::WebAcl::builder()
                    .name("edge")
                    .id("9")
                    .arn(ARN)
                    .default_action(
                        sdk::DefaultAction::builder()
                            .block(sdk::BlockAction::builder().build())
                            .build(),
                    )
                    .visibility_config(
                        sdk::VisibilityConfig::builder()
                            .sampled_requests_enabled(false)
                            .cloud_watch_metrics_enabled(true)
                            .metric_name("edge")
                            .build()
                            .built()
                            .unwrap(),
                    )
                    .build()
                    .built()
                    .unwrap(),
            )
            .lock_token(lock_token)
            .build()
    }

    fn tags_output(tags: &[(&str, &str)]) -> ListTagsForResourceOutput {
        let info = tags.iter().fold(
            sdk::TagInfoForResource::builder().resource_arn(ARN),
            |builder, &(key, value)| {
                builder.tag_list(sdk::Tag::builder().key(key).value(value).build().built().unwrap())
            },
        );
        ListTagsForResourceOutput::builder()
            .tag_info_for_resource(info.build())
            .build()
    }

    #[tokio::test]
    async fn create_sends_tags_and_default_action() {
        let proxy = FakeProxy::default();
        proxy.create_web_acl.returns(
            CreateWebAclOutput::builder()
                .summary(sdk::WebAclSummary::builder().id("9").arn(ARN).build())
                .build(),
        );

        let event = create(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert!(event.is_success(), "{event:?}");

        let input = proxy.create_web_acl.only_call();
        assert!(input
            .default_action
            .as_ref()
            .and_then(|action| action.block())
            .is_some());
        assert_eq!(input.tags.map(|tags| tags.len()), Some(1));
        assert_eq!(input.rules, Some(vec![]));
    }

    #[tokio::test]
    async fn create_without_summary_fails() {
        let proxy = FakeProxy::default();
        proxy
            .create_web_acl
            .returns(CreateWebAclOutput::builder().build());

        let event = create(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::ServiceInternalError));
    }

    #[tokio::test]
    async fn read_includes_tags() {
        let proxy = FakeProxy::default();
        proxy.get_web_acl.returns(get_output("token-1"));
        proxy
            .list_tags_for_resource
            .returns(tags_output(&[("env", "prod")]));

        let event = read(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert!(event.is_success(), "{event:?}");

        let model = event.resource_model.unwrap();
        assert_eq!(model.arn.as_deref(), Some(ARN));
        assert_eq!(model.scope, Some(Scope::from("CLOUDFRONT")));
        assert_eq!(model.default_action, desired().default_action);
        assert_eq!(model.tags.get("env"), Some(&Tag::new("env", "prod")));
        assert_eq!(
            proxy.list_tags_for_resource.only_call().resource_arn.as_deref(),
            Some(ARN)
        );
    }

    #[tokio::test]
    async fn update_uses_lock_token_from_get() {
        let proxy = FakeProxy::default();
        proxy.get_web_acl.returns(get_output("token-1"));
        proxy.get_web_acl.returns(get_output("token-2"));
        proxy
            .update_web_acl
            .returns(UpdateWebAclOutput::builder().next_lock_token("token-2").build());
        proxy.list_tags_for_resource.returns(tags_output(&[]));
        proxy.tag_resource.returns(TagResourceOutput::builder().build());
        proxy
            .list_tags_for_resource
            .returns(tags_output(&[("env", "prod")]));

        let event = update(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert!(event.is_success(), "{event:?}");

        let input = proxy.update_web_acl.only_call();
        assert_eq!(input.lock_token.as_deref(), Some("token-1"));
        assert_eq!(input.id.as_deref(), Some("9"));
        assert_eq!(input.scope, Some(sdk::Scope::Cloudfront));

        let tagged = proxy.tag_resource.only_call();
        assert_eq!(tagged.resource_arn.as_deref(), Some(ARN));
        assert_eq!(tagged.tags.map(|tags| tags.len()), Some(1));
        assert!(proxy.untag_resource.calls().is_empty());

        let model = event.resource_model.unwrap();
        assert_eq!(model.tags.get("env"), Some(&Tag::new("env", "prod")));
    }

    #[tokio::test]
    async fn update_rejects_name_change() {
        let proxy = FakeProxy::default();
        let request = ResourceHandlerRequest {
            previous: Some(desired()),
            ..ResourceHandlerRequest::new(WebAcl {
                name: Some("renamed".to_owned()),
                ..desired()
            })
        };

        let event = update(&proxy, request).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotUpdatable));
        assert!(proxy.get_web_acl.calls().is_empty());
        assert!(proxy.update_web_acl.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_uses_lock_token_from_get() {
        let proxy = FakeProxy::default();
        proxy.get_web_acl.returns(get_output("token-3"));
        proxy.delete_web_acl.returns(DeleteWebAclOutput::builder().build());

        let event = delete(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert!(event.is_success());

        let input = proxy.delete_web_acl.only_call();
        assert_eq!(input.lock_token.as_deref(), Some("token-3"));
        assert_eq!(input.scope, Some(sdk::Scope::Cloudfront));
    }

    #[tokio::test]
    async fn delete_of_missing_acl_is_not_found() {
        let proxy = FakeProxy::default();
        proxy.get_web_acl.fails(nonexistent_item());

        let event = delete(&proxy, ResourceHandlerRequest::new(desired())).await;
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
        assert!(proxy.delete_web_acl.calls().is_empty());
    }

    #[tokio::test]
    async fn list_passes_marker_through() {
        let proxy = FakeProxy::default();
        proxy.list_web_acls.returns(
            ListWebAcLsOutput::builder()
                .web_acls(
                    sdk::WebAclSummary::builder()
                        .name("edge")
                        .id("9")
                        .arn(ARN)
                        .description("public sites")
                        .build(),
                )
                .next_marker("page-5")
                .build(),
        );

        let request = ResourceHandlerRequest {
            next_token: Some("page-4".to_owned()),
            ..ResourceHandlerRequest::new(WebAcl {
                scope: Some(Scope::from("CLOUDFRONT")),
                ..WebAcl::default()
            })
        };

        let event = list(&proxy, request).await;
        assert_eq!(event.next_token.as_deref(), Some("page-5"));

        let models = event.resource_models.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models.first().unwrap().description.as_deref(), Some("public sites"));
        assert_eq!(models.first().unwrap().scope, Some(Scope::from("CLOUDFRONT")));

        let input = proxy.list_web_acls.only_call();
        assert_eq!(input.next_marker.as_deref(), Some("page-4"));
        assert_eq!(input.scope, Some(sdk::Scope::Cloudfront));
    }
}
