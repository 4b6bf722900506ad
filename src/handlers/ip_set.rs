use aws_sdk_wafv2::operation::list_ip_sets::ListIpSetsInput;

use super::{ensure_updatable, lock_token, missing, resolve_name, tagging};
use crate::{
    model::{
        ip_set::{delete_input, get_input},
        required, Identified, IpSet, LockToken, ResourceIdentifier,
    },
    progress::ProgressEvent,
    proxy::WafProxy,
    request::ResourceHandlerRequest,
    Error,
};

/// The lock token and ARN of the live IP set.
async fn current<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<(LockToken, String), Error> {
    let output = proxy.get_ip_set(get_input(identifier)?).await?;
    let ip_set = output.ip_set().ok_or_else(|| missing("GetIpSetOutput.IPSet"))?;
    let token = lock_token(output.lock_token(), "GetIpSetOutput.LockToken")?;
    Ok((token, ip_set.arn().to_owned()))
}

async fn read_model<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<IpSet, Error> {
    let output = proxy.get_ip_set(get_input(identifier)?).await?;
    let ip_set = output.ip_set().ok_or_else(|| missing("GetIpSetOutput.IPSet"))?;

    let mut model = IpSet::from((ip_set, identifier.scope.clone()));
    model.tags = tagging::list_tags(proxy, ip_set.arn()).await?;
    Ok(model)
}

async fn try_create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> Result<ProgressEvent<IpSet>, Error> {
    let mut model = request.desired;
    let name = resolve_name(
        model.name.take(),
        request.logical_resource_id.as_deref(),
        request.client_request_token.as_deref(),
    );

    let output = proxy.create_ip_set(model.create_input(&name)?).await?;
    let summary = output
        .summary()
        .ok_or_else(|| missing("CreateIpSetOutput.Summary"))?;

    model.name = Some(name);
    model.id = summary.id().map(ToOwned::to_owned);
    model.arn = summary.arn().map(ToOwned::to_owned);

    tracing::info!(name = ?model.name, id = ?model.id, "created IP set");
    Ok(ProgressEvent::success(model))
}

async fn try_read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> Result<ProgressEvent<IpSet>, Error> {
    let identifier = request.desired.identifier()?;
    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> Result<ProgressEvent<IpSet>, Error> {
    let desired = request.desired;
    if let Some(ref previous) = request.previous {
        ensure_updatable(desired.create_only_changes(previous))?;
    }

    let identifier = desired.identifier()?;
    let (token, arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .update_ip_set(desired.update_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "updated IP set");

    let previous_tags = match request.previous {
        Some(previous) => previous.tags,
        None => tagging::list_tags(proxy, &arn).await?,
    };
    tagging::sync_tags(proxy, &arn, &desired.tags, &previous_tags).await?;

    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> Result<ProgressEvent<IpSet>, Error> {
    let identifier = request.desired.identifier()?;
    let (token, _arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .delete_ip_set(delete_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "deleted IP set");

    Ok(ProgressEvent::success_without_model())
}

async fn try_list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> Result<ProgressEvent<IpSet>, Error> {
    let scope = required(&request.desired.scope, "Scope")?.clone();

    let output = proxy
        .list_ip_sets(
            ListIpSetsInput::builder()
                .scope(scope.inner().clone())
                .set_next_marker(request.next_token)
                .build()?,
        )
        .await?;

    let models = output
        .ip_sets()
        .iter()
        .map(|summary| IpSet::from((summary, scope.clone())))
        .collect();

    Ok(ProgressEvent::listed(
        models,
        output.next_marker().map(ToOwned::to_owned),
    ))
}

#[tracing::instrument(name = "ip_set_create", skip_all)]
pub async fn create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> ProgressEvent<IpSet> {
    ProgressEvent::from_result(try_create(proxy, request).await)
}

#[tracing::instrument(name = "ip_set_read", skip_all)]
pub async fn read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> ProgressEvent<IpSet> {
    ProgressEvent::from_result(try_read(proxy, request).await)
}

#[tracing::instrument(name = "ip_set_update", skip_all)]
pub async fn update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> ProgressEvent<IpSet> {
    ProgressEvent::from_result(try_update(proxy, request).await)
}

#[tracing::instrument(name = "ip_set_delete", skip_all)]
pub async fn delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> ProgressEvent<IpSet> {
    ProgressEvent::from_result(try_delete(proxy, request).await)
}

#[tracing::instrument(name = "ip_set_list", skip_all)]
pub async fn list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<IpSet>,
) -> ProgressEvent<IpSet> {
    ProgressEvent::from_result(try_list(proxy, request).await)
}
