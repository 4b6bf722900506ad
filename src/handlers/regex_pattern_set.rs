use aws_sdk_wafv2::operation::list_regex_pattern_sets::ListRegexPatternSetsInput;

use super::{ensure_updatable, lock_token, missing, resolve_name, tagging};
use crate::{
    model::{
        regex_pattern_set::{delete_input, get_input},
        required, Identified, LockToken, RegexPatternSet, ResourceIdentifier,
    },
    progress::ProgressEvent,
    proxy::WafProxy,
    request::ResourceHandlerRequest,
    Error,
};

/// The lock token and ARN of the live regex pattern set.
async fn current<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<(LockToken, String), Error> {
    let output = proxy.get_regex_pattern_set(get_input(identifier)?).await?;
    let regex_pattern_set = output
        .regex_pattern_set()
        .ok_or_else(|| missing("GetRegexPatternSetOutput.RegexPatternSet"))?;
    let token = lock_token(output.lock_token(), "GetRegexPatternSetOutput.LockToken")?;
    let arn = regex_pattern_set
        .arn()
        .ok_or_else(|| missing("GetRegexPatternSetOutput.RegexPatternSet.ARN"))?;
    Ok((token, arn.to_owned()))
}

async fn read_model<P: WafProxy>(
    proxy: &P,
    identifier: &ResourceIdentifier,
) -> Result<RegexPatternSet, Error> {
    let output = proxy.get_regex_pattern_set(get_input(identifier)?).await?;
    let regex_pattern_set = output
        .regex_pattern_set()
        .ok_or_else(|| missing("GetRegexPatternSetOutput.RegexPatternSet"))?;

    let mut model = RegexPatternSet::from((regex_pattern_set, identifier.scope.clone()));
    if let Some(arn) = regex_pattern_set.arn() {
        model.tags = tagging::list_tags(proxy, arn).await?;
    }
    Ok(model)
}

async fn try_create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> Result<ProgressEvent<RegexPatternSet>, Error> {
    let mut model = request.desired;
    let name = resolve_name(
        model.name.take(),
        request.logical_resource_id.as_deref(),
        request.client_request_token.as_deref(),
    );

    let output = proxy.create_regex_pattern_set(model.create_input(&name)?).await?;
    let summary = output
        .summary()
        .ok_or_else(|| missing("CreateRegexPatternSetOutput.Summary"))?;

    model.name = Some(name);
    model.id = summary.id().map(ToOwned::to_owned);
    model.arn = summary.arn().map(ToOwned::to_owned);

    tracing::info!(name = ?model.name, id = ?model.id, "created regex pattern set");
    Ok(ProgressEvent::success(model))
}

async fn try_read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> Result<ProgressEvent<RegexPatternSet>, Error> {
    let identifier = request.desired.identifier()?;
    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> Result<ProgressEvent<RegexPatternSet>, Error> {
    let desired = request.desired;
    if let Some(ref previous) = request.previous {
        ensure_updatable(desired.create_only_changes(previous))?;
    }

    let identifier = desired.identifier()?;
    let (token, arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .update_regex_pattern_set(desired.update_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "updated regex pattern set");

    let previous_tags = match request.previous {
        Some(previous) => previous.tags,
        None => tagging::list_tags(proxy, &arn).await?,
    };
    tagging::sync_tags(proxy, &arn, &desired.tags, &previous_tags).await?;

    Ok(ProgressEvent::success(read_model(proxy, &identifier).await?))
}

async fn try_delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> Result<ProgressEvent<RegexPatternSet>, Error> {
    let identifier = request.desired.identifier()?;
    let (token, _arn) = current(proxy, &identifier).await?;

    let _output = proxy
        .delete_regex_pattern_set(delete_input(&identifier, &token)?)
        .await?;
    tracing::info!(name = %identifier.name, id = %identifier.id, "deleted regex pattern set");

    Ok(ProgressEvent::success_without_model())
}

async fn try_list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> Result<ProgressEvent<RegexPatternSet>, Error> {
    let scope = required(&request.desired.scope, "Scope")?.clone();

    let output = proxy
        .list_regex_pattern_sets(
            ListRegexPatternSetsInput::builder()
                .scope(scope.inner().clone())
                .set_next_marker(request.next_token)
                .build()?,
        )
        .await?;

    let models = output
        .regex_pattern_sets()
        .iter()
        .map(|summary| RegexPatternSet::from((summary, scope.clone())))
        .collect();

    Ok(ProgressEvent::listed(
        models,
        output.next_marker().map(ToOwned::to_owned),
    ))
}

#[tracing::instrument(name = "regex_pattern_set_create", skip_all)]
pub async fn create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> ProgressEvent<RegexPatternSet> {
    ProgressEvent::from_result(try_create(proxy, request).await)
}

#[tracing::instrument(name = "regex_pattern_set_read", skip_all)]
pub async fn read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> ProgressEvent<RegexPatternSet> {
    ProgressEvent::from_result(try_read(proxy, request).await)
}

#[tracing::instrument(name = "regex_pattern_set_update", skip_all)]
pub async fn update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> ProgressEvent<RegexPatternSet> {
    ProgressEvent::from_result(try_update(proxy, request).await)
}

#[tracing::instrument(name = "regex_pattern_set_delete", skip_all)]
pub async fn delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> ProgressEvent<RegexPatternSet> {
    ProgressEvent::from_result(try_delete(proxy, request).await)
}

#[tracing::instrument(name = "regex_pattern_set_list", skip_all)]
pub async fn list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<RegexPatternSet>,
) -> ProgressEvent<RegexPatternSet> {
    ProgressEvent::from_result(try_list(proxy, request).await)
}
