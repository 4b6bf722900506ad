use aws_sdk_wafv2::operation::{
    list_tags_for_resource::ListTagsForResourceInput, tag_resource::TagResourceInput,
    untag_resource::UntagResourceInput,
};

use crate::{proxy::WafProxy, tags::TagList, Error};

/// Reads the tags of a resource. Only the first page is consulted, which
/// covers the WAFv2 limit of 50 tags per resource.
pub(crate) async fn list_tags<P: WafProxy>(proxy: &P, arn: &str) -> Result<TagList, Error> {
    let output = proxy
        .list_tags_for_resource(ListTagsForResourceInput::builder().resource_arn(arn).build()?)
        .await?;

    let tags = output
        .tag_info_for_resource()
        .map(|info| info.tag_list())
        .unwrap_or_default();

    Ok(TagList::try_from(tags)?)
}

/// Moves the tags of a resource from `previous` to `desired`.
pub(crate) async fn sync_tags<P: WafProxy>(
    proxy: &P,
    arn: &str,
    desired: &TagList,
    previous: &TagList,
) -> Result<(), Error> {
    let changes = desired.changes_from(previous);

    if !changes.to_remove.is_empty() {
        tracing::debug!(arn, keys = changes.to_remove.len(), "removing tags");
        let _output = proxy
            .untag_resource(
                UntagResourceInput::builder()
                    .resource_arn(arn)
                    .set_tag_keys(Some(
                        changes.to_remove.into_iter().map(String::from).collect(),
                    ))
                    .build()?,
            )
            .await?;
    }

    if !changes.to_apply.is_empty() {
        tracing::debug!(arn, tags = changes.to_apply.as_slice().len(), "applying tags");
        let _output = proxy
            .tag_resource(
                TagResourceInput::builder()
                    .resource_arn(arn)
                    .set_tags(changes.to_apply.to_sdk()?)
                    .build()?,
            )
            .await?;
    }

    Ok(())
}
