//! Logging configurations have no name, id or lock token of their own. They
//! are addressed by the ARN of the web ACL they belong to, and written with a
//! single `PutLoggingConfiguration` call for both create and update.

use aws_sdk_wafv2::{
    operation::list_logging_configurations::ListLoggingConfigurationsInput, types::Scope,
};

use super::missing;
use crate::{
    model::{
        logging_configuration::{delete_input, get_input},
        LoggingConfiguration,
    },
    progress::ProgressEvent,
    proxy::WafProxy,
    request::ResourceHandlerRequest,
    Error,
};

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidRequest {
        message: message.into(),
    }
}

/// The ARN of the web ACL, or `NotFound` if the model does not name one.
fn existing_arn(model: &LoggingConfiguration) -> Result<&str, Error> {
    match model.resource_arn.as_deref() {
        Some(arn) if !arn.is_empty() => Ok(arn),
        _ => Err(Error::NotFound {
            message: "logging configuration has no ResourceArn".to_owned(),
        }),
    }
}

/// Only a missing item clears the way for a create. An ACL that is
/// unavailable or a throttled call is not treated as absence.
fn is_nonexistent_item(error: &Error) -> bool {
    match *error {
        Error::Service(ref service) => matches!(
            **service,
            aws_sdk_wafv2::Error::WafNonexistentItemException(_)
        ),
        _ => false,
    }
}

fn ensure_destinations(model: &LoggingConfiguration) -> Result<(), Error> {
    if model.log_destination_configs.is_empty() {
        Err(invalid("LogDestinationConfigs must name at least one destination"))
    } else {
        Ok(())
    }
}

fn ensure_no_read_only(model: &LoggingConfiguration) -> Result<(), Error> {
    let supplied = model.read_only_supplied();
    if supplied.is_empty() {
        Ok(())
    } else {
        Err(invalid(format!(
            "read-only properties cannot be set: {}",
            supplied.join(", ")
        )))
    }
}

async fn put<P: WafProxy>(
    proxy: &P,
    model: &LoggingConfiguration,
) -> Result<LoggingConfiguration, Error> {
    let output = proxy.put_logging_configuration(model.put_input()?).await?;
    let config = output
        .logging_configuration()
        .ok_or_else(|| missing("PutLoggingConfigurationOutput.LoggingConfiguration"))?;
    LoggingConfiguration::try_from(config)
}

async fn try_create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> Result<ProgressEvent<LoggingConfiguration>, Error> {
    let desired = request.desired;
    let arn = desired.resource_arn()?;
    ensure_destinations(&desired)?;
    ensure_no_read_only(&desired)?;

    match proxy.get_logging_configuration(get_input(arn)?).await {
        Ok(_) => {
            return Err(Error::AlreadyExists {
                message: format!("a logging configuration already exists for {arn}"),
            });
        }
        Err(ref e) if is_nonexistent_item(e) => {
            tracing::debug!(resource_arn = %arn, "no logging configuration yet");
        }
        Err(e) => return Err(e),
    }

    let model = put(proxy, &desired).await?;
    tracing::info!(resource_arn = %arn, "created logging configuration");
    Ok(ProgressEvent::success(model))
}

async fn try_read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> Result<ProgressEvent<LoggingConfiguration>, Error> {
    let arn = existing_arn(&request.desired)?;

    let output = proxy.get_logging_configuration(get_input(arn)?).await?;
    let config = output
        .logging_configuration()
        .ok_or_else(|| missing("GetLoggingConfigurationOutput.LoggingConfiguration"))?;

    Ok(ProgressEvent::success(LoggingConfiguration::try_from(config)?))
}

async fn try_update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> Result<ProgressEvent<LoggingConfiguration>, Error> {
    let desired = request.desired;
    let arn = existing_arn(&desired)?;
    ensure_destinations(&desired)?;

    if let Some(ref previous) = request.previous {
        let changed = desired.create_only_changes(previous);
        if !changed.is_empty() {
            return Err(invalid(format!(
                "cannot update create-only properties: {}",
                changed.join(", ")
            )));
        }
    }
    ensure_no_read_only(&desired)?;

    let _output = proxy.get_logging_configuration(get_input(arn)?).await?;
    let model = put(proxy, &desired).await?;
    tracing::info!(resource_arn = %arn, "updated logging configuration");
    Ok(ProgressEvent::success(model))
}

async fn try_delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> Result<ProgressEvent<LoggingConfiguration>, Error> {
    let arn = request.desired.resource_arn()?;

    let _output = proxy.get_logging_configuration(get_input(arn)?).await?;
    let _output = proxy
        .delete_logging_configuration(delete_input(arn)?)
        .await?;
    tracing::info!(resource_arn = %arn, "deleted logging configuration");

    Ok(ProgressEvent::success_without_model())
}

async fn try_list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> Result<ProgressEvent<LoggingConfiguration>, Error> {
    let output = proxy
        .list_logging_configurations(
            ListLoggingConfigurationsInput::builder()
                .scope(Scope::Regional)
                .set_next_marker(request.next_token)
                .build()?,
        )
        .await?;

    let models = output
        .logging_configurations()
        .iter()
        .map(LoggingConfiguration::try_from)
        .collect::<Result<_, _>>()?;

    Ok(ProgressEvent::listed(
        models,
        output.next_marker().map(ToOwned::to_owned),
    ))
}

#[tracing::instrument(name = "logging_configuration_create", skip_all)]
pub async fn create<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> ProgressEvent<LoggingConfiguration> {
    ProgressEvent::from_result(try_create(proxy, request).await)
}

#[tracing::instrument(name = "logging_configuration_read", skip_all)]
pub async fn read<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> ProgressEvent<LoggingConfiguration> {
    ProgressEvent::from_result(try_read(proxy, request).await)
}

#[tracing::instrument(name = "logging_configuration_update", skip_all)]
pub async fn update<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> ProgressEvent<LoggingConfiguration> {
    ProgressEvent::from_result(try_update(proxy, request).await)
}

#[tracing::instrument(name = "logging_configuration_delete", skip_all)]
pub async fn delete<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> ProgressEvent<LoggingConfiguration> {
    ProgressEvent::from_result(try_delete(proxy, request).await)
}

#[tracing::instrument(name = "logging_configuration_list", skip_all)]
pub async fn list<P: WafProxy>(
    proxy: &P,
    request: ResourceHandlerRequest<LoggingConfiguration>,
) -> ProgressEvent<LoggingConfiguration> {
    ProgressEvent::from_result(try_list(proxy, request).await)
}
