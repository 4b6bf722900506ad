//! Decodes the handler envelope sent by CloudFormation and routes it to the
//! handler for its resource type and action.

use std::fmt;

use aws_config::SdkConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    client::WafClient,
    handlers,
    progress::ProgressEvent,
    proxy::WafProxy,
    request::{CallerCredentials, ResourceHandlerRequest},
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "AWS::WAFv2::IPSet")]
    IpSet,
    #[serde(rename = "AWS::WAFv2::RegexPatternSet")]
    RegexPatternSet,
    #[serde(rename = "AWS::WAFv2::RuleGroup")]
    RuleGroup,
    #[serde(rename = "AWS::WAFv2::WebACL")]
    WebAcl,
    #[serde(rename = "AWS::WAFv2::LoggingConfiguration")]
    LoggingConfiguration,
}

impl ResourceType {
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::IpSet => "AWS::WAFv2::IPSet",
            Self::RegexPatternSet => "AWS::WAFv2::RegexPatternSet",
            Self::RuleGroup => "AWS::WAFv2::RuleGroup",
            Self::WebAcl => "AWS::WAFv2::WebACL",
            Self::LoggingConfiguration => "AWS::WAFv2::LoggingConfiguration",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Option<Value>,
    #[serde(default)]
    pub previous_resource_properties: Option<Value>,
    #[serde(default)]
    pub caller_credentials: Option<CallerCredentials>,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent {
    pub action: Action,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub client_request_token: Option<String>,
    #[serde(default)]
    pub request_data: RequestData,
}

impl fmt::Debug for HandlerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEvent")
            .field("action", &self.action)
            .field("resource_type", &self.resource_type)
            .field("region", &self.region)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("next_token", &self.next_token)
            .field("stack_id", &self.stack_id)
            .field("client_request_token", &self.client_request_token)
            .field("request_data", &self.request_data)
            .finish()
    }
}

fn model_from<M: DeserializeOwned + Default>(properties: Option<&Value>) -> Result<M, Error> {
    Ok(match properties {
        Some(value) => M::deserialize(value)?,
        None => M::default(),
    })
}

impl HandlerEvent {
    pub fn decode(payload: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(payload)?)
    }

    /// The request for the handler, with the resource properties decoded
    /// into the model `M`.
    pub fn request<M: DeserializeOwned + Default>(
        &self,
    ) -> Result<ResourceHandlerRequest<M>, Error> {
        let data = &self.request_data;
        Ok(ResourceHandlerRequest {
            desired: model_from(data.resource_properties.as_ref())?,
            previous: data
                .previous_resource_properties
                .as_ref()
                .map(|value| model_from(Some(value)))
                .transpose()?,
            logical_resource_id: data.logical_resource_id.clone(),
            client_request_token: self.client_request_token.clone(),
            next_token: self.next_token.clone(),
        })
    }
}

fn to_json<M: Serialize>(event: &ProgressEvent<M>) -> Value {
    serde_json::to_value(event).unwrap_or_else(|e| {
        json!({
            "status": "FAILED",
            "errorCode": "InternalFailure",
            "message": format!("cannot serialize progress event: {e}"),
            "callbackDelaySeconds": 0,
        })
    })
}

fn failure(error: &Error) -> Value {
    to_json(&ProgressEvent::<()>::from_error(error))
}

macro_rules! dispatch {
    ($proxy:expr, $event:expr, { $($variant:ident => $module:ident,)* }) => {
        match $event.resource_type {
            $(
                ResourceType::$variant => {
                    let request = $event.request()?;
                    let progress = match $event.action {
                        Action::Create => handlers::$module::create($proxy, request).await,
                        Action::Read => handlers::$module::read($proxy, request).await,
                        Action::Update => handlers::$module::update($proxy, request).await,
                        Action::Delete => handlers::$module::delete($proxy, request).await,
                        Action::List => handlers::$module::list($proxy, request).await,
                    };
                    to_json(&progress)
                }
            )*
        }
    };
}

async fn try_handle_event<P: WafProxy>(proxy: &P, event: &HandlerEvent) -> Result<Value, Error> {
    Ok(dispatch!(proxy, event, {
        IpSet => ip_set,
        RegexPatternSet => regex_pattern_set,
        RuleGroup => rule_group,
        WebAcl => web_acl,
        LoggingConfiguration => logging_configuration,
    }))
}

/// Runs one decoded event against `proxy` and returns the progress event as
/// JSON. Never fails: malformed resource properties become a `FAILED` event.
#[tracing::instrument(
    skip_all,
    fields(action = ?event.action, resource_type = %event.resource_type)
)]
pub async fn handle_event<P: WafProxy>(proxy: &P, event: &HandlerEvent) -> Value {
    tracing::debug!(?event, "handling event");
    match try_handle_event(proxy, event).await {
        Ok(value) => value,
        Err(e) => failure(&e),
    }
}

/// Decodes a raw Lambda payload and handles it with a client acting as the
/// caller.
pub async fn handle_raw_event(sdk_config: &SdkConfig, payload: Value) -> Value {
    match HandlerEvent::decode(payload) {
        Ok(event) => {
            let client = WafClient::for_invocation(
                sdk_config,
                event.request_data.caller_credentials.as_ref(),
                event.region.as_deref(),
            );
            handle_event(&client, &event).await
        }
        Err(e) => {
            tracing::warn!("cannot decode handler event: {e}");
            failure(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_wafv2::{
        operation::{
            get_ip_set::GetIpSetOutput, list_regex_pattern_sets::ListRegexPatternSetsOutput,
            list_tags_for_resource::ListTagsForResourceOutput,
        },
        types as sdk,
    };

    use super::*;
    use crate::{convert::Built, model::IpSet, testing::FakeProxy};

    fn event(value: Value) -> HandlerEvent {
        HandlerEvent::decode(value).unwrap()
    }

    #[test]
    fn decodes_envelope() {
        let event = event(json!({
            "action": "UPDATE",
            "resourceType": "AWS::WAFv2::IPSet",
            "region": "eu-west-1",
            "bearerToken": "secret-token",
            "clientRequestToken": "4b90a7e4-b790-456b-a937-0cfdfa211dfe",
            "requestData": {
                "logicalResourceId": "Blocked",
                "resourceProperties": {"Name": "blocked", "Scope": "REGIONAL", "Addresses": []},
                "previousResourceProperties": {"Name": "blocked", "Scope": "REGIONAL", "Addresses": ["10.0.0.0/8"]},
                "callerCredentials": {
                    "accessKeyId": "AKIDEXAMPLE",
                    "secretAccessKey": "wJalrXUtnFEMI"
                }
            }
        }));

        assert_eq!(event.action, Action::Update);
        assert_eq!(event.resource_type, ResourceType::IpSet);
        assert!(!format!("{event:?}").contains("secret-token"));

        let request: ResourceHandlerRequest<IpSet> = event.request().unwrap();
        assert_eq!(request.desired.name.as_deref(), Some("blocked"));
        assert!(request.desired.addresses.is_empty());
        assert_eq!(request.previous.unwrap().addresses, vec!["10.0.0.0/8".to_owned()]);
        assert_eq!(request.logical_resource_id.as_deref(), Some("Blocked"));
        assert_eq!(
            request.client_request_token.as_deref(),
            Some("4b90a7e4-b790-456b-a937-0cfdfa211dfe")
        );
    }

    #[test]
    fn missing_properties_default_the_model() {
        let event = event(json!({"action": "LIST", "resourceType": "AWS::WAFv2::WebACL"}));
        let request: ResourceHandlerRequest<IpSet> = event.request().unwrap();
        assert_eq!(request.desired, IpSet::default());
        assert!(request.previous.is_none());
    }

    #[test]
    fn unknown_resource_type_is_rejected() {
        let error = HandlerEvent::decode(json!({
            "action": "CREATE",
            "resourceType": "AWS::WAFv2::WebACLAssociation"
        }))
        .unwrap_err();
        assert!(matches!(error, Error::Serialization(_)));
        assert_eq!(failure(&error)["errorCode"], "InvalidRequest");
    }

    #[tokio::test]
    async fn routes_to_resource_handler() {
        let proxy = FakeProxy::default();
        proxy.get_ip_set.returns(
            GetIpSetOutput::builder()
                .ip_set(
                    sdk::IpSet::builder()
                        .name("blocked")
                        .id("1")
                        .arn("arn:aws:wafv2:eu-west-1:123:regional/ipset/blocked/1")
                        .ip_address_version(sdk::IpAddressVersion::Ipv4)
                        .addresses("10.0.0.0/8")
                        .build()
                        .built()
                        .unwrap(),
                )
                .lock_token("token-1")
                .build(),
        );
        proxy
            .list_tags_for_resource
            .returns(ListTagsForResourceOutput::builder().build());

        let response = handle_event(
            &proxy,
            &event(json!({
                "action": "READ",
                "resourceType": "AWS::WAFv2::IPSet",
                "requestData": {
                    "resourceProperties": {"Name": "blocked", "Scope": "REGIONAL", "Id": "1"}
                }
            })),
        )
        .await;

        assert_eq!(response["status"], "SUCCESS");
        assert_eq!(response["resourceModel"]["Addresses"], json!(["10.0.0.0/8"]));
        assert_eq!(response["resourceModel"]["IPAddressVersion"], "IPV4");
    }

    #[tokio::test]
    async fn list_passes_next_token() {
        let proxy = FakeProxy::default();
        proxy
            .list_regex_pattern_sets
            .returns(ListRegexPatternSetsOutput::builder().build());

        let response = handle_event(
            &proxy,
            &event(json!({
                "action": "LIST",
                "resourceType": "AWS::WAFv2::RegexPatternSet",
                "nextToken": "page-2",
                "requestData": {"resourceProperties": {"Scope": "REGIONAL"}}
            })),
        )
        .await;

        assert_eq!(response["status"], "SUCCESS");
        assert_eq!(response["resourceModels"], json!([]));
        assert_eq!(
            proxy.list_regex_pattern_sets.only_call().next_marker.as_deref(),
            Some("page-2")
        );
    }

    #[tokio::test]
    async fn malformed_properties_fail_the_request() {
        let proxy = FakeProxy::default();
        let response = handle_event(
            &proxy,
            &event(json!({
                "action": "CREATE",
                "resourceType": "AWS::WAFv2::LoggingConfiguration",
                "requestData": {"resourceProperties": {"LogDestinationConfigs": "not-a-list"}}
            })),
        )
        .await;

        assert_eq!(response["status"], "FAILED");
        assert_eq!(response["errorCode"], "InvalidRequest");
        assert!(proxy.get_logging_configuration.calls().is_empty());
    }
}
