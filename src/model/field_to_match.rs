use serde::{Deserialize, Serialize};

use crate::{
    convert::{BodyParsingFallbackBehavior, Built, JsonMatchScope, Placeholder},
    Error,
};

use aws_sdk_wafv2::types as sdk;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamedField {
    pub name: String,
}

/// The part of a web request a statement inspects. Exactly one part per
/// instance, keyed by its CloudFormation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldToMatch {
    SingleHeader(NamedField),
    SingleQueryArgument(NamedField),
    AllQueryArguments(Placeholder),
    UriPath(Placeholder),
    QueryString(Placeholder),
    Body(Placeholder),
    Method(Placeholder),
    JsonBody(Box<JsonBody>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonBody {
    pub match_pattern: JsonMatchPattern,
    pub match_scope: JsonMatchScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_fallback_behavior: Option<BodyParsingFallbackBehavior>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonMatchPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Placeholder>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_paths: Vec<String>,
}

impl TryFrom<&FieldToMatch> for sdk::FieldToMatch {
    type Error = Error;

    fn try_from(field: &FieldToMatch) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let builder = match *field {
            FieldToMatch::SingleHeader(ref header) => builder.single_header(
                sdk::SingleHeader::builder()
                    .name(header.name.as_str())
                    .build()
                    .built()?,
            ),
            FieldToMatch::SingleQueryArgument(ref argument) => builder.single_query_argument(
                sdk::SingleQueryArgument::builder()
                    .name(argument.name.as_str())
                    .build()
                    .built()?,
            ),
            FieldToMatch::AllQueryArguments(_) => {
                builder.all_query_arguments(sdk::AllQueryArguments::builder().build().built()?)
            }
            FieldToMatch::UriPath(_) => builder.uri_path(sdk::UriPath::builder().build().built()?),
            FieldToMatch::QueryString(_) => {
                builder.query_string(sdk::QueryString::builder().build().built()?)
            }
            FieldToMatch::Body(_) => builder.body(sdk::Body::builder().build().built()?),
            FieldToMatch::Method(_) => builder.method(sdk::Method::builder().build().built()?),
            FieldToMatch::JsonBody(ref body) => {
                builder.json_body(sdk::JsonBody::try_from(&**body)?)
            }
        };
        Ok(builder.build().built()?)
    }
}

impl TryFrom<&sdk::FieldToMatch> for FieldToMatch {
    type Error = Error;

    fn try_from(field: &sdk::FieldToMatch) -> Result<Self, Self::Error> {
        if let Some(header) = field.single_header() {
            return Ok(Self::SingleHeader(NamedField {
                name: header.name().to_owned(),
            }));
        }
        if let Some(argument) = field.single_query_argument() {
            return Ok(Self::SingleQueryArgument(NamedField {
                name: argument.name().to_owned(),
            }));
        }
        if field.all_query_arguments().is_some() {
            return Ok(Self::AllQueryArguments(Placeholder {}));
        }
        if field.uri_path().is_some() {
            return Ok(Self::UriPath(Placeholder {}));
        }
        if field.query_string().is_some() {
            return Ok(Self::QueryString(Placeholder {}));
        }
        if field.body().is_some() {
            return Ok(Self::Body(Placeholder {}));
        }
        if field.method().is_some() {
            return Ok(Self::Method(Placeholder {}));
        }
        if let Some(body) = field.json_body() {
            return Ok(Self::JsonBody(Box::new(body.into())));
        }
        Err(Error::UnsupportedVariant {
            entity: "FieldToMatch",
        })
    }
}

impl TryFrom<&JsonBody> for sdk::JsonBody {
    type Error = Error;

    fn try_from(body: &JsonBody) -> Result<Self, Self::Error> {
        let all = body
            .match_pattern
            .all
            .map(|_| sdk::All::builder().build().built())
            .transpose()?;

        let included_paths = (!body.match_pattern.included_paths.is_empty())
            .then(|| body.match_pattern.included_paths.clone());

        let pattern = sdk::JsonMatchPattern::builder()
            .set_all(all)
            .set_included_paths(included_paths)
            .build()
            .built()?;

        Ok(Self::builder()
            .match_pattern(pattern)
            .match_scope(body.match_scope.inner().clone())
            .set_invalid_fallback_behavior(
                body.invalid_fallback_behavior
                    .as_ref()
                    .map(|behavior| behavior.inner().clone()),
            )
            .build()
            .built()?)
    }
}

impl From<&sdk::JsonBody> for JsonBody {
    fn from(body: &sdk::JsonBody) -> Self {
        let match_pattern = body
            .match_pattern()
            .map(|pattern| JsonMatchPattern {
                all: pattern.all().map(|_| Placeholder {}),
                included_paths: pattern.included_paths().to_vec(),
            })
            .unwrap_or_default();

        Self {
            match_pattern,
            match_scope: body.match_scope().into(),
            invalid_fallback_behavior: body.invalid_fallback_behavior().map(Into::into),
        }
    }
}
