//! One module per resource type, each exposing `create`, `read`, `update`,
//! `delete` and `list`. Every handler turns its failures into a `FAILED`
//! progress event; none of them returns an error.

pub mod ip_set;
pub mod logging_configuration;
pub mod regex_pattern_set;
pub mod rule_group;
pub mod web_acl;

mod tagging;

use crate::{identifier, model::LockToken, Error};

/// The name to create a resource under: the supplied one, or a generated one.
fn resolve_name(
    name: Option<String>,
    logical_id: Option<&str>,
    client_request_token: Option<&str>,
) -> String {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => identifier::generate_name(logical_id, client_request_token),
    }
}

fn missing(entity: &str) -> Error {
    Error::UnexpectedNoneValue {
        entity: entity.to_owned(),
    }
}

fn lock_token(token: Option<&str>, entity: &str) -> Result<LockToken, Error> {
    token
        .map(|token| LockToken::new(token.to_owned()))
        .ok_or_else(|| missing(entity))
}

fn ensure_updatable(changed: Vec<&'static str>) -> Result<(), Error> {
    if changed.is_empty() {
        Ok(())
    } else {
        Err(Error::NotUpdatable {
            properties: changed,
        })
    }
}
