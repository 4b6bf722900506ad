//! CloudFormation resource providers for AWS WAFv2.
//!
//! Covers `AWS::WAFv2::IPSet`, `AWS::WAFv2::RegexPatternSet`,
//! `AWS::WAFv2::RuleGroup`, `AWS::WAFv2::WebACL` and
//! `AWS::WAFv2::LoggingConfiguration`. Each resource type has a model in
//! [`model`] mirroring its CloudFormation schema, converters to and from the
//! SDK shapes, and create/read/update/delete/list handlers in [`handlers`]
//! that talk to WAFv2 through a [`WafProxy`].
//!
//! [`entrypoint`] decodes the invocation envelope and routes it to the right
//! handler; the `wafv2-provider` binary wires it into the Lambda runtime.

// Runtime and subscriber are wired up by the binary.
use lambda_runtime as _;
use tokio as _;
use tracing_subscriber as _;

mod error;
pub use error::Error;

pub mod client;
pub mod config;
pub mod convert;
pub mod entrypoint;
pub mod export;
pub mod handlers;
pub mod identifier;
pub mod model;
pub mod progress;
pub mod proxy;
pub mod request;
pub mod tags;
pub mod translator;

#[cfg(test)]
mod testing;

pub use client::WafClient;
pub use config::Config;
pub use entrypoint::{Action, HandlerEvent, ResourceType};
pub use progress::{HandlerErrorCode, OperationStatus, ProgressEvent};
pub use proxy::WafProxy;
pub use request::{CallerCredentials, ResourceHandlerRequest};
