use serde::{Deserialize, Serialize};

use aws_sdk_wafv2::types as sdk;

use crate::{
    convert::{Built, Placeholder},
    Error,
};

/// What to do with a request that matches a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAction {
    Allow(Placeholder),
    Block(Placeholder),
    Count(Placeholder),
}

/// What to do with a request that matches no rule of a web ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultAction {
    Allow(Placeholder),
    Block(Placeholder),
}

/// Overrides the actions of a referenced rule group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideAction {
    Count(Placeholder),
    #[serde(rename = "None")]
    NoOverride(Placeholder),
}

impl TryFrom<&RuleAction> for sdk::RuleAction {
    type Error = Error;

    fn try_from(action: &RuleAction) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let builder = match *action {
            RuleAction::Allow(_) => builder.allow(sdk::AllowAction::builder().build().built()?),
            RuleAction::Block(_) => builder.block(sdk::BlockAction::builder().build().built()?),
            RuleAction::Count(_) => builder.count(sdk::CountAction::builder().build().built()?),
        };
        Ok(builder.build().built()?)
    }
}

impl TryFrom<&sdk::RuleAction> for RuleAction {
    type Error = Error;

    fn try_from(action: &sdk::RuleAction) -> Result<Self, Self::Error> {
        if action.allow().is_some() {
            Ok(Self::Allow(Placeholder {}))
        } else if action.block().is_some() {
            Ok(Self::Block(Placeholder {}))
        } else if action.count().is_some() {
            Ok(Self::Count(Placeholder {}))
        } else {
            Err(Error::UnsupportedVariant {
                entity: "RuleAction",
            })
        }
    }
}

impl TryFrom<&DefaultAction> for sdk::DefaultAction {
    type Error = Error;

    fn try_from(action: &DefaultAction) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let builder = match *action {
            DefaultAction::Allow(_) => {
                builder.allow(sdk::AllowAction::builder().build().built()?)
            }
            DefaultAction::Block(_) => {
                builder.block(sdk::BlockAction::builder().build().built()?)
            }
        };
        Ok(builder.build().built()?)
    }
}

impl TryFrom<&sdk::DefaultAction> for DefaultAction {
    type Error = Error;

    fn try_from(action: &sdk::DefaultAction) -> Result<Self, Self::Error> {
        if action.allow().is_some() {
            Ok(Self::Allow(Placeholder {}))
        } else if action.block().is_some() {
            Ok(Self::Block(Placeholder {}))
        } else {
            Err(Error::UnsupportedVariant {
                entity: "DefaultAction",
            })
        }
    }
}

impl TryFrom<&OverrideAction> for sdk::OverrideAction {
    type Error = Error;

    fn try_from(action: &OverrideAction) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let builder = match *action {
            OverrideAction::Count(_) => {
                builder.count(sdk::CountAction::builder().build().built()?)
            }
            OverrideAction::NoOverride(_) => {
                builder.none(sdk::NoneAction::builder().build().built()?)
            }
        };
        Ok(builder.build().built()?)
    }
}

impl TryFrom<&sdk::OverrideAction> for OverrideAction {
    type Error = Error;

    fn try_from(action: &sdk::OverrideAction) -> Result<Self, Self::Error> {
        if action.count().is_some() {
            Ok(Self::Count(Placeholder {}))
        } else if action.none().is_some() {
            Ok(Self::NoOverride(Placeholder {}))
        } else {
            Err(Error::UnsupportedVariant {
                entity: "OverrideAction",
            })
        }
    }
}
