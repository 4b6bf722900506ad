#![expect(clippy::module_name_repetitions, reason = "error suffix is necessary")]

use std::fmt;

use super::TagKey;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can happen when assembling a set of tags.
pub enum TagListError {
    /// The same key appears more than once
    DuplicateKey { key: TagKey },
}

impl std::error::Error for TagListError {}

impl fmt::Display for TagListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DuplicateKey { ref key } => {
                write!(f, "tag key \"{key}\" is given more than once")
            }
        }
    }
}
