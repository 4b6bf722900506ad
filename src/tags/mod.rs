//! Resource tags as they appear in the CloudFormation model (`[{"Key": .., "Value": ..}]`)
//! and the bookkeeping needed to move a resource from one tag set to another.

use serde::{Deserialize, Serialize};

use crate::convert::string_newtype;

mod error;
mod svc;

pub use error::TagListError;

#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct TagKey(String);
string_newtype!(TagKey);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagValue(String);
string_newtype!(TagValue);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    key: TagKey,
    value: TagValue,
}

impl Tag {
    pub fn new(key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub const fn key(&self) -> &TagKey {
        &self.key
    }

    pub const fn value(&self) -> &TagValue {
        &self.value
    }
}

/// An ordered list of tags with unique keys.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagList(Vec<Tag>);

impl TagList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, tag: Tag) -> Result<(), TagListError> {
        if self.get(tag.key.clone()).is_some() {
            return Err(TagListError::DuplicateKey { key: tag.key });
        }
        self.0.push(tag);
        Ok(())
    }

    pub fn from_vec(value: Vec<Tag>) -> Result<Self, TagListError> {
        let mut list = Self::new();
        for tag in value {
            list.push(tag)?;
        }
        Ok(list)
    }

    pub fn get(&self, key: impl Into<TagKey>) -> Option<&Tag> {
        let key: TagKey = key.into();
        self.0.iter().find(|tag| tag.key == key)
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.0
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts into the SDK representation, or `None` for an empty list
    /// so that requests leave the member unset.
    pub fn to_sdk(
        &self,
    ) -> Result<Option<Vec<aws_sdk_wafv2::types::Tag>>, aws_sdk_wafv2::error::BuildError> {
        if self.is_empty() {
            return Ok(None);
        }
        self.0
            .iter()
            .cloned()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Works out which tags have to be applied and which keys have to be
    /// removed to get from `previous` to `self`.
    pub fn changes_from(&self, previous: &Self) -> TagChanges {
        let to_apply = self
            .0
            .iter()
            .filter(|tag| {
                previous
                    .get(tag.key.clone())
                    .map_or(true, |old| old.value != tag.value)
            })
            .cloned()
            .collect();

        let to_remove = previous
            .0
            .iter()
            .filter(|tag| self.get(tag.key.clone()).is_none())
            .map(|tag| tag.key.clone())
            .collect();

        TagChanges {
            to_apply: Self(to_apply),
            to_remove,
        }
    }
}

impl TryFrom<Vec<Tag>> for TagList {
    type Error = TagListError;

    fn try_from(value: Vec<Tag>) -> Result<Self, Self::Error> {
        Self::from_vec(value)
    }
}

impl From<TagList> for Vec<Tag> {
    fn from(value: TagList) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChanges {
    pub to_apply: TagList,
    pub to_remove: Vec<TagKey>,
}

impl TagChanges {
    pub fn is_empty(&self) -> bool {
        self.to_apply.is_empty() && self.to_remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(tags: &[(&str, &str)]) -> TagList {
        TagList::from_vec(tags.iter().map(|&(k, v)| Tag::new(k, v)).collect()).unwrap()
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result = TagList::from_vec(vec![Tag::new("env", "prod"), Tag::new("env", "dev")]);
        assert_eq!(
            result,
            Err(TagListError::DuplicateKey {
                key: TagKey::from("env")
            })
        );
    }

    #[test]
    fn changes_between_tag_sets() {
        let previous = list(&[("env", "prod"), ("team", "edge"), ("owner", "me")]);
        let desired = list(&[("env", "dev"), ("team", "edge"), ("cost", "42")]);

        let changes = desired.changes_from(&previous);

        assert_eq!(changes.to_apply, list(&[("env", "dev"), ("cost", "42")]));
        assert_eq!(changes.to_remove, vec![TagKey::from("owner")]);
    }

    #[test]
    fn no_changes_for_identical_sets() {
        let tags = list(&[("env", "prod")]);
        assert!(tags.changes_from(&tags.clone()).is_empty());
    }

    #[test]
    fn serializes_as_key_value_list() {
        let tags = list(&[("env", "prod")]);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"[{"Key":"env","Value":"prod"}]"#);

        let parsed: TagList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tags);

        assert!(serde_json::from_str::<TagList>(
            r#"[{"Key":"env","Value":"a"},{"Key":"env","Value":"b"}]"#
        )
        .is_err());
    }
}
