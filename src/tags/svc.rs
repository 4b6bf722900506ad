mod wafv2 {
    use super::super::{Tag, TagKey, TagList, TagListError, TagValue};
    use crate::convert::Built;

    impl TryFrom<Tag> for aws_sdk_wafv2::types::Tag {
        type Error = aws_sdk_wafv2::error::BuildError;

        fn try_from(tag: Tag) -> Result<Self, Self::Error> {
            Self::builder()
                .key(tag.key)
                .value(tag.value)
                .build()
                .built()
        }
    }

    impl From<&aws_sdk_wafv2::types::Tag> for Tag {
        fn from(tag: &aws_sdk_wafv2::types::Tag) -> Self {
            Self {
                key: TagKey(tag.key().to_owned()),
                value: TagValue(tag.value().to_owned()),
            }
        }
    }

    impl TryFrom<&[aws_sdk_wafv2::types::Tag]> for TagList {
        type Error = TagListError;

        fn try_from(list: &[aws_sdk_wafv2::types::Tag]) -> Result<Self, Self::Error> {
            Self::from_vec(list.iter().map(Into::into).collect())
        }
    }

    impl PartialEq<aws_sdk_wafv2::types::Tag> for Tag {
        fn eq(&self, other: &aws_sdk_wafv2::types::Tag) -> bool {
            self.key.as_str() == other.key() && self.value.as_str() == other.value()
        }
    }

    impl PartialEq<Tag> for aws_sdk_wafv2::types::Tag {
        fn eq(&self, other: &Tag) -> bool {
            other.eq(self)
        }
    }
}
