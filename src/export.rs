//! Re-exports selected elements of the WAFv2 SDK

pub mod wafv2 {
    pub mod error {
        pub use aws_sdk_wafv2::error::{BuildError, SdkError};
        pub use aws_sdk_wafv2::Error;
    }
    pub use aws_config::SdkConfig;
    pub use aws_sdk_wafv2::types::Scope;
}
