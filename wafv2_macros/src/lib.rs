#![expect(
    clippy::expect_used,
    clippy::panic,
    reason = "panics and expects are fine for proc macros"
)]

use proc_macro::TokenStream;

mod model;

/// Derives the create-only / read-only property bookkeeping of a
/// CloudFormation resource model.
///
/// Fields are marked with `#[resource(create_only)]` or
/// `#[resource(read_only)]`. The CloudFormation property name defaults to the
/// field name in `PascalCase` and can be overridden with
/// `#[resource(name = "IPAddressVersion")]`.
#[proc_macro_derive(ResourceModel, attributes(resource))]
pub fn resource_model(input: TokenStream) -> TokenStream {
    model::transform(input)
}
