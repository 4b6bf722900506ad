use proc_macro::TokenStream;
use quote::quote;

#[derive(Debug, Default)]
struct FieldAttrs {
    create_only: bool,
    read_only: bool,
    name: Option<String>,
}

#[derive(Debug)]
struct Element {
    ident: syn::Ident,
    attrs: FieldAttrs,
    property: String,
}

fn pascal_case(ident: &syn::Ident) -> String {
    ident
        .to_string()
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> FieldAttrs {
    let mut parsed = FieldAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("resource")) {
        assert!(
            attr.style == syn::AttrStyle::Outer,
            "field attribute style needs to be an outer attribute"
        );

        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("create_only") {
                parsed.create_only = true;
                Ok(())
            } else if meta.path.is_ident("read_only") {
                parsed.read_only = true;
                Ok(())
            } else if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                parsed.name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("invalid resource field attribute key"))
            }
        });

        if let Err(e) = result {
            panic!("failed parsing resource field attribute: {e}");
        }
    }

    assert!(
        !(parsed.create_only && parsed.read_only),
        "a property cannot be both create-only and read-only"
    );

    parsed
}

fn parse_fields(input: impl IntoIterator<Item = syn::Field>) -> Vec<Element> {
    input
        .into_iter()
        .map(|field| {
            let ident = field.ident.expect("tuple structs not supported");
            let attrs = parse_field_attrs(&field.attrs);
            let property = attrs.name.clone().unwrap_or_else(|| pascal_case(&ident));
            Element {
                ident,
                attrs,
                property,
            }
        })
        .collect()
}

fn build_output(ident: &syn::Ident, generics: &syn::Generics, elements: &[Element]) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let create_only: Vec<&Element> = elements.iter().filter(|e| e.attrs.create_only).collect();
    let read_only: Vec<&Element> = elements.iter().filter(|e| e.attrs.read_only).collect();

    let create_only_names = create_only.iter().map(|e| &e.property);
    let read_only_names = read_only.iter().map(|e| &e.property);

    let create_only_count = create_only.len();
    let read_only_count = read_only.len();

    let create_only_checks: Vec<proc_macro2::TokenStream> = create_only
        .iter()
        .map(|element| {
            let field = &element.ident;
            let property = &element.property;
            quote! {
                (!is_unset(&previous.#field) && self.#field != previous.#field).then_some(#property)
            }
        })
        .collect();

    let read_only_checks: Vec<proc_macro2::TokenStream> = read_only
        .iter()
        .map(|element| {
            let field = &element.ident;
            let property = &element.property;
            quote! {
                ::std::option::Option::is_some(&self.#field).then_some(#property)
            }
        })
        .collect();

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            /// CloudFormation properties that cannot change after creation.
            pub const CREATE_ONLY_PROPERTIES: &'static [&'static str] = &[#(#create_only_names),*];

            /// CloudFormation properties that are only ever reported, never accepted.
            pub const READ_ONLY_PROPERTIES: &'static [&'static str] = &[#(#read_only_names),*];

            /// Names of the create-only properties that differ from `previous`.
            /// A property `previous` did not carry counts as unchanged.
            pub fn create_only_changes(&self, previous: &Self) -> ::std::vec::Vec<&'static str> {
                fn is_unset<T>(value: &T) -> bool
                where
                    T: ::std::default::Default + ::std::cmp::PartialEq,
                {
                    *value == T::default()
                }

                let candidates: [::std::option::Option<&'static str>; #create_only_count] = [
                    #(#create_only_checks),*
                ];
                candidates.into_iter().flatten().collect()
            }

            /// Names of the read-only properties that carry a value.
            pub fn read_only_supplied(&self) -> ::std::vec::Vec<&'static str> {
                let candidates: [::std::option::Option<&'static str>; #read_only_count] = [
                    #(#read_only_checks),*
                ];
                candidates.into_iter().flatten().collect()
            }
        }
    }
    .into()
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "this is the usual signature for proc macros, and the inner function should have the same signature"
)]
pub(crate) fn transform(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let elements = match input.data {
        syn::Data::Struct(s) => match s.fields {
            syn::Fields::Named(fields) => parse_fields(fields.named),
            _ => panic!("only structs with named fields are supported"),
        },
        _ => panic!("only applicable to structs"),
    };

    build_output(&input.ident, &input.generics, &elements)
}
