//! Attribute macro that registers an image filter in the global
//! `FilterRegistry` of the `dft-image-filter` crate when the program starts.

extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

/// Registers the annotated struct with `FilterRegistry::register_filter`.
///
/// The struct must implement `Filter`. A hidden constructor function named
/// `__register_filter_<snake_case_name>` is emitted next to the struct and run
/// by `ctor` before `main`.
#[proc_macro_attribute]
pub fn register_filter(attr: TokenStream, item: TokenStream) -> TokenStream {
    parse_macro_input!(attr as syn::parse::Nothing);
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;

    let snake = heck::ToSnakeCase::to_snake_case(struct_name.to_string().as_str());
    let fn_name = syn::Ident::new(&format!("__register_filter_{snake}"), struct_name.span());

    let expanded = quote! {
        #input

        #[doc(hidden)]
        #[ctor::ctor]
        fn #fn_name() {
            crate::filters::filter::FilterRegistry::register_filter::<#struct_name>();
        }
    };

    TokenStream::from(expanded)
}
