//! The `define_mod!` entry-point macro. A mod crate calls it once, at
//! module scope, naming the lifecycle/registration functions it wants
//! the MRE to call; the macro expands into the `#[no_mangle]` symbol
//! the host loader looks for (SPEC_FULL.md §4.2).

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Ident, Path, Token};

const CALLBACK_FIELDS: &[&str] = &[
    "register_sprites",
    "register_objects",
    "register_object_listeners",
    "register_fonts",
    "constructor",
    "destructor",
    "game_step",
    "game_pause",
    "game_save",
    "game_load",
    "room_start",
    "room_end",
];

struct CallbackBinding {
    field: Ident,
    func: Path,
}

impl Parse for CallbackBinding {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let field: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let func: Path = input.parse()?;
        Ok(CallbackBinding { field, func })
    }
}

struct DefineModInput {
    bindings: Punctuated<CallbackBinding, Token![,]>,
}

impl Parse for DefineModInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(DefineModInput { bindings: Punctuated::parse_terminated(input)? })
    }
}

/// Generates the mod's `define_mod` entry point.
///
/// ```ignore
/// define_mod! {
///     register_objects: register_objects,
///     constructor: on_init,
///     game_step: on_step,
/// }
/// ```
///
/// Every field name must match one of [`ModCallbacks`](mre_sdk::ModCallbacks)'s
/// fields; the right-hand side is the path to a function whose signature
/// matches that field's callback type exactly (`unsafe extern "C" fn(..)`).
/// Fields left out default to `None` — the MRE simply never calls them.
#[proc_macro]
pub fn define_mod(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as DefineModInput);

    let mut seen = std::collections::HashSet::new();
    for binding in &parsed.bindings {
        let name = binding.field.to_string();
        if !CALLBACK_FIELDS.contains(&name.as_str()) {
            let message = format!(
                "unknown mod callback `{name}`, expected one of: {}",
                CALLBACK_FIELDS.join(", ")
            );
            return syn::Error::new(binding.field.span(), message).to_compile_error().into();
        }
        if !seen.insert(name.clone()) {
            let message = format!("callback `{name}` bound more than once");
            return syn::Error::new(binding.field.span(), message).to_compile_error().into();
        }
    }

    let field_inits = CALLBACK_FIELDS.iter().map(|field| {
        let field_ident = Ident::new(field, Span::call_site());
        match parsed.bindings.iter().find(|binding| binding.field == *field) {
            Some(binding) => {
                let func = &binding.func;
                quote! { #field_ident: Some(#func) }
            }
            None => quote! { #field_ident: None },
        }
    });

    let expanded = quote! {
        #[no_mangle]
        pub unsafe extern "C" fn define_mod() -> mre_sdk::ModCallbacks {
            mre_sdk::ModCallbacks {
                #(#field_inits,)*
                room_change: None,
            }
        }
    };

    TokenStream::from(expanded)
}
