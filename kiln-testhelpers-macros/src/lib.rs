//! The `#[test]` attribute re-exported by `kiln-testhelpers`.

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers before `fn`
    struct Prelude {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics, parameters and return type
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        prelude: Prelude, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Prelude {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

impl Signature {
    fn has_return_type(&self) -> bool {
        quote::ToTokens::to_token_stream(self)
            .to_string()
            .contains("->")
    }
}

/// Marks a test that runs after `kiln_testhelpers::setup()`.
///
/// A test without a return type is made to return
/// `kiln_testhelpers::eyre::Result<()>`, so its body can use `?`.
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let test_fn = match tokens.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[kiln_testhelpers::test] expects a function");
            }
            .into();
        }
    };

    let TestFn {
        prelude,
        _fn,
        name,
        signature,
        body,
    } = test_fn;

    let expanded = if signature.has_return_type() {
        quote::quote! {
            #[::core::prelude::rust_2024::test]
            #prelude fn #name #signature {
                ::kiln_testhelpers::setup();

                #body
            }
        }
    } else {
        quote::quote! {
            #[::core::prelude::rust_2024::test]
            #prelude fn #name #signature -> ::kiln_testhelpers::eyre::Result<()> {
                ::kiln_testhelpers::setup();

                #body

                Ok(())
            }
        }
    };
    expanded.into()
}
