//! Procedural macros for the psdlayer2dir workspace.
//!
//! The only macro is [`macro@context`], which attaches an `anyhow` context message to every
//! error returned by the annotated function.

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::{ItemFn, ReturnType, parse_macro_input};

/// Wraps the error of a `Result`-returning function with a formatted context message.
///
/// ```ignore
/// #[context("Failed to export layer {name:?}")]
/// fn export(name: &str) -> anyhow::Result<()> { ... }
/// ```
///
/// Prefix the message with `move,` when the body must take ownership of captured arguments.
#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let args = parse_macro_input!(args as ContextArgs);
	let mut function = parse_macro_input!(input as ItemFn);

	if let Some(asyncness) = &function.sig.asyncness {
		return syn::Error::new_spanned(asyncness, "#[context] does not support async functions")
			.to_compile_error()
			.into();
	}
	if let ReturnType::Default = function.sig.output {
		return syn::Error::new_spanned(&function.sig, "function should return Result")
			.to_compile_error()
			.into();
	}

	let body = wrap_sync(&args, &function.block.to_token_stream(), &function.sig.output);

	function.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(body), None)];
	function.into_token_stream().into()
}

fn wrap_sync(args: &ContextArgs, block: &TokenStream2, output: &ReturnType) -> TokenStream2 {
	let ContextArgs {
		move_token,
		format_args,
	} = args;
	let err = Ident::new("err", Span::mixed_site());
	let once = Ident::new("once", Span::mixed_site());
	quote! {
		// Moving a non-`Copy` value into the closure makes it `FnOnce`.
		let #once = ::core::iter::empty::<()>();
		(#move_token || #output {
			::core::mem::drop(#once);
			#block
		})().map_err(|#err| #err.context(format!(#format_args)).into())
	}
}
