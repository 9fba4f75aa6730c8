mod members;
mod record;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for recordkit types
    recordkit: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let record_impl = self.expand_record_impl();

        wrap_in_const(quote! {
            #record_impl
        })
    }
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        recordkit: quote!(_recordkit::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use recordkit as _recordkit;
            #code
        };
    }
}
