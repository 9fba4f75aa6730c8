use super::Expand;
use crate::schema::{Field, FieldTy, OrmAttr};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// One `Member` expression per mapped field, in declaration order.
    pub(super) fn expand_members(&self) -> Vec<TokenStream> {
        let recordkit = &self.recordkit;

        self.record
            .fields
            .iter()
            .filter_map(|field| {
                let ty = &field.ty;
                match &field.mapping {
                    FieldTy::Column(attr) => {
                        let def = self.expand_field_def(field, attr);
                        Some(quote!(#recordkit::Member::Column(#def)))
                    }
                    FieldTy::Embedded => Some(quote! {
                        #recordkit::Member::Embedded(<#ty as #recordkit::Record>::members)
                    }),
                    FieldTy::Skipped => None,
                }
            })
            .collect()
    }

    fn expand_field_def(&self, field: &Field, attr: &OrmAttr) -> TokenStream {
        let recordkit = &self.recordkit;
        let name = &field.name;
        let ty = &field.ty;

        let mut def = quote! {
            #recordkit::FieldDef::new(#name, <#ty as #recordkit::FieldValue>::kind())
        };

        if let Some(tag) = &attr.tag {
            def = quote!(#def.tag(#tag));
        }
        if let Some(definition) = &attr.column_definition {
            def = quote!(#def.column_definition(#definition));
        }
        if let Some(length) = &attr.length {
            def = quote!(#def.length(#length));
        }
        if let Some(default) = &attr.default {
            def = quote!(#def.default_value(#default));
        }
        if let Some(comment) = &attr.comment {
            def = quote!(#def.comment(#comment));
        }

        def
    }
}
