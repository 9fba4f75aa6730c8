use super::Expand;
use crate::schema::FieldTy;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let recordkit = &self.recordkit;
        let ident = &self.record.ident;
        let members = self.expand_members();
        let field_body = self.expand_field_body();
        let fields_mut_body = self.expand_fields_mut_body();

        quote! {
            impl #recordkit::Record for #ident {
                fn members() -> Vec<#recordkit::Member> {
                    vec![ #( #members, )* ]
                }

                fn descriptors() -> &'static #recordkit::Descriptors {
                    static DESCRIPTORS: std::sync::OnceLock<#recordkit::Descriptors> =
                        std::sync::OnceLock::new();
                    DESCRIPTORS.get_or_init(|| {
                        #recordkit::Descriptors::extract(<Self as #recordkit::Record>::members())
                    })
                }

                fn field(&self, name: &str) -> Option<&dyn #recordkit::FieldValue> {
                    #field_body
                }

                fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn #recordkit::FieldValue)> {
                    #fields_mut_body
                }
            }
        }
    }

    fn expand_field_body(&self) -> TokenStream {
        let recordkit = &self.recordkit;

        let arms = self.record.fields.iter().filter_map(|field| {
            let FieldTy::Column(_) = field.mapping else {
                return None;
            };
            let ident = &field.ident;
            let name = &field.name;
            Some(quote!(#name => return Some(&self.#ident),))
        });

        let embedded = self.record.fields.iter().filter_map(|field| {
            let FieldTy::Embedded = field.mapping else {
                return None;
            };
            let ident = &field.ident;
            let ty = &field.ty;
            Some(quote! {
                if let Some(value) = <#ty as #recordkit::Record>::field(&self.#ident, name) {
                    return Some(value);
                }
            })
        });

        quote! {
            #[allow(clippy::match_single_binding)]
            match name {
                #( #arms )*
                _ => {}
            }

            #( #embedded )*

            None
        }
    }

    fn expand_fields_mut_body(&self) -> TokenStream {
        let recordkit = &self.recordkit;

        // Embedded fields never shadow the struct's own columns.
        let own: Vec<_> = self
            .record
            .fields
            .iter()
            .filter(|field| matches!(field.mapping, FieldTy::Column(_)))
            .map(|field| &field.name)
            .collect();

        let pushes = self.record.fields.iter().filter_map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            match &field.mapping {
                FieldTy::Column(_) => {
                    let name = &field.name;
                    Some(quote!(fields.push((#name, &mut self.#ident));))
                }
                FieldTy::Embedded if own.is_empty() => Some(quote! {
                    fields.extend(<#ty as #recordkit::Record>::fields_mut(&mut self.#ident));
                }),
                FieldTy::Embedded => Some(quote! {
                    fields.extend(
                        <#ty as #recordkit::Record>::fields_mut(&mut self.#ident)
                            .into_iter()
                            .filter(|(name, _)| ![#( #own ),*].contains(name)),
                    );
                }),
                FieldTy::Skipped => None,
            }
        });

        quote! {
            let mut fields: Vec<(&'static str, &mut dyn #recordkit::FieldValue)> = Vec::new();
            #( #pushes )*
            fields
        }
    }
}
