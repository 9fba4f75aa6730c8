use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Record {
    /// Struct identifier
    pub(crate) ident: syn::Ident,

    /// Fields in declaration order, skipped ones included
    pub(crate) fields: Vec<Field>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Record> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Descriptors are cached per type, which a generic struct cannot
        // share between its instantiations.
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic records are not supported",
            ));
        }

        let mut errs = ErrorSet::default();
        let fields: Vec<_> = node
            .named
            .iter()
            .filter_map(|node| errs.take(Field::from_ast(node)))
            .collect();

        errs.finish(Record {
            ident: ast.ident.clone(),
            fields,
        })
    }
}
