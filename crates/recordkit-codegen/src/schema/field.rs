use super::{ErrorSet, OrmAttr};

use syn::ext::IdentExt;

/// Type names that are never mapped to a column.
const UNMAPPED_TYPES: &[&str] = &["NullTime", "Recorder"];

/// Type name that is always flattened into the parent record.
const EMBEDDED_TYPE: &str = "Model";

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field name as declared, without any `r#` prefix
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,

    /// How the field is mapped
    pub(crate) mapping: FieldTy,
}

#[derive(Debug)]
pub(crate) enum FieldTy {
    /// Stored in its own column
    Column(OrmAttr),

    /// A record whose members are spliced into the parent
    Embedded,

    /// Not mapped at all
    Skipped,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::default();
        let mut orm: Option<OrmAttr> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("orm") {
                continue;
            }

            if orm.is_some() {
                errs.spanned(attr, "duplicate #[orm] attribute");
                continue;
            }

            orm = errs.take(OrmAttr::from_ast(attr));
        }

        let orm = orm.unwrap_or_default();
        let type_name = type_name(&field.ty);

        if orm.embed.is_some() && orm.skip.is_some() {
            errs.spanned(&field.ty, "a field cannot be both embedded and skipped");
        }

        let mapping = if orm.skip.is_some()
            || type_name
                .as_deref()
                .is_some_and(|name| UNMAPPED_TYPES.contains(&name))
        {
            FieldTy::Skipped
        } else if orm.embed.is_some() || type_name.as_deref() == Some(EMBEDDED_TYPE) {
            if orm.has_column_options() {
                errs.spanned(ident, "embedded fields take no column options");
            }
            FieldTy::Embedded
        } else {
            FieldTy::Column(orm)
        };

        errs.finish(Field {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            ty: field.ty.clone(),
            mapping,
        })
    }
}

/// Last path segment of a type, e.g. `NullTime` for `recordkit::types::NullTime`.
fn type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        syn::Type::Group(group) => type_name(&group.elem),
        syn::Type::Paren(paren) => type_name(&paren.elem),
        _ => None,
    }
}
