/// Parsed `#[orm(...)]` field attribute.
///
/// Allowed syntax:
///
/// ```text
/// #[orm("column,PRIMARY_KEY,AUTO_INCREMENT")]
/// #[orm("column", length = 50, default = "default 'x'", comment = "...")]
/// #[orm(column_definition = "decimal(20,2) not null")]
/// #[orm(embed)]
/// #[orm(skip)]
/// ```
#[derive(Debug, Default)]
pub(crate) struct OrmAttr {
    /// Comma separated column annotation
    pub(crate) tag: Option<syn::LitStr>,

    pub(crate) column_definition: Option<syn::LitStr>,
    pub(crate) length: Option<syn::LitStr>,
    pub(crate) default: Option<syn::LitStr>,
    pub(crate) comment: Option<syn::LitStr>,

    /// Flatten the field's own record members into the parent
    pub(crate) embed: Option<syn::Ident>,

    /// Leave the field unmapped
    pub(crate) skip: Option<syn::Ident>,
}

impl OrmAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<OrmAttr> {
        attr.parse_args()
    }

    /// True when the attribute describes the column itself.
    pub(crate) fn has_column_options(&self) -> bool {
        self.tag.is_some()
            || self.column_definition.is_some()
            || self.length.is_some()
            || self.default.is_some()
            || self.comment.is_some()
    }
}

impl syn::parse::Parse for OrmAttr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = OrmAttr::default();

        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) {
                if result.tag.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column annotation"));
                }
                result.tag = Some(input.parse()?);
            } else if lookahead.peek(syn::Ident) {
                let ident: syn::Ident = input.parse()?;

                match ident.to_string().as_str() {
                    "embed" => set_flag(&mut result.embed, ident)?,
                    "skip" => set_flag(&mut result.skip, ident)?,
                    "length" => {
                        let value = parse_length(input)?;
                        set_value(&mut result.length, &ident, value)?;
                    }
                    "default" => {
                        let value = parse_str(input)?;
                        set_value(&mut result.default, &ident, value)?;
                    }
                    "comment" => {
                        let value = parse_str(input)?;
                        set_value(&mut result.comment, &ident, value)?;
                    }
                    "column_definition" => {
                        let value = parse_str(input)?;
                        set_value(&mut result.column_definition, &ident, value)?;
                    }
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &ident,
                            format!("unknown orm option `{ident}`"),
                        ))
                    }
                }
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
            if input.is_empty() {
                break;
            }
        }

        Ok(result)
    }
}

fn set_flag(slot: &mut Option<syn::Ident>, ident: syn::Ident) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(
            &ident,
            format!("duplicate `{ident}` option"),
        ));
    }
    *slot = Some(ident);
    Ok(())
}

fn set_value(
    slot: &mut Option<syn::LitStr>,
    ident: &syn::Ident,
    value: syn::LitStr,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(
            ident,
            format!("duplicate `{ident}` option"),
        ));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_str(input: syn::parse::ParseStream) -> syn::Result<syn::LitStr> {
    let _eq_token: syn::Token![=] = input.parse()?;
    input.parse()
}

/// `length = 50` or `length = "50"`.
fn parse_length(input: syn::parse::ParseStream) -> syn::Result<syn::LitStr> {
    let _eq_token: syn::Token![=] = input.parse()?;

    let lookahead = input.lookahead1();
    if lookahead.peek(syn::LitInt) {
        let lit: syn::LitInt = input.parse()?;
        let len: u32 = lit.base10_parse()?;
        Ok(syn::LitStr::new(&len.to_string(), lit.span()))
    } else if lookahead.peek(syn::LitStr) {
        input.parse()
    } else {
        Err(lookahead.error())
    }
}
