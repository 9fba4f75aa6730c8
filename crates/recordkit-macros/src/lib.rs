extern crate proc_macro;

use proc_macro::TokenStream;

/// Derive `recordkit::Record` for a struct with named fields.
///
/// Fields are mapped in declaration order. Each may carry one `#[orm(...)]`
/// attribute:
///
/// - `#[orm("column,PRIMARY_KEY,AUTO_INCREMENT,UNIQUE,NULL")]` names the
///   column and sets its flags. Without it the column is the snake-cased
///   field name.
/// - `length = 50`, `default = "..."`, `comment = "..."` and
///   `column_definition = "..."` refine the generated column type.
/// - `#[orm(embed)]` flattens another record's fields into this one. Fields
///   of type `Model` are embedded without the attribute.
/// - `#[orm(skip)]` leaves the field unmapped, as are fields of type
///   `NullTime` and `Recorder`.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match recordkit_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
