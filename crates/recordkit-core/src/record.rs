use crate::{schema::Descriptors, FieldDef, FieldValue};

/// A struct whose fields map to the columns of a table row.
///
/// Usually implemented with `#[derive(Record)]`. A hand-written impl
/// declares its members and gives access to its fields by name:
///
/// ```
/// use recordkit_core::{Descriptors, FieldDef, FieldValue, Kind, Member, Record};
/// use std::sync::OnceLock;
///
/// #[derive(Default)]
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// impl Record for Tag {
///     fn members() -> Vec<Member> {
///         vec![
///             Member::Column(FieldDef::new("id", Kind::BigInt).tag("id,PRIMARY_KEY,AUTO_INCREMENT")),
///             Member::Column(FieldDef::new("label", Kind::Text)),
///         ]
///     }
///
///     fn descriptors() -> &'static Descriptors {
///         static DESCRIPTORS: OnceLock<Descriptors> = OnceLock::new();
///         DESCRIPTORS.get_or_init(|| Descriptors::extract(Self::members()))
///     }
///
///     fn field(&self, name: &str) -> Option<&dyn FieldValue> {
///         match name {
///             "id" => Some(&self.id),
///             "label" => Some(&self.label),
///             _ => None,
///         }
///     }
///
///     fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldValue)> {
///         vec![("id", &mut self.id), ("label", &mut self.label)]
///     }
/// }
///
/// assert_eq!(Tag::descriptors().key().count(), 1);
/// ```
pub trait Record: Default + Send + 'static {
    /// Declared members in source order.
    fn members() -> Vec<Member>;

    /// The descriptor table, extracted once per type.
    fn descriptors() -> &'static Descriptors;

    /// Look up a mapped field by its struct field name, searching embedded
    /// structs. The struct's own fields are found before embedded ones.
    fn field(&self, name: &str) -> Option<&dyn FieldValue>;

    /// All mapped fields, embedded structs flattened in place.
    ///
    /// Embedded fields sharing a name with one of the struct's own fields are
    /// left out, so a name resolves to the same field here as in
    /// [`Record::field`].
    fn fields_mut(&mut self) -> Vec<(&'static str, &mut dyn FieldValue)>;
}

/// One declared member of a record.
#[derive(Debug, Clone, Copy)]
pub enum Member {
    /// A field stored in its own column
    Column(FieldDef),

    /// A struct whose fields are flattened into the parent
    Embedded(fn() -> Vec<Member>),
}
