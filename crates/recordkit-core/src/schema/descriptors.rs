use super::{Field, FieldDef};
use crate::record::Member;

/// The mapped fields of one record type, in declaration order, with
/// embedded structs flattened in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptors {
    fields: Vec<Field>,

    /// Indices into `fields` of the primary key columns
    key: Vec<usize>,

    /// Annotation fallbacks recorded while extracting
    diagnostics: Vec<Diagnostic>,
}

/// A malformed annotation that was accepted with a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Struct field the annotation belongs to
    pub field: String,

    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(field: &str, message: String) -> Diagnostic {
        Diagnostic {
            field: field.to_string(),
            message,
        }
    }
}

impl Descriptors {
    /// Build the descriptor table from a record's declared members.
    ///
    /// Embedded members are expanded recursively and their fields (including
    /// keys) are spliced in at the embedding position. A struct's own fields
    /// shadow same-named fields of the records it embeds; between two
    /// embedded records the earlier declaration wins.
    pub fn extract(members: Vec<Member>) -> Descriptors {
        let mut descriptors = Descriptors::default();
        let defs = flatten(members, &mut descriptors.diagnostics);
        descriptors.collect(defs);

        for diagnostic in &descriptors.diagnostics {
            tracing::warn!(
                field = %diagnostic.field,
                message = %diagnostic.message,
                "orm annotation fallback"
            );
        }

        descriptors
    }

    fn collect(&mut self, defs: Vec<FieldDef>) {
        for def in defs {
            if self.field(def.name).is_some() {
                self.diagnostics.push(Diagnostic::new(
                    def.name,
                    "field is mapped more than once; later declaration ignored".to_string(),
                ));
                continue;
            }

            let field = Field::from_def(&def, &mut self.diagnostics);
            if field.is_key {
                self.key.push(self.fields.len());
            }
            self.fields.push(field);
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields making up the primary key.
    pub fn key(&self) -> impl Iterator<Item = &Field> + '_ {
        self.key.iter().map(|&index| &self.fields[index])
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// Fields flagged auto-increment.
    pub fn auto(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_auto)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn column(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.column == column)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Flatten members in declaration order, dropping embedded fields that the
/// embedding struct declares itself.
fn flatten(members: Vec<Member>, diagnostics: &mut Vec<Diagnostic>) -> Vec<FieldDef> {
    let own: Vec<&'static str> = members
        .iter()
        .filter_map(|member| match member {
            Member::Column(def) => Some(def.name),
            Member::Embedded(_) => None,
        })
        .collect();

    let mut defs = vec![];

    for member in members {
        match member {
            Member::Column(def) => defs.push(def),
            Member::Embedded(members) => {
                for def in flatten(members(), diagnostics) {
                    if own.contains(&def.name) {
                        diagnostics.push(Diagnostic::new(
                            def.name,
                            "field is shadowed by the embedding struct".to_string(),
                        ));
                        continue;
                    }
                    defs.push(def);
                }
            }
        }
    }

    defs
}
