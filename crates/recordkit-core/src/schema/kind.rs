/// Semantic kind of a mapped field, independent of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Integers narrower than 64 bits.
    Int,

    /// 64-bit integers.
    BigInt,

    Float,
    Text,

    /// Lists stored as a JSON array.
    Sequence,

    Bool,
    Timestamp,

    /// Anything the mapper has no rule for.
    Other,
}
