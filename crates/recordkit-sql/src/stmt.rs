mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod predicate;
pub use predicate::Predicate;

mod select;
pub use select::Select;

mod update;
pub use update::Update;

pub use recordkit_core::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    /// Name of the table the statement reads or writes, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Statement::Delete(stmt) => Some(&stmt.table),
            Statement::Insert(stmt) => Some(&stmt.table),
            Statement::Select(stmt) => stmt.from.as_deref(),
            Statement::Update(stmt) => Some(&stmt.table),
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
