use crate::error::ChangesError;
use std::fmt;

/// Type alias for Result with `ChangesError`
pub type Result<T> = std::result::Result<T, ChangesError>;

/// Number of tab-separated fields in every ledger row
pub const EXPECTED_FIELDS: usize = 9;

/// Sentinel meaning "does not exist on this side"
pub const ABSENT: &str = "-";

/// One validated ledger row, fields exactly as read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub line: u64,
    pub fields: [String; EXPECTED_FIELDS],
}

impl ChangeRecord {
    pub fn old_version(&self) -> &str {
        &self.fields[0]
    }

    /// Second column: `type`, `enum`, or the old return type of a function
    pub fn kind(&self) -> &str {
        &self.fields[1]
    }

    pub fn new_version(&self) -> &str {
        &self.fields[4]
    }

    /// Notes column with the `-` sentinel read as empty
    pub fn notes(&self) -> &str {
        match self.fields[8].as_str() {
            ABSENT => "",
            notes => notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFunction {
    pub name: String,
    pub return_type: String,
    pub args: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedFunction {
    pub name: String,
    pub return_type: String,
    pub args: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFunction {
    pub old_name: String,
    pub new_name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFunction {
    pub old_name: String,
    pub old_return_type: String,
    pub old_args: String,
    pub new_name: String,
    pub new_return_type: String,
    pub new_args: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewType {
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedType {
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedType {
    pub old_name: String,
    pub new_name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnum {
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEnum {
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedEnum {
    pub old_name: String,
    pub new_name: String,
    pub notes: String,
}

/// A single classified API change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    NewFunction(NewFunction),
    DeletedFunction(DeletedFunction),
    RenamedFunction(RenamedFunction),
    ChangedFunction(ChangedFunction),
    NewType(NewType),
    DeletedType(DeletedType),
    ChangedType(ChangedType),
    NewEnum(NewEnum),
    DeletedEnum(DeletedEnum),
    RenamedEnum(RenamedEnum),
}

impl Change {
    pub fn notes(&self) -> &str {
        match self {
            Self::NewFunction(c) => &c.notes,
            Self::DeletedFunction(c) => &c.notes,
            Self::RenamedFunction(c) => &c.notes,
            Self::ChangedFunction(c) => &c.notes,
            Self::NewType(c) => &c.notes,
            Self::DeletedType(c) => &c.notes,
            Self::ChangedType(c) => &c.notes,
            Self::NewEnum(c) => &c.notes,
            Self::DeletedEnum(c) => &c.notes,
            Self::RenamedEnum(c) => &c.notes,
        }
    }
}

/// All changes recorded for one version pair, one collection per change kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionChanges {
    pub new_functions: Vec<NewFunction>,
    pub deleted_functions: Vec<DeletedFunction>,
    pub renamed_functions: Vec<RenamedFunction>,
    pub changed_functions: Vec<ChangedFunction>,
    pub new_types: Vec<NewType>,
    pub deleted_types: Vec<DeletedType>,
    pub changed_types: Vec<ChangedType>,
    pub new_enums: Vec<NewEnum>,
    pub deleted_enums: Vec<DeletedEnum>,
    pub renamed_enums: Vec<RenamedEnum>,
}

impl VersionChanges {
    /// File a change into the collection matching its kind
    pub fn push(&mut self, change: Change) {
        match change {
            Change::NewFunction(c) => self.new_functions.push(c),
            Change::DeletedFunction(c) => self.deleted_functions.push(c),
            Change::RenamedFunction(c) => self.renamed_functions.push(c),
            Change::ChangedFunction(c) => self.changed_functions.push(c),
            Change::NewType(c) => self.new_types.push(c),
            Change::DeletedType(c) => self.deleted_types.push(c),
            Change::ChangedType(c) => self.changed_types.push(c),
            Change::NewEnum(c) => self.new_enums.push(c),
            Change::DeletedEnum(c) => self.deleted_enums.push(c),
            Change::RenamedEnum(c) => self.renamed_enums.push(c),
        }
    }

    pub fn has_new(&self) -> bool {
        !(self.new_functions.is_empty() && self.new_types.is_empty() && self.new_enums.is_empty())
    }

    pub fn has_deleted(&self) -> bool {
        !(self.deleted_functions.is_empty()
            && self.deleted_types.is_empty()
            && self.deleted_enums.is_empty())
    }

    pub fn has_renamed(&self) -> bool {
        !(self.renamed_functions.is_empty() && self.renamed_enums.is_empty())
    }

    pub fn has_changed(&self) -> bool {
        !(self.changed_functions.is_empty() && self.changed_types.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        !(self.has_new() || self.has_deleted() || self.has_renamed() || self.has_changed())
    }

    pub fn len(&self) -> usize {
        self.new_functions.len()
            + self.deleted_functions.len()
            + self.renamed_functions.len()
            + self.changed_functions.len()
            + self.new_types.len()
            + self.deleted_types.len()
            + self.changed_types.len()
            + self.new_enums.len()
            + self.deleted_enums.len()
            + self.renamed_enums.len()
    }
}

/// An advisory message about a ledger row that did not stop the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u64,
    pub message: String,
    pub fields: Vec<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {:?}", self.line, self.message, self.fields)
    }
}
