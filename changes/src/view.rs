//! Presentation order for the changes of one version pair.
//!
//! Renderers never walk `VersionChanges` directly: they receive the non-empty
//! subsections in document order, each holding its entity groups with rows
//! already sorted by name.

use crate::types::VersionChanges;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subsection {
    New,
    Deleted,
    Renamed,
    Changed,
}

impl Subsection {
    pub const ALL: [Subsection; 4] = [Self::New, Self::Deleted, Self::Renamed, Self::Changed];

    /// Keyword used in anchor ids
    pub fn keyword(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Changed => "changed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::New => "New functions, types and enums",
            Self::Deleted => "Deleted functions, types and enums",
            Self::Renamed => "Renamed functions and enums",
            Self::Changed => "Changed functions and types",
        }
    }

    /// Whether the subsection is shown as a list rather than an old/new table
    pub fn is_list(self) -> bool {
        matches!(self, Self::New | Self::Deleted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Function,
    Type,
    Enum,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Type => "type",
            Self::Enum => "enum",
        }
    }

    pub fn plural_title(self) -> &'static str {
        match self {
            Self::Function => "Functions",
            Self::Type => "Types",
            Self::Enum => "Enums",
        }
    }
}

/// One side of a change: a name, plus return type and args for functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub signature: Option<(&'a str, &'a str)>,
}

impl<'a> Symbol<'a> {
    fn named(name: &'a str) -> Self {
        Self {
            name,
            signature: None,
        }
    }

    fn function(return_type: &'a str, name: &'a str, args: &'a str) -> Self {
        Self {
            name,
            signature: Some((return_type, args)),
        }
    }

    /// `return_type name(args)` for functions, the bare name otherwise
    pub fn plain(&self) -> String {
        match self.signature {
            Some((return_type, args)) => format!("{return_type} {}{args}", self.name),
            None => self.name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow<'a> {
    pub old: Option<Symbol<'a>>,
    pub new: Option<Symbol<'a>>,
    pub notes: &'a str,
}

impl<'a> ChangeRow<'a> {
    /// The side a list shows: the new symbol if present, else the old one
    pub fn subject(&self) -> Option<&Symbol<'a>> {
        self.new.as_ref().or(self.old.as_ref())
    }

    fn sort_name(&self, subsection: Subsection) -> &'a str {
        let side = match subsection {
            Subsection::New => self.new,
            _ => self.old,
        };
        side.map_or("", |symbol| symbol.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityGroup<'a> {
    pub entity: EntityKind,
    pub rows: Vec<ChangeRow<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsectionView<'a> {
    pub subsection: Subsection,
    pub groups: Vec<EntityGroup<'a>>,
}

/// Non-empty subsections of `changes` in document order
pub fn subsections(changes: &VersionChanges) -> Vec<SubsectionView<'_>> {
    Subsection::ALL
        .into_iter()
        .filter_map(|subsection| {
            let groups: Vec<EntityGroup<'_>> = groups_for(changes, subsection)
                .into_iter()
                .filter(|group| !group.rows.is_empty())
                .map(|mut group| {
                    group
                        .rows
                        .sort_by(|a, b| a.sort_name(subsection).cmp(b.sort_name(subsection)));
                    group
                })
                .collect();

            (!groups.is_empty()).then_some(SubsectionView { subsection, groups })
        })
        .collect()
}

fn groups_for(changes: &VersionChanges, subsection: Subsection) -> Vec<EntityGroup<'_>> {
    match subsection {
        Subsection::New => vec![
            EntityGroup {
                entity: EntityKind::Function,
                rows: changes
                    .new_functions
                    .iter()
                    .map(|f| ChangeRow {
                        old: None,
                        new: Some(Symbol::function(&f.return_type, &f.name, &f.args)),
                        notes: &f.notes,
                    })
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Type,
                rows: changes
                    .new_types
                    .iter()
                    .map(|t| added(&t.name, &t.notes))
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Enum,
                rows: changes
                    .new_enums
                    .iter()
                    .map(|e| added(&e.name, &e.notes))
                    .collect(),
            },
        ],
        Subsection::Deleted => vec![
            EntityGroup {
                entity: EntityKind::Function,
                rows: changes
                    .deleted_functions
                    .iter()
                    .map(|f| ChangeRow {
                        old: Some(Symbol::function(&f.return_type, &f.name, &f.args)),
                        new: None,
                        notes: &f.notes,
                    })
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Type,
                rows: changes
                    .deleted_types
                    .iter()
                    .map(|t| removed(&t.name, &t.notes))
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Enum,
                rows: changes
                    .deleted_enums
                    .iter()
                    .map(|e| removed(&e.name, &e.notes))
                    .collect(),
            },
        ],
        Subsection::Renamed => vec![
            EntityGroup {
                entity: EntityKind::Function,
                rows: changes
                    .renamed_functions
                    .iter()
                    .map(|f| replaced(&f.old_name, &f.new_name, &f.notes))
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Enum,
                rows: changes
                    .renamed_enums
                    .iter()
                    .map(|e| replaced(&e.old_name, &e.new_name, &e.notes))
                    .collect(),
            },
        ],
        Subsection::Changed => vec![
            EntityGroup {
                entity: EntityKind::Function,
                rows: changes
                    .changed_functions
                    .iter()
                    .map(|f| ChangeRow {
                        old: Some(Symbol::function(&f.old_return_type, &f.old_name, &f.old_args)),
                        new: Some(Symbol::function(&f.new_return_type, &f.new_name, &f.new_args)),
                        notes: &f.notes,
                    })
                    .collect(),
            },
            EntityGroup {
                entity: EntityKind::Type,
                rows: changes
                    .changed_types
                    .iter()
                    .map(|t| replaced(&t.old_name, &t.new_name, &t.notes))
                    .collect(),
            },
        ],
    }
}

fn added<'a>(name: &'a str, notes: &'a str) -> ChangeRow<'a> {
    ChangeRow {
        old: None,
        new: Some(Symbol::named(name)),
        notes,
    }
}

fn removed<'a>(name: &'a str, notes: &'a str) -> ChangeRow<'a> {
    ChangeRow {
        old: Some(Symbol::named(name)),
        new: None,
        notes,
    }
}

fn replaced<'a>(old_name: &'a str, new_name: &'a str, notes: &'a str) -> ChangeRow<'a> {
    ChangeRow {
        old: Some(Symbol::named(old_name)),
        new: Some(Symbol::named(new_name)),
        notes,
    }
}
