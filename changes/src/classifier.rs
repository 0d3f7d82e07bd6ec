use crate::types::*;

pub const NO_FUNCTION_CHANGE: &str = "Line records no function change";

/// What a single ledger row turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The row describes exactly one change
    Change(Change),
    /// Identical old and new sides; nothing to record and nothing to say
    Unchanged,
    /// Identical old and new sides that deserve a warning
    Warning(Diagnostic),
}

/// Maps validated ledger rows onto the change taxonomy.
///
/// Rows whose second column is `type` or `enum` use the layout
/// `old_version kind old_name - new_version - new_name - notes`; every other
/// row is a function row laid out as
/// `old_version old_return old_name old_args new_version new_return new_name new_args notes`.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    no_warn_version: Option<String>,
}

impl Classifier {
    /// `no_warn_version` silences unchanged-function warnings for rows with that old version
    pub fn new(no_warn_version: Option<String>) -> Self {
        Self { no_warn_version }
    }

    pub fn classify(&self, record: &ChangeRecord) -> Classification {
        match record.kind() {
            "type" => Self::classify_type(record),
            "enum" => Self::classify_enum(record),
            _ => self.classify_function(record),
        }
    }

    fn classify_type(record: &ChangeRecord) -> Classification {
        let (old_name, new_name, notes) = Self::named_sides(record);

        if old_name == ABSENT {
            Classification::Change(Change::NewType(NewType {
                name: new_name,
                notes,
            }))
        } else if new_name == ABSENT {
            Classification::Change(Change::DeletedType(DeletedType {
                name: old_name,
                notes,
            }))
        } else if old_name != new_name || !notes.is_empty() {
            Classification::Change(Change::ChangedType(ChangedType {
                old_name,
                new_name,
                notes,
            }))
        } else {
            Classification::Unchanged
        }
    }

    // Same shape as types, but a differing enum is filed as a rename
    fn classify_enum(record: &ChangeRecord) -> Classification {
        let (old_name, new_name, notes) = Self::named_sides(record);

        if old_name == ABSENT {
            Classification::Change(Change::NewEnum(NewEnum {
                name: new_name,
                notes,
            }))
        } else if new_name == ABSENT {
            Classification::Change(Change::DeletedEnum(DeletedEnum {
                name: old_name,
                notes,
            }))
        } else if old_name != new_name || !notes.is_empty() {
            Classification::Change(Change::RenamedEnum(RenamedEnum {
                old_name,
                new_name,
                notes,
            }))
        } else {
            Classification::Unchanged
        }
    }

    fn classify_function(&self, record: &ChangeRecord) -> Classification {
        let [_, old_return, old_name, old_args, _, new_return, new_name, new_args, _] =
            &record.fields;
        let notes = record.notes().to_string();

        if old_name == ABSENT {
            return Classification::Change(Change::NewFunction(NewFunction {
                name: new_name.clone(),
                return_type: new_return.clone(),
                args: new_args.clone(),
                notes,
            }));
        }

        if new_name == ABSENT {
            return Classification::Change(Change::DeletedFunction(DeletedFunction {
                name: old_name.clone(),
                return_type: old_return.clone(),
                args: old_args.clone(),
                notes,
            }));
        }

        let same_signature = old_return == new_return && old_args == new_args;
        match (same_signature, old_name == new_name) {
            (true, false) => Classification::Change(Change::RenamedFunction(RenamedFunction {
                old_name: old_name.clone(),
                new_name: new_name.clone(),
                notes,
            })),
            (true, true) if self.is_suppressed(record) => Classification::Unchanged,
            (true, true) => Classification::Warning(Diagnostic {
                line: record.line,
                message: NO_FUNCTION_CHANGE.to_string(),
                fields: record.fields.to_vec(),
            }),
            (false, _) => Classification::Change(Change::ChangedFunction(ChangedFunction {
                old_name: old_name.clone(),
                old_return_type: old_return.clone(),
                old_args: old_args.clone(),
                new_name: new_name.clone(),
                new_return_type: new_return.clone(),
                new_args: new_args.clone(),
                notes,
            })),
        }
    }

    fn is_suppressed(&self, record: &ChangeRecord) -> bool {
        self.no_warn_version
            .as_deref()
            .is_some_and(|version| version == record.old_version())
    }

    fn named_sides(record: &ChangeRecord) -> (String, String, String) {
        (
            record.fields[2].clone(),
            record.fields[6].clone(),
            record.notes().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: [&str; EXPECTED_FIELDS]) -> ChangeRecord {
        ChangeRecord {
            line: 42,
            fields: fields.map(String::from),
        }
    }

    fn classify(fields: [&str; EXPECTED_FIELDS]) -> Classification {
        Classifier::default().classify(&record(fields))
    }

    #[test]
    fn test_new_function() {
        let result = classify([
            "1.4",
            "char*",
            "-",
            "-",
            "1.5",
            "char*",
            "raptor_new_uri2",
            "(raptor_world* world)",
            "-",
        ]);

        assert_eq!(
            result,
            Classification::Change(Change::NewFunction(NewFunction {
                name: "raptor_new_uri2".to_string(),
                return_type: "char*".to_string(),
                args: "(raptor_world* world)".to_string(),
                notes: String::new(),
            }))
        );
    }

    #[test]
    fn test_absent_old_name_always_new_even_when_new_name_absent() {
        let result = classify(["1.4", "int", "-", "-", "1.5", "int", "-", "-", "odd"]);
        assert!(matches!(
            result,
            Classification::Change(Change::NewFunction(ref f)) if f.name == "-"
        ));
    }

    #[test]
    fn test_deleted_function_keeps_old_signature() {
        let result = classify([
            "1.4",
            "void",
            "raptor_free_foo",
            "(raptor_foo* foo)",
            "1.5",
            "-",
            "-",
            "-",
            "use raptor_free_bar()",
        ]);

        assert_eq!(
            result,
            Classification::Change(Change::DeletedFunction(DeletedFunction {
                name: "raptor_free_foo".to_string(),
                return_type: "void".to_string(),
                args: "(raptor_foo* foo)".to_string(),
                notes: "use raptor_free_bar()".to_string(),
            }))
        );
    }

    #[test]
    fn test_renamed_function() {
        let result = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_b", "(void)", "-",
        ]);
        assert_eq!(
            result,
            Classification::Change(Change::RenamedFunction(RenamedFunction {
                old_name: "raptor_a".to_string(),
                new_name: "raptor_b".to_string(),
                notes: String::new(),
            }))
        );
    }

    #[test]
    fn test_changed_function_on_any_signature_difference() {
        let return_changed = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "long", "raptor_a", "(void)", "-",
        ]);
        let args_changed = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_a", "(int x)", "-",
        ]);
        let both_changed = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_b", "(int x)", "-",
        ]);

        for result in [return_changed, args_changed, both_changed] {
            assert!(matches!(
                result,
                Classification::Change(Change::ChangedFunction(_))
            ));
        }
    }

    #[test]
    fn test_unchanged_function_warns() {
        let result = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_a", "(void)", "-",
        ]);

        match result {
            Classification::Warning(diag) => {
                assert_eq!(diag.line, 42);
                assert_eq!(diag.message, NO_FUNCTION_CHANGE);
                assert_eq!(diag.fields[2], "raptor_a");
            }
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn test_unchanged_function_with_notes_still_warns() {
        let result = classify([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_a", "(void)", "now thread safe",
        ]);
        assert!(matches!(result, Classification::Warning(_)));
    }

    #[test]
    fn test_no_warn_version_suppresses_warning() {
        let classifier = Classifier::new(Some("1.4".to_string()));
        let suppressed = classifier.classify(&record([
            "1.4", "int", "raptor_a", "(void)", "1.5", "int", "raptor_a", "(void)", "-",
        ]));
        let other_version = classifier.classify(&record([
            "1.5", "int", "raptor_a", "(void)", "2.0", "int", "raptor_a", "(void)", "-",
        ]));

        assert_eq!(suppressed, Classification::Unchanged);
        assert!(matches!(other_version, Classification::Warning(_)));
    }

    #[test]
    fn test_type_rows() {
        assert_eq!(
            classify(["1.4", "type", "-", "-", "1.5", "-", "raptor_uri", "-", "-"]),
            Classification::Change(Change::NewType(NewType {
                name: "raptor_uri".to_string(),
                notes: String::new(),
            }))
        );
        assert!(matches!(
            classify(["1.4", "type", "raptor_uri", "-", "1.5", "-", "-", "-", "-"]),
            Classification::Change(Change::DeletedType(ref t)) if t.name == "raptor_uri"
        ));
        assert!(matches!(
            classify(["1.4", "type", "raptor_a", "-", "1.5", "-", "raptor_b", "-", "-"]),
            Classification::Change(Change::ChangedType(_))
        ));
        assert!(matches!(
            classify(["1.4", "type", "raptor_a", "-", "1.5", "-", "raptor_a", "-", "now opaque"]),
            Classification::Change(Change::ChangedType(ref t)) if t.notes == "now opaque"
        ));
    }

    #[test]
    fn test_identical_type_is_silent_noop() {
        let result = classify(["1.4", "type", "raptor_a", "-", "1.5", "-", "raptor_a", "-", "-"]);
        assert_eq!(result, Classification::Unchanged);
    }

    #[test]
    fn test_enum_rows() {
        assert!(matches!(
            classify(["1.4", "enum", "-", "-", "1.5", "-", "RAPTOR_X", "-", "-"]),
            Classification::Change(Change::NewEnum(ref e)) if e.name == "RAPTOR_X"
        ));
        assert!(matches!(
            classify(["1.4", "enum", "RAPTOR_X", "-", "1.5", "-", "-", "-", "-"]),
            Classification::Change(Change::DeletedEnum(_))
        ));
        assert_eq!(
            classify(["1.4", "enum", "RAPTOR_X", "-", "1.5", "-", "RAPTOR_Y", "-", "-"]),
            Classification::Change(Change::RenamedEnum(RenamedEnum {
                old_name: "RAPTOR_X".to_string(),
                new_name: "RAPTOR_Y".to_string(),
                notes: String::new(),
            }))
        );
        assert_eq!(
            classify(["1.4", "enum", "RAPTOR_X", "-", "1.5", "-", "RAPTOR_X", "-", "-"]),
            Classification::Unchanged
        );
    }
}
