//! Per-class coverage table: which classes are not fully covered, sorted by
//! qualified name and laid out in aligned columns.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::errors::{Result, RpError};
use crate::model::coverage::{ClassCoverage, CoverageReport};
use crate::report::percent::percent;

/// One not-fully-covered class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRow {
    pub name: String,
    pub executed_lines: u64,
    pub executable_lines: u64,
}

impl ClassRow {
    #[must_use]
    pub fn percent(&self) -> f64 {
        percent(self.executed_lines, self.executable_lines)
    }
}

/// Rows sorted ascending by qualified name (byte order, case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassTable {
    rows: Vec<ClassRow>,
}

impl ClassTable {
    #[must_use]
    pub fn rows(&self) -> &[ClassRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Digit widths of the widest executed and executable counts, or `None`
    /// for an empty table.
    #[must_use]
    pub fn column_widths(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let executed = self.rows.iter().map(|r| digits(r.executed_lines)).max()?;
        let executable = self.rows.iter().map(|r| digits(r.executable_lines)).max()?;
        Some((executed, executable))
    }

    /// Render every row, newline-terminated, with aligned count columns.
    ///
    /// Executed counts are right-aligned and executable counts left-aligned,
    /// each padded to its widest value, so the `/` separators line up.
    #[must_use]
    pub fn render(&self) -> String {
        let Some((executed_width, executable_width)) = self.column_widths() else {
            return String::new();
        };
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!(
                "  {pct:>5.2}  {executed:>executed_width$}/{executable:<executable_width$}  {name}\n",
                pct = row.percent(),
                executed = row.executed_lines,
                executable = row.executable_lines,
                name = row.name,
            ));
        }
        out
    }
}

fn digits(value: u64) -> usize {
    value.to_string().len()
}

/// Display key for a class: `Namespace\Class`, `@Package\Class`, or the bare
/// class name when neither is declared.
#[must_use]
pub fn qualified_name(class: &ClassCoverage) -> String {
    let non_empty = |value: &Option<String>| value.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);
    if let Some(namespace) = non_empty(&class.namespace) {
        format!("{namespace}\\{}", class.name)
    } else if let Some(package) = non_empty(&class.full_package) {
        format!("@{package}\\{}", class.name)
    } else {
        class.name.clone()
    }
}

/// Collect every class and trait in the report that is not fully covered.
///
/// Per class, lines are summed over methods that have at least one executable
/// line. Classes with `executable <= executed` are left out. Two classes with
/// the same qualified name collapse into one row: the one seen last wins.
pub fn build_class_table(report: &CoverageReport) -> Result<ClassTable> {
    let mut by_name: BTreeMap<String, ClassRow> = BTreeMap::new();

    for file in report.files() {
        for class in file.declarations() {
            let methods = class
                .methods
                .as_ref()
                .ok_or_else(|| RpError::MalformedCoverage {
                    file: file.path.clone(),
                    class: class.name.clone(),
                    details: "class record has no methods collection".to_string(),
                })?;

            let (executable_lines, executed_lines) = methods
                .iter()
                .filter(|m| m.executable_lines > 0)
                .try_fold((0_u64, 0_u64), |(total, hit), m| {
                    Some((
                        total.checked_add(m.executable_lines)?,
                        hit.checked_add(m.executed_lines)?,
                    ))
                })
                .ok_or_else(|| RpError::MalformedCoverage {
                    file: file.path.clone(),
                    class: class.name.clone(),
                    details: "method line counts overflow".to_string(),
                })?;

            if executable_lines <= executed_lines {
                continue;
            }

            let name = qualified_name(class);
            by_name.insert(
                name.clone(),
                ClassRow {
                    name,
                    executed_lines,
                    executable_lines,
                },
            );
        }
    }

    Ok(ClassTable {
        rows: by_name.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::coverage::{
        CoverageNode, DirectoryCoverage, FileCoverage, MethodCoverage,
    };
    use proptest::prelude::*;

    fn report_with(classes: Vec<ClassCoverage>) -> CoverageReport {
        CoverageReport {
            nodes: vec![CoverageNode::File(FileCoverage {
                path: "src/All.php".to_string(),
                executable_lines: 0,
                executed_lines: 0,
                classes,
                traits: Vec::new(),
            })],
        }
    }

    fn class(name: &str, executable: u64, executed: u64) -> ClassCoverage {
        ClassCoverage::new(name, vec![MethodCoverage::new("m", executable, executed)])
    }

    #[test]
    fn fully_covered_classes_are_dropped() {
        let table = build_class_table(&report_with(vec![class("A", 10, 10), class("B", 8, 4)]))
            .expect("table");
        assert_eq!(
            table.rows(),
            &[ClassRow {
                name: "B".to_string(),
                executed_lines: 4,
                executable_lines: 8,
            }]
        );
    }

    #[test]
    fn over_covered_classes_are_dropped() {
        let table = build_class_table(&report_with(vec![class("Odd", 3, 5)])).expect("table");
        assert!(table.is_empty());
        assert_eq!(table.column_widths(), None);
        assert_eq!(table.render(), "");
    }

    #[test]
    fn methods_without_executable_lines_are_ignored() {
        let odd = ClassCoverage::new(
            "Mixed",
            vec![
                MethodCoverage::new("abstractish", 0, 3),
                MethodCoverage::new("real", 6, 2),
                MethodCoverage::new("other", 4, 4),
            ],
        );
        let table = build_class_table(&report_with(vec![odd])).expect("table");
        assert_eq!(table.rows()[0].executable_lines, 10);
        assert_eq!(table.rows()[0].executed_lines, 6);
    }

    #[test]
    fn class_without_method_entries_has_nothing_to_cover() {
        let table = build_class_table(&report_with(vec![ClassCoverage::new("Empty", vec![])]))
            .expect("table");
        assert!(table.is_empty());
    }

    #[test]
    fn qualified_name_prefers_namespace_then_package() {
        let plain = ClassCoverage::new("Foo", vec![]);
        assert_eq!(qualified_name(&plain), "Foo");

        let packaged = ClassCoverage::new("Foo", vec![]).in_package("Legacy_Core");
        assert_eq!(qualified_name(&packaged), "@Legacy_Core\\Foo");

        let both = ClassCoverage::new("Foo", vec![])
            .in_package("Legacy_Core")
            .in_namespace("App\\Model");
        assert_eq!(qualified_name(&both), "App\\Model\\Foo");

        let empty_ns = ClassCoverage::new("Foo", vec![]).in_namespace("").in_package("Pkg");
        assert_eq!(qualified_name(&empty_ns), "@Pkg\\Foo");
    }

    #[test]
    fn rows_sort_by_qualified_name() {
        let table = build_class_table(&report_with(vec![
            class("A", 4, 1).in_namespace("Zeta"),
            class("B", 4, 1).in_namespace("Alpha"),
            class("c", 4, 1),
            class("C", 4, 1),
        ]))
        .expect("table");
        let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha\\B", "C", "Zeta\\A", "c"]);
    }

    #[test]
    fn duplicate_qualified_name_keeps_last_seen() {
        let report = CoverageReport {
            nodes: vec![
                CoverageNode::File(FileCoverage {
                    path: "a/Dup.php".to_string(),
                    classes: vec![class("Dup", 10, 1).in_namespace("App")],
                    ..FileCoverage::default()
                }),
                CoverageNode::Directory(DirectoryCoverage {
                    name: "b".to_string(),
                    children: vec![CoverageNode::File(FileCoverage {
                        path: "b/Dup.php".to_string(),
                        classes: vec![class("Dup", 20, 15).in_namespace("App")],
                        ..FileCoverage::default()
                    })],
                }),
            ],
        };
        let table = build_class_table(&report).expect("table");
        assert_eq!(
            table.rows(),
            &[ClassRow {
                name: "App\\Dup".to_string(),
                executed_lines: 15,
                executable_lines: 20,
            }]
        );
    }

    #[test]
    fn duplicate_that_is_fully_covered_does_not_erase_earlier_row() {
        let report = report_with(vec![class("Dup", 10, 1), class("Dup", 5, 5)]);
        let table = build_class_table(&report).expect("table");
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].executable_lines, 10);
    }

    #[test]
    fn traits_are_listed_with_classes() {
        let report = CoverageReport {
            nodes: vec![CoverageNode::File(FileCoverage {
                path: "src/T.php".to_string(),
                classes: vec![class("Klass", 2, 1)],
                traits: vec![class("Loggable", 2, 0).in_namespace("App")],
                ..FileCoverage::default()
            })],
        };
        let table = build_class_table(&report).expect("table");
        let names: Vec<&str> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["App\\Loggable", "Klass"]);
    }

    #[test]
    fn missing_methods_collection_is_fatal() {
        let broken = ClassCoverage {
            name: "Broken".to_string(),
            namespace: None,
            full_package: None,
            methods: None,
        };
        let err = build_class_table(&report_with(vec![broken])).unwrap_err();
        assert_eq!(err.code(), "RP-2001");
        assert!(err.to_string().contains("Broken"));
        assert!(err.to_string().contains("src/All.php"));
    }

    #[test]
    fn overflowing_method_totals_are_fatal() {
        let huge = ClassCoverage::new(
            "Huge",
            vec![
                MethodCoverage::new("a", u64::MAX, 1),
                MethodCoverage::new("b", 2, 1),
            ],
        );
        let err = build_class_table(&report_with(vec![huge])).unwrap_err();
        assert_eq!(err.code(), "RP-2001");
        assert!(err.to_string().contains("Huge"));
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn render_aligns_slash_column() {
        let table = build_class_table(&report_with(vec![
            class("Big", 400, 40),
            class("Small", 8, 4),
        ]))
        .expect("table");
        assert_eq!(table.column_widths(), Some((2, 3)));
        assert_eq!(
            table.render(),
            "  10.00  40/400  Big\n  50.00   4/8    Small\n"
        );
    }

    proptest! {
        #[test]
        fn slash_and_name_columns_always_align(
            counts in prop::collection::vec((1u64..10_000, 0u64..10_000), 1..12)
        ) {
            let classes: Vec<ClassCoverage> = counts
                .iter()
                .enumerate()
                .map(|(i, (total, hit))| class(&format!("C{i:02}"), *total, (*hit).min(total - 1)))
                .collect();
            let table = build_class_table(&report_with(classes)).expect("table");
            let rendered = table.render();
            let slash_cols: Vec<usize> = rendered.lines().filter_map(|l| l.find('/')).collect();
            let name_cols: Vec<usize> = rendered.lines().filter_map(|l| l.find(" C")).collect();
            prop_assert_eq!(slash_cols.len(), counts.len());
            prop_assert!(slash_cols.windows(2).all(|w| w[0] == w[1]));
            prop_assert!(name_cols.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
