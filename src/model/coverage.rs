//! In-memory coverage report tree, as handed over by the instrumentation
//! collaborator: directories nest, files carry line totals and the classes
//! and traits they declare.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RpError};

/// Root of a coverage report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub nodes: Vec<CoverageNode>,
}

/// A directory or file in the report tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoverageNode {
    Directory(DirectoryCoverage),
    File(FileCoverage),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryCoverage {
    pub name: String,
    #[serde(default)]
    pub children: Vec<CoverageNode>,
}

/// Line totals for one source file plus its declared classes and traits.
///
/// File totals include lines outside any class, so they are the source of
/// truth for the overall percentage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileCoverage {
    pub path: String,
    #[serde(default)]
    pub executable_lines: u64,
    #[serde(default)]
    pub executed_lines: u64,
    #[serde(default)]
    pub classes: Vec<ClassCoverage>,
    #[serde(default)]
    pub traits: Vec<ClassCoverage>,
}

/// A class or trait record with optional naming metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassCoverage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Legacy package annotation, used when no namespace is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_package: Option<String>,
    /// `None` means the collaborator sent a record without a method list.
    #[serde(default)]
    pub methods: Option<Vec<MethodCoverage>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodCoverage {
    pub name: String,
    pub executable_lines: u64,
    pub executed_lines: u64,
}

/// Executed / executable line totals across a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub executed_lines: u64,
    pub executable_lines: u64,
}

impl CoverageReport {
    /// Every file in the tree, depth-first in declaration order.
    #[must_use]
    pub fn files(&self) -> Vec<&FileCoverage> {
        let mut files = Vec::new();
        collect_files(&self.nodes, &mut files);
        files
    }

    /// Totals summed over every file in the tree. Fails if a total does not
    /// fit in a `u64`.
    pub fn summary(&self) -> Result<CoverageSummary> {
        self.files()
            .into_iter()
            .try_fold(CoverageSummary::default(), |acc, file| {
                let overflow = || RpError::MalformedCoverage {
                    file: file.path.clone(),
                    class: "-".to_string(),
                    details: "report line totals overflow".to_string(),
                };
                Ok(CoverageSummary {
                    executed_lines: acc
                        .executed_lines
                        .checked_add(file.executed_lines)
                        .ok_or_else(overflow)?,
                    executable_lines: acc
                        .executable_lines
                        .checked_add(file.executable_lines)
                        .ok_or_else(overflow)?,
                })
            })
    }
}

fn collect_files<'a>(nodes: &'a [CoverageNode], out: &mut Vec<&'a FileCoverage>) {
    for node in nodes {
        match node {
            CoverageNode::File(file) => out.push(file),
            CoverageNode::Directory(dir) => collect_files(&dir.children, out),
        }
    }
}

impl FileCoverage {
    /// Classes followed by traits.
    pub fn declarations(&self) -> impl Iterator<Item = &ClassCoverage> {
        self.classes.iter().chain(self.traits.iter())
    }
}

impl ClassCoverage {
    /// A bare class (no namespace or package) with the given methods.
    #[must_use]
    pub fn new(name: impl Into<String>, methods: Vec<MethodCoverage>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            full_package: None,
            methods: Some(methods),
        }
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn in_package(mut self, full_package: impl Into<String>) -> Self {
        self.full_package = Some(full_package.into());
        self
    }
}

impl MethodCoverage {
    #[must_use]
    pub fn new(name: impl Into<String>, executable_lines: u64, executed_lines: u64) -> Self {
        Self {
            name: name.into(),
            executable_lines,
            executed_lines,
        }
    }
}
