// src/types.rs
// TestRail wire types

use serde::{Deserialize, Serialize};

// ============================================================================
// Sections
// ============================================================================

/// A section as returned by get_section / get_sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub suite_id: Option<u64>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Hierarchy level as reported by TestRail; never recomputed locally
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub display_order: Option<u32>,
}

/// `_links` object of every paginated TestRail response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl PageLinks {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page of get_sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionsPage {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Body of add_section
#[derive(Debug, Clone, Serialize)]
pub struct AddSection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

/// Body of move_section.
///
/// `parent_id` is always sent (`null` moves the section to the root).
/// `after_id` is omitted when `None` and sent as `null` for `Some(None)`.
#[derive(Debug, Clone, Serialize)]
pub struct MoveSection {
    pub parent_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<Option<u64>>,
}

/// Body of update_section
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Projects and suites
// ============================================================================

/// How a project organises its test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SuiteMode {
    /// A single repository for all cases
    Single,
    /// Single repository with baseline support
    SingleWithBaselines,
    /// Multiple suites
    Multiple,
    Unknown(u8),
}

impl From<u8> for SuiteMode {
    fn from(value: u8) -> Self {
        match value {
            1 => SuiteMode::Single,
            2 => SuiteMode::SingleWithBaselines,
            3 => SuiteMode::Multiple,
            other => SuiteMode::Unknown(other),
        }
    }
}

impl From<SuiteMode> for u8 {
    fn from(mode: SuiteMode) -> Self {
        match mode {
            SuiteMode::Single => 1,
            SuiteMode::SingleWithBaselines => 2,
            SuiteMode::Multiple => 3,
            SuiteMode::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub announcement: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    pub suite_mode: SuiteMode,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// get_suites answers either with a bare array or a paginated envelope
/// depending on the TestRail version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SuitesResponse {
    List(Vec<Suite>),
    Paginated { suites: Vec<Suite> },
}

impl SuitesResponse {
    pub fn into_suites(self) -> Vec<Suite> {
        match self {
            SuitesResponse::List(suites) | SuitesResponse::Paginated { suites } => suites,
        }
    }
}

// ============================================================================
// Tests (test instances inside a run)
// ============================================================================

/// A test instance. Custom fields vary per installation and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub case_id: Option<u64>,
    #[serde(default)]
    pub run_id: Option<u64>,
    #[serde(default)]
    pub status_id: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One page of get_tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestsPage {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
    #[serde(default)]
    pub tests: Vec<Test>,
}
