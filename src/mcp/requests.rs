// src/mcp/requests.rs
// MCP tool request types

use rmcp::schemars;
use serde::{Deserialize, Deserializer};

/// Distinguish an explicit `null` (`Some(None)`) from a missing field (`None`)
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Required field that may be `null`; a missing key is an error
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetSectionRequest {
    #[schemars(description = "TestRail Section ID")]
    pub section_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetSectionsRequest {
    #[schemars(description = "TestRail Project ID")]
    pub project_id: u64,
    #[schemars(description = "TestRail Suite ID (optional for single suite projects)")]
    pub suite_id: Option<u64>,
    #[schemars(description = "Max sections per page (default 250)", range(min = 1, max = 250))]
    pub limit: Option<u64>,
    #[schemars(description = "Offset for pagination")]
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverSectionsRequest {
    #[schemars(description = "TestRail Project ID")]
    pub project_id: u64,
    #[schemars(description = "Suite ID (required for multi-suite projects, auto-resolved for single-suite)")]
    pub suite_id: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionRequest {
    #[schemars(description = "TestRail Project ID")]
    pub project_id: u64,
    #[schemars(description = "Section name (required)")]
    pub name: String,
    #[schemars(description = "Section description")]
    pub description: Option<String>,
    #[schemars(description = "Parent section ID")]
    pub parent_id: Option<u64>,
    #[schemars(description = "Test Suite ID (required for multi-suite projects)")]
    pub suite_id: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveSectionRequest {
    #[schemars(description = "TestRail Section ID")]
    pub section_id: u64,
    #[serde(deserialize_with = "nullable")]
    #[schemars(required, description = "Parent section ID (null for root)")]
    pub parent_id: Option<u64>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schemars(with = "Option<u64>", description = "ID of the section to position after")]
    pub after_id: Option<Option<u64>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[schemars(description = "TestRail Section ID")]
    pub section_id: u64,
    #[schemars(description = "Section name")]
    pub name: Option<String>,
    #[schemars(description = "Section description")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSectionRequest {
    #[schemars(description = "TestRail Section ID")]
    pub section_id: u64,
    #[schemars(description = "True for soft delete (preview only)")]
    pub soft: Option<bool>,
}

// ============================================================================
// Tests
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTestsRequest {
    #[schemars(description = "TestRail Run ID")]
    pub run_id: u64,
    #[schemars(
        description = "Number of tests to return per page. If you cannot get all tests, try separating the request into multiple calls",
        range(min = 1)
    )]
    pub limit: Option<u64>,
    #[schemars(description = "Offset for pagination")]
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTestRequest {
    #[schemars(description = "TestRail Test ID")]
    pub test_id: u64,
}
