// src/mcp/tools/sections.rs
// Section tools

use crate::client::TestRailClient;
use crate::mcp::responses::{error_response, error_response_with_data, success_response};
use crate::sections::{DiscoveryBackend, DiscoveryOutcome, SECTION_PAGE_SIZE, discover, suite_prompt};
use crate::types::{AddSection, MoveSection, UpdateSection};
use serde_json::json;

pub async fn get_section(client: &TestRailClient, section_id: u64) -> Result<String, String> {
    match client.get_section(section_id).await {
        Ok(section) => Ok(success_response(
            "Section retrieved successfully",
            Some(json!({ "section": section })),
        )),
        Err(e) => Err(error_response(
            format!("Error fetching section {}", section_id),
            &e.to_user_string(),
        )),
    }
}

pub async fn get_sections(
    client: &TestRailClient,
    project_id: u64,
    suite_id: Option<u64>,
    limit: Option<u64>,
    offset: Option<u64>,
) -> Result<String, String> {
    let limit = limit.unwrap_or(SECTION_PAGE_SIZE);
    let offset = offset.unwrap_or(0);

    match client.get_sections(project_id, suite_id, offset, limit).await {
        Ok(page) => Ok(success_response(
            "Sections retrieved successfully",
            Some(json!({
                "sections": page.sections,
                "pagination": {
                    "limit": limit,
                    "offset": offset,
                    "total": page.size,
                    "hasMore": page.links.has_next(),
                },
            })),
        )),
        Err(e) => Err(error_response(
            format!("Error fetching sections for project {}", project_id),
            &e.to_user_string(),
        )),
    }
}

pub async fn add_section(
    client: &TestRailClient,
    project_id: u64,
    name: String,
    description: Option<String>,
    suite_id: Option<u64>,
    parent_id: Option<u64>,
) -> Result<String, String> {
    let body = AddSection {
        name,
        description,
        suite_id,
        parent_id,
    };

    match client.add_section(project_id, &body).await {
        Ok(section) => Ok(success_response(
            "Section created successfully",
            Some(json!({ "section": section })),
        )),
        Err(e) => Err(error_response("Error creating section", &e.to_user_string())),
    }
}

pub async fn move_section(
    client: &TestRailClient,
    section_id: u64,
    parent_id: Option<u64>,
    after_id: Option<Option<u64>>,
) -> Result<String, String> {
    let target = MoveSection { parent_id, after_id };

    match client.move_section(section_id, &target).await {
        Ok(section) => Ok(success_response(
            "Section moved successfully",
            Some(json!({ "section": section })),
        )),
        Err(e) => Err(error_response(
            format!("Error moving section {}", section_id),
            &e.to_user_string(),
        )),
    }
}

pub async fn update_section(
    client: &TestRailClient,
    section_id: u64,
    name: Option<String>,
    description: Option<String>,
) -> Result<String, String> {
    // Empty strings mean "leave unchanged"
    let update = UpdateSection {
        name: name.filter(|n| !n.is_empty()),
        description: description.filter(|d| !d.is_empty()),
    };

    match client.update_section(section_id, &update).await {
        Ok(section) => Ok(success_response(
            "Section updated successfully",
            Some(json!({ "section": section })),
        )),
        Err(e) => Err(error_response(
            format!("Error updating section {}", section_id),
            &e.to_user_string(),
        )),
    }
}

pub async fn delete_section(
    client: &TestRailClient,
    section_id: u64,
    soft: Option<bool>,
) -> Result<String, String> {
    match client.delete_section(section_id, soft.unwrap_or(false)).await {
        Ok(()) => Ok(success_response(
            format!("Section {} deleted successfully", section_id),
            None,
        )),
        Err(e) => Err(error_response(
            format!("Error deleting section {}", section_id),
            &e.to_user_string(),
        )),
    }
}

/// Fetch every section of a project and return the tree plus a flat list with paths
pub async fn discover_sections<B>(
    backend: &B,
    project_id: u64,
    suite_id: Option<u64>,
) -> Result<String, String>
where
    B: DiscoveryBackend + ?Sized,
{
    match discover(backend, project_id, suite_id).await {
        Ok(DiscoveryOutcome::Discovered(report)) => Ok(success_response(
            format!("Discovered {} sections", report.total_sections),
            Some(json!(report)),
        )),
        Ok(DiscoveryOutcome::SuiteRequired { project, suites }) => {
            let msg = suite_prompt(&suites);
            Err(error_response_with_data(
                msg.clone(),
                &msg,
                json!({ "project": project, "suites": suites }),
            ))
        }
        Err(e) => Err(error_response(
            format!("Error discovering sections for project {}", project_id),
            &e.to_user_string(),
        )),
    }
}
