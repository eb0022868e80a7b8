// src/client/sections.rs
// Section endpoints

use super::TestRailClient;
use crate::error::{Result, TestRailError};
use crate::sections::{SECTION_PAGE_SIZE, SectionPage, SectionPageSource};
use crate::types::{AddSection, MoveSection, Section, SectionsPage, UpdateSection};
use async_trait::async_trait;
use serde_json::json;

impl TestRailClient {
    /// Get a specific section
    pub async fn get_section(&self, section_id: u64) -> Result<Section> {
        self.get(&format!("get_section/{}", section_id), &[])
            .await
            .map_err(|e| e.context(format!("Failed to get section {}", section_id)))
    }

    /// Get one page of sections for a project, optionally limited to a suite
    pub async fn get_sections(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        offset: u64,
        limit: u64,
    ) -> Result<SectionsPage> {
        if limit == 0 || limit > SECTION_PAGE_SIZE {
            return Err(TestRailError::InvalidInput(format!(
                "limit must be between 1 and {}, got {}",
                SECTION_PAGE_SIZE, limit
            )));
        }

        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(suite_id) = suite_id {
            query.push(("suite_id", suite_id.to_string()));
        }

        self.get(&format!("get_sections/{}", project_id), &query)
            .await
            .map_err(|e| e.context(format!("Failed to get sections for project {}", project_id)))
    }

    /// Add a new section
    pub async fn add_section(&self, project_id: u64, section: &AddSection) -> Result<Section> {
        self.post(&format!("add_section/{}", project_id), &[], section)
            .await
            .map_err(|e| e.context(format!("Failed to add section to project {}", project_id)))
    }

    /// Move a section to a different parent or position
    pub async fn move_section(&self, section_id: u64, target: &MoveSection) -> Result<Section> {
        self.post(&format!("move_section/{}", section_id), &[], target)
            .await
            .map_err(|e| e.context(format!("Failed to move section {}", section_id)))
    }

    /// Update an existing section
    pub async fn update_section(&self, section_id: u64, update: &UpdateSection) -> Result<Section> {
        self.post(&format!("update_section/{}", section_id), &[], update)
            .await
            .map_err(|e| e.context(format!("Failed to update section {}", section_id)))
    }

    /// Delete a section. With `soft`, TestRail only reports what would be deleted.
    pub async fn delete_section(&self, section_id: u64, soft: bool) -> Result<()> {
        let query = if soft {
            vec![("soft", "1".to_string())]
        } else {
            Vec::new()
        };
        self.post_empty(&format!("delete_section/{}", section_id), &query, &json!({}))
            .await
            .map_err(|e| e.context(format!("Failed to delete section {}", section_id)))
    }
}

#[async_trait]
impl SectionPageSource for TestRailClient {
    async fn fetch_section_page(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        offset: u64,
        limit: u64,
    ) -> Result<SectionPage> {
        Ok(self
            .get_sections(project_id, suite_id, offset, limit)
            .await?
            .into())
    }
}
