// src/client/projects.rs
// Project endpoints

use super::TestRailClient;
use crate::error::Result;
use crate::types::Project;

impl TestRailClient {
    /// Get a specific project
    pub async fn get_project(&self, project_id: u64) -> Result<Project> {
        self.get(&format!("get_project/{}", project_id), &[])
            .await
            .map_err(|e| e.context(format!("Failed to get project {}", project_id)))
    }
}
