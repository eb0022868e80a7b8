// src/client/suites.rs
// Suite endpoints

use super::TestRailClient;
use crate::error::Result;
use crate::types::{Suite, SuitesResponse};

impl TestRailClient {
    /// List the suites of a project
    pub async fn get_suites(&self, project_id: u64) -> Result<Vec<Suite>> {
        self.get::<SuitesResponse>(&format!("get_suites/{}", project_id), &[])
            .await
            .map(SuitesResponse::into_suites)
            .map_err(|e| e.context(format!("Failed to get suites for project {}", project_id)))
    }

    /// Get a specific suite
    pub async fn get_suite(&self, suite_id: u64) -> Result<Suite> {
        self.get(&format!("get_suite/{}", suite_id), &[])
            .await
            .map_err(|e| e.context(format!("Failed to get suite {}", suite_id)))
    }
}
