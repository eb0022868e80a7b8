// src/mcp/mod.rs
// MCP Server implementation

mod handler;
pub mod requests;
pub mod responses;
pub mod tools;

use crate::client::TestRailClient;
use requests::*;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    tool, tool_router,
};
use std::sync::Arc;

/// MCP Server state
#[derive(Clone)]
pub struct TestRailServer {
    pub client: Arc<TestRailClient>,
    tool_router: ToolRouter<Self>,
}

impl TestRailServer {
    pub fn new(client: Arc<TestRailClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of every registered tool
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

#[tool_router]
impl TestRailServer {
    #[tool(name = "getSection", description = "Retrieves details of a specific section by ID")]
    async fn get_section(
        &self,
        Parameters(req): Parameters<GetSectionRequest>,
    ) -> Result<String, String> {
        tools::sections::get_section(&self.client, req.section_id).await
    }

    #[tool(
        name = "getSections",
        description = "Retrieves sections for a project/suite with pagination. REQUIRED: projectId. OPTIONAL: suiteId, limit (default 250, max 250), offset (default 0). Returns sections array and pagination metadata."
    )]
    async fn get_sections(
        &self,
        Parameters(req): Parameters<GetSectionsRequest>,
    ) -> Result<String, String> {
        tools::sections::get_sections(&self.client, req.project_id, req.suite_id, req.limit, req.offset).await
    }

    #[tool(name = "addSection", description = "Creates a new section in a TestRail project")]
    async fn add_section(
        &self,
        Parameters(req): Parameters<AddSectionRequest>,
    ) -> Result<String, String> {
        tools::sections::add_section(
            &self.client,
            req.project_id,
            req.name,
            req.description,
            req.suite_id,
            req.parent_id,
        )
        .await
    }

    #[tool(name = "moveSection", description = "Moves a section to a new position in the test hierarchy")]
    async fn move_section(
        &self,
        Parameters(req): Parameters<MoveSectionRequest>,
    ) -> Result<String, String> {
        tools::sections::move_section(&self.client, req.section_id, req.parent_id, req.after_id).await
    }

    #[tool(name = "updateSection", description = "Updates an existing section")]
    async fn update_section(
        &self,
        Parameters(req): Parameters<UpdateSectionRequest>,
    ) -> Result<String, String> {
        tools::sections::update_section(&self.client, req.section_id, req.name, req.description).await
    }

    #[tool(name = "deleteSection", description = "Deletes a section")]
    async fn delete_section(
        &self,
        Parameters(req): Parameters<DeleteSectionRequest>,
    ) -> Result<String, String> {
        tools::sections::delete_section(&self.client, req.section_id, req.soft).await
    }

    #[tool(
        name = "discoverSections",
        description = "Fetches ALL sections for a project by auto-paginating, then returns a structured tree with ASCII visualization and flat section list with paths. Use this to generate a knowledge file for a new project."
    )]
    async fn discover_sections(
        &self,
        Parameters(req): Parameters<DiscoverSectionsRequest>,
    ) -> Result<String, String> {
        tools::sections::discover_sections(self.client.as_ref(), req.project_id, req.suite_id).await
    }

    #[tool(name = "getTests", description = "Retrieves a list of tests for a test run")]
    async fn get_tests(
        &self,
        Parameters(req): Parameters<GetTestsRequest>,
    ) -> Result<String, String> {
        tools::tests::get_tests(&self.client, req.run_id, req.limit, req.offset).await
    }

    #[tool(
        name = "getTest",
        description = "Retrieves complete details for a single test, including all fields such as status, type, and results"
    )]
    async fn get_test(
        &self,
        Parameters(req): Parameters<GetTestRequest>,
    ) -> Result<String, String> {
        tools::tests::get_test(&self.client, req.test_id).await
    }
}
