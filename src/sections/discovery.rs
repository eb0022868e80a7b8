// src/sections/discovery.rs
// Section discovery: resolve the suite, fetch every page, build and render the tree

use super::pagination::{SectionPageSource, fetch_all_sections};
use super::render::{FlatSection, flatten_tree, render_ascii_tree};
use super::tree::build_section_tree;
use crate::error::Result;
use crate::types::{Project, Suite, SuiteMode};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Upstream calls discovery needs beyond section pages
#[async_trait]
pub trait DiscoveryBackend: SectionPageSource {
    async fn load_project(&self, project_id: u64) -> Result<Project>;

    async fn list_suites(&self, project_id: u64) -> Result<Vec<Suite>>;

    async fn load_suite(&self, suite_id: u64) -> Result<Suite>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub suite_mode: SuiteMode,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            suite_mode: project.suite_mode,
        }
    }
}

/// Suite the sections were read from. `id` is absent when the project has no suites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub id: Option<u64>,
    pub name: String,
}

/// A suite the caller may pick when discovery needs disambiguation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteChoice {
    pub id: u64,
    pub name: String,
}

impl From<&Suite> for SuiteChoice {
    fn from(suite: &Suite) -> Self {
        Self {
            id: suite.id,
            name: suite.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub project: ProjectSummary,
    pub suite: SuiteSummary,
    pub total_sections: usize,
    /// ASCII drawing of the hierarchy
    pub tree: String,
    /// Pre-order list of every section with its full path
    pub sections: Vec<FlatSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Discovered(DiscoveryReport),
    /// Multi-suite project called without a suite id; nothing was fetched
    SuiteRequired {
        project: ProjectSummary,
        suites: Vec<SuiteChoice>,
    },
}

/// Message listing the suites a caller can choose from
pub fn suite_prompt(suites: &[SuiteChoice]) -> String {
    let listing = suites
        .iter()
        .map(|s| format!("  - {} (ID: {})", s.name, s.id))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Multi-suite project. Specify suiteId. Available suites:\n{}",
        listing
    )
}

enum SuiteResolution {
    Resolved(SuiteSummary),
    Ambiguous(Vec<SuiteChoice>),
}

async fn resolve_suite<B>(backend: &B, project: &Project, suite_id: Option<u64>) -> Result<SuiteResolution>
where
    B: DiscoveryBackend + ?Sized,
{
    if let Some(id) = suite_id {
        let suite = backend.load_suite(id).await?;
        return Ok(SuiteResolution::Resolved(SuiteSummary {
            id: Some(id),
            name: suite.name,
        }));
    }

    let suites = backend.list_suites(project.id).await?;
    debug!(project_id = project.id, suites = suites.len(), suite_mode = ?project.suite_mode, "Listed suites");

    if project.suite_mode == SuiteMode::Multiple && suites.len() > 1 {
        return Ok(SuiteResolution::Ambiguous(
            suites.iter().map(SuiteChoice::from).collect(),
        ));
    }

    Ok(SuiteResolution::Resolved(match suites.into_iter().next() {
        Some(first) => SuiteSummary {
            id: Some(first.id),
            name: first.name,
        },
        None => SuiteSummary {
            id: None,
            name: String::new(),
        },
    }))
}

/// Fetch all sections of a project/suite and project them as a tree and a flat list
#[instrument(skip(backend))]
pub async fn discover<B>(backend: &B, project_id: u64, suite_id: Option<u64>) -> Result<DiscoveryOutcome>
where
    B: DiscoveryBackend + ?Sized,
{
    let project = backend.load_project(project_id).await?;
    let summary = ProjectSummary::from(&project);

    let suite = match resolve_suite(backend, &project, suite_id).await? {
        SuiteResolution::Resolved(suite) => suite,
        SuiteResolution::Ambiguous(suites) => {
            info!(project_id, candidates = suites.len(), "Suite id required for multi-suite project");
            return Ok(DiscoveryOutcome::SuiteRequired {
                project: summary,
                suites,
            });
        }
    };

    let sections = fetch_all_sections(backend, project_id, suite.id).await?;
    let forest = build_section_tree(&sections);
    let tree = render_ascii_tree(&forest);
    let flat = flatten_tree(&forest);

    info!(
        project_id,
        suite_id = ?suite.id,
        sections = sections.len(),
        roots = forest.len(),
        "Discovered sections"
    );

    Ok(DiscoveryOutcome::Discovered(DiscoveryReport {
        project: summary,
        suite,
        total_sections: sections.len(),
        tree,
        sections: flat,
    }))
}
