// tests/section_discovery.rs
// Discovery end to end over an in-memory backend

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use testrail_mcp::mcp::tools::sections::discover_sections;
use testrail_mcp::sections::{
    DiscoveryBackend, DiscoveryOutcome, SectionPage, SectionPageSource, build_section_tree, discover,
    flatten_tree,
};
use testrail_mcp::types::{Project, Section, Suite, SuiteMode};
use testrail_mcp::{Result, TestRailError};

// ============================================================================
// Mock backend
// ============================================================================

struct MockBackend {
    project: Project,
    suites: Vec<Suite>,
    sections: Vec<Section>,
    fail_at_offset: Option<u64>,
    page_calls: Mutex<Vec<(Option<u64>, u64, u64)>>,
    suite_lookups: Mutex<Vec<u64>>,
}

impl MockBackend {
    fn new(suite_mode: SuiteMode, suites: Vec<Suite>, sections: Vec<Section>) -> Self {
        Self {
            project: Project {
                id: 1,
                name: "Checkout".to_string(),
                announcement: None,
                is_completed: false,
                suite_mode,
                url: None,
            },
            suites,
            sections,
            fail_at_offset: None,
            page_calls: Mutex::new(Vec::new()),
            suite_lookups: Mutex::new(Vec::new()),
        }
    }

    fn page_calls(&self) -> Vec<(Option<u64>, u64, u64)> {
        self.page_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SectionPageSource for MockBackend {
    async fn fetch_section_page(
        &self,
        _project_id: u64,
        suite_id: Option<u64>,
        offset: u64,
        limit: u64,
    ) -> Result<SectionPage> {
        self.page_calls.lock().unwrap().push((suite_id, offset, limit));
        if self.fail_at_offset == Some(offset) {
            return Err(TestRailError::Api {
                status: 503,
                message: "maintenance".to_string(),
            }
            .context("Failed to get sections for project 1"));
        }

        let start = (offset as usize).min(self.sections.len());
        let end = (start + limit as usize).min(self.sections.len());
        Ok(SectionPage {
            items: self.sections[start..end].to_vec(),
            has_next: end < self.sections.len(),
        })
    }
}

#[async_trait]
impl DiscoveryBackend for MockBackend {
    async fn load_project(&self, project_id: u64) -> Result<Project> {
        if project_id == self.project.id {
            Ok(self.project.clone())
        } else {
            Err(TestRailError::Api {
                status: 400,
                message: "Field :project_id is not a valid or accessible project.".to_string(),
            })
        }
    }

    async fn list_suites(&self, _project_id: u64) -> Result<Vec<Suite>> {
        Ok(self.suites.clone())
    }

    async fn load_suite(&self, suite_id: u64) -> Result<Suite> {
        self.suite_lookups.lock().unwrap().push(suite_id);
        self.suites
            .iter()
            .find(|s| s.id == suite_id)
            .cloned()
            .ok_or_else(|| TestRailError::Api {
                status: 400,
                message: "Field :suite_id is not a valid test suite.".to_string(),
            })
    }
}

fn suite(id: u64, name: &str) -> Suite {
    Suite {
        id,
        name: name.to_string(),
        description: None,
        project_id: Some(1),
        url: None,
    }
}

fn section(id: u64, name: &str, parent_id: Option<u64>, depth: u32) -> Section {
    Section {
        id,
        name: name.to_string(),
        description: None,
        suite_id: Some(1),
        parent_id,
        depth,
        display_order: None,
    }
}

fn sample_sections() -> Vec<Section> {
    vec![
        section(1, "Payments", None, 0),
        section(2, "Cards", Some(1), 1),
        section(3, "Refunds", Some(1), 1),
        section(4, "Visa", Some(2), 2),
        section(5, "Orphan", Some(99), 1),
    ]
}

fn parse(envelope: &str) -> Value {
    serde_json::from_str(envelope).expect("tool output is JSON")
}

// ============================================================================
// Suite resolution
// ============================================================================

#[tokio::test]
async fn test_single_suite_project_uses_first_suite() {
    let backend = MockBackend::new(SuiteMode::Single, vec![suite(4, "Master")], sample_sections());

    let outcome = discover(&backend, 1, None).await.unwrap();
    let DiscoveryOutcome::Discovered(report) = outcome else {
        panic!("expected a report");
    };

    assert_eq!(report.suite.id, Some(4));
    assert_eq!(report.suite.name, "Master");
    assert_eq!(report.project.name, "Checkout");
    assert_eq!(backend.page_calls(), vec![(Some(4), 0, 250)]);
}

#[tokio::test]
async fn test_multi_suite_without_id_lists_choices() {
    let backend = MockBackend::new(
        SuiteMode::Multiple,
        vec![suite(4, "Web"), suite(5, "Mobile")],
        sample_sections(),
    );

    let outcome = discover(&backend, 1, None).await.unwrap();
    match outcome {
        DiscoveryOutcome::SuiteRequired { suites, project } => {
            assert_eq!(project.id, 1);
            let listed: Vec<(u64, &str)> = suites.iter().map(|s| (s.id, s.name.as_str())).collect();
            assert_eq!(listed, vec![(4, "Web"), (5, "Mobile")]);
        }
        other => panic!("expected SuiteRequired, got {:?}", other),
    }
    assert!(backend.page_calls().is_empty());
}

#[tokio::test]
async fn test_multi_suite_with_single_suite_proceeds() {
    let backend = MockBackend::new(SuiteMode::Multiple, vec![suite(8, "Only")], sample_sections());
    let outcome = discover(&backend, 1, None).await.unwrap();
    assert!(matches!(outcome, DiscoveryOutcome::Discovered(ref r) if r.suite.id == Some(8)));
}

#[tokio::test]
async fn test_explicit_suite_id_is_looked_up() {
    let backend = MockBackend::new(
        SuiteMode::Multiple,
        vec![suite(4, "Web"), suite(5, "Mobile")],
        sample_sections(),
    );

    let DiscoveryOutcome::Discovered(report) = discover(&backend, 1, Some(5)).await.unwrap() else {
        panic!("expected a report");
    };
    assert_eq!(report.suite.name, "Mobile");
    assert_eq!(*backend.suite_lookups.lock().unwrap(), vec![5]);
    assert_eq!(backend.page_calls(), vec![(Some(5), 0, 250)]);
}

#[tokio::test]
async fn test_project_without_suites() {
    let backend = MockBackend::new(SuiteMode::Single, vec![], sample_sections());
    let DiscoveryOutcome::Discovered(report) = discover(&backend, 1, None).await.unwrap() else {
        panic!("expected a report");
    };
    assert_eq!(report.suite.id, None);
    assert_eq!(report.suite.name, "");
    assert_eq!(backend.page_calls(), vec![(None, 0, 250)]);
}

// ============================================================================
// Tree and flat projections
// ============================================================================

#[tokio::test]
async fn test_report_tree_and_paths() {
    let backend = MockBackend::new(SuiteMode::Single, vec![suite(4, "Master")], sample_sections());
    let DiscoveryOutcome::Discovered(report) = discover(&backend, 1, None).await.unwrap() else {
        panic!("expected a report");
    };

    assert_eq!(report.total_sections, 5);
    assert_eq!(
        report.tree,
        "Payments (1)\n├── Cards (2)\n│   └── Visa (4)\n└── Refunds (3)\nOrphan (5)"
    );

    let paths: Vec<(u64, &str)> = report
        .sections
        .iter()
        .map(|s| (s.id, s.path.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![
            (1, "Payments"),
            (2, "Payments > Cards"),
            (4, "Payments > Cards > Visa"),
            (3, "Payments > Refunds"),
            (5, "Orphan"),
        ]
    );
}

#[tokio::test]
async fn test_large_project_pages_through_everything() {
    let mut sections = vec![section(1, "Root", None, 0)];
    sections.extend((2..=537).map(|id| section(id, &format!("Child {}", id), Some(1), 1)));
    let backend = MockBackend::new(SuiteMode::Single, vec![suite(4, "Master")], sections);

    let DiscoveryOutcome::Discovered(report) = discover(&backend, 1, None).await.unwrap() else {
        panic!("expected a report");
    };

    assert_eq!(report.total_sections, 537);
    assert_eq!(report.sections.len(), 537);
    let offsets: Vec<u64> = backend.page_calls().iter().map(|(_, offset, _)| *offset).collect();
    assert_eq!(offsets, vec![0, 250, 500]);
}

#[tokio::test]
async fn test_failure_mid_pagination_returns_nothing() {
    let mut sections = vec![section(1, "Root", None, 0)];
    sections.extend((2..=300).map(|id| section(id, "Child", Some(1), 1)));
    let mut backend = MockBackend::new(SuiteMode::Single, vec![suite(4, "Master")], sections);
    backend.fail_at_offset = Some(250);

    let err = discover(&backend, 1, None).await.unwrap_err();
    assert!(err.to_string().contains("maintenance"));
    assert!(matches!(err.root_cause(), TestRailError::Api { status: 503, .. }));
}

#[test]
fn test_flatten_preserves_node_count_with_shuffled_input() {
    let mut sections = sample_sections();
    sections.reverse();
    let forest = build_section_tree(&sections);
    assert_eq!(flatten_tree(&forest).len(), sections.len());
    assert_eq!(forest.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5, 1]);
}

// ============================================================================
// Tool envelopes
// ============================================================================

#[tokio::test]
async fn test_discover_tool_success_envelope() {
    let backend = MockBackend::new(SuiteMode::Single, vec![suite(4, "Master")], sample_sections());

    let body = parse(&discover_sections(&backend, 1, None).await.unwrap());
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Discovered 5 sections");
    assert_eq!(body["data"]["totalSections"], 5);
    assert_eq!(body["data"]["project"]["suite_mode"], 1);
    assert_eq!(body["data"]["suite"]["name"], "Master");
    assert_eq!(body["data"]["sections"][2]["path"], "Payments > Cards > Visa");
    assert!(body["data"]["sections"][0].get("children").is_none());
}

#[tokio::test]
async fn test_discover_tool_ambiguity_envelope() {
    let backend = MockBackend::new(
        SuiteMode::Multiple,
        vec![suite(4, "Web"), suite(5, "Mobile")],
        sample_sections(),
    );

    let body = parse(&discover_sections(&backend, 1, None).await.unwrap_err());
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Multi-suite project. Specify suiteId."));
    assert!(message.contains("  - Web (ID: 4)"));
    assert!(message.contains("  - Mobile (ID: 5)"));
    assert_eq!(body["data"]["suites"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_discover_tool_upstream_failure_envelope() {
    let backend = MockBackend::new(SuiteMode::Single, vec![], sample_sections());

    let body = parse(&discover_sections(&backend, 42, None).await.unwrap_err());
    assert_eq!(body["message"], "Error discovering sections for project 42");
    assert!(body["error"].as_str().unwrap().contains("not a valid or accessible project"));
}
