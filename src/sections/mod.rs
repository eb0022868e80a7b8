// src/sections/mod.rs
// Section hierarchy discovery
//
// Pages of sections are fetched until TestRail reports no next page, the flat
// list is rebuilt into a forest from parent ids, and the forest is rendered
// both as an ASCII tree and as a flat list annotated with ancestry paths.

pub mod discovery;
pub mod pagination;
pub mod render;
pub mod tree;

pub use discovery::{
    DiscoveryBackend, DiscoveryOutcome, DiscoveryReport, ProjectSummary, SuiteChoice, SuiteSummary,
    discover, suite_prompt,
};
pub use pagination::{
    MAX_SECTION_PAGES, SECTION_PAGE_SIZE, SectionPage, SectionPageSource, fetch_all_sections,
};
pub use render::{FlatSection, flatten_tree, render_ascii_tree};
pub use tree::{TreeNode, build_section_tree};
