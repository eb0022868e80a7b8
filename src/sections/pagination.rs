// src/sections/pagination.rs
// Auto-pagination over get_sections

use crate::error::{Result, TestRailError};
use crate::types::{Section, SectionsPage};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Largest page TestRail accepts for get_sections
pub const SECTION_PAGE_SIZE: u64 = 250;

/// Upper bound on page requests for one fetch (500k sections)
pub const MAX_SECTION_PAGES: usize = 2000;

/// One page of sections, reduced to what the fetch loop needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPage {
    pub items: Vec<Section>,
    pub has_next: bool,
}

impl From<SectionsPage> for SectionPage {
    fn from(page: SectionsPage) -> Self {
        Self {
            has_next: page.links.has_next(),
            items: page.sections,
        }
    }
}

/// Anything that can serve a single page of sections
#[async_trait]
pub trait SectionPageSource: Send + Sync {
    async fn fetch_section_page(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        offset: u64,
        limit: u64,
    ) -> Result<SectionPage>;
}

/// Fetch every section of a project (optionally one suite), page by page.
///
/// Pages are requested strictly in sequence. A failure on any page aborts
/// the whole fetch and nothing accumulated so far is returned.
pub async fn fetch_all_sections<S>(
    source: &S,
    project_id: u64,
    suite_id: Option<u64>,
) -> Result<Vec<Section>>
where
    S: SectionPageSource + ?Sized,
{
    fetch_all_sections_capped(source, project_id, suite_id, MAX_SECTION_PAGES).await
}

pub(crate) async fn fetch_all_sections_capped<S>(
    source: &S,
    project_id: u64,
    suite_id: Option<u64>,
    max_pages: usize,
) -> Result<Vec<Section>>
where
    S: SectionPageSource + ?Sized,
{
    let mut all = Vec::new();
    let mut offset = 0;

    for page_number in 1..=max_pages {
        let page = source
            .fetch_section_page(project_id, suite_id, offset, SECTION_PAGE_SIZE)
            .await?;
        let received = page.items.len();

        debug!(
            project_id,
            suite_id = ?suite_id,
            offset,
            count = received,
            has_next = page.has_next,
            "Fetched section page"
        );

        all.extend(page.items);

        if !page.has_next {
            return Ok(all);
        }
        if received == 0 {
            warn!(
                project_id,
                offset,
                pages = page_number,
                "Upstream reported a next page but returned no sections; stopping"
            );
            return Ok(all);
        }

        offset += SECTION_PAGE_SIZE;
    }

    Err(TestRailError::PaginationLimit { pages: max_pages })
}
