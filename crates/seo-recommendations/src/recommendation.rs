//! The recommendation engine's output shape, ahead of being persisted as a
//! `seo_types::Issue` row.

use seo_types::IssueSeverity;

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub issue_type: String,
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub fix_instructions: String,
    pub impact_description: String,
    pub affected_element: Option<String>,
    pub page_url: Option<String>,
}
