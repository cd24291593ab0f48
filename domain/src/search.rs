//! Global search across scenarios, roadmaps, reports and app pages.
//!
//! Matching is a case-insensitive substring test on the trimmed query.
//! Results keep a fixed section order: scenarios, roadmaps, the reports
//! entry, then navigation pages.

use crate::roadmap::Roadmap;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Queries shorter than this (after trimming) return nothing.
pub const MIN_QUERY_LEN: usize = 2;

const REPORT_KEYWORDS: &[&str] = &[
    "report",
    "export",
    "csv",
    "monthly",
    "cash flow",
    "expense",
    "runway",
    "revenue",
    "investor",
];

struct PageEntry {
    keyword: &'static str,
    title: &'static str,
    description: &'static str,
    link: &'static str,
}

const PAGES: &[PageEntry] = &[
    PageEntry {
        keyword: "dashboard",
        title: "Dashboard",
        description: "View your startup metrics and insights",
        link: "/",
    },
    PageEntry {
        keyword: "scenario",
        title: "Scenarios",
        description: "Test financial impact of business decisions",
        link: "/scenarios",
    },
    PageEntry {
        keyword: "idea",
        title: "Ideation",
        description: "AI-powered pivot and growth ideas",
        link: "/ideation",
    },
    PageEntry {
        keyword: "roadmap",
        title: "Roadmaps",
        description: "Execute your strategies with actionable plans",
        link: "/roadmaps",
    },
    PageEntry {
        keyword: "setting",
        title: "Settings",
        description: "Manage your account and preferences",
        link: "/settings",
    },
    PageEntry {
        keyword: "import",
        title: "Import Data",
        description: "Upload financial data in Settings",
        link: "/settings",
    },
    PageEntry {
        keyword: "password",
        title: "Security Settings",
        description: "Change your password",
        link: "/settings",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    Scenario,
    Roadmap,
    Report,
    Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SearchResultType,
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Lower-cased, trimmed search term, or `None` when the query is too short.
pub fn normalize_query(query: &str) -> Option<String> {
    let term = query.trim().to_lowercase();
    if term.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(term)
    }
}

/// Match an already normalized term against the fetched entities and the
/// static report and page entries.
pub fn search(term: &str, scenarios: &[Scenario], roadmaps: &[Roadmap]) -> Vec<SearchResult> {
    let mut results = Vec::new();

    results.extend(
        scenarios
            .iter()
            .filter(|s| contains(&s.name, term) || contains(&s.kind, term))
            .map(scenario_result),
    );

    results.extend(
        roadmaps
            .iter()
            .filter(|r| {
                contains(&r.title, term)
                    || r.description.as_deref().is_some_and(|d| contains(d, term))
            })
            .map(roadmap_result),
    );

    if REPORT_KEYWORDS.iter().any(|kw| overlaps(kw, term)) {
        results.push(SearchResult {
            id: "reports".to_string(),
            kind: SearchResultType::Report,
            title: "Financial Reports".to_string(),
            description: "Generate and download CSV reports".to_string(),
            link: "/".to_string(),
        });
    }

    for page in PAGES.iter().filter(|p| overlaps(p.keyword, term)) {
        let duplicate = results
            .iter()
            .any(|r| r.link == page.link && r.title == page.title);
        if !duplicate {
            results.push(SearchResult {
                id: format!("page-{}", page.keyword),
                kind: SearchResultType::Page,
                title: page.title.to_string(),
                description: page.description.to_string(),
                link: page.link.to_string(),
            });
        }
    }

    results
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Either string contains the other.
fn overlaps(keyword: &str, term: &str) -> bool {
    keyword.contains(term) || term.contains(keyword)
}

fn scenario_result(scenario: &Scenario) -> SearchResult {
    let delta = scenario.result.runway_delta;
    let sign = if delta >= 0.0 { "+" } else { "" };
    SearchResult {
        id: scenario.id.clone(),
        kind: SearchResultType::Scenario,
        title: scenario.name.clone(),
        description: format!(
            "{} scenario • {}{:.1} months runway",
            scenario.kind, sign, delta
        ),
        link: format!("/scenarios/{}", scenario.id),
    }
}

fn roadmap_result(roadmap: &Roadmap) -> SearchResult {
    let description = roadmap
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("{} milestones", roadmap.milestones.len()));
    SearchResult {
        id: roadmap.id.clone(),
        kind: SearchResultType::Roadmap,
        title: roadmap.title.clone(),
        description,
        link: format!("/roadmaps/{}", roadmap.id),
    }
}
