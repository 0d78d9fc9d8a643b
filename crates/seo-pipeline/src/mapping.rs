//! Pure mapping functions from the analyzer/scorer/recommendation/keyword
//! crates' own output shapes onto the persisted `seo_types` row types. Kept
//! separate from the sink and driver so each can stay focused on
//! orchestration.

use chrono::Utc;
use seo_extraction::AnalyzedPage;
use seo_keywords::KeywordOpportunity;
use seo_recommendations::Recommendation;
use seo_scoring::PageScore;
use seo_types::{Issue, Keyword, Link, LinkType, PageUpsert, Score};
use uuid::Uuid;

const MAX_LINKS_PER_PAGE: usize = 200;

pub fn page_upsert(analyzed: &AnalyzedPage, job_id: Uuid) -> PageUpsert {
    PageUpsert {
        crawl_job_id: Some(job_id),
        canonical_url: analyzed.canonical_url.clone(),
        status_code: if analyzed.status_code == 0 { None } else { Some(analyzed.status_code) },
        depth: analyzed.depth,
        is_indexable: analyzed.is_indexable,
        is_canonical: analyzed.is_canonical,
        title: analyzed.title.clone(),
        title_length: analyzed.title_length,
        meta_description: analyzed.meta_description.clone(),
        meta_description_length: analyzed.meta_description_length,
        meta_robots: analyzed.meta_robots.clone(),
        canonical_tag: analyzed.canonical_tag.clone(),
        h1_tags: analyzed.h1_tags.clone(),
        h2_tags: analyzed.h2_tags.clone(),
        h3_tags: analyzed.h3_tags.clone(),
        h4_tags: analyzed.h4_tags.clone(),
        h5_tags: analyzed.h5_tags.clone(),
        h6_tags: analyzed.h6_tags.clone(),
        word_count: analyzed.word_count,
        content_text: analyzed.content_text.clone(),
        reading_time_seconds: analyzed.reading_time_seconds,
        text_html_ratio: analyzed.text_html_ratio,
        language: analyzed.language.clone(),
        load_time_ms: Some(analyzed.load_time_ms),
        page_size_bytes: Some(analyzed.page_size_bytes),
        has_schema_markup: analyzed.has_schema_markup,
        schema_types: analyzed.schema_types.clone(),
        has_open_graph: analyzed.has_open_graph,
        has_twitter_card: analyzed.has_twitter_card,
        has_hreflang: analyzed.has_hreflang,
        is_https: analyzed.is_https,
        has_viewport_meta: analyzed.has_viewport_meta,
        total_images: analyzed.total_images,
        images_missing_alt: analyzed.images_missing_alt,
        images_with_alt: analyzed.images_with_alt,
        internal_links_count: analyzed.internal_links_count,
        external_links_count: analyzed.external_links_count,
        structured_data: analyzed.structured_data.clone(),
        open_graph_data: analyzed.open_graph_data.clone(),
        twitter_card_data: analyzed.twitter_card_data.clone(),
        keyword_frequencies: analyzed.keyword_frequencies.clone(),
    }
}

/// Outgoing links for one page, capped at 200 per the bulk-insert ceiling;
/// `target_page_id` is left unresolved since not every linked page has been
/// crawled yet when this page's links are written.
pub fn link_rows(site_id: Uuid, source_page_id: Uuid, analyzed: &AnalyzedPage) -> Vec<Link> {
    let now = Utc::now();
    analyzed
        .internal_links
        .iter()
        .chain(analyzed.external_links.iter())
        .take(MAX_LINKS_PER_PAGE)
        .map(|link| Link {
            id: Uuid::new_v4(),
            site_id,
            source_page_id,
            target_page_id: None,
            target_url: link.url.clone(),
            anchor_text: link.anchor_text.clone(),
            is_internal: link.is_internal,
            is_nofollow: link.is_nofollow,
            is_broken: false,
            link_type: LinkType::Hyperlink,
            created_at: now,
        })
        .collect()
}

pub fn issue_row(site_id: Uuid, page_id: Option<Uuid>, job_id: Option<Uuid>, rec: Recommendation) -> Issue {
    Issue {
        id: Uuid::new_v4(),
        site_id,
        page_id,
        crawl_job_id: job_id,
        issue_type: rec.issue_type,
        severity: rec.severity,
        title: rec.title,
        description: rec.description,
        recommendation: Some(rec.recommendation),
        fix_instructions: Some(rec.fix_instructions),
        impact_description: Some(rec.impact_description),
        affected_element: rec.affected_element,
        is_resolved: false,
        resolved_at: None,
        created_at: Utc::now(),
    }
}

pub fn page_score_row(site_id: Uuid, page_id: Uuid, job_id: Uuid, score: &PageScore) -> Score {
    Score {
        id: Uuid::new_v4(),
        site_id,
        page_id: Some(page_id),
        crawl_job_id: Some(job_id),
        overall_score: score.overall_score,
        technical_score: score.technical_score,
        content_score: score.content_score,
        authority_score: score.authority_score,
        linking_score: score.linking_score,
        ai_visibility_score: score.ai_visibility_score,
        technical_breakdown: score.technical_breakdown.clone(),
        content_breakdown: score.content_breakdown.clone(),
        linking_breakdown: score.linking_breakdown.clone(),
        scored_at: Utc::now(),
    }
}

pub fn site_score_row(site_id: Uuid, job_id: Uuid, score: &seo_scoring::SiteScore) -> Score {
    Score {
        id: Uuid::new_v4(),
        site_id,
        page_id: None,
        crawl_job_id: Some(job_id),
        overall_score: score.overall_score,
        technical_score: score.technical_score,
        content_score: score.content_score,
        authority_score: score.authority_score,
        linking_score: score.linking_score,
        ai_visibility_score: score.ai_visibility_score,
        technical_breakdown: score.technical_breakdown.clone(),
        content_breakdown: score.content_breakdown.clone(),
        linking_breakdown: score.linking_breakdown.clone(),
        scored_at: Utc::now(),
    }
}

pub fn keyword_row(site_id: Uuid, job_id: Uuid, opportunity: KeywordOpportunity) -> Keyword {
    let now = Utc::now();
    Keyword {
        id: Uuid::new_v4(),
        site_id,
        page_id: None,
        crawl_job_id: Some(job_id),
        keyword: opportunity.keyword,
        frequency: opportunity.frequency,
        density: opportunity.density,
        estimated_volume: opportunity.estimated_volume,
        estimated_difficulty: opportunity.estimated_difficulty,
        estimated_ctr: opportunity.estimated_ctr,
        current_rank: opportunity.current_rank,
        rank_gap: opportunity.rank_gap,
        opportunity_score: opportunity.opportunity_score,
        is_opportunity: opportunity.is_opportunity,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_status_code_maps_to_an_absent_status() {
        let analyzed = AnalyzedPage::empty("https://example.test/".to_string(), 0, 0, true);
        let upsert = page_upsert(&analyzed, Uuid::new_v4());
        assert_eq!(upsert.status_code, None);
    }

    #[test]
    fn links_are_capped_at_two_hundred_per_page() {
        let mut analyzed = AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true);
        for i in 0..250 {
            analyzed.internal_links.push(seo_extraction::ExtractedLink {
                url: format!("https://example.test/{i}"),
                anchor_text: String::new(),
                is_nofollow: false,
                is_internal: true,
            });
        }
        let links = link_rows(Uuid::new_v4(), Uuid::new_v4(), &analyzed);
        assert_eq!(links.len(), MAX_LINKS_PER_PAGE);
    }
}
