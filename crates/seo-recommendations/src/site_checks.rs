//! Site-wide recommendations, fired when a threshold over the full crawled
//! page set is crossed.

use crate::recommendation::Recommendation;
use seo_extraction::AnalyzedPage;
use seo_types::IssueSeverity;

pub fn generate(pages: &[AnalyzedPage]) -> Vec<Recommendation> {
    let total_pages = pages.len();
    if total_pages == 0 {
        return Vec::new();
    }
    let total_pages_f = total_pages as f64;

    let pages_no_title = pages.iter().filter(|p| p.title.is_none()).count();
    let pages_no_meta = pages.iter().filter(|p| p.meta_description.is_none()).count();
    let pages_no_schema = pages.iter().filter(|p| !p.has_schema_markup).count();
    let pages_thin_content = pages.iter().filter(|p| p.word_count < 300).count();
    let pages_not_https = pages.iter().filter(|p| !p.is_https).count();

    let pct_no_title = pages_no_title as f64 / total_pages_f * 100.0;
    let pct_no_meta = pages_no_meta as f64 / total_pages_f * 100.0;

    let mut recs = Vec::new();

    if pages_not_https > 0 {
        recs.push(Recommendation {
            issue_type: "https_mixed".to_string(),
            severity: IssueSeverity::Critical,
            title: format!("{pages_not_https} pages not served over HTTPS"),
            description: format!(
                "{pages_not_https} of {total_pages} pages are not using HTTPS. \
                 HTTPS is a confirmed Google ranking factor."
            ),
            recommendation: "Migrate all pages to HTTPS and implement 301 redirects from HTTP.".to_string(),
            fix_instructions: "1. Obtain an SSL certificate (Let's Encrypt is free)\n\
                2. Configure your web server to redirect all HTTP to HTTPS\n\
                3. Update all internal links to use HTTPS\n\
                4. Update your sitemap and Google Search Console"
                .to_string(),
            impact_description: "HTTPS is a direct ranking signal. Migration improves trust and rankings."
                .to_string(),
            affected_element: Some(format!("{pages_not_https} pages")),
            page_url: None,
        });
    }

    if pct_no_title > 5.0 {
        recs.push(Recommendation {
            issue_type: "missing_titles_bulk".to_string(),
            severity: IssueSeverity::Critical,
            title: format!("{pages_no_title} pages missing title tags ({:.0}%)", pct_no_title),
            description: "Title tags are one of the most critical on-page SEO factors.".to_string(),
            recommendation: "Add unique, descriptive title tags to all pages.".to_string(),
            fix_instructions: "1. Audit all pages missing titles\n\
                2. Write unique titles (50-60 characters)\n\
                3. Include primary keyword near the beginning\n\
                4. Add brand name at the end: 'Primary Keyword - Brand Name'"
                .to_string(),
            impact_description: "Title tags directly influence click-through rates and rankings.".to_string(),
            affected_element: Some(format!("{pages_no_title} pages")),
            page_url: None,
        });
    }

    if pct_no_meta > 10.0 {
        recs.push(Recommendation {
            issue_type: "missing_meta_bulk".to_string(),
            severity: IssueSeverity::High,
            title: format!("{pages_no_meta} pages missing meta descriptions ({:.0}%)", pct_no_meta),
            description: "Meta descriptions influence click-through rates from search results.".to_string(),
            recommendation: "Write compelling meta descriptions for all important pages.".to_string(),
            fix_instructions: "1. Write unique meta descriptions (150-160 characters)\n\
                2. Include target keyword naturally\n\
                3. Add a call-to-action where appropriate\n\
                4. Make each description unique to the page content"
                .to_string(),
            impact_description: "Better meta descriptions improve CTR, driving more organic traffic."
                .to_string(),
            affected_element: Some(format!("{pages_no_meta} pages")),
            page_url: None,
        });
    }

    if pages_thin_content as f64 > total_pages_f * 0.3 {
        recs.push(Recommendation {
            issue_type: "thin_content_bulk".to_string(),
            severity: IssueSeverity::High,
            title: format!("{pages_thin_content} pages have thin content (<300 words)"),
            description: format!(
                "{pages_thin_content} pages have fewer than 300 words. \
                 Thin content can trigger Google Panda penalties."
            ),
            recommendation: "Either expand thin content or consolidate/remove low-value pages.".to_string(),
            fix_instructions: "1. Identify which thin pages have search value\n\
                2. Expand valuable pages to 800+ words\n\
                3. Consolidate related thin pages into comprehensive guides\n\
                4. Use noindex on unavoidable thin pages (e.g., tag pages)"
                .to_string(),
            impact_description: "Content depth is strongly correlated with ranking ability.".to_string(),
            affected_element: Some(format!("{pages_thin_content} pages")),
            page_url: None,
        });
    }

    if pages_no_schema as f64 > total_pages_f * 0.8 {
        recs.push(Recommendation {
            issue_type: "missing_schema_bulk".to_string(),
            severity: IssueSeverity::Medium,
            title: "Most pages lack structured data / schema markup".to_string(),
            description: format!(
                "Only {} of {total_pages} pages have schema markup. \
                 Schema helps search engines understand your content.",
                total_pages - pages_no_schema
            ),
            recommendation: "Implement appropriate schema.org markup across your site.".to_string(),
            fix_instructions: "1. Add Organization or WebSite schema to homepage\n\
                2. Add Article/BlogPosting schema to blog posts\n\
                3. Add FAQPage schema to FAQ pages\n\
                4. Add BreadcrumbList to improve sitelinks\n\
                5. Validate with Google's Rich Results Test"
                .to_string(),
            impact_description: "Schema markup enables rich results, improving visibility and CTR.".to_string(),
            affected_element: Some(format!("{pages_no_schema} pages")),
            page_url: None,
        });
    }

    recs
}
