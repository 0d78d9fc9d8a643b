//! Per-page SEO checks. Each function inspects one concern and returns zero
//! or one recommendation; `generate_page_recommendations` concatenates them.

use crate::recommendation::Recommendation;
use seo_extraction::AnalyzedPage;
use seo_types::IssueSeverity;

fn rec(
    issue_type: &str,
    severity: IssueSeverity,
    title: impl Into<String>,
    description: impl Into<String>,
    recommendation: impl Into<String>,
    fix_instructions: impl Into<String>,
    impact_description: &str,
    affected_element: impl Into<String>,
) -> Recommendation {
    Recommendation {
        issue_type: issue_type.to_string(),
        severity,
        title: title.into(),
        description: description.into(),
        recommendation: recommendation.into(),
        fix_instructions: fix_instructions.into(),
        impact_description: impact_description.to_string(),
        affected_element: Some(affected_element.into()),
        page_url: None,
    }
}

pub fn check_title(page: &AnalyzedPage) -> Vec<Recommendation> {
    match &page.title {
        None => vec![rec(
            "missing_title",
            IssueSeverity::Critical,
            "Missing title tag",
            "This page has no <title> tag. Title tags are critical for SEO and click-through rates.",
            "Add a unique, descriptive title tag (50-60 characters) with the primary keyword.",
            "Add <title>Your Primary Keyword - Brand Name</title> in the <head> section.\n\
             Keep it between 50-60 characters for optimal display in search results.",
            "Critical: Missing title severely impacts ranking ability.",
            "<title>",
        )],
        Some(title) if page.title_length > 60 => vec![rec(
            "title_too_long",
            IssueSeverity::Medium,
            format!("Title too long ({} characters)", page.title_length),
            format!(
                "Title tag is {} chars. Google truncates titles over 60 characters \
                 in search results, reducing click-through rates.",
                page.title_length
            ),
            "Shorten the title to 50-60 characters while retaining the primary keyword.",
            format!(
                "Current: '{title}'\nReduce to 50-60 characters, keeping the primary keyword near the start."
            ),
            "Shorter titles display fully in SERPs, improving CTR.",
            format!("<title>{title}</title>"),
        )],
        Some(title) if page.title_length < 30 => vec![rec(
            "title_too_short",
            IssueSeverity::Medium,
            format!("Title too short ({} characters)", page.title_length),
            "Short titles miss keyword opportunities and may appear less relevant to search engines.",
            "Expand the title to 50-60 characters with descriptive keywords.",
            "Add more descriptive keywords and context to the title.",
            "Properly-lengthed titles maximize SERP real estate and keyword targeting.",
            format!("<title>{title}</title>"),
        )],
        Some(_) => Vec::new(),
    }
}

pub fn check_meta_description(page: &AnalyzedPage) -> Vec<Recommendation> {
    match &page.meta_description {
        None => vec![rec(
            "missing_meta_description",
            IssueSeverity::High,
            "Missing meta description",
            "No meta description found. Google may generate a poor auto-snippet for this page.",
            "Write a compelling meta description (150-160 chars) with a call-to-action.",
            r#"Add <meta name="description" content="Your description here..."> in the <head>."#,
            "Meta descriptions control your SERP snippet and heavily influence CTR.",
            r#"<meta name="description">"#,
        )],
        Some(_) if page.meta_description_length > 160 => vec![rec(
            "meta_description_too_long",
            IssueSeverity::Low,
            format!("Meta description too long ({} chars)", page.meta_description_length),
            "Google truncates descriptions over 160 characters in search results.",
            "Shorten to 150-160 characters, keeping the most important information first.",
            format!(
                "Trim to under 160 chars. Current length: {}.",
                page.meta_description_length
            ),
            "Prevents truncation in SERPs, showing the full value proposition.",
            r#"<meta name="description">"#,
        )],
        Some(_) => Vec::new(),
    }
}

pub fn check_headings(page: &AnalyzedPage) -> Vec<Recommendation> {
    let h1_count = page.h1_tags.len();
    if h1_count == 0 {
        vec![rec(
            "missing_h1",
            IssueSeverity::High,
            "Missing H1 tag",
            "No H1 heading found. H1 is the primary signal for page topic to search engines.",
            "Add one H1 tag containing the primary keyword for this page.",
            "Add <h1>Your Primary Keyword</h1> as the main heading on the page.",
            "H1 is a strong relevance signal. Missing it reduces ranking potential.",
            "<h1>",
        )]
    } else if h1_count > 1 {
        let sample: Vec<&String> = page.h1_tags.iter().take(3).collect();
        vec![rec(
            "multiple_h1",
            IssueSeverity::Medium,
            format!("Multiple H1 tags ({h1_count} found)"),
            format!("Found {h1_count} H1 tags. Best practice is exactly one H1 per page."),
            "Consolidate to a single H1 tag. Use H2-H6 for subheadings.",
            format!(
                "H1 tags found: {sample:?}. Keep the most descriptive one, convert others to H2."
            ),
            "Multiple H1s dilute the page's topic signal.",
            "<h1>",
        )]
    } else {
        Vec::new()
    }
}

pub fn check_content(page: &AnalyzedPage) -> Vec<Recommendation> {
    if page.word_count < 300 && page.is_indexable {
        let severity = if page.word_count < 150 { IssueSeverity::High } else { IssueSeverity::Medium };
        vec![rec(
            "thin_content",
            severity,
            format!("Thin content ({} words)", page.word_count),
            format!(
                "Page has only {} words. Pages with less than 300 words \
                 are considered thin content and may struggle to rank.",
                page.word_count
            ),
            "Expand content to at least 800 words with valuable, relevant information.",
            "1. Research what users searching for this topic want to know\n\
             2. Add comprehensive answers to common questions\n\
             3. Include relevant examples, data, and visuals\n\
             4. Aim for 800-2000 words for competitive topics",
            "Content depth is strongly correlated with ranking ability.",
            "page body",
        )]
    } else {
        Vec::new()
    }
}

pub fn check_images(page: &AnalyzedPage) -> Vec<Recommendation> {
    if page.images_missing_alt > 0 {
        let severity = if page.images_missing_alt > 5 { IssueSeverity::High } else { IssueSeverity::Medium };
        vec![rec(
            "images_missing_alt",
            severity,
            format!("{} images missing alt text", page.images_missing_alt),
            format!(
                "{} of {} images have no alt attribute. \
                 Alt text is critical for accessibility and image SEO.",
                page.images_missing_alt, page.total_images
            ),
            "Add descriptive alt text to all images, using keywords where natural.",
            "1. Add alt='Descriptive text about image' to each img tag\n\
             2. For decorative images, use alt=''\n\
             3. Include target keywords naturally in key image alt texts\n\
             4. Keep alt text under 125 characters",
            "Alt text improves image rankings, accessibility, and is an on-page signal.",
            "<img> tags",
        )]
    } else {
        Vec::new()
    }
}

pub fn check_technical(page: &AnalyzedPage) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if !page.is_https {
        recs.push(rec(
            "not_https",
            IssueSeverity::Critical,
            "Page not served over HTTPS",
            "This page is served over HTTP. HTTPS is a ranking factor and builds user trust.",
            "Migrate to HTTPS with a valid SSL certificate.",
            "1. Install an SSL certificate (Let's Encrypt is free)\n\
             2. Redirect HTTP to HTTPS via server config\n\
             3. Update all internal links to HTTPS\n\
             4. Update canonical tags, sitemaps, and Search Console",
            "HTTPS is a direct Google ranking signal. Critical for security and trust.",
            "URL scheme",
        ));
    }

    if !page.has_viewport_meta {
        recs.push(rec(
            "missing_viewport",
            IssueSeverity::High,
            "Missing viewport meta tag",
            "No viewport meta tag found. This makes the page non-mobile-friendly.",
            r#"Add <meta name="viewport" content="width=device-width, initial-scale=1">"#,
            r#"Add <meta name="viewport" content="width=device-width, initial-scale=1"> in <head>."#,
            "Mobile-friendliness is a major ranking factor. Missing viewport hurts mobile rankings.",
            r#"<meta name="viewport">"#,
        ));
    }

    if page.load_time_ms > 3000 {
        recs.push(rec(
            "slow_page_load",
            IssueSeverity::High,
            format!("Slow page load time ({}ms)", page.load_time_ms),
            format!(
                "Page took {}ms to load. Core Web Vitals (LCP) should be under 2500ms.",
                page.load_time_ms
            ),
            "Optimize page performance: compress images, minify assets, use a CDN.",
            "1. Compress and resize images (use WebP format)\n\
             2. Enable gzip/brotli compression on server\n\
             3. Minify CSS, JS, and HTML\n\
             4. Use a CDN for static assets\n\
             5. Implement browser caching\n\
             6. Reduce server response time (TTFB < 200ms)",
            "Page speed is a direct ranking factor and impacts user experience.",
            "page load performance",
        ));
    }

    recs
}

pub fn check_structured_data(page: &AnalyzedPage) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if !page.has_schema_markup {
        recs.push(rec(
            "missing_schema",
            IssueSeverity::Medium,
            "No structured data / schema markup",
            "No schema.org markup found. Schema helps search engines understand \
             your content and can unlock rich results.",
            "Add appropriate schema.org markup (Article, Product, FAQ, etc.).",
            "1. Identify the most appropriate schema type for this page\n\
             2. Implement JSON-LD in the <head> section\n\
             3. Validate using Google's Rich Results Test\n\
             4. Monitor for rich result impressions in Search Console",
            "Schema markup can significantly improve CTR via rich results.",
            "<script type='application/ld+json'>",
        ));
    }

    if !page.has_open_graph {
        recs.push(rec(
            "missing_open_graph",
            IssueSeverity::Low,
            "Missing Open Graph tags",
            "No Open Graph meta tags found. These control how the page appears when shared on social media.",
            "Add og:title, og:description, og:image, and og:url meta tags.",
            "Add to <head>:\n\
             <meta property='og:title' content='Page Title'>\n\
             <meta property='og:description' content='Description'>\n\
             <meta property='og:image' content='https://example.com/image.jpg'>\n\
             <meta property='og:url' content='https://example.com/page'>",
            "Improves social sharing appearance, driving referral traffic.",
            "Open Graph meta tags",
        ));
    }

    recs
}

pub fn check_links(page: &AnalyzedPage) -> Vec<Recommendation> {
    if page.internal_links_count == 0 && page.word_count > 100 {
        vec![rec(
            "no_internal_links",
            IssueSeverity::Medium,
            "No outgoing internal links",
            "This page has no internal links to other pages. \
             Internal links pass PageRank and help users navigate.",
            "Add 3-5 relevant internal links to related content on your site.",
            "1. Identify 3-5 related pages on your site\n\
             2. Add contextual links with descriptive anchor text\n\
             3. Avoid generic anchor text like 'click here'\n\
             4. Link to both category pages and individual articles",
            "Internal links distribute PageRank and improve crawlability.",
            "<a href> tags",
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_page() -> AnalyzedPage {
        AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true)
    }

    #[test]
    fn missing_title_is_flagged_critical() {
        let recs = check_title(&base_page());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].issue_type, "missing_title");
        assert_eq!(recs[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn title_in_optimal_range_is_not_flagged() {
        let mut page = base_page();
        page.title = Some("x".repeat(55));
        page.title_length = 55;
        assert!(check_title(&page).is_empty());
    }

    #[test]
    fn title_too_long_reports_exact_character_count() {
        let mut page = base_page();
        page.title = Some("x".repeat(75));
        page.title_length = 75;
        let recs = check_title(&page);
        assert_eq!(recs[0].issue_type, "title_too_long");
        assert!(recs[0].title.contains("75"));
    }

    #[test]
    fn thin_content_severity_escalates_below_150_words() {
        let mut very_thin = base_page();
        very_thin.word_count = 50;
        let mut somewhat_thin = base_page();
        somewhat_thin.word_count = 250;

        assert_eq!(check_content(&very_thin)[0].severity, IssueSeverity::High);
        assert_eq!(check_content(&somewhat_thin)[0].severity, IssueSeverity::Medium);
    }

    #[test]
    fn non_indexable_thin_page_is_not_flagged() {
        let mut page = base_page();
        page.word_count = 50;
        page.is_indexable = false;
        assert!(check_content(&page).is_empty());
    }

    #[test]
    fn many_missing_alt_images_escalates_to_high() {
        let mut page = base_page();
        page.total_images = 10;
        page.images_missing_alt = 8;
        assert_eq!(check_images(&page)[0].severity, IssueSeverity::High);
    }

    #[test]
    fn https_and_viewport_and_slow_load_each_fire_independently() {
        let mut page = base_page();
        page.is_https = false;
        page.has_viewport_meta = false;
        page.load_time_ms = 5000;
        let recs = check_technical(&page);
        let types: Vec<&str> = recs.iter().map(|r| r.issue_type.as_str()).collect();
        assert!(types.contains(&"not_https"));
        assert!(types.contains(&"missing_viewport"));
        assert!(types.contains(&"slow_page_load"));
    }

    #[test]
    fn no_internal_links_only_fires_on_substantial_pages() {
        let mut thin = base_page();
        thin.word_count = 50;
        assert!(check_links(&thin).is_empty());

        let mut substantial = base_page();
        substantial.word_count = 200;
        assert_eq!(check_links(&substantial).len(), 1);
    }
}
