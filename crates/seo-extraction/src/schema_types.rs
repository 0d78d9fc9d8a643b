//! The fixed set of schema.org `@type` values that matter for SEO scoring.

const SEO_SCHEMA_TYPES: &[&str] = &[
    "Article",
    "NewsArticle",
    "BlogPosting",
    "WebPage",
    "Product",
    "LocalBusiness",
    "Organization",
    "Person",
    "Event",
    "FAQPage",
    "HowTo",
    "Review",
    "AggregateRating",
    "BreadcrumbList",
    "Recipe",
    "VideoObject",
    "ImageObject",
    "SoftwareApplication",
    "Course",
];

pub fn is_seo_relevant(schema_type: &str) -> bool {
    SEO_SCHEMA_TYPES.contains(&schema_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_seo_relevant_types_only() {
        assert!(is_seo_relevant("Article"));
        assert!(is_seo_relevant("FAQPage"));
        assert!(!is_seo_relevant("Thing"));
    }
}
