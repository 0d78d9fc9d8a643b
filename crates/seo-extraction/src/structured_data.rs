//! Structured-data extraction: a uniform pass over JSON-LD `<script>` tags
//! and `itemscope`/`itemprop` microdata, merged into one JSON value. Parse
//! errors on an individual block are logged and that block is skipped —
//! they never fail the whole page.

use crate::schema_types::is_seo_relevant;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;

pub struct StructuredData {
    pub has_schema_markup: bool,
    pub schema_types: Vec<String>,
    pub merged: Value,
}

pub fn extract(document: &Html) -> StructuredData {
    let json_ld = extract_json_ld(document);
    let microdata = extract_microdata(document);

    let has_schema_markup = !json_ld.is_empty() || !microdata.is_empty();
    let schema_types = collect_schema_types(&json_ld);

    StructuredData {
        has_schema_markup,
        schema_types,
        merged: json!({
            "json_ld": json_ld,
            "microdata": microdata,
        }),
    }
}

fn extract_json_ld(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| {
            let raw: String = el.text().collect();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!(error = %err, "json-ld block failed to parse, skipping");
                    None
                }
            }
        })
        .collect()
}

fn collect_schema_types(json_ld: &[Value]) -> Vec<String> {
    let mut types: HashSet<String> = HashSet::new();
    for item in json_ld {
        let Value::Object(map) = item else { continue };
        match map.get("@type") {
            Some(Value::String(t)) => {
                types.insert(t.clone());
            }
            Some(Value::Array(list)) => {
                for entry in list {
                    if let Value::String(t) = entry {
                        types.insert(t.clone());
                    }
                }
            }
            _ => {}
        }
    }
    types.into_iter().filter(|t| is_seo_relevant(t)).collect()
}

/// Microdata is extracted as a flat list of `{type, properties}` objects,
/// one per top-level `itemscope` element (nested itemscopes are not
/// recursed into, matching a shallow single-pass extraction).
fn extract_microdata(document: &Html) -> Vec<Value> {
    let Ok(scope_selector) = Selector::parse("[itemscope]") else {
        return Vec::new();
    };
    let Ok(prop_selector) = Selector::parse("[itemprop]") else {
        return Vec::new();
    };

    document
        .select(&scope_selector)
        .map(|scope| {
            let item_type = scope.value().attr("itemtype").unwrap_or_default();
            let mut properties = serde_json::Map::new();
            for prop in scope.select(&prop_selector) {
                let Some(name) = prop.value().attr("itemprop") else {
                    continue;
                };
                let value = prop
                    .value()
                    .attr("content")
                    .map(str::to_string)
                    .unwrap_or_else(|| prop.text().collect::<Vec<_>>().join(" ").trim().to_string());
                properties.insert(name.to_string(), Value::String(value));
            }
            json!({ "type": item_type, "properties": properties })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_ld_article_is_detected_and_type_collected() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@context":"https://schema.org","@type":"Article","headline":"x"}</script>
        </head></html>"#;
        let document = Html::parse_document(html);
        let data = extract(&document);
        assert!(data.has_schema_markup);
        assert_eq!(data.schema_types, vec!["Article".to_string()]);
    }

    #[test]
    fn malformed_json_ld_is_skipped_not_fatal() {
        let html = r#"<script type="application/ld+json">{not valid json</script>"#;
        let document = Html::parse_document(html);
        let data = extract(&document);
        assert!(!data.has_schema_markup);
        assert!(data.schema_types.is_empty());
    }

    #[test]
    fn non_seo_relevant_types_are_filtered_out() {
        let html = r#"<script type="application/ld+json">{"@type":"Thing"}</script>"#;
        let document = Html::parse_document(html);
        let data = extract(&document);
        assert!(data.has_schema_markup);
        assert!(data.schema_types.is_empty());
    }

    #[test]
    fn microdata_itemscope_is_extracted() {
        let html = r#"<div itemscope itemtype="https://schema.org/Product">
            <span itemprop="name">Widget</span>
        </div>"#;
        let document = Html::parse_document(html);
        let data = extract(&document);
        assert!(data.has_schema_markup);
    }
}
