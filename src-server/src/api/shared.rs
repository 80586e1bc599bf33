use std::collections::HashSet;

use axum::http::{header, HeaderMap};
use serde_json::Value;

use quotedesk_core::quotations::Sort;

/// Splits a comma-separated query value into trimmed parts.
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parses an `order` query value; a leading `-` means descending.
pub fn parse_order(raw: &str) -> Option<Sort> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.strip_prefix('-') {
        Some(field) => Some(Sort {
            id: field.to_string(),
            desc: true,
        }),
        None => Some(Sort {
            id: trimmed.to_string(),
            desc: false,
        }),
    }
}

/// The region scope travels as an `active_region` cookie set by the admin UI.
pub fn active_region_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "active_region").then(|| value.to_string())
    })
}

/// Applies the `fields` projection to a serialized entity. The id and any
/// expanded relation keys are always kept; an empty field list means no
/// projection at all.
pub fn project_fields(mut value: Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return value;
    }
    if let Value::Object(ref mut map) = value {
        let mut keep: HashSet<&str> = fields.iter().map(|f| f.as_str()).collect();
        keep.insert("id");
        keep.insert("sale_persion");
        keep.insert("customer");
        keep.insert("region");
        keep.insert("quotation_lines");
        map.retain(|key, _| keep.contains(key.as_str()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_lists_are_trimmed_and_filtered() {
        assert_eq!(
            parse_comma_list(" a, b ,,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn order_prefix_flips_direction() {
        let desc = parse_order("-created_at").unwrap();
        assert!(desc.desc);
        assert_eq!(desc.id, "created_at");

        let asc = parse_order("code").unwrap();
        assert!(!asc.desc);
    }

    #[test]
    fn active_region_is_read_from_the_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "session=abc; active_region=reg_1".parse().unwrap(),
        );
        assert_eq!(
            active_region_from_headers(&headers),
            Some("reg_1".to_string())
        );

        let empty = HeaderMap::new();
        assert_eq!(active_region_from_headers(&empty), None);
    }

    #[test]
    fn projection_keeps_id_and_relations() {
        let value = json!({
            "id": "quot_1",
            "code": "Q-1",
            "title": "Offer",
            "quotation_lines": [],
        });
        let projected = project_fields(value, &["code".to_string()]);
        let map = projected.as_object().unwrap();
        assert!(map.contains_key("id"));
        assert!(map.contains_key("code"));
        assert!(map.contains_key("quotation_lines"));
        assert!(!map.contains_key("title"));
    }
}
