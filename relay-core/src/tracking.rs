//! UTM-tagged tracking links.

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::error::{RelayError, RelayResult};

/// The five canonical UTM fields. An empty string means "not set".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub term: String,
}

impl UtmParams {
    /// Field name / value pairs in canonical order.
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("source", &self.source),
            ("medium", &self.medium),
            ("campaign", &self.campaign),
            ("content", &self.content),
            ("term", &self.term),
        ]
    }
}

/// One additional query parameter row. Insertion order is preserved in the
/// output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraParam {
    pub key: String,
    pub value: String,
}

/// Input for the tracking link builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingInput {
    /// Absolute destination URL; must parse
    pub destination: String,
    #[serde(default)]
    pub utm: UtmParams,
    #[serde(default)]
    pub extra: Vec<ExtraParam>,
    /// When non-empty, the result includes an HTML anchor with this text
    #[serde(default)]
    pub link_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingLink {
    pub url: String,
    pub html: String,
}

/// Replace the first occurrence of `key`, drop later duplicates, or append
/// when the key is not present (the `URLSearchParams.set` contract).
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(pos) => {
            pairs[pos].1 = value.to_string();
            let mut kept = 0;
            pairs.retain(|(k, _)| {
                if k == key {
                    kept += 1;
                    kept == 1
                } else {
                    true
                }
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

/// Merge UTM and extra params into the destination URL.
///
/// UTM fields use replace semantics (`utm_*` params are canonical and
/// singular); extra pairs always append, so duplicate keys survive. The two
/// must not be unified. The URL fragment is detached before query editing
/// and re-appended verbatim at the very end.
pub fn build_tracking_link(input: &TrackingInput) -> RelayResult<TrackingLink> {
    let mut url = Url::parse(&input.destination).map_err(|source| RelayError::InvalidUrl {
        field: "destination",
        source,
    })?;

    let fragment = url.fragment().map(|f| f.to_string());
    url.set_fragment(None);

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (field, value) in input.utm.entries() {
        if !value.is_empty() {
            set_param(&mut pairs, &format!("utm_{}", field), value);
        }
    }

    for param in &input.extra {
        if !param.key.is_empty() && !param.value.is_empty() {
            pairs.push((param.key.clone(), param.value.clone()));
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&pairs)
            .finish();
        url.set_query(Some(&query));
    }

    let mut link = url.to_string();
    if let Some(fragment) = fragment {
        link.push('#');
        link.push_str(&fragment);
    }

    let html = if input.link_text.is_empty() {
        String::new()
    } else {
        format!(r#"<a href="{}">{}</a>"#, link, input.link_text)
    };

    Ok(TrackingLink { url: link, html })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_input(destination: &str) -> TrackingInput {
        TrackingInput {
            destination: destination.to_string(),
            utm: UtmParams::default(),
            extra: Vec::new(),
            link_text: String::new(),
        }
    }

    fn query_pairs(link: &str) -> Vec<(String, String)> {
        let url = Url::parse(link).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_round_trip_with_fragment() {
        let mut input = make_test_input("https://e.com/?a=1#frag");
        input.utm.source = "x".to_string();
        input.extra.push(ExtraParam {
            key: "b".to_string(),
            value: "2".to_string(),
        });

        let link = build_tracking_link(&input).unwrap();

        assert!(link.url.ends_with("#frag"));
        assert_eq!(
            query_pairs(&link.url),
            vec![
                ("a".to_string(), "1".to_string()),
                ("utm_source".to_string(), "x".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_utm_set_replaces_existing() {
        let mut input =
            make_test_input("https://e.com/?utm_source=old&x=1&utm_source=dup");
        input.utm.source = "new".to_string();

        let link = build_tracking_link(&input).unwrap();

        // First occurrence keeps its position, later duplicates are dropped
        assert_eq!(
            query_pairs(&link.url),
            vec![
                ("utm_source".to_string(), "new".to_string()),
                ("x".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_extra_appends_duplicates() {
        let mut input = make_test_input("https://e.com/?tag=1");
        input.extra.push(ExtraParam {
            key: "tag".to_string(),
            value: "2".to_string(),
        });
        input.extra.push(ExtraParam {
            key: "tag".to_string(),
            value: "3".to_string(),
        });

        let link = build_tracking_link(&input).unwrap();
        assert_eq!(
            query_pairs(&link.url),
            vec![
                ("tag".to_string(), "1".to_string()),
                ("tag".to_string(), "2".to_string()),
                ("tag".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_utm_and_extra_omitted() {
        let mut input = make_test_input("https://e.com/");
        input.extra.push(ExtraParam {
            key: String::new(),
            value: "orphan".to_string(),
        });
        input.extra.push(ExtraParam {
            key: "orphan".to_string(),
            value: String::new(),
        });

        let link = build_tracking_link(&input).unwrap();
        assert_eq!(link.url, "https://e.com/");
    }

    #[test]
    fn test_fragment_survives_without_query() {
        let input = make_test_input("https://e.com/page#top");
        let link = build_tracking_link(&input).unwrap();
        assert_eq!(link.url, "https://e.com/page#top");
    }

    #[test]
    fn test_space_encoding() {
        let mut input = make_test_input("https://e.com/");
        input.utm.campaign = "spring sale".to_string();

        let link = build_tracking_link(&input).unwrap();
        assert_eq!(link.url, "https://e.com/?utm_campaign=spring+sale");
    }

    #[test]
    fn test_invalid_destination_fails_fast() {
        let input = make_test_input("not a url");
        assert!(matches!(
            build_tracking_link(&input),
            Err(RelayError::InvalidUrl {
                field: "destination",
                ..
            })
        ));
    }

    #[test]
    fn test_html_anchor() {
        let mut input = make_test_input("https://e.com/");
        input.utm.source = "mail".to_string();
        input.link_text = "Read more".to_string();

        let link = build_tracking_link(&input).unwrap();
        assert_eq!(
            link.html,
            format!(r#"<a href="{}">Read more</a>"#, link.url)
        );

        input.link_text = String::new();
        let link = build_tracking_link(&input).unwrap();
        assert_eq!(link.html, "");
    }
}
