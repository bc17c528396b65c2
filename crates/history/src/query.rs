//! Segment-level editing of query strings and fragments.
//!
//! A "part" is the text after `?` or `#` without that delimiter. Segments
//! are separated by `&`; a segment's key is the text before its first `=`
//! (or the whole segment). Keys are compared exactly, without decoding.

use url::form_urlencoded;
use url::Url;

/// Which part of a URL a segment lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlPart {
    Query,
    Fragment,
}

impl UrlPart {
    /// Raw text of this part, if the URL has it.
    pub fn get(self, url: &Url) -> Option<&str> {
        match self {
            UrlPart::Query => url.query(),
            UrlPart::Fragment => url.fragment(),
        }
    }

    /// Set this part, dropping the delimiter entirely when `value` is empty.
    pub fn set(self, url: &mut Url, value: &str) {
        let value = (!value.is_empty()).then_some(value);
        match self {
            UrlPart::Query => url.set_query(value),
            UrlPart::Fragment => url.set_fragment(value),
        }
    }
}

pub fn segment_key(segment: &str) -> &str {
    segment.split_once('=').map_or(segment, |(key, _)| key)
}

/// Segments of `part` in order, empty ones included.
pub fn segments(part: &str) -> impl Iterator<Item = &str> {
    part.split('&')
}

pub fn has_key(part: &str, key: &str) -> bool {
    segments(part).any(|segment| segment_key(segment) == key)
}

/// Decoded value of the first segment keyed `key`. A bare key yields `""`.
pub fn get_param(part: &str, key: &str) -> Option<String> {
    let segment = segments(part).find(|segment| segment_key(segment) == key)?;
    Some(
        form_urlencoded::parse(segment.as_bytes())
            .next()
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default(),
    )
}

/// Remove the first segment keyed `key`.
pub fn remove_first(part: &str, key: &str) -> String {
    let mut removed = false;
    join(segments(part).filter(|segment| {
        if !removed && segment_key(segment) == key {
            removed = true;
            return false;
        }
        true
    }))
}

/// Remove every segment keyed `key`.
pub fn remove_all(part: &str, key: &str) -> String {
    join(segments(part).filter(|segment| segment_key(segment) != key))
}

/// Replace the first segment keyed `key` with `key=value` (encoding
/// `value`), drop any later duplicates, or append when absent.
pub fn set_param(part: &str, key: &str, value: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    let replacement = format!("{key}={encoded}");

    let mut placed = false;
    let mut out: Vec<&str> = Vec::new();
    for segment in segments(part).filter(|_| !part.is_empty()) {
        if segment_key(segment) != key {
            out.push(segment);
        } else if !placed {
            out.push(&replacement);
            placed = true;
        }
    }
    if !placed {
        out.push(&replacement);
    }
    join(out.into_iter())
}

fn join<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    segments.collect::<Vec<_>>().join("&")
}
