//! URL query-string parsing and in-place parameter edits.
//!
//! DESIGN
//! ======
//! Table interactions rewrite the location's query string rather than
//! holding pagination in component state alone, so links and reloads
//! reproduce the same view. Edits preserve parameters the table does not
//! own (their order included) and follow `URLSearchParams.set` semantics:
//! the first occurrence is replaced and later duplicates are dropped.

#[cfg(test)]
#[path = "query_string_test.rs"]
mod query_string_test;

/// Parse a query string (with or without the leading `?`) into ordered pairs.
///
/// `+` decodes to a space. Pairs that fail percent-decoding keep their raw text.
pub fn parse(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode(key), decode(value))
        })
        .collect()
}

/// First value for `key`, if present.
pub fn get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Encode ordered pairs into a query string without the leading `?`.
pub fn encode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Apply ordered edits to `query`. `Some` sets a parameter, `None` removes it.
pub fn apply_edits(query: &str, edits: &[(&str, Option<String>)]) -> String {
    let mut pairs = parse(query);
    for (key, value) in edits {
        match value {
            Some(value) => {
                let mut replaced = false;
                pairs.retain_mut(|(k, v)| {
                    if k.as_str() != *key {
                        return true;
                    }
                    if replaced {
                        return false;
                    }
                    replaced = true;
                    v.clone_from(value);
                    true
                });
                if !replaced {
                    pairs.push(((*key).to_owned(), value.clone()));
                }
            }
            None => pairs.retain(|(k, _)| k.as_str() != *key),
        }
    }
    encode(&pairs)
}

/// Join a path and query string into an href, omitting an empty `?`.
pub fn href(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), std::borrow::Cow::into_owned)
}
