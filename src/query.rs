//! URL query manipulation for the export endpoint.
//!
//! Parsing is done by hand over the raw string; percent-encoded values
//! pass through untouched, so rebuilding an already-built URL with the
//! same params yields the identical string.

/// Return `url` with `extra` query parameters added or updated.
///
/// Existing parameters keep their first-occurrence order; a duplicate
/// key in the original query collapses to its last value. Parameters
/// from `extra` overwrite same-named keys in place and are otherwise
/// appended. Blank values are kept (`a=` stays `a=`). Malformed input
/// is passed through with best-effort reserialization.
pub fn build_export_url(url: &str, extra: &[(&str, &str)]) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((b, f)) => (b, Some(f)),
        None => (url, None),
    };
    let (path, query) = match base.split_once('?') {
        Some((p, q)) => (p, q),
        None => (base, ""),
    };

    let mut params: Vec<(String, String)> = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        upsert(&mut params, key, value);
    }
    for (key, value) in extra {
        upsert(&mut params, key, value);
    }

    let mut out = path.to_string();
    if !params.is_empty() {
        out.push('?');
        let encoded: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        out.push_str(&encoded.join("&"));
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

fn upsert(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => params.push((key.to_string(), value.to_string())),
    }
}
