//! Key Pattern Module
//!
//! Wildcard matching for bulk cache invalidation. Patterns are plain
//! text with `*` matching any (possibly empty) substring, so a write
//! path can drop a whole query-key family (e.g. `categories:*`) without
//! tracking the exact keys it produced.

// == Matches ==
/// Returns true if `key` matches `pattern`.
///
/// `*` matches any substring including the empty one; all other
/// characters match literally. A pattern without `*` must equal the
/// key exactly.
pub fn matches(pattern: &str, key: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();

    // No wildcard: exact match only
    if segments.len() == 1 {
        return pattern == key;
    }

    let mut rest = key;

    // First segment is anchored at the start unless the pattern opens with '*'
    let first = segments[0];
    if !first.is_empty() {
        match rest.strip_prefix(first) {
            Some(r) => rest = r,
            None => return false,
        }
    }

    // Last segment is anchored at the end unless the pattern closes with '*'
    let last = segments[segments.len() - 1];
    if !last.is_empty() {
        match rest.strip_suffix(last) {
            Some(r) => rest = r,
            None => return false,
        }
    }

    // Middle segments must appear in order in what remains
    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }

    true
}
