//! Folder include/exclude patterns for file results
//!
//! Only `*/segment/*` patterns are meaningful: they match any path that has
//! `segment` as a whole run of path components. Every other pattern shape
//! matches nothing. The blacklist always wins over the whitelist.

/// Canonical form: `/` separators, no repeats, no leading separator, lowercase.
pub fn normalize(pattern: &str) -> String {
    let unified = pattern.trim().replace('\\', "/");
    let mut out = String::with_capacity(unified.len());
    let mut last_was_sep = false;
    for ch in unified.chars() {
        if ch == '/' {
            if last_was_sep {
                continue;
            }
            last_was_sep = true;
        } else {
            last_was_sep = false;
        }
        out.push(ch);
    }
    out.trim_start_matches('/').to_lowercase()
}

/// Extract `segment` from a normalized `*/segment/*` pattern.
fn pattern_segment(normalized: &str) -> Option<&str> {
    let inner = normalized.strip_prefix("*/")?.strip_suffix("/*")?;
    let inner = inner.trim_matches('/');
    if inner.is_empty() || inner.contains('*') {
        return None;
    }
    Some(inner)
}

/// Whether `path` falls under `pattern`.
pub fn matches(path: &str, pattern: &str) -> bool {
    let normalized_pattern = normalize(pattern);
    match pattern_segment(&normalized_pattern) {
        Some(segment) => path_contains_segment(&normalize(path), segment),
        None => false,
    }
}

fn path_contains_segment(normalized_path: &str, segment: &str) -> bool {
    // Anchor both ends on separators so "download" does not match "downloads"
    let haystack = format!("/{}/", normalized_path.trim_end_matches('/'));
    let needle = format!("/{}/", segment);
    haystack.contains(&needle)
}

/// Pre-normalized whitelist/blacklist pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderFilter {
    /// None when no whitelist is configured. A configured whitelist whose
    /// patterns are all malformed stays `Some(vec![])` and admits nothing.
    whitelist: Option<Vec<String>>,
    blacklist: Vec<String>,
}

fn valid_segments<S: AsRef<str>>(patterns: &[S]) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|p| pattern_segment(&normalize(p.as_ref())).map(str::to_string))
        .collect()
}

impl FolderFilter {
    pub fn new<S: AsRef<str>>(whitelist: &[S], blacklist: &[S]) -> Self {
        let whitelist = if whitelist.is_empty() {
            None
        } else {
            let segments = valid_segments(whitelist);
            if segments.is_empty() {
                tracing::warn!(
                    patterns = whitelist.len(),
                    "Folder whitelist has no valid */segment/* pattern"
                );
            }
            Some(segments)
        };
        FolderFilter {
            whitelist,
            blacklist: valid_segments(blacklist),
        }
    }

    /// True when neither list is configured
    pub fn is_empty(&self) -> bool {
        self.whitelist.is_none() && self.blacklist.is_empty()
    }

    /// Whitelist (if any) must match and the blacklist must not.
    pub fn allows(&self, path: &str) -> bool {
        let path = normalize(path);
        let hit = |segment: &String| path_contains_segment(&path, segment);
        let whitelisted = match &self.whitelist {
            None => true,
            Some(segments) => segments.iter().any(hit),
        };
        whitelisted && !self.blacklist.iter().any(hit)
    }
}

/// Build a path predicate from whitelist and blacklist patterns.
pub fn build_matcher<S: AsRef<str>>(
    whitelist: &[S],
    blacklist: &[S],
) -> impl Fn(&str) -> bool + Send + Sync + 'static {
    let filter = FolderFilter::new(whitelist, blacklist);
    move |path: &str| filter.allows(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\\\\Download//Receipts\\"), "download/receipts/");
        assert_eq!(normalize("/*/DCIM/*"), "*/dcim/*");
        assert_eq!(normalize("  */Music/*  "), "*/music/*");
    }

    #[test]
    fn test_download_pattern() {
        assert!(matches("Download/receipts/invoice.pdf", "*/Download/*"));
        assert!(!matches("Downloads/invoice.pdf", "*/Download/*"));
    }

    #[test]
    fn test_nested_segment_and_separators() {
        assert!(matches("/storage//DCIM\\Camera/img.jpg", "*/dcim/camera/*"));
        assert!(matches("Pictures/Download/a.png", "*/Download/*"));
    }

    #[test]
    fn test_other_shapes_match_nothing() {
        for pattern in ["Download", "*/Download", "Download/*", "*/Down*/*", "*//*", ""] {
            assert!(
                !matches("Download/invoice.pdf", pattern),
                "pattern {:?} should not match",
                pattern
            );
        }
    }

    #[test]
    fn test_empty_lists_allow_everything() {
        let allow = build_matcher::<&str>(&[], &[]);
        assert!(allow("anything/at/all.txt"));
    }

    #[test]
    fn test_whitelist_restricts() {
        let allow = build_matcher(&["*/Documents/*"], &[]);
        assert!(allow("Documents/cv.pdf"));
        assert!(!allow("Music/song.mp3"));
    }

    #[test]
    fn test_blacklist_wins_over_whitelist() {
        let allow = build_matcher(&["*/Documents/*"], &["*/Private/*"]);
        assert!(allow("Documents/cv.pdf"));
        assert!(!allow("Documents/Private/taxes.pdf"));
    }

    #[test]
    fn test_malformed_whitelist_blocks_everything() {
        let filter = FolderFilter::new(&["Documents"], &[]);
        assert!(!filter.is_empty());
        assert!(!filter.allows("Documents/cv.pdf"));
    }
}
