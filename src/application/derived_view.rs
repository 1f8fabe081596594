//! Filtered, sorted view of the link collection.
//!
//! [`derive_view`] is a pure function of the collection snapshot and the
//! transient UI parameters; [`ViewCache`] memoizes it on exactly those
//! inputs.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::application::collection_store::CollectionSnapshot;
use crate::domain::entities::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Code,
    TotalClicks,
    LastClickedTime,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Code => "code",
            Self::TotalClicks => "totalClicks",
            Self::LastClickedTime => "lastClickedTime",
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "clicks" | "totalClicks" => Ok(Self::TotalClicks),
            "last-clicked" | "lastClickedTime" => Ok(Self::LastClickedTime),
            other => Err(format!(
                "unknown sort key '{other}' (expected code, clicks or last-clicked)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction.
///
/// Defaults to most recently clicked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::LastClickedTime,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Sort requested by clicking a column header.
    ///
    /// The same key toggles ascending ↔ descending; a different key always
    /// starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::new(key, SortDirection::Descending)
        } else {
            Self::ascending(key)
        }
    }

    /// Orders two links under this spec.
    ///
    /// A missing `last_clicked_time` sorts after every timestamp in both
    /// directions.
    fn compare(&self, a: &Link, b: &Link) -> Ordering {
        let ordering = match self.key {
            SortKey::Code => a.code.cmp(&b.code),
            SortKey::TotalClicks => a.total_clicks.cmp(&b.total_clicks),
            SortKey::LastClickedTime => match (&a.last_clicked_time, &b.last_clicked_time) {
                (Some(a), Some(b)) => a.cmp(b),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
            },
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Returns true if `link` matches `needle` (already lowercased).
fn matches(link: &Link, needle: &str) -> bool {
    needle.is_empty()
        || link.code.to_lowercase().contains(needle)
        || link.target_url.to_lowercase().contains(needle)
}

/// Computes the display sequence: sorted by `sort`, then filtered to links
/// whose code or target URL contains `search` (case-insensitive).
///
/// The sort is stable, so links with equal keys keep their collection order.
/// An empty search term keeps every link; any other term, whitespace
/// included, is matched literally.
pub fn derive_view(links: &[Link], search: &str, sort: SortSpec) -> Vec<Link> {
    let needle = search.to_lowercase();

    let mut view: Vec<Link> = links
        .iter()
        .filter(|link| matches(link, &needle))
        .cloned()
        .collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Why a derived view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself has no links.
    NoLinks,
    /// Links exist but none matches the search term.
    NoMatches,
}

impl EmptyState {
    /// Classifies an empty view, `None` if the view has rows.
    pub fn classify(total: usize, visible: usize) -> Option<Self> {
        match (total, visible) {
            (_, v) if v > 0 => None,
            (0, _) => Some(Self::NoLinks),
            _ => Some(Self::NoMatches),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoLinks => "No links created yet. Use the form above to get started!",
            Self::NoMatches => "No results found matching your search term.",
        }
    }
}

/// Memoizes [`derive_view`] on (collection revision, search term, sort).
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, String, SortSpec)>,
    view: Vec<Link>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the view for these inputs, recomputing only if one changed.
    pub fn get(&mut self, snapshot: &CollectionSnapshot, search: &str, sort: SortSpec) -> &[Link] {
        let fresh = self.key.as_ref().is_some_and(|(revision, term, spec)| {
            *revision == snapshot.revision && term == search && *spec == sort
        });

        if !fresh {
            self.view = derive_view(&snapshot.links, search, sort);
            self.key = Some((snapshot.revision, search.to_string(), sort));
        }
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::resource::ResourceStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn link(code: &str, url: &str, clicks: u64, last: Option<i64>) -> Link {
        Link {
            code: code.to_string(),
            target_url: url.to_string(),
            total_clicks: clicks,
            last_clicked_time: last.map(at),
            created_at: at(0),
        }
    }

    fn codes(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.code.as_str()).collect()
    }

    fn sample() -> Vec<Link> {
        vec![
            link("bbb222", "https://rust-lang.org", 5, Some(30)),
            link("aaa111", "https://docs.rs/tokio", 2, None),
            link("ddd444", "https://crates.io", 5, Some(10)),
            link("ccc333", "https://GitHub.com/rust", 9, None),
            link("eee555", "https://example.com", 2, Some(20)),
        ]
    }

    #[test]
    fn test_sort_by_code() {
        let view = derive_view(&sample(), "", SortSpec::ascending(SortKey::Code));
        assert_eq!(codes(&view), vec!["aaa111", "bbb222", "ccc333", "ddd444", "eee555"]);

        let view = derive_view(
            &sample(),
            "",
            SortSpec::new(SortKey::Code, SortDirection::Descending),
        );
        assert_eq!(codes(&view), vec!["eee555", "ddd444", "ccc333", "bbb222", "aaa111"]);
    }

    #[test]
    fn test_sort_by_clicks_is_stable() {
        let view = derive_view(&sample(), "", SortSpec::ascending(SortKey::TotalClicks));
        // Ties (2: aaa111, eee555; 5: bbb222, ddd444) keep input order.
        assert_eq!(codes(&view), vec!["aaa111", "eee555", "bbb222", "ddd444", "ccc333"]);

        let view = derive_view(
            &sample(),
            "",
            SortSpec::new(SortKey::TotalClicks, SortDirection::Descending),
        );
        assert_eq!(codes(&view), vec!["ccc333", "bbb222", "ddd444", "aaa111", "eee555"]);
    }

    #[test]
    fn test_null_last_clicked_sorts_last_both_ways() {
        let view = derive_view(&sample(), "", SortSpec::ascending(SortKey::LastClickedTime));
        assert_eq!(codes(&view), vec!["ddd444", "eee555", "bbb222", "aaa111", "ccc333"]);

        let view = derive_view(&sample(), "", SortSpec::default());
        assert_eq!(codes(&view), vec!["bbb222", "eee555", "ddd444", "aaa111", "ccc333"]);
    }

    #[test]
    fn test_filter_matches_code_or_url_case_insensitive() {
        let sort = SortSpec::ascending(SortKey::Code);

        let view = derive_view(&sample(), "RUST", sort);
        assert_eq!(codes(&view), vec!["bbb222", "ccc333"]);

        let view = derive_view(&sample(), "github", sort);
        assert_eq!(codes(&view), vec!["ccc333"]);

        let view = derive_view(&sample(), "AAA1", sort);
        assert_eq!(codes(&view), vec!["aaa111"]);

        assert!(derive_view(&sample(), "nothing-here", sort).is_empty());
    }

    #[test]
    fn test_empty_search_returns_full_sorted_list() {
        let sort = SortSpec::ascending(SortKey::TotalClicks);
        let view = derive_view(&sample(), "", sort);
        assert_eq!(codes(&view), vec!["aaa111", "eee555", "bbb222", "ddd444", "ccc333"]);
    }

    #[test]
    fn test_whitespace_in_search_is_matched_literally() {
        let sort = SortSpec::ascending(SortKey::Code);
        assert!(derive_view(&sample(), " rust", sort).is_empty());
        assert!(derive_view(&sample(), "   ", sort).is_empty());
        assert_eq!(codes(&derive_view(&sample(), "rust", sort)), vec!["bbb222", "ccc333"]);
    }

    #[test]
    fn test_toggle_two_state() {
        let spec = SortSpec::default().toggle(SortKey::Code);
        assert_eq!(spec, SortSpec::ascending(SortKey::Code));

        let spec = spec.toggle(SortKey::Code);
        assert_eq!(spec.direction, SortDirection::Descending);

        let spec = spec.toggle(SortKey::Code);
        assert_eq!(spec, SortSpec::ascending(SortKey::Code));

        let spec = spec.toggle(SortKey::Code).toggle(SortKey::TotalClicks);
        assert_eq!(spec, SortSpec::ascending(SortKey::TotalClicks));
    }

    #[test]
    fn test_toggle_from_default_descending_key_starts_ascending() {
        let spec = SortSpec::default().toggle(SortKey::LastClickedTime);
        assert_eq!(spec, SortSpec::ascending(SortKey::LastClickedTime));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("code".parse::<SortKey>(), Ok(SortKey::Code));
        assert_eq!("clicks".parse::<SortKey>(), Ok(SortKey::TotalClicks));
        assert_eq!("last-clicked".parse::<SortKey>(), Ok(SortKey::LastClickedTime));
        assert!("created".parse::<SortKey>().is_err());
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(EmptyState::classify(0, 0), Some(EmptyState::NoLinks));
        assert_eq!(EmptyState::classify(3, 0), Some(EmptyState::NoMatches));
        assert_eq!(EmptyState::classify(3, 1), None);
    }

    #[test]
    fn test_view_cache_recomputes_on_input_change() {
        let mut snapshot = CollectionSnapshot {
            status: ResourceStatus::Succeeded,
            error: None,
            links: sample(),
            revision: 1,
        };
        let mut cache = ViewCache::new();
        let sort = SortSpec::ascending(SortKey::Code);

        assert_eq!(cache.get(&snapshot, "", sort).len(), 5);
        assert_eq!(cache.get(&snapshot, "rust", sort).len(), 2);

        snapshot.links.truncate(1);
        // Same revision: cached result is reused.
        assert_eq!(cache.get(&snapshot, "rust", sort).len(), 2);

        snapshot.revision = 2;
        assert_eq!(cache.get(&snapshot, "rust", sort).len(), 1);
    }
}
