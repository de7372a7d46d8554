use ghn_core::{Entry, FilterConfig};

/// Outcome of filtering a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Entry goes into the batch.
    Include,
    /// Entry is dropped, the cycle continues.
    Skip,
    /// Entry is dropped along with the rest of this cycle's entries.
    HaltBatch,
}

/// Applies the importance/blacklist rules to one entry.
///
/// The two importance toggles form a single branch: enabling either puts
/// the filter into allow-list mode, and a match on either list is
/// sufficient. Blacklists only apply when neither importance toggle is set.
/// A blacklisted project halts the whole batch; a blacklisted author only
/// skips the entry.
pub fn classify(entry: &Entry, filter: &FilterConfig) -> Decision {
    if filter.important_authors || filter.important_projects {
        let author_hit = filter.important_authors
            && filter
                .important_author_list
                .iter()
                .any(|a| a == entry.primary_author());
        let project_hit = filter.important_projects
            && filter
                .important_project_list
                .iter()
                .any(|p| match_project(&entry.link, p));

        return if author_hit || project_hit {
            Decision::Include
        } else {
            Decision::Skip
        };
    }

    if filter.blacklist_projects
        && filter
            .blacklist_project_list
            .iter()
            .any(|p| match_project(&entry.link, p))
    {
        return Decision::HaltBatch;
    }

    if filter.blacklist_authors
        && filter
            .blacklist_author_list
            .iter()
            .any(|a| a == entry.primary_author())
    {
        return Decision::Skip;
    }

    Decision::Include
}

/// True when the link's `/{owner}/{project}/` segments match the pattern.
///
/// Patterns are either `project` or `owner/project`. Links with fewer than
/// five `/`-separated segments carry too little information and never
/// match.
pub fn match_project(link: &str, pattern: &str) -> bool {
    let link_parts: Vec<&str> = link.split('/').collect();
    if link_parts.len() <= 4 {
        return false;
    }

    let (pattern_owner, pattern_project) = match pattern.split_once('/') {
        Some((owner, project)) => (Some(owner), project),
        None => (None, pattern),
    };

    let owner_from_link = link_parts[3];
    let project_from_link = link_parts[4];

    pattern_project == project_from_link
        && pattern_owner.map_or(true, |owner| owner == owner_from_link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ghn_core::EntryAuthor;

    fn entry(author: &str, link: &str) -> Entry {
        Entry {
            id: "id".to_string(),
            author: author.to_string(),
            title: "title".to_string(),
            link: link.to_string(),
            updated: Utc::now(),
            authors: vec![EntryAuthor {
                name: author.to_string(),
            }],
        }
    }

    #[test]
    fn project_pattern_matches_by_name() {
        assert!(match_project(
            "https://github.com/acme/widgets/pull/3",
            "widgets"
        ));
        assert!(!match_project(
            "https://github.com/acme/widgets/pull/3",
            "gadgets"
        ));
    }

    #[test]
    fn project_pattern_with_owner_requires_both() {
        assert!(match_project(
            "https://github.com/acme/widgets/pull/3",
            "acme/widgets"
        ));
        assert!(!match_project(
            "https://github.com/acme/widgets/pull/3",
            "other/widgets"
        ));
    }

    #[test]
    fn short_links_never_match() {
        assert!(!match_project("https://github.com", "widgets"));
        assert!(!match_project("https://github.com/acme", "acme/widgets"));
    }

    #[test]
    fn exact_boundary_link_matches() {
        // Five segments is the minimum carrying owner and project.
        assert!(match_project("https://github.com/acme/widgets", "widgets"));
    }

    #[test]
    fn no_toggles_includes_everything() {
        let filter = FilterConfig::default();
        let e = entry("bob", "https://github.com/acme/widgets/pull/3");
        assert_eq!(classify(&e, &filter), Decision::Include);
    }

    #[test]
    fn important_authors_is_an_allow_list() {
        let filter = FilterConfig {
            important_authors: true,
            important_author_list: vec!["alice".to_string()],
            ..Default::default()
        };
        let alice = entry("alice", "");
        let bob = entry("bob", "");
        assert_eq!(classify(&alice, &filter), Decision::Include);
        assert_eq!(classify(&bob, &filter), Decision::Skip);
    }

    #[test]
    fn importance_branch_shadows_project_list() {
        // With only the author toggle on, a would-be project match is
        // inert: bob's entry stays excluded.
        let filter = FilterConfig {
            important_authors: true,
            important_author_list: vec!["alice".to_string()],
            important_project_list: vec!["widgets".to_string()],
            ..Default::default()
        };
        let e = entry("bob", "https://github.com/acme/widgets/pull/3");
        assert_eq!(classify(&e, &filter), Decision::Skip);
    }

    #[test]
    fn importance_toggles_are_or_ed() {
        let filter = FilterConfig {
            important_authors: true,
            important_projects: true,
            important_author_list: vec!["alice".to_string()],
            important_project_list: vec!["widgets".to_string()],
            ..Default::default()
        };
        let by_author = entry("alice", "https://github.com/acme/tools/pull/1");
        let by_project = entry("bob", "https://github.com/acme/widgets/pull/3");
        let neither = entry("bob", "https://github.com/acme/tools/pull/1");
        assert_eq!(classify(&by_author, &filter), Decision::Include);
        assert_eq!(classify(&by_project, &filter), Decision::Include);
        assert_eq!(classify(&neither, &filter), Decision::Skip);
    }

    #[test]
    fn blacklisted_author_skips_only_the_entry() {
        let filter = FilterConfig {
            blacklist_authors: true,
            blacklist_author_list: vec!["mallory".to_string()],
            ..Default::default()
        };
        let mallory = entry("mallory", "");
        let bob = entry("bob", "");
        assert_eq!(classify(&mallory, &filter), Decision::Skip);
        assert_eq!(classify(&bob, &filter), Decision::Include);
    }

    #[test]
    fn blacklisted_project_halts_the_batch() {
        let filter = FilterConfig {
            blacklist_projects: true,
            blacklist_project_list: vec!["widgets".to_string()],
            ..Default::default()
        };
        let e = entry("bob", "https://github.com/acme/widgets/pull/3");
        assert_eq!(classify(&e, &filter), Decision::HaltBatch);
    }

    #[test]
    fn project_blacklist_wins_over_author_blacklist() {
        let filter = FilterConfig {
            blacklist_authors: true,
            blacklist_projects: true,
            blacklist_author_list: vec!["mallory".to_string()],
            blacklist_project_list: vec!["widgets".to_string()],
            ..Default::default()
        };
        let e = entry("mallory", "https://github.com/acme/widgets/pull/3");
        assert_eq!(classify(&e, &filter), Decision::HaltBatch);
    }

    #[test]
    fn empty_author_list_uses_display_author() {
        let filter = FilterConfig {
            blacklist_authors: true,
            blacklist_author_list: vec!["mallory".to_string()],
            ..Default::default()
        };
        let mut e = entry("mallory", "");
        e.authors.clear();
        assert_eq!(classify(&e, &filter), Decision::Skip);
    }
}
