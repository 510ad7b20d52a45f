//! Search and category filtering over cached credentials.
//!
//! Stateless: the view is recomputed from the cache on every call.

use std::fmt;

use super::model::Credential;

/// Category restriction of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Canonical string form of a category id.
    Id(String),
}

impl CategoryFilter {
    /// Exactly `"all"` means no restriction; anything else is an id.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            Self::All
        } else {
            Self::Id(raw.to_string())
        }
    }

    fn admits(&self, credential: &Credential) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => credential
                .category_id
                .is_some_and(|c| c.to_string() == *id),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Id(id) => f.write_str(id),
        }
    }
}

/// User-entered search term plus category restriction. Local only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl FilterPredicate {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category,
        }
    }
}

/// Credentials matching both the search term and the category.
///
/// The term is a case-insensitive substring of name, email or url. The
/// returned iterator is lazy and can be cloned to restart it.
pub fn filter<'a>(
    credentials: &'a [Credential],
    predicate: &'a FilterPredicate,
) -> impl Iterator<Item = &'a Credential> + Clone + 'a {
    let needle = predicate.search_term.to_lowercase();
    credentials.iter().filter(move |c| {
        matches_text(c, &needle) && predicate.category.admits(c)
    })
}

fn matches_text(credential: &Credential, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&credential.name)
        || hit(&credential.email)
        || credential.url.as_deref().is_some_and(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::model::{CategoryId, CredentialId};

    fn credential(id: u64, name: &str, category: Option<u64>) -> Credential {
        Credential {
            id: CredentialId(id),
            name: name.to_string(),
            email: format!("user{id}@example.com"),
            url: None,
            category_id: category.map(CategoryId),
            category_name: None,
            password: "pw".to_string(),
            created_at: None,
        }
    }

    fn names<'a>(it: impl Iterator<Item = &'a Credential>) -> Vec<&'a str> {
        it.map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn search_and_category_are_anded() {
        let creds = vec![
            credential(1, "Gmail", Some(1)),
            credential(2, "Github", Some(2)),
        ];

        let one = FilterPredicate::new("g", CategoryFilter::parse("1"));
        assert_eq!(names(filter(&creds, &one)), vec!["Gmail"]);

        let all = FilterPredicate::new("g", CategoryFilter::parse("all"));
        assert_eq!(names(filter(&creds, &all)), vec!["Gmail", "Github"]);

        let none = FilterPredicate::new("zzz", CategoryFilter::All);
        assert!(filter(&creds, &none).next().is_none());
    }

    #[test]
    fn empty_term_matches_everything() {
        let creds = vec![credential(1, "A", None), credential(2, "B", Some(3))];
        let p = FilterPredicate::default();
        assert_eq!(filter(&creds, &p).count(), 2);
    }

    #[test]
    fn search_covers_email_and_url_case_insensitively() {
        let mut with_url = credential(1, "Bank", None);
        with_url.url = Some("https://MyBank.example".into());
        let creds = vec![with_url, credential(2, "Other", None)];

        let by_url = FilterPredicate::new("mybank", CategoryFilter::All);
        assert_eq!(names(filter(&creds, &by_url)), vec!["Bank"]);

        let by_email = FilterPredicate::new("USER2@", CategoryFilter::All);
        assert_eq!(names(filter(&creds, &by_email)), vec!["Other"]);
    }

    #[test]
    fn uncategorized_never_matches_specific_category() {
        let creds = vec![credential(1, "Loose", None)];
        let p = FilterPredicate::new("", CategoryFilter::Id("1".into()));
        assert_eq!(filter(&creds, &p).count(), 0);
    }

    #[test]
    fn iterator_is_restartable() {
        let creds = vec![credential(1, "Gmail", Some(1)), credential(2, "Github", Some(2))];
        let p = FilterPredicate::new("git", CategoryFilter::All);

        let view = filter(&creds, &p);
        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("4"), CategoryFilter::Id("4".into()));
        assert_eq!(CategoryFilter::Id("4".into()).to_string(), "4");
    }

    #[test]
    fn only_lowercase_all_is_unrestricted() {
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::Id("ALL".into()));
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::Id(String::new()));

        let creds = vec![credential(1, "Gmail", Some(1))];
        let p = FilterPredicate::new("", CategoryFilter::parse("All"));
        assert_eq!(filter(&creds, &p).count(), 0);
    }
}
