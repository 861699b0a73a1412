use crate::api::search::interfaces::SearchParams;

/// Which retrieval strategy a search descriptor resolves to.
///
/// Semantic mode consumes the query text exclusively through the embedding
/// provider; keyword mode uses it (when present) as a case-insensitive
/// substring match on the item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStrategy {
    Semantic { query: String },
    Keyword { name_query: Option<String> },
}

impl SearchStrategy {
    /// Semantic iff the semantic flag is set and the trimmed query is
    /// non-empty; keyword otherwise. Never falls back the other way.
    #[must_use]
    pub fn resolve(params: &SearchParams) -> Self {
        let query = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty());
        match query {
            Some(query) if params.ai_search => Self::Semantic {
                query: query.to_string(),
            },
            query => Self::Keyword {
                name_query: query.map(ToString::to_string),
            },
        }
    }
}

/// The exact-match half of a search: a deterministic descriptor-to-predicate
/// mapping with no side effects.
///
/// `predicate` renders a parameterized SQL fragment with placeholders
/// starting at `$1`; callers must bind values in the fixed order `user_id`,
/// `categories`, `colors`, `name_pattern` (skipping absent parts) and may
/// append their own parameters starting at `$(param_count() + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFilter {
    pub user_id: i32,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub name_contains: Option<String>,
}

impl ItemFilter {
    #[must_use]
    pub fn build(user_id: i32, params: &SearchParams, strategy: &SearchStrategy) -> Self {
        let name_contains = match strategy {
            SearchStrategy::Keyword { name_query } => name_query.clone(),
            SearchStrategy::Semantic { .. } => None,
        };
        Self {
            user_id,
            categories: params.categories.clone(),
            colors: params.colors.clone(),
            name_contains,
        }
    }

    /// Owner scoping is unconditional; empty filter sets contribute no
    /// clause. Categories are "is one of", colors are array overlap.
    #[must_use]
    pub fn predicate(&self) -> String {
        let mut clauses = vec!["user_id = $1".to_string()];
        let mut next = 2;
        if !self.categories.is_empty() {
            clauses.push(format!("category = ANY(${next})"));
            next += 1;
        }
        if !self.colors.is_empty() {
            clauses.push(format!("colors && ${next}"));
            next += 1;
        }
        if self.name_contains.is_some() {
            clauses.push(format!("name ILIKE ${next}"));
        }
        clauses.join(" AND ")
    }

    /// Number of placeholders `predicate` consumes.
    #[must_use]
    pub fn param_count(&self) -> usize {
        1 + usize::from(!self.categories.is_empty())
            + usize::from(!self.colors.is_empty())
            + usize::from(self.name_contains.is_some())
    }

    /// The ILIKE pattern for the name clause, with LIKE metacharacters
    /// escaped so the needle matches literally.
    #[must_use]
    pub fn name_pattern(&self) -> Option<String> {
        self.name_contains
            .as_deref()
            .map(|needle| format!("%{}%", escape_like(needle)))
    }
}

fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: Option<&str>, ai_search: bool) -> SearchParams {
        SearchParams {
            query: query.map(ToString::to_string),
            ai_search,
            ..Default::default()
        }
    }

    #[test]
    fn semantic_requires_flag_and_nonempty_query() {
        assert_eq!(
            SearchStrategy::resolve(&params(Some("cozy autumn"), true)),
            SearchStrategy::Semantic {
                query: "cozy autumn".to_string()
            }
        );
        assert_eq!(
            SearchStrategy::resolve(&params(Some("cozy autumn"), false)),
            SearchStrategy::Keyword {
                name_query: Some("cozy autumn".to_string())
            }
        );
        // Whitespace-only queries do not trigger semantic mode.
        assert_eq!(
            SearchStrategy::resolve(&params(Some("   "), true)),
            SearchStrategy::Keyword { name_query: None }
        );
        assert_eq!(
            SearchStrategy::resolve(&params(None, true)),
            SearchStrategy::Keyword { name_query: None }
        );
    }

    #[test]
    fn owner_scoping_is_always_first_and_unconditional() {
        let strategy = SearchStrategy::resolve(&params(None, false));
        let filter = ItemFilter::build(7, &params(None, false), &strategy);
        assert_eq!(filter.predicate(), "user_id = $1");
        assert_eq!(filter.param_count(), 1);
        assert_eq!(filter.name_pattern(), None);
    }

    #[test]
    fn full_keyword_filter_numbers_placeholders_in_bind_order() {
        let search = SearchParams {
            query: Some("denim".to_string()),
            ai_search: false,
            categories: vec!["Tops".to_string(), "Outerwear".to_string()],
            colors: vec!["Blue".to_string()],
            broad: false,
        };
        let strategy = SearchStrategy::resolve(&search);
        let filter = ItemFilter::build(42, &search, &strategy);
        assert_eq!(
            filter.predicate(),
            "user_id = $1 AND category = ANY($2) AND colors && $3 AND name ILIKE $4"
        );
        assert_eq!(filter.param_count(), 4);
        assert_eq!(filter.name_pattern(), Some("%denim%".to_string()));
    }

    #[test]
    fn semantic_mode_never_contributes_a_name_clause() {
        let search = SearchParams {
            query: Some("denim".to_string()),
            ai_search: true,
            categories: vec!["Tops".to_string()],
            ..Default::default()
        };
        let strategy = SearchStrategy::resolve(&search);
        let filter = ItemFilter::build(42, &search, &strategy);
        assert_eq!(filter.predicate(), "user_id = $1 AND category = ANY($2)");
        assert_eq!(filter.name_pattern(), None);
    }

    #[test]
    fn empty_sets_contribute_no_constraint() {
        let search = SearchParams {
            colors: vec!["Red".to_string()],
            ..Default::default()
        };
        let strategy = SearchStrategy::resolve(&search);
        let filter = ItemFilter::build(1, &search, &strategy);
        assert_eq!(filter.predicate(), "user_id = $1 AND colors && $2");
    }

    #[test]
    fn like_metacharacters_match_literally() {
        assert_eq!(escape_like("100%_wool\\blend"), "100\\%\\_wool\\\\blend");
        let search = SearchParams {
            query: Some("50%".to_string()),
            ..Default::default()
        };
        let strategy = SearchStrategy::resolve(&search);
        let filter = ItemFilter::build(1, &search, &strategy);
        assert_eq!(filter.name_pattern(), Some("%50\\%%".to_string()));
    }

    #[test]
    fn build_is_deterministic() {
        let search = SearchParams {
            query: Some("denim".to_string()),
            categories: vec!["Tops".to_string()],
            colors: vec!["Blue".to_string()],
            ..Default::default()
        };
        let strategy = SearchStrategy::resolve(&search);
        let first = ItemFilter::build(9, &search, &strategy);
        let second = ItemFilter::build(9, &search, &strategy);
        assert_eq!(first, second);
        assert_eq!(first.predicate(), second.predicate());
    }
}
