use crate::api::search::error::SearchError;
use serde::Deserialize;
use utoipa::ToSchema;

const MAX_QUERY_LEN: usize = 512;
const MAX_FILTER_VALUES: usize = 16;

/// Search descriptor for `POST /clothing/search`.
///
/// `ai_search` selects semantic ("vibe") mode; with it off, or with an empty
/// query, the request runs as a keyword search. `categories` and `colors`
/// are OR-combined within each set and AND-combined with everything else.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub ai_search: bool,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    /// Use the broad-recall tuning profile instead of the quick one.
    pub broad: bool,
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(query) = &self.query
            && query.len() > MAX_QUERY_LEN
        {
            return Err(SearchError::InvalidRequest(format!(
                "query exceeds {MAX_QUERY_LEN} bytes"
            )));
        }
        if self.categories.len() > MAX_FILTER_VALUES || self.colors.len() > MAX_FILTER_VALUES {
            return Err(SearchError::InvalidRequest(format!(
                "at most {MAX_FILTER_VALUES} values per filter"
            )));
        }
        if self
            .categories
            .iter()
            .chain(self.colors.iter())
            .any(|value| value.trim().is_empty())
        {
            return Err(SearchError::InvalidRequest(
                "filter values must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(SearchParams::default().validate().is_ok());
    }

    #[test]
    fn oversized_query_is_rejected() {
        let params = SearchParams {
            query: Some("x".repeat(MAX_QUERY_LEN + 1)),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SearchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn blank_filter_values_are_rejected() {
        let params = SearchParams {
            colors: vec!["Red".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SearchError::InvalidRequest(_))
        ));
    }
}
