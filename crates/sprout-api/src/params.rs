// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use std::collections::HashMap;

pub const ARTICLE_LIMIT_DEFAULT: usize = 20;
pub const ARTICLE_LIMIT_MAX: usize = 100;

/// Parsed filters for the public article listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleQuery {
    pub tag: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: usize,
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ApiError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(ApiError::invalid_param(name, other)),
    }
}

/// Parses the raw query map; unknown parameters are rejected so typos
/// fail loudly instead of silently returning everything.
pub fn parse_article_query(params: &HashMap<String, String>) -> Result<ArticleQuery, ApiError> {
    let mut query = ArticleQuery {
        limit: ARTICLE_LIMIT_DEFAULT,
        ..ArticleQuery::default()
    };
    for (key, value) in params {
        match key.as_str() {
            "tag" => query.tag = Some(value.clone()),
            "category" => query.category = Some(value.clone()),
            "featured" => query.featured = Some(parse_bool("featured", value)?),
            "limit" => {
                let limit: usize = value
                    .parse()
                    .map_err(|_| ApiError::invalid_param("limit", value))?;
                if limit == 0 || limit > ARTICLE_LIMIT_MAX {
                    return Err(ApiError::invalid_param("limit", value));
                }
                query.limit = limit;
            }
            other => return Err(ApiError::invalid_param(other, value)),
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_on_empty_query() {
        let query = parse_article_query(&map(&[])).expect("parse");
        assert_eq!(query.limit, ARTICLE_LIMIT_DEFAULT);
        assert_eq!(query.tag, None);
    }

    #[test]
    fn limit_outside_range_is_rejected() {
        assert!(parse_article_query(&map(&[("limit", "0")])).is_err());
        assert!(parse_article_query(&map(&[("limit", "101")])).is_err());
        let query = parse_article_query(&map(&[("limit", "5")])).expect("parse");
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        assert!(parse_article_query(&map(&[("tga", "SNS")])).is_err());
    }

    #[test]
    fn featured_accepts_common_bool_spellings() {
        let query = parse_article_query(&map(&[("featured", "1")])).expect("parse");
        assert_eq!(query.featured, Some(true));
        assert!(parse_article_query(&map(&[("featured", "yep")])).is_err());
    }
}
