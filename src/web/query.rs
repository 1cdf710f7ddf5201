//! Gallery query string: repeated `tag` keys plus a `q` search term.

use url::form_urlencoded;

use crate::filter::RecipeFilter;

const TAG_KEY: &str = "tag";
const SEARCH_KEY: &str = "q";

/// Filter controls as submitted by the gallery form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    pub tags: Vec<String>,
    pub search: String,
}

impl GalleryQuery {
    /// Decodes a raw query string; unknown keys are ignored.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match &*key {
                TAG_KEY if !value.trim().is_empty() => {
                    let tag = value.into_owned();
                    if !query.tags.contains(&tag) {
                        query.tags.push(tag);
                    }
                }
                SEARCH_KEY => query.search = value.into_owned(),
                _ => {}
            }
        }
        query
    }

    #[must_use]
    pub fn filter(&self) -> RecipeFilter {
        RecipeFilter::new(self.tags.iter().cloned(), self.search.clone())
    }

    #[must_use]
    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.tags.iter().any(|selected| selected == tag)
    }

    /// Re-encodes the query; empty when no control is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for tag in &self.tags {
            serializer.append_pair(TAG_KEY, tag);
        }
        if !self.search.is_empty() {
            serializer.append_pair(SEARCH_KEY, &self.search);
        }
        serializer.finish()
    }

    /// `path` with this query appended.
    #[must_use]
    pub fn location(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_tags_and_search() {
        let query = GalleryQuery::parse(Some("tag=Soup&tag=Spicy+Food&q=tom%C3%A1te&page=2"));
        assert_eq!(query.tags, vec!["Soup", "Spicy Food"]);
        assert_eq!(query.search, "tomáte");
    }

    #[test]
    fn test_parse_drops_blank_and_duplicate_tags() {
        let query = GalleryQuery::parse(Some("tag=&tag=Soup&tag=Soup&tag=+"));
        assert_eq!(query.tags, vec!["Soup"]);
    }

    #[test]
    fn test_parse_none_is_default() {
        assert_eq!(GalleryQuery::parse(None), GalleryQuery::default());
        assert!(GalleryQuery::parse(Some("")).filter().is_identity());
    }

    #[test]
    fn test_location_round_trips_controls() {
        let query = GalleryQuery {
            tags: vec!["Soup & Stew".to_string()],
            search: "bean".to_string(),
        };
        let location = query.location("/");
        assert_eq!(location, "/?tag=Soup+%26+Stew&q=bean");

        let reparsed = GalleryQuery::parse(location.strip_prefix("/?"));
        assert_eq!(reparsed, query);
    }

    #[test]
    fn test_location_without_controls() {
        assert_eq!(GalleryQuery::default().location("/suggest"), "/suggest");
    }

    #[test]
    fn test_filter_uses_tags_and_search() {
        let query = GalleryQuery::parse(Some("tag=Meat&q=stew"));
        let filter = query.filter();
        assert!(filter.tags().contains("Meat"));
        assert_eq!(filter.search(), "stew");
        assert!(query.is_tag_selected("Meat"));
        assert!(!query.is_tag_selected("Soup"));
    }
}
