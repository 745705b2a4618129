use serde::Deserialize;

use super::types::{RestaurantQuery, SortColumn, SortDirection, ALLOWED_PAGE_SIZES};
use crate::validation::ValidationErrors;

/// Raw listing parameters as they arrive on the query string.
///
/// Everything is kept as text so malformed numbers turn into field messages
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantQueryParams {
    pub search_phrase: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl RestaurantQueryParams {
    /// Parse into a [`RestaurantQuery`] or report every failing field.
    ///
    /// Missing page number or page size is a failure, not a default: an empty
    /// query string is rejected outright.
    pub fn validate(&self) -> Result<RestaurantQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let page_number = match parse_number(self.page_number.as_deref()) {
            Some(n) if n >= 1 => Some(n as u32),
            Some(_) | None => {
                errors.add("pageNumber", "'PageNumber' must be greater than or equal to '1'.");
                None
            }
        };

        let allowed = ALLOWED_PAGE_SIZES
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let page_size = match parse_number(self.page_size.as_deref()) {
            Some(n) if ALLOWED_PAGE_SIZES.iter().any(|&s| i64::from(s) == n) => Some(n as u32),
            Some(_) | None => {
                errors.add("pageSize", format!("PageSize must in [{}]", allowed));
                None
            }
        };

        let sort_by = match non_blank(self.sort_by.as_deref()) {
            None => None,
            Some(raw) => match raw.parse::<SortColumn>() {
                Ok(column) => Some(column),
                Err(()) => {
                    let names = SortColumn::ALL.iter().map(|c| c.field_name()).collect::<Vec<_>>().join(",");
                    errors.add("sortBy", format!("Sort by is optional, or must be in [{}]", names));
                    None
                }
            },
        };

        let sort_direction = match non_blank(self.sort_direction.as_deref()) {
            None => SortDirection::default(),
            Some(raw) => raw.parse::<SortDirection>().unwrap_or_else(|()| {
                errors.add("sortDirection", "SortDirection must be ASC or DESC");
                SortDirection::default()
            }),
        };

        match (page_number, page_size, errors.is_empty()) {
            (Some(page_number), Some(page_size), true) => Ok(RestaurantQuery {
                search_phrase: non_blank(self.search_phrase.as_deref()).map(str::to_string),
                page_number,
                page_size,
                sort_by,
                sort_direction,
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Anything outside u32 range is treated as out of range rather than unparseable
fn parse_number(value: Option<&str>) -> Option<i64> {
    non_blank(value)?
        .parse::<i64>()
        .ok()
        .map(|n| n.clamp(i64::MIN, i64::from(u32::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page_number: Option<&str>, page_size: Option<&str>, sort_by: Option<&str>) -> RestaurantQueryParams {
        RestaurantQueryParams {
            page_number: page_number.map(str::to_string),
            page_size: page_size.map(str::to_string),
            sort_by: sort_by.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_queries() {
        let samples = [
            params(Some("1"), Some("10"), None),
            params(Some("2"), Some("15"), None),
            params(Some("22"), Some("5"), Some("Name")),
            params(Some("12"), Some("15"), Some("Category")),
        ];
        for sample in samples {
            assert!(sample.validate().is_ok(), "expected valid: {:?}", sample);
        }
    }

    #[test]
    fn rejects_invalid_queries() {
        let samples = [
            params(Some("0"), Some("10"), None),
            params(Some("2"), Some("13"), None),
            params(Some("22"), Some("5"), Some("ContactEmail")),
            params(Some("12"), Some("15"), Some("ContactNumber")),
        ];
        for sample in samples {
            assert!(sample.validate().is_err(), "expected invalid: {:?}", sample);
        }
    }

    #[test]
    fn empty_query_is_rejected() {
        let errors = RestaurantQueryParams::default().validate().unwrap_err();
        assert!(errors.has_field("pageNumber"));
        assert!(errors.has_field("pageSize"));
    }

    #[test]
    fn page_size_message_lists_allowed_sizes() {
        let errors = params(Some("1"), Some("100"), None).validate().unwrap_err();
        assert_eq!(errors.messages("pageSize"), ["PageSize must in [5,10,15]"]);
    }

    #[test]
    fn unparseable_numbers_are_field_errors() {
        let errors = params(Some("one"), Some("5.0"), None).validate().unwrap_err();
        assert!(errors.has_field("pageNumber"));
        assert!(errors.has_field("pageSize"));
    }

    #[test]
    fn negative_and_huge_page_numbers() {
        assert!(params(Some("-3"), Some("5"), None).validate().is_err());
        let query = params(Some("99999999999"), Some("5"), None).validate().unwrap();
        assert_eq!(query.page_number, u32::MAX);
    }

    #[test]
    fn blank_search_phrase_is_dropped() {
        let mut raw = params(Some("1"), Some("5"), Some(" "));
        raw.search_phrase = Some("   ".to_string());
        raw.sort_direction = Some("desc".to_string());
        let query = raw.validate().unwrap();
        assert_eq!(query.search_phrase, None);
        assert_eq!(query.sort_by, None);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn bad_sort_direction_is_rejected() {
        let mut raw = params(Some("1"), Some("5"), Some("Name"));
        raw.sort_direction = Some("up".to_string());
        let errors = raw.validate().unwrap_err();
        assert!(errors.has_field("sortDirection"));
    }
}
