use super::types::{RestaurantQuery, SortDirection, SqlResult};

/// Columns selected for a restaurant joined with its address
pub const RESTAURANT_COLUMNS: &str = "r.\"id\", r.\"name\", r.\"description\", r.\"category\", r.\"has_delivery\", \
     r.\"contact_email\", r.\"contact_number\", r.\"created_by_id\", \
     a.\"city\", a.\"street\", a.\"postal_code\"";

const FROM_CLAUSE: &str = "FROM \"restaurants\" r JOIN \"addresses\" a ON a.\"restaurant_id\" = r.\"id\"";

/// SQL generation for a validated [`RestaurantQuery`].
///
/// The only bound parameter is the search pattern; sort columns come from the
/// whitelist and limit/offset are integers, so neither is interpolated from
/// client text.
pub struct ListingSql<'a> {
    query: &'a RestaurantQuery,
}

impl<'a> ListingSql<'a> {
    pub fn new(query: &'a RestaurantQuery) -> Self {
        Self { query }
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = self.build_where_clause();
        let query = [
            format!("SELECT {}", RESTAURANT_COLUMNS),
            FROM_CLAUSE.to_string(),
            where_clause,
            self.build_order_clause(),
            self.build_limit_clause(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.build_where_clause();
        let query = if where_clause.is_empty() {
            "SELECT COUNT(*) AS count FROM \"restaurants\" r".to_string()
        } else {
            format!("SELECT COUNT(*) AS count FROM \"restaurants\" r {}", where_clause)
        };
        SqlResult { query, params }
    }

    fn build_where_clause(&self) -> (String, Vec<String>) {
        match self.query.search_phrase.as_deref() {
            Some(phrase) => (
                "WHERE (r.\"name\" ILIKE $1 OR r.\"category\" ILIKE $1)".to_string(),
                vec![like_pattern(phrase)],
            ),
            None => (String::new(), vec![]),
        }
    }

    fn build_order_clause(&self) -> String {
        match self.query.sort_by {
            // Case-folded; NULLs go where `Option` ordering puts them
            Some(column) => {
                let nulls = match self.query.sort_direction {
                    SortDirection::Asc => "NULLS FIRST",
                    SortDirection::Desc => "NULLS LAST",
                };
                format!(
                    "ORDER BY LOWER({}) {} {}, r.\"id\" ASC",
                    column.column(),
                    self.query.sort_direction.to_sql(),
                    nulls
                )
            }
            None => "ORDER BY r.\"id\" ASC".to_string(),
        }
    }

    fn build_limit_clause(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.query.limit(), self.query.offset())
    }
}

/// `%phrase%` with LIKE metacharacters escaped (backslash is the default escape)
pub fn like_pattern(phrase: &str) -> String {
    let mut pattern = String::with_capacity(phrase.len() + 2);
    pattern.push('%');
    for c in phrase.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
