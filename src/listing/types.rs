use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page sizes a client may ask for
pub const ALLOWED_PAGE_SIZES: [u32; 3] = [5, 10, 15];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") || s.eq_ignore_ascii_case("ascending") || s == "0" {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") || s.eq_ignore_ascii_case("descending") || s == "1" {
            Ok(SortDirection::Desc)
        } else {
            Err(())
        }
    }
}

/// Whitelisted sort columns. Matching is exact, against the entity field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    Name,
    Description,
    Category,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [SortColumn::Name, SortColumn::Description, SortColumn::Category];

    pub fn field_name(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Description => "Description",
            SortColumn::Category => "Category",
        }
    }

    /// Qualified column for ORDER BY. Never built from client input.
    pub fn column(&self) -> &'static str {
        match self {
            SortColumn::Name => "r.\"name\"",
            SortColumn::Description => "r.\"description\"",
            SortColumn::Category => "r.\"category\"",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|c| c.field_name() == s)
            .ok_or(())
    }
}

/// A validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantQuery {
    pub search_phrase: Option<String>,
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: Option<SortColumn>,
    pub sort_direction: SortDirection,
}

impl RestaurantQuery {
    /// Records to skip. Saturates instead of overflowing on absurd page numbers.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}
