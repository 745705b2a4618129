use std::cmp::Ordering;

use super::types::{RestaurantQuery, SortColumn, SortDirection};
use crate::database::models::Restaurant;

/// Run a listing query over an in-memory collection.
///
/// Returns the requested page and the size of the filtered set before
/// pagination. Input order is irrelevant: without a sort column the output is
/// ordered by id so repeated calls agree.
pub fn apply(restaurants: impl IntoIterator<Item = Restaurant>, query: &RestaurantQuery) -> (Vec<Restaurant>, u64) {
    let needle = query.search_phrase.as_deref().map(str::to_lowercase);

    let mut matching: Vec<Restaurant> = restaurants
        .into_iter()
        .filter(|r| match &needle {
            Some(phrase) => matches_phrase(r, phrase),
            None => true,
        })
        .collect();

    let total = matching.len() as u64;

    match query.sort_by {
        Some(column) => matching.sort_by(|a, b| {
            let ordering = compare_by(column, a, b);
            let ordering = match query.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        }),
        None => matching.sort_by_key(|r| r.id),
    }

    let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(query.limit()).unwrap_or(usize::MAX);
    let page = matching.into_iter().skip(skip).take(take).collect();

    (page, total)
}

// `phrase` is already lowercased
fn matches_phrase(restaurant: &Restaurant, phrase: &str) -> bool {
    restaurant.name.to_lowercase().contains(phrase) || restaurant.category.to_lowercase().contains(phrase)
}

// Case-folded to match `ORDER BY LOWER(..)` on the SQL side
fn compare_by(column: SortColumn, a: &Restaurant, b: &Restaurant) -> Ordering {
    let fold = |s: &str| s.to_lowercase();
    match column {
        SortColumn::Name => fold(&a.name).cmp(&fold(&b.name)),
        SortColumn::Category => fold(&a.category).cmp(&fold(&b.category)),
        // missing descriptions first when ascending
        SortColumn::Description => a
            .description
            .as_deref()
            .map(fold)
            .cmp(&b.description.as_deref().map(fold)),
    }
}
