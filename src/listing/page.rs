use serde::Serialize;

/// One page of results plus what a client needs to render a pager.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_pages: u64,
    pub item_from: u64,
    pub item_to: u64,
    pub total_items_count: u64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page_size: u32, page_number: u32) -> Self {
        let page_size = u64::from(page_size.max(1));
        let item_from = page_size
            .saturating_mul(u64::from(page_number.saturating_sub(1)))
            .saturating_add(1);
        let item_to = item_from.saturating_add(page_size - 1);
        let total_pages = total_count.div_ceil(page_size);

        Self {
            items,
            total_pages,
            item_from,
            item_to,
            total_items_count: total_count,
        }
    }
}
