use serde::Serialize;

/// One page of backend rows together with the pager state.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    /// Previous page, when there is one.
    pub prev_page: Option<usize>,
    /// Next page, when there is one.
    pub next_page: Option<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = current_page.max(1);

        Self {
            items,
            page: current_page,
            total_pages,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
        }
    }

    /// Converts the rows while keeping the pager state.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}
