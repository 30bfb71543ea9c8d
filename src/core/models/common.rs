#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    limit: usize,
    offset: Option<usize>,
}

impl Pagination {
    pub fn new(limit: usize, offset: Option<usize>) -> Self {
        Self { limit, offset }
    }

    pub fn paginate<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset.unwrap_or(0)).take(self.limit).collect()
    }
}
