use contracts::shared::api::ListResponse;

use super::params::parse_int;
use crate::shared::error::AppResult;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Значения ≤ 0 поднимаются до 1, нечисловые отклоняются с 400
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> AppResult<Self> {
        let page = parse_int("page", page)?.map_or(DEFAULT_PAGE, clamp);
        let page_size = parse_int("pageSize", page_size)?.map_or(DEFAULT_PAGE_SIZE, clamp);
        Ok(Self { page, page_size })
    }

    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Режет уже отфильтрованную и упорядоченную последовательность;
    /// `total_count` равен её полной длине.
    pub fn paginate<T, U>(&self, rows: Vec<T>, map: impl FnMut(T) -> U) -> ListResponse<U> {
        let total_count = rows.len();
        let data = rows
            .into_iter()
            .skip(self.skip())
            .take(self.page_size)
            .map(map)
            .collect();

        ListResponse {
            data,
            total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: total_pages(total_count, self.page_size),
        }
    }
}

fn clamp(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1))
}
