// src/common/pagination.rs

/// Janela de uma página já ajustada ao total de registros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl PageWindow {
    /// Páginas fora do intervalo são ajustadas para a primeira/última válida.
    pub fn clamp(requested: Option<u32>, page_size: u32, total_count: i64) -> Self {
        let page_size = page_size.max(1);
        let total = u64::try_from(total_count).unwrap_or(0);
        let total_pages = total.div_ceil(u64::from(page_size)).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let page = requested.unwrap_or(1).clamp(1, total_pages);

        Self { page, page_size, total_pages }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_by_default() {
        let w = PageWindow::clamp(None, 15, 40);
        assert_eq!(w.page, 1);
        assert_eq!(w.total_pages, 3);
        assert_eq!(w.offset(), 0);
        assert_eq!(w.limit(), 15);
    }

    #[test]
    fn pages_past_the_end_clamp_to_last() {
        let w = PageWindow::clamp(Some(9), 15, 40);
        assert_eq!(w.page, 3);
        assert_eq!(w.offset(), 30);
    }

    #[test]
    fn page_zero_becomes_first() {
        assert_eq!(PageWindow::clamp(Some(0), 2, 3).page, 1);
    }

    #[test]
    fn empty_sets_still_have_one_page() {
        let w = PageWindow::clamp(Some(4), 15, 0);
        assert_eq!(w.page, 1);
        assert_eq!(w.total_pages, 1);
    }
}
