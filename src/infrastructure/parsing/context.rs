//! Parsing context threaded through one scrape run

use chrono::NaiveDate;

/// Round-robin position in the sample store table.
///
/// Owned by the pagination run and carried across pages so assignment
/// continues where the previous page left off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionCursor {
    next: usize,
}

impl ExtractionCursor {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Current slot modulo `len`, then advance. `None` when `len` is zero.
    pub fn advance(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let slot = self.next % len;
        self.next += 1;
        Some(slot)
    }

    pub const fn position(&self) -> usize {
        self.next
    }
}

/// Context information for parsing one listing page
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// App the page belongs to
    pub app_name: String,

    /// 1-based page number
    pub page: u32,

    /// Reference date for relative phrases
    pub today: NaiveDate,

    pub cursor: ExtractionCursor,
}

impl ParseContext {
    pub fn new(app_name: &str, today: NaiveDate) -> Self {
        Self {
            app_name: app_name.to_string(),
            page: 1,
            today,
            cursor: ExtractionCursor::new(),
        }
    }

    /// Move to `page`, keeping the round-robin cursor.
    pub fn at_page(&mut self, page: u32) -> &mut Self {
        self.page = page;
        self
    }
}
