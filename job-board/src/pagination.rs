//! Clamping of page navigation into `1..=total_pages`.

use std::cmp::{max, min};

pub fn previous_page(current_page: u32) -> u32 {
    max(1, current_page.saturating_sub(1))
}

pub fn next_page(current_page: u32, total_pages: u32) -> u32 {
    min(total_pages.max(1), current_page.saturating_add(1))
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn has_previous(current_page: u32) -> bool {
    current_page > 1
}

pub fn has_next(current_page: u32, total_pages: u32) -> bool {
    current_page < total_pages
}
