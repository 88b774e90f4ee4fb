use std::fmt::Display;

use crate::favorites::{FavoritesBackend, FavoritesStore};
use crate::fetcher::PageState;
use crate::pagination;
use crate::types::JobSummary;

/// Path of the detail view of a job
pub fn detail_path(id: &str) -> String {
    format!("/jobs/{}", urlencoding::encode(id))
}

#[derive(Debug, PartialEq, Eq)]
pub struct JobCard<'a> {
    pub job: &'a JobSummary,
    pub favorited: bool,
    pub detail_path: String,
}

pub fn job_cards<'a, B: FavoritesBackend>(
    items: &'a [JobSummary],
    favorites: &FavoritesStore<B>,
) -> Vec<JobCard<'a>> {
    items
        .iter()
        .map(|job| JobCard {
            job,
            favorited: favorites.is_favorite(job.id()),
            detail_path: detail_path(job.id()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationView {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            previous_disabled: !pagination::has_previous(current_page),
            next_disabled: !pagination::has_next(current_page, total_pages),
        }
    }
}

impl From<&PageState> for PaginationView {
    fn from(state: &PageState) -> Self {
        Self::new(state.current_page(), state.total_pages())
    }
}

impl Display for PaginationView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::favorites::InMemoryFavorites;

    #[test]
    fn test_pagination_label_and_controls() {
        let view = PaginationView::new(1, 3);
        assert_eq!(view.to_string(), "Page 1 of 3");
        assert!(view.previous_disabled);
        assert!(!view.next_disabled);

        let view = PaginationView::new(3, 3);
        assert!(!view.previous_disabled);
        assert!(view.next_disabled);

        let view = PaginationView::new(1, 1);
        assert!(view.previous_disabled);
        assert!(view.next_disabled);
    }

    #[test]
    fn test_cards_derive_favorite_from_store() {
        let items = vec![
            JobSummary::new("a".into(), "A".into(), "".into(), "".into(), "".into()),
            JobSummary::new("b".into(), "B".into(), "".into(), "".into(), "".into()),
        ];
        let mut favorites = FavoritesStore::new(InMemoryFavorites::new());
        favorites.add_favorite_job(items[1].clone());

        let cards = job_cards(&items, &favorites);
        assert!(!cards[0].favorited);
        assert!(cards[1].favorited);
        assert_eq!(cards[1].detail_path, "/jobs/b");
    }

    #[test]
    fn test_detail_path_is_encoded() {
        assert_eq!(detail_path("a b/c"), "/jobs/a%20b%2Fc");
    }
}
