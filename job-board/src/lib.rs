pub mod board;
pub mod favorites;
pub mod fetcher;
pub mod pagination;
pub mod source;
pub mod types;
pub mod view;

pub use board::JobBoard;
pub use favorites::{FavoritesBackend, FavoritesStore, InMemoryFavorites};
pub use fetcher::{Completion, FetchFailure, FetchStatus, PageFetcher, PageRequest, PageState};
pub use source::{FetchError, PageSource};
pub use types::{JobPage, JobSummary, PAGE_SIZE};
