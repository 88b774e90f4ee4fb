use std::sync::Arc;

use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};

use crate::favorites::{FavoritesBackend, FavoritesStore, InMemoryFavorites};
use crate::fetcher::{Completion, PageFetcher, PageRequest, PageState};
use crate::source::{FetchError, PageSource};
use crate::types::{JobPage, PAGE_SIZE};
use crate::view::{job_cards, JobCard, PaginationView};

type PendingFetch = BoxFuture<'static, (PageRequest, Result<JobPage, FetchError>)>;

/// A paginated job listing with favorites.
///
/// Navigation starts fetches without waiting for them. In-flight fetches are
/// driven by [`JobBoard::next_completion`], which is meant to be polled from
/// the same event loop that handles user input; completions are applied in
/// whatever order they arrive and the fetcher drops the superseded ones.
pub struct JobBoard<S, B = InMemoryFavorites> {
    source: Arc<S>,
    fetcher: PageFetcher,
    favorites: FavoritesStore<B>,
    in_flight: FuturesUnordered<PendingFetch>,
}

impl<S, B> JobBoard<S, B>
where
    S: PageSource + Send + Sync + 'static,
    B: FavoritesBackend,
{
    pub fn new(source: S, favorites: FavoritesStore<B>) -> Self {
        Self {
            source: Arc::new(source),
            fetcher: PageFetcher::new(),
            favorites,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn mount(&mut self) {
        let request = self.fetcher.mount();
        self.dispatch(request);
    }

    /// Returns false when already on the first page.
    pub fn previous(&mut self) -> bool {
        self.fetcher.previous().map(|r| self.dispatch(r)).is_some()
    }

    /// Returns false when already on the last page.
    pub fn next(&mut self) -> bool {
        self.fetcher.next().map(|r| self.dispatch(r)).is_some()
    }

    pub fn go_to(&mut self, page: u32) -> bool {
        self.fetcher.go_to(page).map(|r| self.dispatch(r)).is_some()
    }

    pub fn reload(&mut self) {
        let request = self.fetcher.reload();
        self.dispatch(request);
    }

    fn dispatch(&mut self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        self.in_flight.push(
            async move {
                let result = source.fetch_page(request.page(), PAGE_SIZE).await;
                (request, result)
            }
            .boxed(),
        );
    }

    pub fn is_fetching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Waits for the next fetch to finish and applies it. Returns `None` when
    /// nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let (request, result) = self.in_flight.next().await?;
        let completion = self.fetcher.on_fetch_complete(request, result);
        if let Completion::Clamped(retry) = completion {
            self.dispatch(retry);
        }
        Some(completion)
    }

    /// Drives every in-flight fetch, including clamped re-fetches, to completion.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// Toggles the favorite state of the job at `index` on the displayed page.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let job = self.fetcher.state().items().get(index)?.clone();
        Some(self.favorites.toggle_favorite(&job))
    }

    pub fn state(&self) -> &PageState {
        self.fetcher.state()
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    pub fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn cards(&self) -> Vec<JobCard<'_>> {
        job_cards(self.fetcher.state().items(), &self.favorites)
    }

    pub fn pagination(&self) -> PaginationView {
        PaginationView::from(self.fetcher.state())
    }

    pub fn into_favorites(self) -> FavoritesStore<B> {
        self.favorites
    }
}
