use crate::pagination;
use crate::source::FetchError;
use crate::types::{JobPage, JobSummary};

/// A page request handed out by [`PageFetcher`], tagged so that its response
/// can be matched against the request that is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    seq: u64,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Displayed,
    FetchFailed,
}

/// The last failed fetch, kept for diagnosis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub page: u32,
    pub detail: String,
}

/// What a completed fetch did to the displayed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response was for a page that is no longer requested and was dropped.
    Stale,
    Failed,
    /// The server reported fewer pages than the requested one; the carried
    /// request re-fetches the last existing page.
    Clamped(PageRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    total_pages: u32,
    items: Vec<JobSummary>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            items: Vec::new(),
        }
    }
}

impl PageState {
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn items(&self) -> &[JobSummary] {
        &self.items
    }
}

/// Owns the displayed page and decides which fetch responses may replace it.
///
/// Only the page of the most recently issued request is active. A response for
/// any other page is ignored on arrival, so a slow response can never
/// overwrite the results of a newer navigation.
#[derive(Debug, Default)]
pub struct PageFetcher {
    state: PageState,
    status: FetchStatus,
    active: Option<PageRequest>,
    next_seq: u64,
    last_failure: Option<FetchFailure>,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn last_failure(&self) -> Option<&FetchFailure> {
        self.last_failure.as_ref()
    }

    /// The page navigation is relative to: the one being fetched, or the
    /// displayed one when nothing is in flight.
    pub fn target_page(&self) -> u32 {
        self.active
            .map(|request| request.page)
            .unwrap_or(self.state.current_page)
    }

    /// Initial request issued when the listing is first shown.
    pub fn mount(&mut self) -> PageRequest {
        self.set_page(self.state.current_page)
    }

    pub fn set_page(&mut self, page: u32) -> PageRequest {
        let page = pagination::clamp_page(page, self.state.total_pages);
        self.next_seq += 1;
        let request = PageRequest {
            page,
            seq: self.next_seq,
        };
        log::debug!("requesting page: {}, request: {}", page, request.seq);
        self.active = Some(request);
        self.status = FetchStatus::Fetching;
        request
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        let target = self.target_page();
        let page = pagination::previous_page(target);
        (page != target).then(|| self.set_page(page))
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        let target = self.target_page();
        let page = pagination::next_page(target, self.state.total_pages);
        (page != target).then(|| self.set_page(page))
    }

    pub fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        let page = pagination::clamp_page(page, self.state.total_pages);
        (page != self.target_page()).then(|| self.set_page(page))
    }

    pub fn reload(&mut self) -> PageRequest {
        self.set_page(self.target_page())
    }

    pub fn on_fetch_complete(
        &mut self,
        request: PageRequest,
        result: Result<JobPage, FetchError>,
    ) -> Completion {
        let latest = match self.active {
            Some(active) if active.page == request.page => active.seq == request.seq,
            _ => {
                log::debug!(
                    "dropping stale response for page: {}, request: {}",
                    request.page,
                    request.seq
                );
                return Completion::Stale;
            }
        };
        // An earlier response for the requested page is shown, but the newer
        // request for the same page stays in flight.
        if latest {
            self.active = None;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                log::error!("failed to fetch jobs for page: {}, error: {}", request.page, e);
                self.last_failure = Some(FetchFailure {
                    page: request.page,
                    detail: e.to_string(),
                });
                if latest {
                    self.status = FetchStatus::FetchFailed;
                }
                return Completion::Failed;
            }
        };

        let total_pages = page.total_pages.max(1);
        if request.page > total_pages {
            log::warn!(
                "page: {} is beyond the last page: {}, fetching the last page instead",
                request.page,
                total_pages
            );
            // The displayed page keeps its own total until the re-fetch
            // replaces page, total and items together.
            if self.state.current_page <= total_pages {
                self.state.total_pages = total_pages;
            }
            return Completion::Clamped(self.set_page(total_pages));
        }

        log::debug!(
            "displaying page: {} of {}, {} jobs",
            request.page,
            total_pages,
            page.jobs.len()
        );
        self.state = PageState {
            current_page: request.page,
            total_pages,
            items: page.jobs,
        };
        if latest {
            self.status = FetchStatus::Displayed;
        }
        self.last_failure = None;
        Completion::Applied
    }
}
