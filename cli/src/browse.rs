use std::io::Write;

use job_api::HttpPageSource;
use job_board::{
    Completion, FavoritesBackend, FavoritesStore, InMemoryFavorites, JobBoard, PageSource,
};
use persistence::MongoFavorites;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{parse_command, Command};
use crate::config::Settings;
use crate::error::Result;
use crate::render;

enum Event {
    Fetched(Completion),
    Input(Option<String>),
}

pub async fn run(settings: &Settings, start_page: u32) -> Result<()> {
    let source = HttpPageSource::new(settings.base_url.clone(), settings.timeout)?;
    match &settings.mongodb {
        Some(mongodb) => {
            let db = persistence::connect(&mongodb.connection_url, &mongodb.database).await?;
            log::info!("Connected to database");
            let collection = persistence::favorites_collection(&db);
            let (favorites, writer) = MongoFavorites::load(collection).await?;
            let board = JobBoard::new(source, FavoritesStore::new(favorites));
            let favorites = browse(board, &settings.base_url, start_page).await?;
            drop(favorites);
            writer.finish().await?;
        }
        None => {
            log::warn!("MONGODB_CONNECTION_URL not set, favorites are kept for this session only");
            let board = JobBoard::new(source, FavoritesStore::new(InMemoryFavorites::new()));
            browse(board, &settings.base_url, start_page).await?;
        }
    }
    Ok(())
}

/// Requests the page given on the command line. Called once the first page
/// is displayed, since only then the page count is known. Returns the page
/// being opened, if any.
fn open_start_page<S, B>(board: &mut JobBoard<S, B>, start_page: &mut Option<u32>) -> Option<u32>
where
    S: PageSource + Send + Sync + 'static,
    B: FavoritesBackend,
{
    let page = start_page.take().filter(|page| *page > 1)?;
    board
        .go_to(page)
        .then(|| board.fetcher().target_page())
}

/// Runs the interactive listing until the user quits or stdin closes, then
/// hands back the session's favorites.
async fn browse<B: FavoritesBackend>(
    mut board: JobBoard<HttpPageSource, B>,
    base_url: &str,
    start_page: u32,
) -> Result<FavoritesStore<B>> {
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut start_page = Some(start_page);
    render::help(&mut stdout)?;
    board.mount();

    loop {
        let event = tokio::select! {
            Some(completion) = board.next_completion(), if board.is_fetching() => Event::Fetched(completion),
            line = lines.next_line() => Event::Input(line?),
        };
        match event {
            Event::Fetched(Completion::Applied) => {
                render::page(&mut stdout, &board.cards(), board.pagination(), base_url)?;
                if let Some(page) = open_start_page(&mut board, &mut start_page) {
                    writeln!(stdout, "Opening page {}", page)?;
                }
            }
            Event::Fetched(Completion::Failed) => {
                if let Some(failure) = board.fetcher().last_failure() {
                    writeln!(stdout, "Could not load page {}: {}", failure.page, failure.detail)?;
                }
                writeln!(stdout, "Still showing {}", board.pagination())?;
            }
            Event::Fetched(Completion::Stale) | Event::Fetched(Completion::Clamped(_)) => {}
            Event::Input(None) => break,
            Event::Input(Some(line)) => match parse_command(&line) {
                Command::Next => {
                    if !board.next() {
                        writeln!(stdout, "Already on the last page")?;
                    }
                }
                Command::Previous => {
                    if !board.previous() {
                        writeln!(stdout, "Already on the first page")?;
                    }
                }
                Command::GoTo(page) => {
                    if !board.go_to(page) {
                        writeln!(stdout, "Already on {}", board.pagination())?;
                    }
                }
                Command::Toggle(index) => match board.toggle_favorite(index) {
                    Some(_) => render::page(&mut stdout, &board.cards(), board.pagination(), base_url)?,
                    None => writeln!(stdout, "No job #{} on this page", index + 1)?,
                },
                Command::Favorites => {
                    render::favorites(&mut stdout, &board.favorites().favorites(), base_url)?
                }
                Command::Reload => board.reload(),
                Command::Help => render::help(&mut stdout)?,
                Command::Quit => break,
                Command::Empty => {}
                Command::Unknown(input) => {
                    writeln!(stdout, "Unknown command: '{}', type 'help' for a list", input)?
                }
            },
        }
    }
    Ok(board.into_favorites())
}

#[cfg(test)]
mod test {
    use super::*;
    use async_trait::async_trait;
    use job_board::{FetchError, FetchStatus, JobPage, JobSummary};

    /// Serves `total_pages` pages of six jobs, failing for `failing_page`.
    struct FixedSource {
        total_pages: u32,
        failing_page: Option<u32>,
    }

    #[async_trait]
    impl PageSource for FixedSource {
        async fn fetch_page(&self, page: u32, limit: u32) -> std::result::Result<JobPage, FetchError> {
            if self.failing_page == Some(page) {
                return Err(FetchError::Timeout(format!("page {}", page)));
            }
            let jobs = (1..=limit)
                .map(|i| {
                    JobSummary::new(
                        format!("p{}-j{}", page, i),
                        format!("Job {}", i),
                        "Acme".to_owned(),
                        "Leipzig".to_owned(),
                        "".to_owned(),
                    )
                })
                .collect();
            Ok(JobPage {
                jobs,
                total_pages: self.total_pages,
            })
        }
    }

    async fn mounted(failing_page: Option<u32>) -> JobBoard<FixedSource> {
        let source = FixedSource {
            total_pages: 3,
            failing_page,
        };
        let mut board = JobBoard::new(source, FavoritesStore::new(InMemoryFavorites::new()));
        board.mount();
        assert_eq!(board.next_completion().await, Some(Completion::Applied));
        board
    }

    #[tokio::test]
    async fn test_start_page_is_opened_once() {
        let mut board = mounted(None).await;
        let mut start_page = Some(3);
        assert_eq!(open_start_page(&mut board, &mut start_page), Some(3));
        assert_eq!(start_page, None);
        assert_eq!(board.next_completion().await, Some(Completion::Applied));
        assert_eq!(board.state().current_page(), 3);
        assert_eq!(open_start_page(&mut board, &mut start_page), None);
    }

    #[tokio::test]
    async fn test_start_page_is_clamped() {
        let mut board = mounted(None).await;
        assert_eq!(open_start_page(&mut board, &mut Some(40)), Some(3));
    }

    #[tokio::test]
    async fn test_first_page_needs_no_jump() {
        let mut board = mounted(None).await;
        assert_eq!(open_start_page(&mut board, &mut Some(1)), None);
        assert!(!board.is_fetching());
    }

    #[tokio::test]
    async fn test_failed_start_page_keeps_first_page() {
        let mut board = mounted(Some(2)).await;
        assert_eq!(open_start_page(&mut board, &mut Some(2)), Some(2));
        assert_eq!(board.next_completion().await, Some(Completion::Failed));
        assert_eq!(board.fetcher().status(), FetchStatus::FetchFailed);
        assert_eq!(board.pagination().to_string(), "Page 1 of 3");
        assert_eq!(board.state().items()[0].id(), "p1-j1");
    }
}
