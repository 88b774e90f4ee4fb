use std::collections::HashMap;

use crate::types::JobSummary;

/// Storage for favorited jobs, keyed by job id.
///
/// Implementations hold at most one entry per id. All operations are
/// infallible: adding a present id or removing an absent one is a no-op for
/// membership.
pub trait FavoritesBackend {
    fn add(&mut self, job: JobSummary);
    fn remove(&mut self, id: &str);
    fn has(&self, id: &str) -> bool;
    fn list(&self) -> Vec<JobSummary>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryFavorites {
    jobs: HashMap<String, JobSummary>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<JobSummary> for InMemoryFavorites {
    fn from_iter<I: IntoIterator<Item = JobSummary>>(iter: I) -> Self {
        let jobs = iter
            .into_iter()
            .map(|job| (job.id().to_owned(), job))
            .collect();
        Self { jobs }
    }
}

impl FavoritesBackend for InMemoryFavorites {
    fn add(&mut self, job: JobSummary) {
        self.jobs.insert(job.id().to_owned(), job);
    }

    fn remove(&mut self, id: &str) {
        self.jobs.remove(id);
    }

    fn has(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    fn list(&self) -> Vec<JobSummary> {
        self.jobs.values().cloned().collect()
    }
}

/// Session scoped set of favorite jobs.
///
/// Created once per session and handed to whatever renders the listing; it is
/// never touched by page fetching.
#[derive(Debug, Default)]
pub struct FavoritesStore<B = InMemoryFavorites> {
    backend: B,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.backend.has(id)
    }

    pub fn add_favorite_job(&mut self, job: JobSummary) {
        log::debug!("adding favorite job: {}", job.id());
        self.backend.add(job);
    }

    pub fn remove_favorite_job(&mut self, id: &str) {
        log::debug!("removing favorite job: {}", id);
        self.backend.remove(id);
    }

    /// Flips membership of `job` based on the set as it is right now and
    /// returns whether the job is a favorite afterwards.
    pub fn toggle_favorite(&mut self, job: &JobSummary) -> bool {
        if self.is_favorite(job.id()) {
            self.remove_favorite_job(job.id());
            false
        } else {
            self.add_favorite_job(job.clone());
            true
        }
    }

    /// Favorites sorted by title, then id
    pub fn favorites(&self) -> Vec<JobSummary> {
        let mut jobs = self.backend.list();
        jobs.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(b.id())));
        jobs
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn job(id: &str, title: &str) -> JobSummary {
        JobSummary::new(
            id.to_owned(),
            title.to_owned(),
            "Acme".to_owned(),
            "Hamburg".to_owned(),
            "".to_owned(),
        )
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = FavoritesStore::new(InMemoryFavorites::new());
        store.add_favorite_job(job("j1", "Engineer"));
        store.add_favorite_job(job("j1", "Engineer"));
        assert!(store.is_favorite("j1"));
        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn test_add_refreshes_value() {
        let mut store = FavoritesStore::new(InMemoryFavorites::new());
        store.add_favorite_job(job("j1", "Engineer"));
        store.add_favorite_job(job("j1", "Senior Engineer"));
        let favorites = store.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title(), "Senior Engineer");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = FavoritesStore::new(InMemoryFavorites::new());
        store.add_favorite_job(job("j1", "Engineer"));
        store.remove_favorite_job("j1");
        store.remove_favorite_job("j1");
        store.remove_favorite_job("never-added");
        assert!(!store.is_favorite("j1"));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut store = FavoritesStore::new(InMemoryFavorites::new());
        let j1 = job("j1", "Engineer");
        let j2 = job("j2", "Designer");
        store.add_favorite_job(j2.clone());

        assert!(store.toggle_favorite(&j1));
        assert!(store.is_favorite("j1"));
        assert!(!store.toggle_favorite(&j1));
        assert!(!store.is_favorite("j1"));

        assert!(!store.toggle_favorite(&j2));
        assert!(store.toggle_favorite(&j2));
        assert!(store.is_favorite("j2"));
    }

    #[test]
    fn test_favorites_are_sorted() {
        let store = FavoritesStore::new(
            vec![job("b", "Zoologist"), job("c", "Analyst"), job("a", "Analyst")]
                .into_iter()
                .collect::<InMemoryFavorites>(),
        );
        let ids = store
            .favorites()
            .iter()
            .map(|job| job.id().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }
}
