use chrono::Utc;
use futures::TryStreamExt;
use job_board::{FavoritesBackend, InMemoryFavorites, JobSummary};
use mongodb::{bson::doc, options::ReplaceOptions, Collection, Database};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};

pub const FAVORITES_COLLECTION: &str = "favorite-jobs";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: '{0}'")]
    Database(#[from] mongodb::error::Error),
    #[error("Favorites writer failed: '{0}'")]
    Writer(#[from] tokio::task::JoinError),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FavoriteJob {
    #[serde(rename = "_id")]
    id: String,
    job: JobSummary,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    added_at: chrono::DateTime<Utc>,
}

impl FavoriteJob {
    pub fn new(job: JobSummary) -> Self {
        Self {
            id: job.id().to_owned(),
            job,
            added_at: Utc::now(),
        }
    }
}

pub async fn connect(mongodb_connection_url: &str, database_name: &str) -> Result<Database> {
    let client = mongodb::Client::with_uri_str(mongodb_connection_url).await?;
    Ok(client.database(database_name))
}

pub fn favorites_collection(db: &Database) -> Collection<FavoriteJob> {
    db.collection::<FavoriteJob>(FAVORITES_COLLECTION)
}

pub async fn load_favorites(collection: &Collection<FavoriteJob>) -> Result<Vec<JobSummary>> {
    let favorites = collection
        .find(None, None)
        .await?
        .try_collect::<Vec<_>>()
        .await?;
    Ok(favorites.into_iter().map(|favorite| favorite.job).collect())
}

/// Inserts the job, or replaces the stored copy if it is already a favorite.
pub async fn save_favorite(collection: &Collection<FavoriteJob>, job: JobSummary) -> Result<()> {
    let favorite = FavoriteJob::new(job);
    let options = ReplaceOptions::builder().upsert(true).build();
    collection
        .replace_one(doc! { "_id": favorite.id.as_str() }, &favorite, options)
        .await?;
    Ok(())
}

pub async fn delete_favorite(collection: &Collection<FavoriteJob>, id: &str) -> Result<()> {
    collection.delete_one(doc! { "_id": id }, None).await?;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Change {
    Save(JobSummary),
    Delete(String),
}

async fn write_changes(
    collection: Collection<FavoriteJob>,
    mut changes: mpsc::UnboundedReceiver<Change>,
) {
    while let Some(change) = changes.recv().await {
        let result = match change {
            Change::Save(job) => {
                log::debug!("saving favorite job: {}", job.id());
                save_favorite(&collection, job).await
            }
            Change::Delete(id) => {
                log::debug!("deleting favorite job: {}", id);
                delete_favorite(&collection, &id).await
            }
        };
        if let Err(e) = result {
            log::error!("Failed to persist favorite change: {}", e);
        }
    }
    log::debug!("favorites writer finished");
}

/// Handle of the background task persisting favorite changes.
pub struct FavoritesWriter {
    handle: JoinHandle<()>,
}

impl FavoritesWriter {
    /// Waits until every queued change is written. The matching
    /// [`MongoFavorites`] has to be dropped first.
    pub async fn finish(self) -> Result<()> {
        self.handle.await?;
        Ok(())
    }
}

/// Favorites held in memory and written behind to MongoDB.
///
/// Reads never touch the database; every mutation is queued for the writer
/// task so that the store's operations stay synchronous.
pub struct MongoFavorites {
    cache: InMemoryFavorites,
    changes: mpsc::UnboundedSender<Change>,
}

impl MongoFavorites {
    pub async fn load(collection: Collection<FavoriteJob>) -> Result<(Self, FavoritesWriter)> {
        let jobs = load_favorites(&collection).await?;
        log::info!("Loaded {} favorite jobs", jobs.len());
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_changes(collection, rx));
        let favorites = Self {
            cache: jobs.into_iter().collect(),
            changes: tx,
        };
        Ok((favorites, FavoritesWriter { handle }))
    }

    fn queue(&self, change: Change) {
        if let Err(e) = self.changes.send(change) {
            log::error!("Favorites writer is gone, change not persisted: {:?}", e.0);
        }
    }
}

impl FavoritesBackend for MongoFavorites {
    fn add(&mut self, job: JobSummary) {
        self.cache.add(job.clone());
        self.queue(Change::Save(job));
    }

    fn remove(&mut self, id: &str) {
        if self.cache.has(id) {
            self.cache.remove(id);
            self.queue(Change::Delete(id.to_owned()));
        }
    }

    fn has(&self, id: &str) -> bool {
        self.cache.has(id)
    }

    fn list(&self) -> Vec<JobSummary> {
        self.cache.list()
    }
}
