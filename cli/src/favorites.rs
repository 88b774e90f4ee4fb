use job_board::{FavoritesStore, InMemoryFavorites};

use crate::config::Settings;
use crate::error::Result;
use crate::render;

pub async fn run(settings: &Settings) -> Result<()> {
    let Some(mongodb) = &settings.mongodb else {
        println!("MONGODB_CONNECTION_URL is not set, no favorites are saved");
        return Ok(());
    };
    let db = persistence::connect(&mongodb.connection_url, &mongodb.database).await?;
    log::info!("Connected to database");
    let jobs = persistence::load_favorites(&persistence::favorites_collection(&db)).await?;
    let store = FavoritesStore::new(jobs.into_iter().collect::<InMemoryFavorites>());
    render::favorites(&mut std::io::stdout(), &store.favorites(), &settings.base_url)?;
    Ok(())
}
