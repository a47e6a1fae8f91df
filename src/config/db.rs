use mongodb::{bson::doc, options::IndexOptions, Client, Database, IndexModel};
use std::{env, sync::Arc};
use tracing::error;

use crate::models::vote::Vote;

pub async fn init_database() -> mongodb::error::Result<Arc<Database>> {
    let mongo_uri = env::var("MONGO_URI").map_err(|_| {
        error!("MONGO_URI not found in environment variables");
        mongodb::error::Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "MONGO_URI not found",
        ))
    })?;

    let db_name = env::var("DATABASE_NAME").map_err(|_| {
        error!("DATABASE_NAME not found in environment variables");
        mongodb::error::Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "DATABASE_NAME not found",
        ))
    })?;

    let client = Client::with_uri_str(&mongo_uri).await?;
    let database = client.database(&db_name);
    ensure_indexes(&database).await?;

    Ok(Arc::new(database))
}

/// The unique compound index is what serializes two racing submissions by
/// the same user on the same question into a single vote document.
pub async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
    let unique_vote = IndexModel::builder()
        .keys(doc! { "user_id": 1, "question_id": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<Vote>("votes").create_index(unique_vote).await?;
    Ok(())
}
