use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Database;

use crate::models::Position;

const COLLECTION: &str = "positions";

pub async fn insert(db: &Database, position: &Position) -> Result<(), mongodb::error::Error> {
    db.collection::<Position>(COLLECTION)
        .insert_one(position)
        .await?;
    Ok(())
}

// Store-native order; callers get whatever the collection scan yields.
pub async fn fetch_for_owner(
    db: &Database,
    user_email: &str,
) -> Result<Vec<Position>, mongodb::error::Error> {
    db.collection::<Position>(COLLECTION)
        .find(doc! { "user_email": user_email })
        .await?
        .try_collect()
        .await
}
