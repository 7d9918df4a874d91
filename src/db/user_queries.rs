use mongodb::bson::doc;
use mongodb::Database;

use crate::models::User;

const COLLECTION: &str = "users";

pub async fn find_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<User>, mongodb::error::Error> {
    db.collection::<User>(COLLECTION)
        .find_one(doc! { "email": email })
        .await
}

pub async fn insert(db: &Database, user: &User) -> Result<(), mongodb::error::Error> {
    db.collection::<User>(COLLECTION).insert_one(user).await?;
    Ok(())
}
