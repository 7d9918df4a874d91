pub(crate) mod position_queries;
pub(crate) mod user_queries;

use mongodb::{Client, Database};

pub async fn connect(uri: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(db_name))
}
