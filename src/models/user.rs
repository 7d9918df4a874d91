use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

// A registered account. Created on the first successful signup callback and
// never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub created_at: DateTime,
}

impl User {
    pub fn new(email: String, name: String, picture: Option<String>) -> Self {
        Self {
            id: None,
            email,
            name,
            picture,
            created_at: DateTime::now(),
        }
    }
}
