use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobTitle {
    pub id: i64,
    pub title: String,
}
