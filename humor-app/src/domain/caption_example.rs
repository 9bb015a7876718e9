use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionExample {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub modified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub image_description: String,
    pub caption: String,
    pub explanation: String,
    pub priority: i32,
    pub image_id: Option<uuid::Uuid>,
}
