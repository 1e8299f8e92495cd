use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: u32,
    pub user_id: String,
    pub file_url: String,
    pub file_name: String,
}
