use serde::{Deserialize, Serialize};

/// Catalog entry. Reference data, immutable at runtime; equipment and
/// difficulty are free-form tags compared case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub equipment: String,
    pub difficulty: String,
}
