use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::StoreConfig;

/// Settings form. Empty or missing fields keep their stored value, so a
/// blank password box never clears the admin password.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    pub store_name: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub store_name: Option<String>,
}

impl From<&StoreConfig> for ConfigView {
    fn from(config: &StoreConfig) -> Self {
        Self {
            store_name: config.store_name.clone(),
        }
    }
}
