use serde::Deserialize;

use crate::client::MoodleClient;
use crate::error::Error;

/// Site details plus the account behind the calling token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteInfo {
    #[serde(rename = "sitename", default)]
    pub site_name: String,
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    #[serde(rename = "lastname", default)]
    pub last_name: String,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
}

impl MoodleClient {
    /// Fetch the site name and the identity of the calling token. Useful as a
    /// connectivity and token check.
    pub async fn get_site_info(&self) -> Result<SiteInfo, Error> {
        self.call_json("core_webservice_get_site_info", &[]).await
    }
}
