//! Google Sheets row append.
//!
//! A thin client over the `values:append` REST endpoint. Credential loading
//! is environment-based (an OAuth bearer token with spreadsheet scope); the
//! flow treats every failure here as reportable, not fatal.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::SheetsConfig;
use crate::error::{ConfigError, StoreError};
use crate::store::{ResponseStore, SubmissionRow};

pub struct SheetsStore {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    range: String,
    token: SecretString,
}

impl SheetsStore {
    /// Create a store from configuration.
    ///
    /// Fails when the spreadsheet id or token is missing; `--dry-run` avoids
    /// this path entirely.
    pub fn new(config: SheetsConfig) -> Result<Self, ConfigError> {
        let spreadsheet_id =
            config
                .spreadsheet_id
                .ok_or_else(|| ConfigError::MissingRequired {
                    key: "SHEETS_SPREADSHEET_ID".to_string(),
                    hint: "Set SHEETS_SPREADSHEET_ID to the spreadsheet that \
                           collects the responses"
                        .to_string(),
                })?;
        let token = config.token.ok_or_else(|| ConfigError::MissingRequired {
            key: "SHEETS_ACCESS_TOKEN".to_string(),
            hint: "Set SHEETS_ACCESS_TOKEN to an OAuth bearer token with \
                   spreadsheet write access"
                .to_string(),
        })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ConfigError::ParseError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base,
            spreadsheet_id,
            range: config.range,
            token,
        })
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append\
             ?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.api_base.trim_end_matches('/'),
            self.spreadsheet_id,
            urlencoding::encode(&self.range),
        )
    }
}

#[async_trait::async_trait]
impl ResponseStore for SheetsStore {
    async fn append(&self, row: &SubmissionRow) -> Result<(), StoreError> {
        let url = self.append_url();
        let body = AppendRequest {
            values: vec![row.cells()],
        };

        tracing::debug!("Appending row to spreadsheet: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StoreError::AuthFailed);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::RequestFailed {
                reason: format!("HTTP {}: {}", status, &text[..text.len().min(200)]),
            });
        }

        let parsed: AppendResponse = response.json().await?;
        if let Some(range) = parsed.updates.and_then(|u| u.updated_range) {
            tracing::debug!("Spreadsheet updated: {}", range);
        }
        Ok(())
    }
}

// Sheets values:append API types

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
struct AppendUpdates {
    #[serde(rename = "updatedRange")]
    updated_range: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_store(range: &str) -> SheetsStore {
        SheetsStore::new(SheetsConfig {
            spreadsheet_id: Some("sheet-123".to_string()),
            range: range.to_string(),
            api_base: "https://sheets.googleapis.com/".to_string(),
            token: Some(SecretString::from("test-token".to_string())),
        })
        .unwrap()
    }

    #[test]
    fn append_url_encodes_the_range() {
        let store = create_store("Hoja 1!A1");
        assert_eq!(
            store.append_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/\
             Hoja%201%21A1:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn missing_spreadsheet_id_is_rejected() {
        let result = SheetsStore::new(SheetsConfig {
            spreadsheet_id: None,
            range: "A1".to_string(),
            api_base: "https://sheets.googleapis.com".to_string(),
            token: Some(SecretString::from("test-token".to_string())),
        });
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { key, .. }) if key == "SHEETS_SPREADSHEET_ID"
        ));
    }

    #[test]
    fn missing_token_is_rejected() {
        let result = SheetsStore::new(SheetsConfig {
            spreadsheet_id: Some("sheet-123".to_string()),
            range: "A1".to_string(),
            api_base: "https://sheets.googleapis.com".to_string(),
            token: None,
        });
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { key, .. }) if key == "SHEETS_ACCESS_TOKEN"
        ));
    }

    #[test]
    fn append_request_serializes_as_a_value_grid() {
        let body = AppendRequest {
            values: vec![vec!["a".to_string(), "80".to_string()]],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["values"][0][1], "80");
    }
}
