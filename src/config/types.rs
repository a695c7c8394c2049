use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub columns: ColumnNames,
}

/// Where the vocabulary lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet key (the long id in the sheet URL).
    #[serde(default)]
    pub id: String,
    /// Worksheet title. The first worksheet is used when unset.
    #[serde(default)]
    pub worksheet: Option<String>,
    /// Base URL of the Sheets REST API (default: "https://sheets.googleapis.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Authentication type: "bearer", "api_key" or "service_account".
    #[serde(rename = "auth_type", default = "default_auth_type")]
    pub auth_type_str: String,
    /// OAuth access token or API key, depending on `auth_type`.
    #[serde(default)]
    pub token: Option<String>,
    /// Service account key (JSON, as downloaded from the Cloud console).
    #[serde(default)]
    pub key_file: Option<PathBuf>,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Header names of the four required columns.
///
/// Matched case-insensitively after trimming.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_characters_column")]
    pub characters: String,
    #[serde(default = "default_pinyin_column")]
    pub pinyin: String,
    #[serde(default = "default_translation_column")]
    pub translation: String,
    #[serde(default = "default_learned_column")]
    pub learned: String,
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_auth_type() -> String {
    "bearer".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_characters_column() -> String {
    "caratteri".to_string()
}

fn default_pinyin_column() -> String {
    "pinyin".to_string()
}

fn default_translation_column() -> String {
    "traduzione".to_string()
}

fn default_learned_column() -> String {
    "appr".to_string()
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            worksheet: None,
            base_url: default_base_url(),
            auth_type_str: default_auth_type(),
            token: None,
            key_file: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            characters: default_characters_column(),
            pinyin: default_pinyin_column(),
            translation: default_translation_column(),
            learned: default_learned_column(),
        }
    }
}

impl ColumnNames {
    /// Required columns in the order they are reported when missing.
    pub fn required(&self) -> [&str; 4] {
        [
            self.characters.as_str(),
            self.pinyin.as_str(),
            self.translation.as_str(),
            self.learned.as_str(),
        ]
    }
}
