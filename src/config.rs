use crate::error::{FeedbackError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 既定のコレクタエンドポイント
const DEFAULT_ENDPOINT: &str = "https://api.baddinosaur.co.uk/api/issues";

/// ローカル設定
///
/// 報告者の名前とメールはここに保持される（ブラウザ版の
/// localStorage相当）。メールは送信ペイロードには含まれない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: None,
            reporter_name: None,
            reporter_email: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FeedbackError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("feedback-widget").join("config.json"))
    }

    /// 送信に必須のプロジェクトIDを取り出す
    pub fn require_project_id(&self) -> Result<String> {
        self.project_id.clone().ok_or(FeedbackError::MissingProjectId)
    }

    /// 報告者名（未設定ならAnonymous）
    pub fn reporter_or_anonymous(&self) -> String {
        self.reporter_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Anonymous".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_endpoint_and_no_identity() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.project_id.is_none());
        assert!(config.reporter_name.is_none());
    }

    #[test]
    fn test_require_project_id() {
        let mut config = Config::default();
        assert!(matches!(
            config.require_project_id(),
            Err(FeedbackError::MissingProjectId)
        ));

        config.project_id = Some("proj-123".to_string());
        assert_eq!(config.require_project_id().unwrap(), "proj-123");
    }

    #[test]
    fn test_reporter_fallback() {
        let mut config = Config::default();
        assert_eq!(config.reporter_or_anonymous(), "Anonymous");

        config.reporter_name = Some("  ".to_string());
        assert_eq!(config.reporter_or_anonymous(), "Anonymous");

        config.reporter_name = Some("山田太郎".to_string());
        assert_eq!(config.reporter_or_anonymous(), "山田太郎");
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config {
            endpoint: "http://localhost:9000/issues".to_string(),
            project_id: Some("p1".to_string()),
            reporter_name: Some("reporter".to_string()),
            reporter_email: Some("r@example.com".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.endpoint, config.endpoint);
        assert_eq!(parsed.project_id, config.project_id);
    }
}
