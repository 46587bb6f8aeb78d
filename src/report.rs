//! 報告ペイロード
//!
//! コレクタAPIが受け取る固定のJSONオブジェクト。フィールド名は
//! コレクタ側の契約（PascalCase）に合わせる。合成済み画像は
//! `ScreenshotUrl` にdata URI文字列として入る。

use clap::ValueEnum;
use feedback_widget_common::Dimensions;
use serde::{Deserialize, Serialize};

/// 課題種別（コレクタのIssueType列挙に一致）
///
/// ワイヤ値はフォームの選択肢そのまま（"Bug" / "Change"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum IssueType {
    Bug,
    Change,
}

/// 優先度（コレクタのIssuePriority列挙に一致、ワイヤ値は大文字始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum IssuePriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // CLIの値名（ValueEnumのkebab-case）に合わせる
        let label = match self {
            IssueType::Bug => "bug",
            IssueType::Change => "change",
        };
        write!(f, "{}", label)
    }
}

impl std::fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IssuePriority::Low => "low",
            IssuePriority::Medium => "medium",
            IssuePriority::High => "high",
        };
        write!(f, "{}", label)
    }
}

/// 実行環境のメタデータ
///
/// ブラウザ版が収集していたscreen/viewport/UA相当。CLIでは
/// スクリーンサイズ＝ネイティブ画像サイズ、ビューポート＝
/// プレビューサイズとして埋める。
#[derive(Debug, Clone)]
pub struct EnvironmentInfo {
    pub screen: Dimensions,
    pub viewport: Dimensions,
    pub pixel_ratio: f64,
    pub os_family: String,
    pub os_version: String,
    pub browser_name: String,
    pub browser_version: String,
    pub user_agent: String,
}

impl EnvironmentInfo {
    pub fn collect(screen: Dimensions, viewport: Dimensions) -> Self {
        let os_family = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "macOS",
            "windows" => "Windows",
            other => other,
        }
        .to_string();
        let version = env!("CARGO_PKG_VERSION").to_string();
        Self {
            screen,
            viewport,
            pixel_ratio: 1.0,
            os_family,
            os_version: "Unknown".to_string(),
            browser_name: "feedback-widget-rust".to_string(),
            browser_version: version.clone(),
            user_agent: format!("feedback-widget-rust/{}", version),
        }
    }
}

/// 送信前の報告内容（ユーザ入力部分）
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub issue_type: IssueType,
    pub priority: IssuePriority,
    pub reported_by: String,
    pub url: String,
    pub page_title: String,
    pub domain: String,
}

/// コレクタへPOSTされるJSON本体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssuePayload {
    pub project_id: String,
    pub priority: IssuePriority,
    #[serde(rename = "Type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub reported_by: String,
    pub screensize_width: u32,
    pub screensize_height: u32,
    pub screensize_pixel_ratio: f64,
    #[serde(rename = "OSFamily")]
    pub os_family: String,
    #[serde(rename = "OSVersion")]
    pub os_version: String,
    pub browser_name: String,
    pub browser_version: String,
    pub browser_user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub zoom_factor: f64,
    pub url: String,
    pub page_title: String,
    pub domain: String,
    /// 合成済みPNGのdata URI（キャプチャも合成も無ければ空文字）
    pub screenshot_url: String,
}

impl IssuePayload {
    pub fn build(draft: ReportDraft, env: EnvironmentInfo, screenshot_url: String) -> Self {
        Self {
            project_id: draft.project_id,
            priority: draft.priority,
            issue_type: draft.issue_type,
            title: draft.title,
            description: draft.description,
            reported_by: draft.reported_by,
            screensize_width: env.screen.width,
            screensize_height: env.screen.height,
            screensize_pixel_ratio: env.pixel_ratio,
            os_family: env.os_family,
            os_version: env.os_version,
            browser_name: env.browser_name,
            browser_version: env.browser_version,
            browser_user_agent: env.user_agent,
            viewport_width: env.viewport.width,
            viewport_height: env.viewport.height,
            zoom_factor: env.pixel_ratio,
            url: draft.url,
            page_title: draft.page_title,
            domain: draft.domain,
            screenshot_url,
        }
    }
}

/// URLからドメイン部分を取り出す（ペイロードのDomainフィールド用）
pub fn domain_of(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or("")
        .split(':')
        .next()
        .unwrap_or("")
        .to_string()
}
