use crate::report::{IssuePriority, IssueType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feedback-widget")]
#[command(about = "スクリーンショット注釈・フィードバック送信ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スクリーンショットと注釈スクリプトを合成してPNGを出力
    Compose {
        /// 注釈スクリプトJSON
        #[arg(required = true)]
        script: PathBuf,

        /// スクリーンショット画像（省略時はベース画像なしで合成）
        #[arg(short, long)]
        screenshot: Option<PathBuf>,

        /// 出力PNGファイル
        #[arg(short, long, default_value = "annotated.png")]
        output: PathBuf,
    },

    /// 注釈付き画像と報告内容をコレクタへ送信
    Submit {
        /// 注釈スクリプトJSON
        #[arg(required = true)]
        script: PathBuf,

        /// スクリーンショット画像（省略時はベース画像なしで送信）
        #[arg(short, long)]
        screenshot: Option<PathBuf>,

        /// 報告タイトル
        #[arg(short, long)]
        title: String,

        /// 詳細説明
        #[arg(short, long, default_value = "")]
        description: String,

        /// 種別 (bug/change)
        #[arg(long, value_enum, default_value_t = IssueType::Bug)]
        issue_type: IssueType,

        /// 優先度 (low/medium/high)
        #[arg(long, value_enum, default_value_t = IssuePriority::Medium)]
        priority: IssuePriority,

        /// 報告者名（省略時は設定値、未設定ならAnonymous）
        #[arg(long)]
        name: Option<String>,

        /// 発生ページのURL
        #[arg(long, default_value = "")]
        url: String,

        /// ページタイトル
        #[arg(long, default_value = "")]
        page_title: String,

        /// 送信先エンドポイントを上書き
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// 設定の表示と変更
    Config {
        /// コレクタのエンドポイントURL
        #[arg(long)]
        set_endpoint: Option<String>,

        /// プロジェクトID
        #[arg(long)]
        set_project_id: Option<String>,

        /// 報告者名（ローカルに保存）
        #[arg(long)]
        set_reporter_name: Option<String>,

        /// 報告者メール（ローカルに保存、送信はされない）
        #[arg(long)]
        set_reporter_email: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
