use clap::Parser;
use feedback_widget_common::{AnnotationSession, Compositor};
use feedback_widget_rust::{capture, cli, config, error, pipeline, report, script};

use capture::{CaptureSource, FileCapture, NoCapture};
use cli::{Cli, Commands};
use config::Config;
use error::{FeedbackError, Result};
use pipeline::{Collector, SubmissionPipeline, SubmissionResult};
use report::{domain_of, ReportDraft};
use script::AnnotationScript;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Compose { script, screenshot, output } => {
            println!("🖍 feedback-widget - 注釈合成\n");

            // 1. スクリプト読み込み
            println!("[1/3] 注釈スクリプトを読み込み中...");
            let script = AnnotationScript::load(&script)?;
            println!(
                "✔ ストローク{}本、テキスト{}件\n",
                script.strokes.len(),
                script.texts.len()
            );

            // 2. スクリーンショット読み込みとセッション再生
            println!("[2/3] スクリーンショットを読み込み中...");
            let source = match &screenshot {
                Some(path) => FileCapture::new(path).capture()?,
                None => {
                    println!("  （ベース画像なしで続行）");
                    NoCapture.capture()?
                }
            };
            if let Some(image) = &source {
                println!(
                    "✔ {}x{}px\n",
                    image.dimensions().width,
                    image.dimensions().height
                );
            }

            let mut session = AnnotationSession::start(source, script.preview);
            script.apply(&mut session);

            // 3. 合成して保存
            println!("[3/3] 合成中...");
            let compositor = Compositor::new();
            let image = compositor.compose(
                session.source(),
                session.surface(),
                session.store(),
                session.preview(),
            )?;
            session.end();
            if cli.verbose {
                println!("  合成サイズ: {}x{}px", image.width(), image.height());
            }
            image
                .save(&output)
                .map_err(feedback_widget_common::Error::from)?;
            println!("✔ 出力: {}", output.display());

            println!("\n✅ 合成完了");
        }

        Commands::Submit {
            script,
            screenshot,
            title,
            description,
            issue_type,
            priority,
            name,
            url,
            page_title,
            endpoint,
        } => {
            println!("📮 feedback-widget - フィードバック送信\n");

            let endpoint = endpoint.unwrap_or_else(|| config.endpoint.clone());
            let project_id = config.require_project_id()?;
            let reported_by = name.unwrap_or_else(|| config.reporter_or_anonymous());

            println!("[1/3] 注釈スクリプトを読み込み中...");
            let script = AnnotationScript::load(&script)?;
            println!("✔ 読み込み完了\n");

            let domain = domain_of(&url);
            let draft = ReportDraft {
                project_id,
                title,
                description,
                issue_type,
                priority,
                reported_by,
                url,
                page_title,
                domain,
            };

            println!("[2/3] キャプチャと合成中...");
            println!("[3/3] コレクタへ送信中... ({})", endpoint);
            let collector = Collector::new(endpoint);
            let result = match screenshot {
                Some(path) => {
                    let pipeline =
                        SubmissionPipeline::new(FileCapture::new(path), Compositor::new(), collector);
                    pipeline.run(&script, draft).await?
                }
                None => {
                    let pipeline = SubmissionPipeline::new(NoCapture, Compositor::new(), collector);
                    pipeline.run(&script, draft).await?
                }
            };

            match result {
                SubmissionResult::Submitted => {
                    println!("\n✅ 送信完了");
                }
                SubmissionResult::RecoverableFailure(message) => {
                    eprintln!("\n⚠ {}", message);
                    eprintln!("接続を確認して再試行してください");
                    return Err(FeedbackError::Submission(message));
                }
            }
        }

        Commands::Config {
            set_endpoint,
            set_project_id,
            set_reporter_name,
            set_reporter_email,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.endpoint = endpoint;
                changed = true;
            }
            if let Some(project_id) = set_project_id {
                config.project_id = Some(project_id);
                changed = true;
            }
            if let Some(reporter_name) = set_reporter_name {
                config.reporter_name = Some(reporter_name);
                changed = true;
            }
            if let Some(reporter_email) = set_reporter_email {
                config.reporter_email = Some(reporter_email);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!(
                    "  プロジェクトID: {}",
                    config.project_id.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  報告者名: {}",
                    config.reporter_name.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  報告者メール: {}",
                    config.reporter_email.as_deref().unwrap_or("未設定")
                );
            }
        }
    }

    Ok(())
}
