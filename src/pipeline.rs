//! 送信パイプライン
//!
//! capture → compose → submit の3段を名前付きステージとして
//! 明示的に実行する（元実装のthen/catch連鎖の置き換え）。
//! 結果は型で区別される:
//! - キャプチャ失敗: 非致命。ベース画像なしで続行。
//! - 合成失敗: 致命。壊れた画像を黙って送らない。
//! - 送信失敗（ネットワーク・非2xx）: 回復可能。再試行は呼び出し側。

use crate::capture::CaptureSource;
use crate::error::Result;
use crate::report::{EnvironmentInfo, IssuePayload, ReportDraft};
use crate::script::AnnotationScript;
use feedback_widget_common::{to_png_data_uri, AnnotationSession, Compositor};

/// コレクタの応答の扱い（本文は解釈しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16 },
}

/// パイプライン全体の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Submitted,
    /// ユーザに再試行を促すべき失敗
    RecoverableFailure(String),
}

/// コレクタへのHTTP送信
pub struct Collector {
    endpoint: String,
    client: reqwest::Client,
}

impl Collector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// ペイロードをJSONでPOSTする
    pub async fn submit(&self, payload: &IssuePayload) -> Result<SubmitOutcome> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(SubmitOutcome::Accepted)
        } else {
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

pub struct SubmissionPipeline<C: CaptureSource> {
    capture: C,
    compositor: Compositor,
    collector: Collector,
}

impl<C: CaptureSource> SubmissionPipeline<C> {
    pub fn new(capture: C, compositor: Compositor, collector: Collector) -> Self {
        Self {
            capture,
            compositor,
            collector,
        }
    }

    /// captureステージ。失敗してもベース画像なしで続行する。
    fn capture_stage(&self) -> Option<feedback_widget_common::SourceImage> {
        match self.capture.capture() {
            Ok(source) => source,
            Err(e) => {
                eprintln!("⚠ キャプチャ失敗、ベース画像なしで続行します: {}", e);
                None
            }
        }
    }

    /// composeステージ。合成とPNGエンコードの失敗は致命。
    fn compose_stage(&self, session: &AnnotationSession) -> Result<String> {
        let image = self.compositor.compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )?;
        Ok(to_png_data_uri(&image)?)
    }

    /// submitステージ。ネットワーク起因の失敗は回復可能扱い。
    async fn submit_stage(&self, payload: &IssuePayload) -> SubmissionResult {
        match self.collector.submit(payload).await {
            Ok(SubmitOutcome::Accepted) => SubmissionResult::Submitted,
            Ok(SubmitOutcome::Rejected { status }) => SubmissionResult::RecoverableFailure(
                format!("コレクタがステータス{}を返しました", status),
            ),
            Err(e) => SubmissionResult::RecoverableFailure(format!("送信に失敗しました: {}", e)),
        }
    }

    /// パイプラインを一度だけ実行する
    ///
    /// 進行中の実行と並行して再実行しないことは呼び出し側の責務。
    pub async fn run(&self, script: &AnnotationScript, draft: ReportDraft) -> Result<SubmissionResult> {
        let source = self.capture_stage();

        let mut session = AnnotationSession::start(source, script.preview);
        script.apply(&mut session);

        let screenshot_url = self.compose_stage(&session)?;

        let screen = session
            .source()
            .map(|s| s.dimensions())
            .unwrap_or_else(|| session.preview());
        let env = EnvironmentInfo::collect(screen, session.preview());
        session.end();

        let payload = IssuePayload::build(draft, env, screenshot_url);
        Ok(self.submit_stage(&payload).await)
    }
}
