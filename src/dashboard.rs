//! The dashboard host.
//!
//! Ties the ticket list to the classification API and the local snapshot:
//! running a classification, restoring the last run on start-up, resetting
//! to the empty state and loading the stats panel.

use jiff::Timestamp;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::list::{RenderModel, TicketListController};
use crate::payload::{ClassificationResult, ClassificationStats, RunRequest};
use crate::remote::ClassificationApi;
use crate::snapshot::SnapshotStore;
use crate::toast::{Notifier, Toast};
use crate::types::{Engine, MISSING_FIELD};
use crate::utils::date::format_kst_minutes;

const LAST_RUN_PREFIX: &str = "마지막 분류 : ";

pub struct Dashboard {
    list: TicketListController,
    result: Option<ClassificationResult>,
    last_run_at: Option<String>,
    snapshot: SnapshotStore,
    notifier: Notifier,
}

impl Dashboard {
    /// A dashboard in its initial empty state.
    pub fn new(snapshot: SnapshotStore) -> Self {
        Self {
            list: TicketListController::new(),
            result: None,
            last_run_at: None,
            snapshot,
            notifier: Notifier::new(),
        }
    }

    pub fn list(&self) -> &TicketListController {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut TicketListController {
        &mut self.list
    }

    /// Summary sections of the displayed run, if any.
    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn notifier(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// `마지막 분류 : 2025-03-31 12:00`, hidden when there is no run or the
    /// saved label is a placeholder.
    pub fn last_run_label(&self) -> Option<String> {
        self.last_run_at
            .as_deref()
            .filter(|ts| *ts != MISSING_FIELD)
            .map(|ts| format!("{LAST_RUN_PREFIX}{ts}"))
    }

    /// Bring back the last saved run. Without a usable snapshot the
    /// dashboard stays in its initial state.
    pub fn restore(&mut self) -> RenderModel {
        self.last_run_at = self.snapshot.last_run_at();
        match self.snapshot.restore() {
            Some(result) => self.show_result(result),
            None => self.list.clear(),
        }
    }

    fn show_result(&mut self, result: ClassificationResult) -> RenderModel {
        let model = match result.buckets() {
            Some(buckets) => Some(self.list.load(buckets)),
            None => None,
        };
        self.result = Some(result);
        model.unwrap_or_else(|| self.list.render())
    }

    /// Apply the outcome of a run request.
    ///
    /// On success the payload is displayed and saved, the last-run label is
    /// set to `now` and a success toast is shown. On failure only an error
    /// toast is shown; the displayed state is left untouched. Returns whether
    /// the run succeeded.
    pub fn apply_run_result(
        &mut self,
        outcome: Result<Value>,
        engine: Engine,
        now: Timestamp,
    ) -> bool {
        let parsed = outcome.and_then(|raw| {
            let result: ClassificationResult = serde_json::from_value(raw.clone())?;
            Ok((raw, result))
        });

        let (raw, result) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "classification run failed");
                self.notifier
                    .show(Toast::error(format!("✗ 분류 실패: {}", e.user_message())));
                return false;
            }
        };

        let total = result.meta.total_tickets;
        let engine_name = result
            .meta
            .engine_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| engine.display_name().to_string());

        self.show_result(result);

        let label = format_kst_minutes(now);
        if let Err(e) = self.snapshot.save(&raw, &label) {
            tracing::warn!(error = %e, "failed to save classification snapshot");
        }
        self.last_run_at = Some(label);

        tracing::info!(total, engine = %engine, "classification run complete");
        self.notifier.show(Toast::success(format!(
            "✓ {total}건의 티켓 분류 완료 ({engine_name})"
        )));
        true
    }

    /// Run a classification against the latest upload.
    pub async fn run<A>(&mut self, api: &A, config: &Config, engine: Engine) -> bool
    where
        A: ClassificationApi + ?Sized,
    {
        let request = RunRequest {
            user_id: config.user_id,
            file_id: 0,
            engine,
        };
        let outcome = api.run_classification(&request).await;
        self.apply_run_result(outcome, engine, Timestamp::now())
    }

    /// Forget the saved run and go back to the initial empty state.
    pub fn reset(&mut self) -> Result<RenderModel> {
        self.snapshot.clear()?;
        self.result = None;
        self.last_run_at = None;
        tracing::debug!("dashboard reset");
        Ok(self.list.clear())
    }
}

/// Stats for the user's latest upload. Every failure reads as no data.
pub async fn load_stats<A>(api: &A, user_id: u64) -> Option<ClassificationStats>
where
    A: ClassificationApi + ?Sized,
{
    let upload = match api.latest_upload(user_id).await {
        Ok(upload) => upload?,
        Err(e) => {
            tracing::warn!(error = %e, "failed to look up latest upload");
            return None;
        }
    };
    let Some(selector) = upload.selector() else {
        tracing::debug!("latest upload has neither batch nor file id");
        return None;
    };
    match api.classification_stats(selector).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load classification stats");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutoclassError;
    use crate::list::TableBody;
    use crate::payload::{LatestUpload, StatsSelector};
    use crate::toast::ToastLevel;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn now() -> Timestamp {
        "2025-03-31T03:00:00Z".parse().unwrap()
    }

    fn payload() -> Value {
        json!({
            "category_info": [{"category": "배송", "count": 2, "ratio": 1.0, "keywords": []}],
            "tickets": {"all_by_category": {
                "배송": [
                    {"received_at": "2025-03-30 10:00:00", "channel": "전화", "content": "늦어요"},
                    {"received_at": "2025-03-29 10:00:00", "channel": "채팅", "content": "어디쯤"}
                ]
            }},
            "meta": {"total_tickets": 2}
        })
    }

    fn dashboard(dir: &TempDir) -> Dashboard {
        Dashboard::new(SnapshotStore::new(dir.path().join("snapshot")))
    }

    #[derive(Default)]
    struct FakeApi {
        requests: Mutex<Vec<RunRequest>>,
        upload: Option<LatestUpload>,
        stats_selector: Mutex<Option<StatsSelector>>,
        fail_stats: bool,
    }

    #[async_trait::async_trait]
    impl ClassificationApi for FakeApi {
        async fn run_classification(&self, request: &RunRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(payload())
        }

        async fn latest_upload(&self, _user_id: u64) -> Result<Option<LatestUpload>> {
            Ok(self.upload.clone())
        }

        async fn classification_stats(
            &self,
            selector: StatsSelector,
        ) -> Result<Option<ClassificationStats>> {
            *self.stats_selector.lock().unwrap() = Some(selector);
            if self.fail_stats {
                return Err(AutoclassError::Api("HTTP 500".to_string()));
            }
            Ok(Some(ClassificationStats {
                total_resolved: 3,
                ..Default::default()
            }))
        }
    }

    #[test]
    fn test_successful_run_loads_saves_and_toasts() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);

        assert!(dashboard.apply_run_result(Ok(payload()), Engine::Rule, now()));

        assert_eq!(dashboard.list().all_tickets().len(), 2);
        assert_eq!(
            dashboard.last_run_label().as_deref(),
            Some("마지막 분류 : 2025-03-31 12:00")
        );
        let toast = dashboard.notifier().take().unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, "✓ 2건의 티켓 분류 완료 (규칙 기반)");

        let mut restored = Dashboard::new(SnapshotStore::new(dir.path().join("snapshot")));
        let model = restored.restore();
        assert_eq!(model.count, 2);
        assert_eq!(restored.last_run_label(), dashboard.last_run_label());
        assert_eq!(restored.result().unwrap().category_info[0].category, "배송");
    }

    #[test]
    fn test_engine_name_from_payload_wins() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        let mut body = payload();
        body["meta"]["engine_name"] = json!("GPT 분류기");
        dashboard.apply_run_result(Ok(body), Engine::Ai, now());
        assert_eq!(
            dashboard.notifier().take().unwrap().message,
            "✓ 2건의 티켓 분류 완료 (GPT 분류기)"
        );
    }

    #[test]
    fn test_failed_run_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        dashboard.apply_run_result(Ok(payload()), Engine::Rule, now());
        dashboard.notifier().dismiss();

        let succeeded = dashboard.apply_run_result(
            Err(AutoclassError::Api("업로드된 파일이 없습니다.".to_string())),
            Engine::Rule,
            now(),
        );

        assert!(!succeeded);
        assert_eq!(dashboard.list().all_tickets().len(), 2);
        let toast = dashboard.notifier().take().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "✗ 분류 실패: 업로드된 파일이 없습니다.");
    }

    #[test]
    fn test_payload_without_tickets_keeps_list() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        dashboard.apply_run_result(Ok(payload()), Engine::Rule, now());

        dashboard.apply_run_result(Ok(json!({"meta": {"total_tickets": 0}})), Engine::Rule, now());
        assert_eq!(dashboard.list().all_tickets().len(), 2);
        assert!(dashboard.result().unwrap().category_info.is_empty());
    }

    #[test]
    fn test_restore_without_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        let model = dashboard.restore();
        assert_eq!(model.count, 0);
        assert_eq!(model.body, TableBody::NoData);
        assert!(dashboard.last_run_label().is_none());
        assert!(dashboard.result().is_none());
    }

    #[test]
    fn test_placeholder_label_is_hidden() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot"));
        store.save(&json!({}), "-").unwrap();
        let mut dashboard = Dashboard::new(store);
        dashboard.restore();
        assert!(dashboard.last_run_label().is_none());
    }

    #[test]
    fn test_reset_clears_snapshot_and_state() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        dashboard.apply_run_result(Ok(payload()), Engine::Rule, now());

        let model = dashboard.reset().unwrap();
        assert_eq!(model.count, 0);
        assert!(dashboard.last_run_label().is_none());

        let mut restored = Dashboard::new(SnapshotStore::new(dir.path().join("snapshot")));
        assert_eq!(restored.restore().count, 0);
    }

    #[tokio::test]
    async fn test_run_sends_latest_file_request() {
        let dir = TempDir::new().unwrap();
        let mut dashboard = dashboard(&dir);
        let api = FakeApi::default();
        let config = Config {
            user_id: 7,
            ..Config::default()
        };

        assert!(dashboard.run(&api, &config, Engine::Ai).await);
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].user_id, 7);
        assert_eq!(requests[0].file_id, 0);
        assert_eq!(requests[0].engine, Engine::Ai);
    }

    #[tokio::test]
    async fn test_load_stats_prefers_batch() {
        let api = FakeApi {
            upload: Some(LatestUpload {
                kind: Some("batch".to_string()),
                file_id: Some(4),
                batch_id: Some(9),
            }),
            ..Default::default()
        };
        let stats = load_stats(&api, 1).await.unwrap();
        assert_eq!(stats.total_resolved, 3);
        assert_eq!(
            *api.stats_selector.lock().unwrap(),
            Some(StatsSelector::BatchId(9))
        );
    }

    #[tokio::test]
    async fn test_load_stats_failures_read_as_no_data() {
        let api = FakeApi::default();
        assert!(load_stats(&api, 1).await.is_none());

        let api = FakeApi {
            upload: Some(LatestUpload::default()),
            ..Default::default()
        };
        assert!(load_stats(&api, 1).await.is_none());

        let api = FakeApi {
            upload: Some(LatestUpload {
                file_id: Some(4),
                ..Default::default()
            }),
            fail_stats: true,
            ..Default::default()
        };
        assert!(load_stats(&api, 1).await.is_none());
    }
}
