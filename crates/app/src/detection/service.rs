//! Detection pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    detection::{
        errors::DetectionError,
        models::{DetectedPlate, DetectionOutcome},
        resolver,
    },
    recognition::RecognitionService,
    tenants::registry::{TenantRegistry, TriggerDecision},
    webhook::WebhookNotifier,
};

/// Orchestrates one detection request end to end.
///
/// Consumes the recognition readings for a submitted image in reported
/// order, resolves each against the tenant's allow-list, and fires at most
/// one cooldown-gated gate trigger per request.
pub struct DetectionPipeline {
    registry: Arc<TenantRegistry>,
    recognizer: Arc<dyn RecognitionService>,
    notifier: Arc<dyn WebhookNotifier>,
}

impl DetectionPipeline {
    #[must_use]
    pub fn new(
        registry: Arc<TenantRegistry>,
        recognizer: Arc<dyn RecognitionService>,
        notifier: Arc<dyn WebhookNotifier>,
    ) -> Self {
        Self {
            registry,
            recognizer,
            notifier,
        }
    }

    /// Deliver the webhook for a reserved trigger slot and settle the
    /// reservation.
    ///
    /// The registry lock is never held across the webhook call: the slot was
    /// reserved by the caller, delivery happens lock-free, and the
    /// reservation is committed (cooldown moves forward) only on success.
    async fn deliver(&self, tenant_id: &str, authorized_plate: &str, now: Timestamp) -> bool {
        let webhook_url = self.registry.get(tenant_id).and_then(|t| t.webhook_url);

        let Some(webhook_url) = webhook_url else {
            self.registry.abort_trigger(tenant_id);

            return false;
        };

        let delivered = self
            .notifier
            .trigger(&webhook_url, authorized_plate, tenant_id, now)
            .await;

        if delivered {
            self.registry.commit_trigger(tenant_id, Timestamp::now());
            info!(tenant = %tenant_id, plate = %authorized_plate, "gate triggered");
        } else {
            self.registry.abort_trigger(tenant_id);
            debug!(tenant = %tenant_id, "gate trigger not delivered");
        }

        delivered
    }
}

#[async_trait]
impl DetectionService for DetectionPipeline {
    async fn detect(
        &self,
        tenant_id: &str,
        image: Vec<u8>,
    ) -> Result<DetectionOutcome, DetectionError> {
        // Unknown tenants never reach the recognition service.
        let Some(tenant) = self.registry.get(tenant_id) else {
            return Err(DetectionError::UnknownTenant);
        };

        let readings = self.recognizer.recognize(&image).await?;

        debug!(tenant = %tenant_id, readings = readings.len(), "image processed");

        let mut outcome = DetectionOutcome {
            detected_plates: Vec::with_capacity(readings.len()),
            gate_triggered: false,
            matched_plate: None,
        };

        // One trigger attempt per request, win or lose. Scanning continues
        // past it so the report lists every reading.
        let mut attempted = false;

        for reading in readings {
            let authorization = if attempted {
                None
            } else {
                resolver::resolve(&tenant, &reading.plate)
            };

            outcome.detected_plates.push(DetectedPlate {
                plate: reading.plate,
                confidence: reading.confidence,
            });

            let Some(authorization) = authorization else {
                continue;
            };

            let now = Timestamp::now();

            match self.registry.begin_trigger(tenant_id, now) {
                TriggerDecision::Begun => {
                    attempted = true;

                    if self.deliver(tenant_id, &authorization.plate, now).await {
                        outcome.gate_triggered = true;
                        outcome.matched_plate = Some(authorization.plate);
                    }
                }
                // An active cooldown does not consume the attempt; it simply
                // keeps every candidate of this request from triggering.
                TriggerDecision::CoolingDown
                | TriggerDecision::Busy
                | TriggerDecision::UnknownTenant => {}
            }
        }

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
/// Runs the detection pipeline for one inbound request.
pub trait DetectionService: Send + Sync {
    /// Processes a captured image for a tenant.
    async fn detect(
        &self,
        tenant_id: &str,
        image: Vec<u8>,
    ) -> Result<DetectionOutcome, DetectionError>;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use testresult::TestResult;

    use crate::{
        recognition::{MockRecognitionService, PlateReading, RecognitionError},
        tenants::models::Tenant,
        webhook::MockWebhookNotifier,
    };

    use super::*;

    const WEBHOOK_URL: &str = "http://192.168.1.100:8123/api/webhook/gate";

    fn make_tenant(id: &str, webhook_url: Option<&str>, authorized_plates: &[&str]) -> Tenant {
        Tenant {
            id: id.to_string(),
            webhook_url: webhook_url.map(ToString::to_string),
            authorized_plates: authorized_plates.iter().map(ToString::to_string).collect(),
            cooldown_seconds: 10,
            cooldown_until: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_registry(tenant: Tenant) -> Arc<TenantRegistry> {
        let registry = Arc::new(TenantRegistry::new());
        registry.insert(tenant);
        registry
    }

    fn readings(plates: &[&str]) -> Vec<PlateReading> {
        plates
            .iter()
            .map(|plate| PlateReading {
                plate: (*plate).to_string(),
                confidence: 0.9,
            })
            .collect()
    }

    fn recognizer_returning(result: Vec<PlateReading>) -> MockRecognitionService {
        let mut recognizer = MockRecognitionService::new();

        recognizer
            .expect_recognize()
            .once()
            .returning(move |_| Ok(result.clone()));

        recognizer
    }

    fn make_pipeline(
        registry: Arc<TenantRegistry>,
        recognizer: MockRecognitionService,
        notifier: MockWebhookNotifier,
    ) -> DetectionPipeline {
        DetectionPipeline::new(registry, Arc::new(recognizer), Arc::new(notifier))
    }

    #[tokio::test]
    async fn first_authorized_candidate_triggers_once() -> TestResult {
        let registry = make_registry(make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]));

        let recognizer = recognizer_returning(readings(&["ZZZZZZ", "AB12CD"]));

        let mut notifier = MockWebhookNotifier::new();
        notifier
            .expect_trigger()
            .once()
            .withf(|url, plate, tenant, _ts| {
                url == WEBHOOK_URL && plate == "AB12CD" && tenant == "gate-1"
            })
            .returning(|_, _, _, _| true);

        let pipeline = make_pipeline(Arc::clone(&registry), recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        assert_eq!(outcome.detected_plates.len(), 2);
        assert_eq!(outcome.detected_plates[0].plate, "ZZZZZZ");
        assert!(outcome.gate_triggered);
        assert_eq!(outcome.matched_plate.as_deref(), Some("AB12CD"));
        assert!(registry.get("gate-1").unwrap().cooldown_until.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tenant_short_circuits_before_recognition() {
        let registry = Arc::new(TenantRegistry::new());

        let mut recognizer = MockRecognitionService::new();
        recognizer.expect_recognize().never();

        let mut notifier = MockWebhookNotifier::new();
        notifier.expect_trigger().never();

        let pipeline = make_pipeline(registry, recognizer, notifier);

        let result = pipeline.detect("nope", b"img".to_vec()).await;

        assert!(matches!(result, Err(DetectionError::UnknownTenant)));
    }

    #[tokio::test]
    async fn recognition_failure_propagates() {
        let registry = make_registry(make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]));

        let mut recognizer = MockRecognitionService::new();
        recognizer
            .expect_recognize()
            .once()
            .returning(|_| Err(RecognitionError::Timeout));

        let mut notifier = MockWebhookNotifier::new();
        notifier.expect_trigger().never();

        let pipeline = make_pipeline(registry, recognizer, notifier);

        let result = pipeline.detect("gate-1", b"img".to_vec()).await;

        assert!(matches!(
            result,
            Err(DetectionError::Recognition(RecognitionError::Timeout))
        ));
    }

    #[tokio::test]
    async fn empty_recognition_result_is_a_valid_outcome() -> TestResult {
        let registry = make_registry(make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]));

        let recognizer = recognizer_returning(Vec::new());

        let mut notifier = MockWebhookNotifier::new();
        notifier.expect_trigger().never();

        let pipeline = make_pipeline(registry, recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        assert!(outcome.detected_plates.is_empty());
        assert!(!outcome.gate_triggered);
        assert!(outcome.matched_plate.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn active_cooldown_suppresses_the_trigger() -> TestResult {
        let mut tenant = make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]);
        tenant.cooldown_until = Timestamp::now().checked_add(jiff::SignedDuration::from_secs(3600)).ok();

        let registry = make_registry(tenant);

        let recognizer = recognizer_returning(readings(&["AB12CD"]));

        let mut notifier = MockWebhookNotifier::new();
        notifier.expect_trigger().never();

        let pipeline = make_pipeline(registry, recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        assert_eq!(outcome.detected_plates.len(), 1);
        assert!(!outcome.gate_triggered);

        Ok(())
    }

    #[tokio::test]
    async fn webhook_failure_consumes_the_single_attempt() -> TestResult {
        // Two authorized candidates; delivery fails on the first and the
        // pipeline must not retry with the second.
        let registry = make_registry(make_tenant(
            "gate-1",
            Some(WEBHOOK_URL),
            &["AB12CD", "KL07AB1234"],
        ));

        let recognizer = recognizer_returning(readings(&["AB12CD", "KL07AB1234"]));

        let mut notifier = MockWebhookNotifier::new();
        notifier
            .expect_trigger()
            .once()
            .returning(|_, _, _, _| false);

        let pipeline = make_pipeline(Arc::clone(&registry), recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        assert_eq!(outcome.detected_plates.len(), 2);
        assert!(!outcome.gate_triggered);
        assert!(outcome.matched_plate.is_none());

        // The failed attempt left the cooldown untouched.
        assert!(registry.get("gate-1").unwrap().cooldown_until.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn missing_webhook_url_fails_without_invoking_the_notifier() -> TestResult {
        let registry = make_registry(make_tenant("gate-1", None, &["AB12CD", "KL07AB1234"]));

        let recognizer = recognizer_returning(readings(&["AB12CD", "KL07AB1234"]));

        let mut notifier = MockWebhookNotifier::new();
        notifier.expect_trigger().never();

        let pipeline = make_pipeline(Arc::clone(&registry), recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        assert!(!outcome.gate_triggered);
        assert!(registry.get("gate-1").unwrap().cooldown_until.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn scanning_continues_after_a_successful_trigger() -> TestResult {
        let registry = make_registry(make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]));

        let recognizer = recognizer_returning(readings(&["AB12CD", "AB12CD", "ZZZZZZ"]));

        let mut notifier = MockWebhookNotifier::new();
        notifier
            .expect_trigger()
            .once()
            .returning(|_, _, _, _| true);

        let pipeline = make_pipeline(registry, recognizer, notifier);

        let outcome = pipeline.detect("gate-1", b"img".to_vec()).await?;

        // Every reading is reported; only the first fired the gate.
        assert_eq!(outcome.detected_plates.len(), 3);
        assert!(outcome.gate_triggered);

        Ok(())
    }

    /// Notifier that parks long enough for a concurrent request to observe
    /// the in-flight reservation.
    struct SlowNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WebhookNotifier for SlowNotifier {
        async fn trigger(&self, _url: &str, _plate: &str, _tenant: &str, _ts: Timestamp) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            true
        }
    }

    #[tokio::test]
    async fn concurrent_requests_trigger_exactly_once() -> TestResult {
        let registry = make_registry(make_tenant("gate-1", Some(WEBHOOK_URL), &["AB12CD"]));

        let notifier = Arc::new(SlowNotifier {
            calls: AtomicUsize::new(0),
        });

        let mut recognizer = MockRecognitionService::new();
        recognizer
            .expect_recognize()
            .times(2)
            .returning(|_| Ok(vec![PlateReading {
                plate: "AB12CD".to_string(),
                confidence: 0.9,
            }]));

        let pipeline = DetectionPipeline::new(
            registry,
            Arc::new(recognizer),
            Arc::clone(&notifier) as Arc<dyn WebhookNotifier>,
        );

        let (a, b) = tokio::join!(
            pipeline.detect("gate-1", b"img".to_vec()),
            pipeline.detect("gate-1", b"img".to_vec()),
        );

        let triggered = [a?, b?]
            .iter()
            .filter(|outcome| outcome.gate_triggered)
            .count();

        assert_eq!(triggered, 1, "exactly one request may fire the gate");
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

        Ok(())
    }
}
