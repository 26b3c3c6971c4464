//! In-process gateway implementation.
//!
//! [`LocalGateway`] implements [`Gateway`] without any network: events are
//! injected with [`fire`](LocalGateway::fire), uploads and API calls are
//! recorded for inspection. Tests and local development runs use it in
//! place of a real platform connection.
//!
//! The subscription table carries the semantics the trait demands: one-shot
//! entries are removed at fire time (before their handler runs, so a
//! re-entrant fire cannot double-deliver), and a failing handler is logged
//! and contained without affecting the other subscribers of the same event.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::command::CommandPayload;
use crate::error::{ApiError, ApiResult, GatewayError, GatewayResult};
use crate::event::{EventKind, GatewayEvent, Session, User};
use crate::gateway::{Gateway, SharedGateway};
use crate::handler::EventHandler;

struct Subscription {
    handler: Arc<dyn EventHandler>,
    once: bool,
}

/// An in-process [`Gateway`] for tests and local runs.
#[derive(Default)]
pub struct LocalGateway {
    subscriptions: RwLock<HashMap<EventKind, Vec<Subscription>>>,
    session: RwLock<Option<Session>>,
    uploads: Mutex<Vec<Vec<CommandPayload>>>,
    api_calls: Mutex<Vec<(String, Value)>>,
}

impl LocalGateway {
    /// Creates a gateway with no subscriptions and no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a login has completed.
    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_some()
    }

    /// Number of live subscriptions for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions
            .read()
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Every command list uploaded via
    /// [`overwrite_commands`](Gateway::overwrite_commands), oldest first.
    pub fn uploads(&self) -> Vec<Vec<CommandPayload>> {
        self.uploads.lock().clone()
    }

    /// Every API call recorded via [`call_api`](Gateway::call_api),
    /// oldest first.
    pub fn api_calls(&self) -> Vec<(String, Value)> {
        self.api_calls.lock().clone()
    }

    /// Delivers `event` to every live subscriber of its kind.
    ///
    /// One-shot subscriptions are removed from the table before any handler
    /// runs. Handlers execute jointly; a failing handler is logged with the
    /// event kind as context and does not affect the others.
    ///
    /// Returns the number of handlers invoked.
    pub async fn fire(self: Arc<Self>, event: GatewayEvent) -> usize {
        let kind = event.kind();

        let due: Vec<Arc<dyn EventHandler>> = {
            let mut table = self.subscriptions.write();
            match table.get_mut(&kind) {
                Some(list) => {
                    let due = list.iter().map(|s| Arc::clone(&s.handler)).collect();
                    list.retain(|s| !s.once);
                    due
                }
                None => Vec::new(),
            }
        };

        if due.is_empty() {
            trace!(event = %kind, "no subscribers for event");
            return 0;
        }

        let count = due.len();
        let event = Arc::new(event);
        let client: SharedGateway = self;

        future::join_all(due.into_iter().map(|handler| {
            let event = Arc::clone(&event);
            let client = Arc::clone(&client);
            async move {
                if let Err(e) = handler.execute(event, client).await {
                    error!(event = %kind, error = %e, "event handler failed");
                }
            }
        }))
        .await;

        count
    }

    fn subscribe(&self, kind: EventKind, handler: Arc<dyn EventHandler>, once: bool) {
        self.subscriptions
            .write()
            .entry(kind)
            .or_default()
            .push(Subscription { handler, once });
        debug!(event = %kind, once, "subscription added");
    }
}

#[async_trait]
impl Gateway for LocalGateway {
    fn on(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.subscribe(kind, handler, false);
    }

    fn once(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.subscribe(kind, handler, true);
    }

    async fn login(&self, token: &str) -> GatewayResult<Session> {
        if token.is_empty() {
            return Err(GatewayError::LoginRejected {
                reason: "empty token".into(),
            });
        }
        let session = Session {
            user: User {
                id: "0".into(),
                username: "local".into(),
            },
            session_id: "local".into(),
        };
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    async fn overwrite_commands(&self, commands: &[CommandPayload]) -> GatewayResult<()> {
        if !self.is_logged_in() {
            return Err(GatewayError::NotConnected);
        }
        self.uploads.lock().push(commands.to_vec());
        Ok(())
    }

    async fn call_api(&self, action: &str, params: Value) -> ApiResult<Value> {
        if !self.is_logged_in() {
            return Err(ApiError::NotConnected);
        }
        self.api_calls.lock().push((action.to_string(), params));
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder {
        kind: EventKind,
        hits: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Recorder {
        fn new(kind: EventKind, hits: Arc<AtomicUsize>) -> Self {
            Self {
                kind,
                hits,
                fail: false,
            }
        }

        fn failing(kind: EventKind, hits: Arc<AtomicUsize>) -> Self {
            Self {
                kind,
                hits,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn event(&self) -> EventKind {
            self.kind
        }

        async fn execute(&self, _event: Arc<GatewayEvent>, _client: SharedGateway) -> HandlerResult {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("recorder failure".into());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn persistent_subscription_fires_repeatedly() {
        let gateway = Arc::new(LocalGateway::new());
        let hits = Arc::new(AtomicUsize::new(0));
        gateway.on(
            EventKind::Resumed,
            Arc::new(Recorder::new(EventKind::Resumed, Arc::clone(&hits))),
        );

        Arc::clone(&gateway).fire(GatewayEvent::Resumed).await;
        Arc::clone(&gateway).fire(GatewayEvent::Resumed).await;

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(gateway.subscriber_count(EventKind::Resumed), 1);
    }

    #[tokio::test]
    async fn one_shot_subscription_fires_at_most_once() {
        let gateway = Arc::new(LocalGateway::new());
        let hits = Arc::new(AtomicUsize::new(0));
        gateway.once(
            EventKind::Resumed,
            Arc::new(Recorder::new(EventKind::Resumed, Arc::clone(&hits))),
        );

        assert_eq!(Arc::clone(&gateway).fire(GatewayEvent::Resumed).await, 1);
        assert_eq!(Arc::clone(&gateway).fire(GatewayEvent::Resumed).await, 0);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.subscriber_count(EventKind::Resumed), 0);
    }

    #[tokio::test]
    async fn failing_handler_does_not_starve_other_subscribers() {
        let gateway = Arc::new(LocalGateway::new());
        let failing_hits = Arc::new(AtomicUsize::new(0));
        let healthy_hits = Arc::new(AtomicUsize::new(0));
        gateway.on(
            EventKind::Resumed,
            Arc::new(Recorder::failing(EventKind::Resumed, Arc::clone(&failing_hits))),
        );
        gateway.on(
            EventKind::Resumed,
            Arc::new(Recorder::new(EventKind::Resumed, Arc::clone(&healthy_hits))),
        );

        Arc::clone(&gateway).fire(GatewayEvent::Resumed).await;
        Arc::clone(&gateway).fire(GatewayEvent::Resumed).await;

        assert_eq!(failing_hits.load(Ordering::SeqCst), 2);
        assert_eq!(healthy_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn outbound_surface_requires_login() {
        let gateway = Arc::new(LocalGateway::new());

        assert!(matches!(
            gateway.call_api("noop", Value::Null).await,
            Err(ApiError::NotConnected)
        ));
        assert!(matches!(
            gateway.overwrite_commands(&[]).await,
            Err(GatewayError::NotConnected)
        ));

        gateway.login("token").await.unwrap();
        assert!(gateway.call_api("noop", Value::Null).await.is_ok());
        assert_eq!(gateway.api_calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let gateway = LocalGateway::new();
        assert!(matches!(
            gateway.login("").await,
            Err(GatewayError::LoginRejected { .. })
        ));
        assert!(!gateway.is_logged_in());
    }
}
