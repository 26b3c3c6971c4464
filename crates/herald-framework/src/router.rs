//! The interaction dispatch router.
//!
//! [`InteractionRouter`] answers the gateway's generic
//! interaction-notification channel: it is an [`EventHandler`] for
//! [`EventKind::InteractionCreate`] that the runtime subscribes right after
//! installation, and it is not callable by anything else.
//!
//! Routing matches on the interaction's declared kind — exactly one branch
//! per delivery, no fallthrough:
//!
//! - **command** → `commands[name]`
//! - **component** → `buttons[custom_id]`, then `menus[custom_id]`; the
//!   inbound shape must match the bucket the id was registered under, or
//!   the delivery is skipped
//! - **modal submit** → `modals[custom_id]`
//!
//! A miss is a silent no-op: unregistered names are expected traffic (stale
//! registrations on the platform side), not errors. A handler failure is
//! caught and logged with its identifying context; the router itself never
//! fails, so one broken handler can never take down dispatch for anyone
//! else.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, trace};

use herald_core::{
    CommandHandler, ComponentHandler, EventHandler, EventKind, GatewayEvent, HandlerResult,
    Interaction, ModalHandler, SharedGateway,
};

use crate::registry::ModuleRegistry;

/// Routes inbound interactions to handlers in the frozen registry.
pub struct InteractionRouter {
    registry: Arc<ModuleRegistry>,
}

impl InteractionRouter {
    /// Creates a router over an installed registry.
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    async fn route(&self, interaction: Interaction, client: SharedGateway) {
        match interaction {
            Interaction::Command(invocation) => {
                let Some(handler) = self.registry.command(&invocation.name) else {
                    trace!(command = %invocation.name, "no handler for command");
                    return;
                };
                let name = invocation.name.clone();
                if let Err(e) = handler.execute(invocation, client).await {
                    error!(command = %name, error = %e, "command handler failed");
                }
            }
            Interaction::Component(component) => {
                let Some((bucket, handler)) = self.registry.component(&component.custom_id)
                else {
                    trace!(custom_id = %component.custom_id, "no handler for component");
                    return;
                };
                if bucket != component.kind {
                    debug!(
                        custom_id = %component.custom_id,
                        registered = %bucket,
                        received = %component.kind,
                        "component shape mismatch, skipping"
                    );
                    return;
                }
                let custom_id = component.custom_id.clone();
                if let Err(e) = handler.execute(component, client).await {
                    error!(custom_id = %custom_id, error = %e, "component handler failed");
                }
            }
            Interaction::ModalSubmit(submit) => {
                let Some(handler) = self.registry.modal(&submit.custom_id) else {
                    trace!(custom_id = %submit.custom_id, "no handler for modal");
                    return;
                };
                let custom_id = submit.custom_id.clone();
                if let Err(e) = handler.execute(submit, client).await {
                    error!(custom_id = %custom_id, error = %e, "modal handler failed");
                }
            }
        }
    }
}

#[async_trait]
impl EventHandler for InteractionRouter {
    fn event(&self) -> EventKind {
        EventKind::InteractionCreate
    }

    async fn execute(&self, event: Arc<GatewayEvent>, client: SharedGateway) -> HandlerResult {
        if let GatewayEvent::InteractionCreate(interaction) = event.as_ref() {
            self.route(interaction.clone(), client).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{
        CommandHandler, CommandInvocation, CommandMetadata, ComponentHandler,
        ComponentInteraction, Gateway, LocalGateway, ModalHandler, ModalSubmit,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        data: CommandMetadata,
        hits: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Counting {
        fn command(name: &str, hits: &Arc<AtomicUsize>) -> Arc<dyn CommandHandler> {
            Arc::new(Self {
                data: CommandMetadata::new(name),
                hits: Arc::clone(hits),
                fail: false,
            })
        }

        fn failing(name: &str, hits: &Arc<AtomicUsize>) -> Arc<dyn CommandHandler> {
            Arc::new(Self {
                data: CommandMetadata::new(name),
                hits: Arc::clone(hits),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl CommandHandler for Counting {
        fn data(&self) -> &CommandMetadata {
            &self.data
        }

        async fn execute(
            &self,
            _invocation: CommandInvocation,
            _client: SharedGateway,
        ) -> HandlerResult {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("broken handler".into());
            }
            Ok(())
        }
    }

    struct CountingWidget {
        id: String,
        hits: Arc<AtomicUsize>,
    }

    impl CountingWidget {
        fn with_id(id: &str, hits: &Arc<AtomicUsize>) -> Arc<dyn ComponentHandler> {
            Arc::new(Self {
                id: id.to_string(),
                hits: Arc::clone(hits),
            })
        }
    }

    #[async_trait]
    impl ComponentHandler for CountingWidget {
        fn custom_id(&self) -> &str {
            &self.id
        }

        async fn execute(
            &self,
            _component: ComponentInteraction,
            _client: SharedGateway,
        ) -> HandlerResult {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct CountingForm {
        id: String,
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ModalHandler for CountingForm {
        fn custom_id(&self) -> &str {
            &self.id
        }

        async fn execute(&self, _submit: ModalSubmit, _client: SharedGateway) -> HandlerResult {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn client() -> SharedGateway {
        Arc::new(LocalGateway::new())
    }

    #[tokio::test]
    async fn command_dispatch_invokes_the_handler_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::new();
        registry
            .insert_command(Counting::command("ping", &hits))
            .unwrap();
        let router = InteractionRouter::new(Arc::new(registry));

        router
            .route(
                Interaction::Command(CommandInvocation::new("ping")),
                client(),
            )
            .await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unregistered_names_are_a_silent_no_op() {
        let router = InteractionRouter::new(Arc::new(ModuleRegistry::new()));
        let client = client();

        router
            .route(
                Interaction::Command(CommandInvocation::new("missing")),
                Arc::clone(&client),
            )
            .await;
        router
            .route(
                Interaction::Component(ComponentInteraction::button("missing")),
                Arc::clone(&client),
            )
            .await;
        router
            .route(
                Interaction::ModalSubmit(ModalSubmit::new("missing", Vec::new())),
                client,
            )
            .await;
    }

    #[tokio::test]
    async fn a_failing_handler_does_not_break_later_dispatches() {
        let broken_hits = Arc::new(AtomicUsize::new(0));
        let healthy_hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::new();
        registry
            .insert_command(Counting::failing("broken", &broken_hits))
            .unwrap();
        registry
            .insert_command(Counting::command("healthy", &healthy_hits))
            .unwrap();
        let router = InteractionRouter::new(Arc::new(registry));
        let client = client();

        router
            .route(
                Interaction::Command(CommandInvocation::new("broken")),
                Arc::clone(&client),
            )
            .await;
        router
            .route(
                Interaction::Command(CommandInvocation::new("healthy")),
                client,
            )
            .await;

        assert_eq!(broken_hits.load(Ordering::SeqCst), 1);
        assert_eq!(healthy_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shape_mismatch_is_skipped_without_invoking() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::new();
        registry
            .insert_button(CountingWidget::with_id("confirm", &hits))
            .unwrap();
        let router = InteractionRouter::new(Arc::new(registry));
        let client = client();

        // A button id arriving menu-shaped is dropped, not invoked.
        router
            .route(
                Interaction::Component(ComponentInteraction::menu("confirm", Vec::new())),
                Arc::clone(&client),
            )
            .await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        router
            .route(
                Interaction::Component(ComponentInteraction::button("confirm")),
                client,
            )
            .await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn component_and_modal_buckets_resolve_independently() {
        let widget_hits = Arc::new(AtomicUsize::new(0));
        let form_hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::new();
        registry
            .insert_button(CountingWidget::with_id("shared", &widget_hits))
            .unwrap();
        registry
            .insert_modal(Arc::new(CountingForm {
                id: "shared".to_string(),
                hits: Arc::clone(&form_hits),
            }))
            .unwrap();
        let router = InteractionRouter::new(Arc::new(registry));
        let client = client();

        router
            .route(
                Interaction::Component(ComponentInteraction::button("shared")),
                Arc::clone(&client),
            )
            .await;
        router
            .route(
                Interaction::ModalSubmit(ModalSubmit::new("shared", Vec::new())),
                client,
            )
            .await;

        assert_eq!(widget_hits.load(Ordering::SeqCst), 1);
        assert_eq!(form_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn router_answers_the_interaction_event_channel() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::new();
        registry
            .insert_command(Counting::command("ping", &hits))
            .unwrap();

        let gateway = Arc::new(LocalGateway::new());
        let router = Arc::new(InteractionRouter::new(Arc::new(registry)));
        gateway.on(EventKind::InteractionCreate, router);

        Arc::clone(&gateway)
            .fire(GatewayEvent::InteractionCreate(Interaction::Command(
                CommandInvocation::new("ping"),
            )))
            .await;
        // Non-interaction events pass the router by untouched.
        Arc::clone(&gateway).fire(GatewayEvent::Resumed).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
