//! The client startup sequence.
//!
//! [`Client`] ties the pieces together: it installs the registered module
//! set, subscribes the interaction router, logs in, and bulk-registers
//! commands with the platform. The write phase (installation) strictly
//! precedes the dispatch phase (everything after login); once `start`
//! returns, the registry is frozen and shared read-only.

use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use herald_core::{EventKind, Gateway, SharedGateway};
use herald_framework::{InteractionRouter, ModuleRegistry, ModuleSet};

use crate::config::ClientConfig;
use crate::error::StartupError;
use crate::logging;

/// A Herald client bound to one gateway.
///
/// # Example
///
/// ```rust,ignore
/// let mut client = Client::new(config, gateway).modules(
///     ModuleSet::new().command(Ping::new()).event(ReadyGreeter),
/// );
/// client.run().await?;
/// ```
pub struct Client {
    config: ClientConfig,
    gateway: SharedGateway,
    modules: Option<ModuleSet>,
    registry: Option<Arc<ModuleRegistry>>,
    shutdown: CancellationToken,
}

impl Client {
    /// Creates a client and initializes logging from its configuration.
    pub fn new(config: ClientConfig, gateway: SharedGateway) -> Self {
        logging::init_from_config(&config.logging);
        Self {
            config,
            gateway,
            modules: None,
            registry: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Attaches the module set installed at startup.
    pub fn modules(mut self, modules: ModuleSet) -> Self {
        self.modules = Some(modules);
        self
    }

    /// The installed registry, available after a successful `start`.
    pub fn registry(&self) -> Option<&Arc<ModuleRegistry>> {
        self.registry.as_ref()
    }

    /// A token that stops [`run`](Self::run) when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Runs the startup sequence.
    ///
    /// Fatal conditions — missing token, an empty module set, a rejected
    /// login — surface as [`StartupError`]; the module set is installed
    /// before login is attempted, so a misconfigured module tree never
    /// reaches the platform. A failed command upload is logged and
    /// tolerated.
    pub async fn start(&mut self) -> Result<(), StartupError> {
        if self.registry.is_some() {
            warn!("client is already started");
            return Ok(());
        }

        let token = self
            .config
            .token
            .clone()
            .ok_or(StartupError::MissingToken)?;

        let modules = self.modules.take().unwrap_or_default();
        let report = modules.install(&self.gateway).await?;

        let router = Arc::new(InteractionRouter::new(Arc::clone(&report.registry)));
        self.gateway.on(EventKind::InteractionCreate, router);

        let session = self
            .gateway
            .login(&token)
            .await
            .map_err(StartupError::Login)?;
        info!(user = %session.user.username, "logged in");

        self.sync_commands(&report.registry).await;
        self.registry = Some(report.registry);

        Ok(())
    }

    /// Uploads the registered commands to the platform in one bulk call.
    async fn sync_commands(&self, registry: &ModuleRegistry) {
        if registry.command_count() == 0 {
            warn!("no commands available to register");
            return;
        }

        let payloads = registry.command_payloads();
        match self.gateway.overwrite_commands(&payloads).await {
            Ok(()) => info!(count = payloads.len(), "commands registered with the platform"),
            Err(e) => error!(error = %e, "failed to register commands"),
        }
    }

    /// Starts the client and blocks until a shutdown signal arrives.
    pub async fn run(&mut self) -> Result<(), StartupError> {
        self.start().await?;
        info!("client is running, press Ctrl+C to stop");
        self.wait_for_shutdown().await;
        info!("client stopped");
        Ok(())
    }

    async fn wait_for_shutdown(&self) {
        #[cfg(unix)]
        {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");

            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("received Ctrl+C, shutting down");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, shutting down");
                }
                _ = self.shutdown.cancelled() => {
                    info!("shutdown requested, shutting down");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("received Ctrl+C, shutting down");
                }
                _ = self.shutdown.cancelled() => {
                    info!("shutdown requested, shutting down");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use herald_core::{
        ApiResult, CommandHandler, CommandInvocation, CommandMetadata, CommandPayload,
        EventHandler, Gateway, GatewayError, GatewayEvent, GatewayResult, HandlerResult,
        Interaction, LocalGateway, Session, User,
    };
    use herald_framework::InstallError;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping {
        data: CommandMetadata,
        hits: Arc<AtomicUsize>,
    }

    impl Ping {
        fn new(hits: &Arc<AtomicUsize>) -> Self {
            Self {
                data: CommandMetadata::new("ping").description("ping pong!"),
                hits: Arc::clone(hits),
            }
        }
    }

    #[async_trait]
    impl CommandHandler for Ping {
        fn data(&self) -> &CommandMetadata {
            &self.data
        }

        async fn execute(
            &self,
            _invocation: CommandInvocation,
            _client: SharedGateway,
        ) -> HandlerResult {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn config_with_token(token: &str) -> ClientConfig {
        ClientConfig {
            token: Some(token.to_string()),
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn ping_end_to_end() {
        let gateway = Arc::new(LocalGateway::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let mut client = Client::new(
            config_with_token("token"),
            Arc::clone(&gateway) as SharedGateway,
        )
        .modules(ModuleSet::new().command(Ping::new(&hits)));
        client.start().await.unwrap();

        let registry = client.registry().unwrap();
        assert_eq!(registry.command_count(), 1);
        assert!(registry.command("ping").is_some());

        // The upload carried exactly the one registered command.
        let uploads = gateway.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].len(), 1);
        assert_eq!(uploads[0][0].name, "ping");

        Arc::clone(&gateway)
            .fire(GatewayEvent::InteractionCreate(Interaction::Command(
                CommandInvocation::new("ping"),
            )))
            .await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_token_is_fatal_before_anything_else() {
        let gateway = Arc::new(LocalGateway::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let mut client = Client::new(
            ClientConfig::default(),
            Arc::clone(&gateway) as SharedGateway,
        )
        .modules(ModuleSet::new().command(Ping::new(&hits)));

        assert!(matches!(
            client.start().await,
            Err(StartupError::MissingToken)
        ));
        assert!(!gateway.is_logged_in());
    }

    #[tokio::test]
    async fn empty_module_set_is_fatal_and_login_is_never_attempted() {
        let gateway = Arc::new(LocalGateway::new());

        let mut client = Client::new(
            config_with_token("token"),
            Arc::clone(&gateway) as SharedGateway,
        );

        assert!(matches!(
            client.start().await,
            Err(StartupError::Install(InstallError::NoModules))
        ));
        assert!(!gateway.is_logged_in());
    }

    #[tokio::test]
    async fn rejected_login_is_fatal() {
        let gateway = Arc::new(LocalGateway::new());
        let hits = Arc::new(AtomicUsize::new(0));

        // LocalGateway rejects the empty token.
        let mut client = Client::new(
            config_with_token(""),
            Arc::clone(&gateway) as SharedGateway,
        )
        .modules(ModuleSet::new().command(Ping::new(&hits)));

        assert!(matches!(
            client.start().await,
            Err(StartupError::Login(GatewayError::LoginRejected { .. }))
        ));
    }

    /// Gateway whose bulk command upload always fails.
    struct BrokenUploads;

    #[async_trait]
    impl Gateway for BrokenUploads {
        fn on(&self, _kind: EventKind, _handler: Arc<dyn EventHandler>) {}

        fn once(&self, _kind: EventKind, _handler: Arc<dyn EventHandler>) {}

        async fn login(&self, _token: &str) -> GatewayResult<Session> {
            Ok(Session {
                user: User {
                    id: "0".into(),
                    username: "broken".into(),
                },
                session_id: "s".into(),
            })
        }

        async fn overwrite_commands(&self, _commands: &[CommandPayload]) -> GatewayResult<()> {
            Err(GatewayError::ConnectionClosed {
                reason: "upload refused".into(),
            })
        }

        async fn call_api(&self, _action: &str, _params: Value) -> ApiResult<Value> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn failed_command_upload_does_not_abort_startup() {
        let hits = Arc::new(AtomicUsize::new(0));

        let mut client = Client::new(config_with_token("token"), Arc::new(BrokenUploads))
            .modules(ModuleSet::new().command(Ping::new(&hits)));

        client.start().await.unwrap();
        assert!(client.registry().is_some());
    }
}
