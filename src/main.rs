//! Chat application backend
//!
//! OTP-verified registration, JWT login sessions, OTP password reset,
//! and pairwise chats.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatd::{
    routes, AppState, Config, ConsoleEmailSender, EmailSender, InMemoryChatStore,
    InMemoryUserStore, SessionIssuer, SmtpEmailSender,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Loaded configuration");

    // Pick the mail transport: SMTP when configured, console otherwise
    let mailer: Box<dyn EmailSender> = match config.smtp.clone() {
        Some(smtp) => Box::new(SmtpEmailSender::new(smtp).map_err(anyhow::Error::msg)?),
        None => {
            tracing::warn!("No SMTP configuration, OTP mail goes to the console");
            Box::new(ConsoleEmailSender::new())
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(
        InMemoryUserStore::new(),
        InMemoryChatStore::new(),
        mailer,
        SessionIssuer::new(&config.secret_key),
    ));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
