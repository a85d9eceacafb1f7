//! mb-gateway: menubot main binary
//!
//! Boots the WhatsApp webhook server and the background session sweeper.
//!
//! Usage:
//!   mb-gateway           - Start the webhook server
//!   mb-gateway --help    - Show help
//!
//! Configuration comes from menubot.toml and/or environment variables; see
//! menubot.toml.example.

use std::sync::Arc;

use mb_core::{start_sweeper, Config, MessageHandler, SessionStore};
use mb_whatsapp::{start_webhook_server, WebhookState, WhatsAppApi};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }
    if args.iter().skip(1).any(|a| a == "--version" || a == "-v") {
        println!("mb-gateway {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting menubot...");

    let api = Arc::new(
        WhatsAppApi::new(&config.whatsapp.access_token, &config.whatsapp.verify_token)
            .with_endpoint(&config.whatsapp.base_url, &config.whatsapp.api_version),
    );

    let store = SessionStore::new(config.session.clone(), api.clone());
    let handler = Arc::new(MessageHandler::new(
        store.clone(),
        api.clone(),
        config.session.reminder_delay(),
    ));

    let sweeper = start_sweeper(store, config.session.sweep_interval());

    let state = WebhookState {
        api,
        handler,
        app_secret: config.whatsapp.app_secret.clone(),
    };

    let port = config.server.port;
    let server = tokio::spawn(async move {
        if let Err(e) = start_webhook_server(state, port).await {
            tracing::error!("Webhook server error: {}", e);
        }
    });

    tracing::info!("menubot initialized successfully");
    tracing::info!("Press Ctrl+C to exit");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    server.abort();
    sweeper.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_help() {
    println!("mb-gateway - WhatsApp menu responder");
    println!();
    println!("Usage:");
    println!("  mb-gateway           Start the webhook server");
    println!("  mb-gateway --help    Show this help message");
    println!("  mb-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  VERIFY_TOKEN                Webhook handshake token (required)");
    println!("  ACCESS_TOKEN                Graph API bearer token (required)");
    println!("  WHATSAPP_APP_SECRET         Enables payload signature checks");
    println!("  PORT                        Webhook server port (default: 3000)");
    println!("  SESSION_TIMEOUT_SECS        Inactivity timeout (default: 600)");
    println!("  SESSION_WARNING_LEAD_SECS   Warning lead time (default: 60)");
    println!("  SESSION_REMINDER_DELAY_SECS Follow-up reminder delay (default: 172800)");
    println!("  SESSION_SWEEP_INTERVAL_SECS Sweep period (default: 300)");
}
