use anyhow::Result;
use parley_client::{Config, FileAuthFlagStore, SessionManager};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: login_url={}, ws_url={}",
        config.login_url, config.ws_url
    );

    let store = Arc::new(FileAuthFlagStore::new(config.state_file.clone()));
    let mut manager = SessionManager::new(config, store);

    if manager.restore().await {
        println!("Session restored, you are logged in.");
    } else {
        println!("Not logged in. Use /login <user> <pass> to authenticate.");
    }
    println!("Commands: /login <user> <pass>, /logout, /quit. Anything else is sent as a message.");

    // Print messages as the connection's read task appends them
    let log = manager.log();
    tokio::spawn(async move {
        let mut new_entries = log.watch_len();
        let mut printed = 0usize;
        loop {
            let snapshot = log.snapshot().await;
            for message in &snapshot[printed..] {
                println!("[{}] {}", message.timestamp, message.content);
            }
            printed = snapshot.len();
            if new_entries.changed().await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(rest) = line.trim().strip_prefix("/login ") {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(user), Some(pass)) => match manager.login(user, pass).await {
                    Ok(()) => println!("Logged in as {user}."),
                    Err(e) => println!("Login failed: {e}"),
                },
                _ => println!("Usage: /login <user> <pass>"),
            }
        } else if line.trim() == "/logout" {
            manager.logout().await;
            println!("Logged out.");
        } else if line.trim() == "/quit" {
            break;
        } else {
            manager.composer_mut().set_draft(line);
            match manager.submit().await {
                // Delivered messages come back via the server echo; blank
                // lines are silently ignored.
                Ok(_) => {}
                Err(e) => warn!("Message not delivered: {}", e),
            }
        }
    }

    // Dropping the manager releases the connection; the persisted flag is
    // left in place so the next start can restore the session.
    info!("Shutting down");
    Ok(())
}
