use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use quiz_bot::chat::ChatGateway;
use quiz_bot::config::Config;
use quiz_bot::definitions::DictionaryClient;
use quiz_bot::dispatch::Dispatcher;
use quiz_bot::rounds::RoundManager;
use quiz_core::WordList;
use quiz_persistence::{DocumentStore, RestStore, RoundRepository, ScoreRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("Starting word quiz bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let words = match WordList::load(&config.words_file) {
        Ok(words) => {
            info!("Loaded {} words from {}", words.len(), config.words_file);
            Arc::new(words)
        }
        Err(e) => {
            tracing::error!("Failed to load word list: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn DocumentStore> = Arc::new(RestStore::new(&config.store_url));
    let gateway = Arc::new(ChatGateway::new(&config.chat_api_url, &config.bot_token));
    let definitions = Arc::new(DictionaryClient::new(&config.dictionary_api_url));

    let manager = RoundManager::new(
        gateway.clone(),
        definitions,
        RoundRepository::new(store.clone()),
        ScoreRepository::new(store),
        words,
    );
    let dispatcher = Arc::new(Dispatcher::new(gateway.clone(), manager));

    info!("Polling for updates");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
            batch = gateway.poll_updates() => match batch {
                Ok(updates) => {
                    for update in updates {
                        let dispatcher = dispatcher.clone();
                        tokio::spawn(async move {
                            dispatcher.handle_update(update).await;
                        });
                    }
                }
                Err(e) => {
                    warn!("Update poll failed: {}", e);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
        info!("Received Ctrl+C");
    }
}
