mod config;
mod error;
mod mqtt;
mod notify;
mod player;

use crate::config::Config;
use crate::error::App;
use crate::notify::Notifier;
use crate::player::request::PlayRequest;
use crate::player::Player;
use flexi_logger::Logger;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;

const MESSAGE_QUEUE_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> Result<(), App> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    Logger::try_with_str(&config.log_level)?.start()?;

    let notifier = Notifier::new(&config);
    let player = Player::new(Arc::clone(&config), notifier.clone());

    // Single worker draining one channel keeps message handling serialized:
    // a burst of messages queues behind playback of the current one.
    let (tx, rx) = mpsc::channel::<Vec<u8>>(MESSAGE_QUEUE_CAPACITY);
    let worker = task::spawn(handle_messages(rx, player));

    let (client, eventloop) = mqtt::connect(&config);
    info!(
        "Connecting to {}:{} (topic {})",
        config.mqtt_host, config.mqtt_port, config.topic
    );

    // No retry and no backoff: any connection error ends the process after
    // one best-effort alert. Restart supervision is external.
    if let Err(e) = mqtt::listen(&client, eventloop, &config.topic, tx).await {
        error!("MQTT connection error: {e}");
        notifier.alert(&format!("MQTT connection error: {e}")).await;
    }

    worker.abort();
    Ok(())
}

async fn handle_messages(mut rx: mpsc::Receiver<Vec<u8>>, player: Player) {
    while let Some(payload) = rx.recv().await {
        match PlayRequest::from_payload(&payload) {
            Ok(request) if request.is_empty() => {
                warn!("Message contained no playable file entries");
            }
            Ok(request) => {
                let summary = player.play_all(&request).await;
                info!("Playback finished: {summary}");
            }
            Err(e) => {
                error!(
                    "Failed to parse message payload: {e} (raw: {})",
                    String::from_utf8_lossy(&payload)
                );
            }
        }
    }
}
