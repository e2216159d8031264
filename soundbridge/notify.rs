use crate::config::{Config, Telegram};
use log::{debug, error};
use reqwest::Client;
use serde_json::json;

const API_BASE: &str = "https://api.telegram.org";

/// Best-effort operator alerts over the Telegram bot API. Constructed once
/// at startup; cheap to clone (the inner client is reference-counted).
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    telegram: Option<Telegram>,
    api_base: String,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self::with_api_base(config, API_BASE)
    }

    /// Same notifier against a different API host. Tests point this at a
    /// local listener to observe the outgoing request.
    pub(crate) fn with_api_base(config: &Config, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            telegram: config.telegram.clone(),
            api_base: api_base.to_string(),
        }
    }

    /// Sends one message to the configured chat. Without credentials this is
    /// a no-op; transport failures are logged and swallowed. Never retried.
    pub async fn alert(&self, text: &str) {
        let Some(telegram) = &self.telegram else {
            debug!("Telegram credentials not set, skipping alert: {text}");
            return;
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, telegram.bot_token);
        let body = json!({"chat_id": telegram.chat_id, "text": text});
        match self.client.post(&url).json(&body).send().await {
            Ok(response) if !response.status().is_success() => {
                error!("Telegram alert rejected with status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => error!("Telegram alert failed: {e}"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_config(telegram: Option<Telegram>) -> Arc<Config> {
        Arc::new(Config {
            mqtt_host: "localhost".to_string(),
            mqtt_port: 1883,
            mqtt_user: None,
            mqtt_pass: None,
            mqtt_client_id: "soundbridge-test".to_string(),
            topic: "home/automation/play_sound".to_string(),
            music_dir: "/music".to_string(),
            player_bin: "mplayer".to_string(),
            audio_device: None,
            log_level: "info".to_string(),
            telegram,
        })
    }

    #[tokio::test]
    async fn alert_without_credentials_is_a_no_op() {
        // Must return immediately without attempting any network call;
        // a connect attempt against the real API would hang this test.
        let notifier = Notifier::new(&test_config(None));
        tokio::time::timeout(Duration::from_millis(50), notifier.alert("boom"))
            .await
            .expect("no-op alert should not block");
    }

    #[tokio::test]
    async fn alert_posts_text_to_the_configured_chat() {
        let (base, requests) = testing::capture_server();
        let config = test_config(Some(Telegram {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
        }));
        let notifier = Notifier::with_api_base(&config, &base);

        notifier.alert("Audio file missing: /music/bell.mp3").await;

        let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("POST /bot123:abc/sendMessage"));
        assert!(request.contains(r#""chat_id":"42""#));
        assert!(request.contains("Audio file missing: /music/bell.mp3"));
    }
}
