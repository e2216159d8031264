use crate::error::App;
use std::env;

const DEFAULT_BROKER: &str = "localhost";
const DEFAULT_PORT: u16 = 1883;
const DEFAULT_CLIENT_ID: &str = "soundbridge";
const DEFAULT_TOPIC: &str = "home/automation/play_sound";
const DEFAULT_MUSIC_DIR: &str = "/music";
const DEFAULT_PLAYER_BIN: &str = "mplayer";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Telegram credentials; both parts are required for alerts to be sent.
#[derive(Debug, Clone)]
pub struct Telegram {
    pub bot_token: String,
    pub chat_id: String,
}

/// Process-wide configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_user: Option<String>,
    pub mqtt_pass: Option<String>,
    pub mqtt_client_id: String,
    pub topic: String,
    pub music_dir: String,
    pub player_bin: String,
    pub audio_device: Option<String>,
    pub log_level: String,
    pub telegram: Option<Telegram>,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Reads the fixed set of environment variables, applying defaults.
    /// The only validated field is the broker port; absent credentials
    /// disable the corresponding feature instead of failing.
    pub fn from_env() -> Result<Self, App> {
        let mqtt_port = match var("MQTT_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| App::Config(format!("Invalid MQTT_PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let telegram = match (var("TELEGRAM_BOT_TOKEN"), var("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(Telegram { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            mqtt_host: var("MQTT_SERVER").unwrap_or_else(|| DEFAULT_BROKER.to_string()),
            mqtt_port,
            mqtt_user: var("MQTT_USER"),
            mqtt_pass: var("MQTT_PASS"),
            mqtt_client_id: var("MQTT_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            topic: var("MQTT_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            music_dir: var("DIR_MUSIC").unwrap_or_else(|| DEFAULT_MUSIC_DIR.to_string()),
            player_bin: var("PLAYER_BIN").unwrap_or_else(|| DEFAULT_PLAYER_BIN.to_string()),
            audio_device: var("AUDIO_DEVICE"),
            log_level: var("LOGGING_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            telegram,
        })
    }
}
