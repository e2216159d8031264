use flexi_logger::FlexiLoggerError;
use rumqttc::ClientError;
use rumqttc::ConnectionError;
use thiserror::Error;
use tokio::sync::mpsc::error::SendError;

#[derive(Error, Debug, Clone)]
pub enum App {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data parsing error: {0}")]
    DataParsing(String),

    #[error("MQTT client error: {0}")]
    Mqtt(String),

    #[error("MQTT connection error: {0}")]
    Connection(String),

    #[error("Logger initialization error: {0}")]
    Logger(String),

    #[error("Channel send error: {0}")]
    Send(String),
}

impl From<serde_json::Error> for App {
    fn from(error: serde_json::Error) -> Self {
        App::DataParsing(error.to_string())
    }
}

impl From<ClientError> for App {
    fn from(error: ClientError) -> Self {
        App::Mqtt(error.to_string())
    }
}

impl From<ConnectionError> for App {
    fn from(error: ConnectionError) -> Self {
        App::Connection(error.to_string())
    }
}

impl From<FlexiLoggerError> for App {
    fn from(error: FlexiLoggerError) -> Self {
        App::Logger(error.to_string())
    }
}

impl<T> From<SendError<T>> for App {
    fn from(error: SendError<T>) -> Self {
        App::Send(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_wrapped_detail() {
        let parse = App::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(matches!(parse, App::DataParsing(_)));
        assert!(parse.to_string().starts_with("Data parsing error:"));

        let config = App::Config("Invalid MQTT_PORT 'x'".to_string());
        assert_eq!(config.to_string(), "Configuration error: Invalid MQTT_PORT 'x'");
    }
}
