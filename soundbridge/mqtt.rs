use crate::config::Config;
use crate::error::App;
use log::{debug, info, warn};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;

const KEEP_ALIVE: Duration = Duration::from_secs(30);
const EVENT_CAPACITY: usize = 16;

/// Builds the broker connection from config. Credentials are only applied
/// when both halves are present; otherwise the connection is anonymous.
pub fn connect(config: &Config) -> (AsyncClient, EventLoop) {
    let mut options = MqttOptions::new(
        config.mqtt_client_id.clone(),
        config.mqtt_host.clone(),
        config.mqtt_port,
    );
    options.set_keep_alive(KEEP_ALIVE);
    if let (Some(user), Some(pass)) = (&config.mqtt_user, &config.mqtt_pass) {
        options.set_credentials(user.clone(), pass.clone());
    }
    AsyncClient::new(options, EVENT_CAPACITY)
}

/// Drives the event loop for the life of the process: subscribes once the
/// broker acks the connection and forwards each matching publish into the
/// handler channel. Returns only on a connection error; there is no retry.
pub async fn listen(
    client: &AsyncClient,
    mut eventloop: EventLoop,
    topic: &str,
    tx: mpsc::Sender<Vec<u8>>,
) -> Result<(), App> {
    loop {
        match eventloop.poll().await? {
            Event::Incoming(Packet::ConnAck(_)) => {
                info!("Connected to MQTT broker");
                client.subscribe(topic, QoS::AtMostOnce).await?;
            }
            Event::Incoming(Packet::SubAck(_)) => {
                info!("Subscribed to {topic}, MQTT listener started");
            }
            Event::Incoming(Packet::Publish(publish)) => {
                if publish.topic == topic {
                    tx.send(publish.payload.to_vec()).await?;
                } else {
                    warn!("Ignoring message on unexpected topic {}", publish.topic);
                }
            }
            Event::Incoming(packet) => debug!("MQTT packet: {packet:?}"),
            Event::Outgoing(_) => {}
        }
    }
}
