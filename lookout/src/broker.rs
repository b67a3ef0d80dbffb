//! MQTT connection for the ingestion pipeline.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use slog::{error, info, Logger};

use primitives::Config;

use crate::ingestion::{DetectionStore, Ingestor};

pub fn connect(config: &Config) -> (AsyncClient, EventLoop) {
    let mut options = MqttOptions::new(
        config.broker_client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(5));

    AsyncClient::new(options, 10)
}

/// Drives the broker event loop forever.
///
/// The subscription is (re-)established on every `ConnAck`, so it
/// survives reconnects. Connection errors back off for
/// `retry_interval` before polling again.
pub async fn listen<S: DetectionStore>(
    client: AsyncClient,
    mut eventloop: EventLoop,
    ingestor: Ingestor<S>,
    topic: String,
    retry_interval: Duration,
    logger: Logger,
) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!(&logger, "Connected to broker"; "topic" => &topic);

                if let Err(error) = client.subscribe(&topic, QoS::AtMostOnce).await {
                    error!(&logger, "Failed to subscribe"; "topic" => &topic, "error" => %error);
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                ingestor.process(&publish.payload).await;
            }
            Ok(_) => {}
            Err(error) => {
                error!(&logger, "Broker connection error"; "error" => %error);
                tokio::time::sleep(retry_interval).await;
            }
        }
    }
}
