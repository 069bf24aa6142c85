//! Message-bus adapter.
//!
//! Subscribes to the control topic and feeds every publish to the
//! dispatcher, one at a time, in arrival order. The subscription is renewed
//! on every `ConnAck`, so it survives broker restarts.

use crate::config::MqttConfig;
use robot_core::Dispatcher;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, Publish, QoS};
use std::time::Duration;

/// Requests buffered between the client handle and the event loop.
const CLIENT_CAPACITY: usize = 10;

/// Shortest keep-alive the client accepts.
const MIN_KEEP_ALIVE_SECS: u64 = 5;

/// Builds client options from configuration.
pub fn mqtt_options(config: &MqttConfig) -> MqttOptions {
    let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(
        config.keep_alive_secs.max(MIN_KEEP_ALIVE_SECS),
    ));
    options.set_clean_session(true);
    options
}

/// Runs the subscriber until the task is aborted.
///
/// Connection errors never end the loop: they are logged and polling
/// resumes after `reconnect_delay_secs`, which makes the client reconnect.
pub async fn run_mqtt_listener(dispatcher: Dispatcher, config: MqttConfig) {
    let (client, mut eventloop) = AsyncClient::new(mqtt_options(&config), CLIENT_CAPACITY);
    let reconnect_delay = Duration::from_secs(config.reconnect_delay_secs.max(1));

    tracing::info!(
        host = %config.host,
        port = config.port,
        topic = %config.topic,
        "starting mqtt listener"
    );

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!(host = %config.host, port = config.port, "connected to mqtt broker");
                if let Err(e) = client.try_subscribe(config.topic.as_str(), QoS::AtMostOnce) {
                    tracing::error!(topic = %config.topic, "failed to subscribe: {}", e);
                }
            }
            Ok(Event::Incoming(Packet::SubAck(_))) => {
                tracing::debug!(topic = %config.topic, "subscription acknowledged");
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                handle_publish(&dispatcher, &publish);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    retry_in_secs = reconnect_delay.as_secs(),
                    "mqtt connection error: {}",
                    e
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

/// Dispatches one publish. Payloads are decoded lossily, so non-UTF-8 bytes
/// never drop a message.
pub fn handle_publish(dispatcher: &Dispatcher, publish: &Publish) {
    tracing::info!(topic = %publish.topic, bytes = publish.payload.len(), "mqtt message received");
    let snapshot = dispatcher.dispatch_mqtt(&publish.payload);
    tracing::debug!(message = %snapshot.message, color = %snapshot.color, "mqtt message applied");
}
