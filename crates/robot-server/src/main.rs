//! Robot server binary: the main entry point for the robot bridge.
//!
//! Wires the pin driver, speaker and shared state together, starts the
//! message-bus and voice-recognition tasks, and serves the dashboard until
//! SIGTERM/SIGINT. On the way out every pin is driven low and released.

use robot_core::{Dispatcher, Lexicon, OutputSink, RobotStore};
use robot_gpio::PinDriver;
use robot_server::background::{run_voice_loop, VoiceLoopSettings};
use robot_server::config::{self, LoggingConfig};
use robot_server::{app, mqtt, AppState, ServerError};
use robot_voice::{Microphone, SilentSpeaker, Speaker, SpeechRecognizer, SttService, TtsService};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// How long shutdown waits for queued announcements to finish.
const SPEECH_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("ROBOT_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().unwrap_or("config.toml");

    let config = config::load_config(Some(selected_config_path))?;
    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path,
        "resolved startup configuration path"
    );

    let language = config.voice.language;
    let lexicon = Lexicon::new(language);

    let pins: Arc<dyn PinDriver> =
        Arc::from(robot_gpio::select_driver(config.gpio.enabled, &config.gpio.pins));

    let speaker: Arc<dyn Speaker> = if config.voice.speech_enabled {
        Arc::new(TtsService::new(
            &config.voice.synth_binary,
            &config.voice.player_binary,
        ))
    } else {
        tracing::info!("speech output disabled by configuration");
        Arc::new(SilentSpeaker)
    };

    let (sink, speech_worker) = OutputSink::start(speaker, pins, language);
    let store = RobotStore::new(lexicon.waiting());
    let dispatcher = Dispatcher::new(store, sink.clone(), lexicon);

    let mut tasks = Vec::new();

    if config.mqtt.enabled {
        tasks.push(tokio::spawn(mqtt::run_mqtt_listener(
            dispatcher.clone(),
            config.mqtt.clone(),
        )));
    } else {
        tracing::info!("mqtt disabled by configuration");
    }

    if config.voice.recognition_enabled {
        let recognizer = SpeechRecognizer::new(
            Microphone::new(&config.voice.recorder_binary),
            SttService::new(&config.voice.stt_model, &config.voice.stt_binary),
            language,
            Duration::from_secs(config.voice.phrase_limit_secs.max(1)),
        );
        tasks.push(tokio::spawn(run_voice_loop(
            dispatcher.clone(),
            Arc::new(recognizer),
            VoiceLoopSettings::from_config(&config.voice),
        )));
    } else {
        tracing::info!("voice recognition disabled by configuration");
    }

    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(
        gpio_hardware = sink.has_hardware(),
        %language,
        mqtt = config.mqtt.enabled,
        voice_recognition = config.voice.recognition_enabled,
        "robot server ready"
    );
    tracing::info!(%addr, "dashboard available at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let served = axum::serve(listener, app(AppState { dispatcher }))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve);

    for task in &tasks {
        task.abort();
    }

    if tokio::time::timeout(SPEECH_DRAIN_TIMEOUT, sink.flush())
        .await
        .is_err()
    {
        tracing::warn!("speech queue did not drain before shutdown");
    }
    speech_worker.abort();
    sink.release_pins();

    tracing::info!("robot server shut down");
    served
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
