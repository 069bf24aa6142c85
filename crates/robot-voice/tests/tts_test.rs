#![cfg(unix)]

mod common;

use common::write_script;
use robot_types::Language;
use robot_voice::{SilentSpeaker, Speaker, TtsService, VoiceError};

#[tokio::test]
async fn test_synthesize_passes_language_and_text() {
    let temp_dir = tempfile::tempdir().unwrap();
    // Echo the arguments back so the test can inspect them.
    let synth = write_script(temp_dir.path(), "mock_synth.sh", "echo \"$@\"");

    let service = TtsService::new(&synth, "aplay");
    let audio = service
        .synthesize("Color red activated", Language::English)
        .await
        .expect("synthesis should succeed");

    let args = String::from_utf8(audio).unwrap();
    assert!(args.contains("-v en"), "unexpected args: {}", args);
    assert!(args.contains("--stdout"));
    assert!(args.contains("Color red activated"));
}

#[tokio::test]
async fn test_synthesize_reports_failing_binary() {
    let temp_dir = tempfile::tempdir().unwrap();
    let synth = write_script(temp_dir.path(), "broken_synth.sh", "echo boom >&2\nexit 3");

    let service = TtsService::new(&synth, "aplay");
    match service.synthesize("hola", Language::Spanish).await {
        Err(VoiceError::Tts(msg)) => assert!(msg.contains("boom"), "got: {}", msg),
        other => panic!("Expected Tts error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_missing_binary() {
    let service = TtsService::new("/nonexistent/espeak-ng", "aplay");
    match service.synthesize("hola", Language::Spanish).await {
        Err(VoiceError::Tts(msg)) => assert!(msg.contains("Failed to spawn")),
        other => panic!("Expected spawn failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_rejects_empty_and_oversized_text() {
    let service = TtsService::new("espeak-ng", "aplay");

    assert!(matches!(
        service.synthesize("   ", Language::Spanish).await,
        Err(VoiceError::Tts(_))
    ));

    let long = "a".repeat(5 * 1024);
    match service.synthesize(&long, Language::Spanish).await {
        Err(VoiceError::Tts(msg)) => assert!(msg.contains("exceeds maximum size")),
        other => panic!("Expected size error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_speak_plays_synthesized_audio() {
    let temp_dir = tempfile::tempdir().unwrap();
    let played = temp_dir.path().join("played.wav");

    let synth = write_script(temp_dir.path(), "mock_synth.sh", "printf 'RIFF_MOCK_WAV'");
    let player = write_script(
        temp_dir.path(),
        "mock_player.sh",
        &format!("cat > '{}'", played.display()),
    );

    let service = TtsService::new(&synth, &player);
    service
        .speak("led red encendido", Language::Spanish)
        .await
        .expect("speak should succeed");

    let bytes = std::fs::read(&played).expect("player should have written its input");
    assert_eq!(bytes, b"RIFF_MOCK_WAV");
}

#[tokio::test]
async fn test_player_failure_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let synth = write_script(temp_dir.path(), "mock_synth.sh", "printf 'RIFF'");
    let player = write_script(temp_dir.path(), "bad_player.sh", "cat > /dev/null\nexit 1");

    let service = TtsService::new(&synth, &player);
    assert!(matches!(
        service.speak("hola", Language::Spanish).await,
        Err(VoiceError::Playback(_))
    ));
}

#[tokio::test]
async fn test_silent_speaker_always_succeeds() {
    assert!(SilentSpeaker.speak("anything", Language::English).await.is_ok());
}
