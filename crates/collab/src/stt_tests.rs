// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn noop_stt_fails() {
    let stt = NoOpSpeechToText;
    let err = stt.transcribe(Path::new("a.wav"), "en").await.unwrap_err();
    assert!(matches!(err, CollaboratorError::NotConfigured(_)));
}

#[tokio::test]
async fn fake_stt_returns_fixed_transcript_and_records_calls() {
    let stt = FakeSpeechToText::new("hello world");
    let text = stt.transcribe(Path::new("a.wav"), "en").await.unwrap();
    assert_eq!(text, "hello world");
    assert_eq!(
        stt.calls(),
        vec![TranscribeCall {
            audio_path: PathBuf::from("a.wav"),
            language: "en".to_string(),
        }]
    );
}
