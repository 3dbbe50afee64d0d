//! Integration tests for the speech host layer
//!
//! These tests verify that the native host can be created where a
//! platform engine exists and degrades gracefully where it doesn't,
//! and that the null host honors the full trait contract.

use speakpad::speech::{backends::null::NullHost, create_host, SpeechHost, Utterance, VoiceInfo};

#[test]
fn test_create_native_host() {
    // Test that we can create the platform speech host
    let result = create_host();

    match result {
        Ok(host) => {
            println!("✓ Successfully created native speech host");
            drop(host);
        }
        Err(e) => {
            // This may fail in CI or environments without speech-dispatcher
            println!("⚠ Host creation failed (may be expected): {}", e);
            // Don't panic - this is acceptable in headless environments
        }
    }
}

#[test]
fn test_native_host_queries() {
    let result = create_host();

    if let Ok(mut host) = result {
        // Busy query reports a boolean (false on platforms that can't tell)
        assert!(host.is_speaking().is_ok(), "Busy query should not error");

        // Enumeration may be empty but should not error
        let voices = host.voices();
        assert!(voices.is_ok(), "Voice enumeration should not error");
        for voice in voices.unwrap() {
            assert!(!voice.name.is_empty(), "Voice names should be non-empty");
            println!("  {}", voice.label());
        }

        println!("✓ Host query tests passed");
    } else {
        println!("⚠ Skipping query tests (speech engine not available)");
    }
}

#[test]
fn test_native_host_dispatch() {
    let result = create_host();

    if let Ok(mut host) = result {
        // Dispatch should not error, even if no audio actually plays
        // (which may happen in CI or headless environments)
        let request = Utterance::new("Integration test");
        assert!(
            host.speak(&request).is_ok(),
            "Should dispatch an utterance without error"
        );

        // Out-of-range parameters are scaled onto the engine range
        let mut request = Utterance::new("Clamped");
        request.rate = 99.0;
        request.pitch = 0.0;
        assert!(
            host.speak(&request).is_ok(),
            "Should clamp extreme parameters"
        );

        println!("✓ Dispatch tests passed");
    } else {
        println!("⚠ Skipping dispatch tests (speech engine not available)");
    }
}

#[test]
fn test_unknown_voice_keeps_current_voice() {
    let result = create_host();

    if let Ok(mut host) = result {
        // A request naming a voice the engine doesn't have must still speak
        let mut request = Utterance::new("Unknown voice test");
        request.voice = Some(VoiceInfo::new("No Such Voice", "xx-XX"));
        assert!(
            host.speak(&request).is_ok(),
            "Unknown voice should not fail the dispatch"
        );

        println!("✓ Unknown voice test passed");
    } else {
        println!("⚠ Skipping unknown voice test (speech engine not available)");
    }
}

#[test]
fn test_null_host_honors_the_contract() {
    let mut host: Box<dyn SpeechHost> = Box::new(NullHost::new());

    assert!(!host.is_speaking().unwrap());
    assert!(host.voices().unwrap().is_empty());
    assert!(!host.notifies_voice_changes());
    assert!(host.try_recv_event().is_none());

    let mut request = Utterance::new("hello");
    request.voice = Some(VoiceInfo::new("Alice", "en-US"));
    assert!(host.speak(&request).is_ok());
}
