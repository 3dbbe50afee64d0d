//! List the voices the speech host reports
//!
//! Run with: cargo run --example list_voices

use speakpad::speech::create_host;

fn main() {
    env_logger::init();

    println!("Creating speech host...");

    let mut host = match create_host() {
        Ok(h) => {
            println!("✓ Speech host created");
            h
        }
        Err(e) => {
            eprintln!("✗ Failed to create speech host: {}", e);
            std::process::exit(1);
        }
    };

    match host.voices() {
        Ok(voices) if voices.is_empty() => {
            println!("No voices reported (the engine may still be initializing)");
        }
        Ok(voices) => {
            println!("{} voices:", voices.len());
            for voice in &voices {
                println!("  {}", voice.label());
            }
        }
        Err(e) => {
            eprintln!("✗ Voice enumeration failed: {}", e);
            std::process::exit(1);
        }
    }
}
