//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that drives one scripted engine scenario.
//! - Keep output deterministic for quick local sanity checks.

use circles_core::Engine;

fn main() {
    println!("circles_core version={}", circles_core::core_version());

    let mut engine = Engine::new();
    if let Err(err) = run_scenario(&mut engine) {
        eprintln!("scenario failed: {err}");
        std::process::exit(1);
    }
}

fn run_scenario(engine: &mut Engine) -> Result<(), circles_core::EngineError> {
    engine.create_account("jose", "sweet", "José")?;
    engine.create_account("maria", "safe", "Maria")?;

    let jose = engine.login("jose", "sweet")?;
    let maria = engine.login("maria", "safe")?;

    engine.request_friend(&jose, "maria")?;
    engine.request_friend(&maria, "jose")?;
    println!(
        "friends jose/maria={}",
        engine.are_friends("jose", "maria")?
    );

    engine.send_note(&jose, "maria", "welcome aboard")?;
    println!("maria note={}", engine.read_note(&maria)?);

    engine.create_community(&jose, "rustaceans", "crab talk")?;
    engine.join_community(&maria, "rustaceans")?;
    engine.send_broadcast(&jose, "rustaceans", "hi")?;
    println!("maria broadcast={}", engine.read_broadcast(&maria)?);

    Ok(())
}
