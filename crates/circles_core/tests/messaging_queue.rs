use circles_core::{Engine, EngineError, MessagingError, SessionError};

fn engine_with_accounts(accounts: &[(&str, &str, &str)]) -> Engine {
    let mut engine = Engine::new();
    for (login, password, display_name) in accounts {
        engine
            .create_account(login, password, display_name)
            .unwrap();
    }
    engine
}

#[test]
fn notes_are_fifo_and_read_exactly_once() {
    let mut engine = engine_with_accounts(&[("ana", "pw1", "Ana"), ("bob", "pw2", "Bob")]);
    let ana = engine.login("ana", "pw1").unwrap();
    let bob = engine.login("bob", "pw2").unwrap();

    engine.send_note(&ana, "bob", "first").unwrap();
    engine.send_note(&ana, "bob", "second").unwrap();

    assert_eq!(engine.read_note(&bob).unwrap(), "first");
    assert_eq!(engine.read_note(&bob).unwrap(), "second");
    assert!(matches!(
        engine.read_note(&bob).unwrap_err(),
        EngineError::Messaging(MessagingError::NoNotes)
    ));
}

#[test]
fn self_note_is_rejected() {
    let mut engine = engine_with_accounts(&[("ana", "pw1", "Ana")]);
    let ana = engine.login("ana", "pw1").unwrap();

    assert!(matches!(
        engine.send_note(&ana, "ana", "hello me").unwrap_err(),
        EngineError::Messaging(MessagingError::SelfNote)
    ));
}

#[test]
fn enemy_block_applies_only_to_the_blocked_sender() {
    let mut engine = engine_with_accounts(&[("ana", "pw1", "Ana"), ("bob", "pw2", "Bob")]);
    let ana = engine.login("ana", "pw1").unwrap();
    let bob = engine.login("bob", "pw2").unwrap();

    engine.add_enemy(&bob, "ana").unwrap();

    assert!(matches!(
        engine.send_note(&ana, "bob", "truce?").unwrap_err(),
        EngineError::Messaging(MessagingError::EnemyBlocked { .. })
    ));
    engine.send_note(&bob, "ana", "no truce").unwrap();
    assert_eq!(engine.read_note(&ana).unwrap(), "no truce");
}

#[test]
fn send_note_validates_session_and_receiver() {
    let mut engine = engine_with_accounts(&[("ana", "pw1", "Ana")]);
    let ana = engine.login("ana", "pw1").unwrap();

    assert!(matches!(
        engine.send_note("bogus", "ana", "hi").unwrap_err(),
        EngineError::Messaging(MessagingError::Session(SessionError::InvalidSession))
    ));
    assert!(matches!(
        engine.send_note(&ana, "ghost", "hi").unwrap_err(),
        EngineError::Messaging(MessagingError::UnknownAccount)
    ));
}

#[test]
fn queues_are_independent_per_receiver() {
    let mut engine = engine_with_accounts(&[
        ("ana", "pw1", "Ana"),
        ("bob", "pw2", "Bob"),
        ("carla", "pw3", "Carla"),
    ]);
    let ana = engine.login("ana", "pw1").unwrap();
    let bob = engine.login("bob", "pw2").unwrap();
    let carla = engine.login("carla", "pw3").unwrap();

    engine.send_note(&ana, "bob", "for bob").unwrap();
    engine.send_note(&ana, "carla", "for carla").unwrap();

    assert_eq!(engine.read_note(&carla).unwrap(), "for carla");
    assert_eq!(engine.read_note(&bob).unwrap(), "for bob");
}
