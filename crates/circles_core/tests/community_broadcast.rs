use circles_core::{CommunityError, Engine, EngineError, MessagingError};

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
fn creation_auto_joins_the_owner() {
    let mut engine = engine_with_accounts(&[("jose", "pw", "José")]);
    let jose = engine.login("jose", "pw").unwrap();

    engine
        .create_community(&jose, "rustaceans", "crab talk")
        .unwrap();

    assert_eq!(
        engine.community_description("rustaceans").unwrap(),
        "crab talk"
    );
    assert_eq!(engine.community_owner("rustaceans").unwrap(), "jose");
    assert_eq!(
        engine.community_members("rustaceans").unwrap(),
        vec!["jose".to_string()]
    );
    assert_eq!(
        engine.communities("jose").unwrap(),
        vec!["rustaceans".to_string()]
    );
}

#[test]
fn duplicate_name_and_unknown_lookups_fail() {
    let mut engine = engine_with_accounts(&[("jose", "pw", "José")]);
    let jose = engine.login("jose", "pw").unwrap();
    engine.create_community(&jose, "c1", "first").unwrap();

    assert!(matches!(
        engine.create_community(&jose, "c1", "again").unwrap_err(),
        EngineError::Community(CommunityError::DuplicateCommunity)
    ));
    assert!(matches!(
        engine.community_description("ghost").unwrap_err(),
        EngineError::Community(CommunityError::UnknownCommunity)
    ));
    assert!(matches!(
        engine.join_community(&jose, "ghost").unwrap_err(),
        EngineError::Community(CommunityError::UnknownCommunity)
    ));
}

#[test]
fn join_appends_in_order_and_rejects_rejoin() {
    let mut engine = engine_with_accounts(&[
        ("jose", "pw1", "José"),
        ("maria", "pw2", "Maria"),
    ]);
    let jose = engine.login("jose", "pw1").unwrap();
    let maria = engine.login("maria", "pw2").unwrap();
    engine.create_community(&jose, "c1", "first").unwrap();

    engine.join_community(&maria, "c1").unwrap();
    assert_eq!(
        engine.community_members("c1").unwrap(),
        vec!["jose".to_string(), "maria".to_string()]
    );
    assert!(matches!(
        engine.join_community(&maria, "c1").unwrap_err(),
        EngineError::Community(CommunityError::AlreadyMember)
    ));
}

#[test]
fn broadcast_reaches_every_member_once() {
    let mut engine = engine_with_accounts(&[
        ("jose", "pw1", "José"),
        ("maria", "pw2", "Maria"),
    ]);
    let jose = engine.login("jose", "pw1").unwrap();
    let maria = engine.login("maria", "pw2").unwrap();
    engine.create_community(&jose, "c1", "first").unwrap();
    engine.join_community(&maria, "c1").unwrap();

    engine.send_broadcast(&jose, "c1", "hi").unwrap();

    assert_eq!(engine.read_broadcast(&maria).unwrap(), "hi");
    assert!(matches!(
        engine.read_broadcast(&maria).unwrap_err(),
        EngineError::Messaging(MessagingError::NoMessages)
    ));
    // The sender is a member too and consumes an independent cursor.
    assert_eq!(engine.read_broadcast(&jose).unwrap(), "hi");
}

#[test]
fn late_joiner_does_not_receive_earlier_broadcasts() {
    let mut engine = engine_with_accounts(&[
        ("jose", "pw1", "José"),
        ("maria", "pw2", "Maria"),
    ]);
    let jose = engine.login("jose", "pw1").unwrap();
    let maria = engine.login("maria", "pw2").unwrap();
    engine.create_community(&jose, "c1", "first").unwrap();

    engine.send_broadcast(&jose, "c1", "before the join").unwrap();
    engine.join_community(&maria, "c1").unwrap();
    engine.send_broadcast(&jose, "c1", "after the join").unwrap();

    assert_eq!(engine.read_broadcast(&maria).unwrap(), "after the join");
    assert!(engine.read_broadcast(&maria).is_err());
}

#[test]
fn sender_needs_a_session_but_not_membership() {
    let mut engine = engine_with_accounts(&[
        ("jose", "pw1", "José"),
        ("ana", "pw2", "Ana"),
    ]);
    let jose = engine.login("jose", "pw1").unwrap();
    let ana = engine.login("ana", "pw2").unwrap();
    engine.create_community(&jose, "c1", "first").unwrap();

    engine.send_broadcast(&ana, "c1", "outsider hello").unwrap();
    assert_eq!(engine.read_broadcast(&jose).unwrap(), "outsider hello");
    assert!(matches!(
        engine.send_broadcast(&ana, "ghost", "anyone?").unwrap_err(),
        EngineError::Messaging(MessagingError::UnknownCommunity)
    ));
}
