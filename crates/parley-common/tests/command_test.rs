use parley_common::{Builtin, CanonicalCommand, CommandResult};

#[test]
fn test_parse_splits_and_folds_verb() {
    let cmd = CanonicalCommand::parse("  MKDIR  Foo   bar ").unwrap();
    assert_eq!(cmd.verb, "mkdir");
    assert_eq!(cmd.args, vec!["Foo".to_string(), "bar".to_string()]);
    assert_eq!(cmd.builtin(), Some(Builtin::MakeDir));
}

#[test]
fn test_parse_blank_is_none() {
    assert!(CanonicalCommand::parse("").is_none());
    assert!(CanonicalCommand::parse(" \t ").is_none());
}

#[test]
fn test_unknown_verb_has_no_builtin() {
    let cmd = CanonicalCommand::parse("git status").unwrap();
    assert_eq!(cmd.builtin(), None);
}

#[test]
fn test_exit_and_quit_share_variant() {
    assert_eq!(Builtin::from_verb("exit"), Some(Builtin::Exit));
    assert_eq!(Builtin::from_verb("quit"), Some(Builtin::Exit));
}

#[test]
fn test_every_builtin_round_trips_its_name() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::from_verb(builtin.name()), Some(builtin));
    }
}

#[test]
fn test_exit_signal_is_not_empty_output() {
    let empty = CommandResult::empty();
    assert!(!empty.is_exit());
    assert_eq!(empty.output(), Some(""));

    let exit = CommandResult::Exit;
    assert!(exit.is_exit());
    assert_eq!(exit.output(), None);
    assert_eq!(exit.to_string(), "exit");
}
