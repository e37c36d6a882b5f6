//! Command handler tests

mod common;

use common::{FakeSystem, TestOutput};
use libcm_console::config::{markers, DebugStore, MemoryStore};
use libcm_console::console::{dispatch, find_command, CommandLine, ConsoleError, Context, COMMANDS, TESTS};

fn run(line: &[u8], store: &mut MemoryStore) -> (Result<(), ConsoleError>, TestOutput) {
    let mut out = TestOutput::new();
    let mut system = FakeSystem::new();
    let mut ctx = Context {
        out: &mut out,
        store,
        system: &mut system,
    };
    let result = dispatch(&CommandLine::new(line), &mut ctx);
    (result, out)
}

#[test]
fn test_command_registry_has_all_commands() {
    let expected = ["HELP", "BOOT", "TEST", "DEBUG", "KEYMS"];

    for name in expected {
        assert!(
            COMMANDS.iter().any(|c| c.keyword == name),
            "Command '{}' should be in registry",
            name
        );
    }
    assert_eq!(TESTS.len(), 5);
}

#[test]
fn test_missing_dollar_is_invalid() {
    let mut store = MemoryStore::new();
    let (result, out) = run(b"HELP", &mut store);

    assert_eq!(result, Err(ConsoleError::InvalidEntry));
    assert!(out.text.is_empty());
}

#[test]
fn test_unknown_command_is_invalid_without_mutation() {
    let mut store = MemoryStore::new();

    assert_eq!(run(b"$BOGUS", &mut store).0, Err(ConsoleError::InvalidEntry));
    assert_eq!(run(b"NOTACOMMAND", &mut store).0, Err(ConsoleError::InvalidEntry));
    assert_eq!(run(b"", &mut store).0, Err(ConsoleError::InvalidEntry));
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_find_command_first_match() {
    let cmd = find_command(&CommandLine::new(b"$KEYMS=5")).unwrap();
    assert_eq!(cmd.keyword, "KEYMS");
    assert!(find_command(&CommandLine::new(b"$KEY")).is_none());
}

#[test]
fn test_help_lists_every_command() {
    let mut store = MemoryStore::new();
    let (result, out) = run(b"$HELP", &mut store);

    assert!(result.is_ok());
    assert!(out.text.starts_with("\n\nLiBCM supports the following commands:"));
    for c in COMMANDS {
        assert!(out.contains(c.usage));
    }
}

#[test]
fn test_test_without_selector() {
    let mut store = MemoryStore::new();
    let (result, out) = run(b"$TEST", &mut store);

    assert_eq!(result, Err(ConsoleError::TestNotSpecified));
    assert!(out.text.is_empty());
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_test_unknown_selector_does_nothing() {
    let mut store = MemoryStore::new();
    let (result, out) = run(b"$TEST9", &mut store);

    assert_eq!(result, Ok(()));
    assert!(out.text.is_empty());
    assert_eq!(store, MemoryStore::new());
}

#[test]
fn test_numbered_tests_set_markers() {
    let mut store = MemoryStore::new();

    let (_, out) = run(b"$TEST1", &mut store);
    assert_eq!(out.text, "\nRunning TEST1");
    assert_eq!(store.regen_limited(), markers::REGEN_LIMITED);

    run(b"$TEST2", &mut store);
    assert_eq!(store.regen_limited(), markers::REGEN_NEVER_LIMITED);

    run(b"$TEST3", &mut store);
    assert_eq!(store.assist_limited(), markers::ASSIST_LIMITED);

    run(b"$TEST4", &mut store);
    assert_eq!(store.assist_limited(), markers::ASSIST_NEVER_LIMITED);

    run(b"$TEST5", &mut store);
    assert_eq!(store.assist_limited(), 0xFF);
    assert_eq!(store.regen_limited(), 0x00);
}

#[test]
fn test_debug_reports_markers() {
    let mut store = MemoryStore::new();
    store.set_assist_limited(markers::ASSIST_LIMITED);

    let (result, out) = run(b"$DEBUG", &mut store);

    assert!(result.is_ok());
    assert!(out.contains("limited assist since last cleared?: YES"));
    assert!(out.contains("limited regen since last cleared?: NO"));
    assert!(out.contains("LOOP_RATE_MILLISECONDS exceeded since last cleared?: NO"));
}

#[test]
fn test_debug_clear_restores_defaults() {
    let mut store = MemoryStore::new();
    store.set_regen_limited(markers::REGEN_LIMITED);
    store.set_loop_rate_exceeded(markers::LOOP_RATE_EXCEEDED);

    let (result, out) = run(b"$DEBUG=CLR", &mut store);

    assert!(result.is_ok());
    assert_eq!(out.text, "\nRestoring default DEBUG values");
    assert_eq!(store.regen_limited(), markers::REGEN_NEVER_LIMITED);
    assert_eq!(store.loop_rate_exceeded(), markers::LOOP_RATE_NEVER_EXCEEDED);
}

#[test]
fn test_debug_other_suffix_is_silent() {
    let mut store = MemoryStore::new();
    let (result, out) = run(b"$DEBUG=XYZ", &mut store);

    assert_eq!(result, Ok(()));
    assert!(out.text.is_empty());
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_keyms_set_and_show() {
    let mut store = MemoryStore::new();

    let (result, out) = run(b"$KEYMS=007", &mut store);
    assert!(result.is_ok());
    assert_eq!(out.text, "\nnewKeyOnDelay_ms is 7");
    assert_eq!(store.key_on_delay_ms(), 7);

    run(b"$KEYMS=25", &mut store);
    assert_eq!(store.key_on_delay_ms(), 25);

    let (_, out) = run(b"$KEYMS", &mut store);
    assert!(out.text.ends_with("(ms): 25"));
}

#[test]
fn test_keyms_empty_field_is_error_not_zero() {
    let mut store = MemoryStore::new();
    store.set_key_on_delay_ms(40);

    let (result, out) = run(b"$KEYMS=", &mut store);

    assert_eq!(result, Err(ConsoleError::InvalidUint8));
    assert!(out.text.is_empty());
    assert_eq!(store.key_on_delay_ms(), 40);
}

#[test]
fn test_keyms_large_value_saturates() {
    let mut store = MemoryStore::new();

    run(b"$KEYMS=300", &mut store);

    assert_eq!(store.key_on_delay_ms(), 255);
}

#[test]
#[should_panic(expected = "restart requested after [50] ms delay")]
fn test_boot_delays_then_restarts() {
    let mut store = MemoryStore::new();
    let _ = run(b"$BOOT", &mut store);
}
