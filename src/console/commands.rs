//! Command handlers
//!
//! Valid lines start with '$' followed by a keyword at offset 1. Keywords
//! are compared literally in table order, first match wins. What follows
//! the keyword is left to the handler.

use core::fmt::Write;

use super::parser::{parse_u8_at, CommandLine};
use super::ConsoleError;
use crate::config::{markers, DebugStore, REBOOT_FLUSH_DELAY_MS};
use crate::hal::System;

/// Everything a handler may touch.
pub struct Context<'a> {
    pub out: &'a mut dyn Write,
    pub store: &'a mut dyn DebugStore,
    pub system: &'a mut dyn System,
}

/// Command handler signature
pub type Handler = fn(&CommandLine<'_>, &mut Context<'_>) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    /// Literal matched at offset 1, uppercase.
    pub keyword: &'static str,
    /// Syntax shown by `$HELP`.
    pub usage: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        keyword: "HELP",
        usage: "$HELP",
        brief: "display this text.",
        handler: cmd_help,
    },
    CommandDescriptor {
        keyword: "BOOT",
        usage: "$BOOT",
        brief: "restart LiBCM.",
        handler: cmd_boot,
    },
    CommandDescriptor {
        keyword: "TEST",
        usage: "$TEST_",
        brief: "run test code.  '$TEST1'/2/3/4/5",
        handler: cmd_test,
    },
    CommandDescriptor {
        keyword: "DEBUG",
        usage: "$DEBUG",
        brief: "display debug info stored in EEPROM.  '$DEBUG=CLR' to restore defaults.",
        handler: cmd_debug,
    },
    CommandDescriptor {
        keyword: "KEYMS",
        usage: "$KEYms",
        brief: "display LiBCM keyON delay in ms.  '$KEYms=___' to set (0 to 255 ms)",
        handler: cmd_keyms,
    },
];

/// Numbered test action
pub struct TestDescriptor {
    pub selector: u8,
    pub run: fn(&mut dyn DebugStore),
}

/// Actions behind `$TEST1`..`$TEST5`
pub static TESTS: &[TestDescriptor] = &[
    TestDescriptor { selector: b'1', run: test_regen_limited },
    TestDescriptor { selector: b'2', run: test_regen_never_limited },
    TestDescriptor { selector: b'3', run: test_assist_limited },
    TestDescriptor { selector: b'4', run: test_assist_never_limited },
    TestDescriptor { selector: b'5', run: test_load_garbage },
];

fn test_regen_limited(store: &mut dyn DebugStore) {
    store.set_regen_limited(markers::REGEN_LIMITED);
}

fn test_regen_never_limited(store: &mut dyn DebugStore) {
    store.set_regen_limited(markers::REGEN_NEVER_LIMITED);
}

fn test_assist_limited(store: &mut dyn DebugStore) {
    store.set_assist_limited(markers::ASSIST_LIMITED);
}

fn test_assist_never_limited(store: &mut dyn DebugStore) {
    store.set_assist_limited(markers::ASSIST_NEVER_LIMITED);
}

/// Load invalid markers; `verify_data_valid` repairs them at next boot.
fn test_load_garbage(store: &mut dyn DebugStore) {
    store.set_assist_limited(0xFF);
    store.set_regen_limited(0x00);
}

/// Find the command a line addresses.
pub fn find_command(line: &CommandLine<'_>) -> Option<&'static CommandDescriptor> {
    if line.at(0) != b'$' {
        return None;
    }

    COMMANDS
        .iter()
        .find(|c| line.matches_at(1, c.keyword.as_bytes()))
}

/// Execute a completed line
pub fn dispatch(line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    let command = find_command(line).ok_or(ConsoleError::InvalidEntry)?;

    (command.handler)(line, ctx)
}

// --- Command Implementations ---

fn cmd_help(_line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    let _ = write!(ctx.out, "\n\nLiBCM supports the following commands:");
    for c in COMMANDS {
        let _ = write!(ctx.out, "\n -'{}' {}", c.usage, c.brief);
    }
    let _ = ctx.out.write_str("\n");
    Ok(())
}

fn cmd_boot(_line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    let _ = write!(ctx.out, "\nRebooting LiBCM");

    // give serial buffer time to send
    ctx.system.delay_ms(REBOOT_FLUSH_DELAY_MS);
    ctx.system.restart()
}

fn cmd_test(line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    let selector = line.at(5);
    if line.ends_at(5) {
        return Err(ConsoleError::TestNotSpecified);
    }

    // Unknown selectors do nothing
    if let Some(test) = TESTS.iter().find(|t| t.selector == selector) {
        let _ = write!(ctx.out, "\nRunning TEST{}", selector as char);
        (test.run)(&mut *ctx.store);
    }

    Ok(())
}

fn cmd_debug(line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    if line.matches_at(6, b"=CLR") {
        let _ = write!(ctx.out, "\nRestoring default DEBUG values");
        ctx.store.reset_debug_values();
    } else if line.ends_at(6) {
        print_debug(ctx);
    }

    Ok(())
}

fn print_debug(ctx: &mut Context<'_>) {
    let store = &*ctx.store;
    let facts = [
        (
            "Has LiBCM limited assist since last cleared?",
            store.assist_limited() == markers::ASSIST_LIMITED,
        ),
        (
            "Has LiBCM limited regen since last cleared?",
            store.regen_limited() == markers::REGEN_LIMITED,
        ),
        (
            "LOOP_RATE_MILLISECONDS exceeded since last cleared?",
            store.loop_rate_exceeded() == markers::LOOP_RATE_EXCEEDED,
        ),
    ];

    let _ = write!(
        ctx.out,
        "\nDebug data persists in EEPROM until cleared ('$DEBUG=CLR' to clear)"
    );
    for (question, yes) in facts {
        let _ = write!(ctx.out, "\n -{}: {}", question, if yes { "YES" } else { "NO" });
    }
}

fn cmd_keyms(line: &CommandLine<'_>, ctx: &mut Context<'_>) -> Result<(), ConsoleError> {
    if line.at(6) == b'=' {
        let delay_ms = parse_u8_at(line, 7)?;
        let _ = write!(ctx.out, "\nnewKeyOnDelay_ms is {}", delay_ms);
        ctx.store.set_key_on_delay_ms(delay_ms);
    } else if line.ends_at(6) {
        let _ = write!(
            ctx.out,
            "\n Additional delay before LiBCM responds to keyON event (ms): {}",
            ctx.store.key_on_delay_ms()
        );
    }

    Ok(())
}
