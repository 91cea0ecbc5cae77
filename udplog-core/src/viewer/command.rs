use crate::rules::{MatchMode, PatternSlot, RuleCategory, SLOT_COUNT, SlotColor, SlotEdit};
use std::path::PathBuf;
use std::str::FromStr;

/// An interactive command read from stdin or raised by Ctrl-C.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    /// Save to the given path, or a generated name in the logs directory.
    Save(Option<PathBuf>),
    Clear,
    Status,
    Simulate(bool),
    Rule {
        category: RuleCategory,
        edit: SlotEdit,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  pause | resume                 freeze or release the display (logging continues)
  save [path]                    copy the session logfile (or visible lines) to path
  clear                          clear the visible lines
  status                         print the status line
  simulate on|off                synthetic traffic while connected
  <cat> set <slot> <mode> [color] <pattern>
  <cat> add <mode> [color] <pattern>
  <cat> remove <slot>
  <cat> reset                    cat: filter | exclude | highlight, slot: 1-5
  quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (head, rest) = split_word(line);

        match head.to_ascii_lowercase().as_str() {
            "pause" | "p" => Ok(Self::Pause),
            "resume" | "r" => Ok(Self::Resume),
            "save" => Ok(Self::Save(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "clear" => Ok(Self::Clear),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "simulate" | "sim" => match rest.to_ascii_lowercase().as_str() {
                "on" | "" => Ok(Self::Simulate(true)),
                "off" => Ok(Self::Simulate(false)),
                other => Err(format!("expected on or off, got '{other}'")),
            },
            "" => Err("empty command".to_string()),
            other => {
                let category = other.parse::<RuleCategory>()?;
                let edit = parse_edit(category, rest)?;
                Ok(Self::Rule { category, edit })
            }
        }
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

/// Slots are numbered from 1 on the command line.
fn parse_slot(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if (1..=SLOT_COUNT).contains(&n) => Ok(n - 1),
        _ => Err(format!("slot must be 1-{SLOT_COUNT}, got '{s}'")),
    }
}

fn parse_edit(category: RuleCategory, args: &str) -> Result<SlotEdit, String> {
    let (verb, rest) = split_word(args);

    match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (slot, rest) = split_word(rest);
            let index = parse_slot(slot)?;
            let slot = parse_slot_body(category, rest)?;
            Ok(SlotEdit::Set { index, slot })
        }
        "add" => Ok(SlotEdit::Add {
            slot: parse_slot_body(category, rest)?,
        }),
        "remove" | "rm" => Ok(SlotEdit::Remove {
            index: parse_slot(rest.trim())?,
        }),
        "reset" => Ok(SlotEdit::Reset),
        other => Err(format!("unknown {category} action '{other}'")),
    }
}

/// `<mode> [color] <pattern>`; a color is only read for highlights.
fn parse_slot_body(category: RuleCategory, args: &str) -> Result<PatternSlot, String> {
    let (mode, rest) = split_word(args);
    let mode = mode.parse::<MatchMode>().map_err(|e| e.to_string())?;

    let (color, pattern) = if category == RuleCategory::Highlight {
        let (color, pattern) = split_word(rest);
        (color.parse::<SlotColor>().map_err(|e| e.to_string())?, pattern)
    } else {
        (SlotColor::None, rest)
    };

    if pattern.trim().is_empty() {
        return Err("pattern must not be empty".to_string());
    }

    Ok(PatternSlot::new(pattern, mode, color))
}
