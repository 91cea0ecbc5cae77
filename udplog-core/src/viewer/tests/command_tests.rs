use crate::rules::{MatchMode, PatternSlot, RuleCategory, SlotColor, SlotEdit};
use crate::viewer::Command;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn simple_commands() {
    assert_eq!("pause".parse::<Command>().unwrap(), Command::Pause);
    assert_eq!(" RESUME ".parse::<Command>().unwrap(), Command::Resume);
    assert_eq!("clear".parse::<Command>().unwrap(), Command::Clear);
    assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
    assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    assert_eq!("sim off".parse::<Command>().unwrap(), Command::Simulate(false));
}

#[test]
fn save_keeps_path_with_spaces() {
    // Act
    let cmd = "save /tmp/my logs/out.txt".parse::<Command>().unwrap();

    // Assert
    assert_eq!(cmd, Command::Save(Some(PathBuf::from("/tmp/my logs/out.txt"))));
    assert_eq!("save".parse::<Command>().unwrap(), Command::Save(None));
}

#[test]
fn filter_set_uses_one_based_slots() {
    // Act
    let cmd = "filter set 2 substring OVEN;T11".parse::<Command>().unwrap();

    // Assert
    assert_eq!(
        cmd,
        Command::Rule {
            category: RuleCategory::Filter,
            edit: SlotEdit::Set {
                index: 1,
                slot: PatternSlot::substring("OVEN;T11"),
            },
        }
    );
}

#[test]
fn highlight_reads_color_before_pattern() {
    // Act
    let cmd = "highlight add regex red UART\\s+timeout".parse::<Command>().unwrap();

    // Assert
    assert_eq!(
        cmd,
        Command::Rule {
            category: RuleCategory::Highlight,
            edit: SlotEdit::Add {
                slot: PatternSlot::new("UART\\s+timeout", MatchMode::Regex, SlotColor::Red),
            },
        }
    );
}

#[test]
fn pattern_may_contain_spaces() {
    // Act
    let cmd = "exclude add substring [UI/DEBUG] screen_main".parse::<Command>().unwrap();

    // Assert
    let Command::Rule { edit: SlotEdit::Add { slot }, .. } = cmd else {
        panic!("expected add");
    };
    assert_eq!(slot.pattern, "[UI/DEBUG] screen_main");
}

#[test]
fn remove_and_reset() {
    assert_eq!(
        "exclude remove 5".parse::<Command>().unwrap(),
        Command::Rule {
            category: RuleCategory::Exclude,
            edit: SlotEdit::Remove { index: 4 },
        }
    );
    assert_eq!(
        "hl reset".parse::<Command>().unwrap(),
        Command::Rule {
            category: RuleCategory::Highlight,
            edit: SlotEdit::Reset,
        }
    );
}

#[test]
fn invalid_commands_are_rejected() {
    for input in [
        "",
        "dance",
        "filter set 0 substring x",
        "filter set 6 substring x",
        "filter set 1 glob x",
        "filter add substring",
        "highlight add substring pink x",
        "filter frobnicate",
    ] {
        assert!(input.parse::<Command>().is_err(), "{input:?} should fail");
    }
}
