use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("slot {index} is out of range (valid slots: 0..{max})", max = crate::rules::SLOT_COUNT)]
    SlotOutOfRange { index: usize },

    #[error("too many slots: {count} (at most {max})", max = crate::rules::SLOT_COUNT)]
    TooManySlots { count: usize },

    #[error("all slots are in use")]
    NoFreeSlot,

    #[error("unknown match mode '{mode}' (expected Substring or Regex)")]
    UnknownMode { mode: String },

    #[error("unknown color '{color}'")]
    UnknownColor { color: String },
}
