use crate::rules::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of slots in every rule category.
pub const SLOT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    Substring,
    Regex,
}

impl FromStr for MatchMode {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "substring" => Ok(Self::Substring),
            "regex" => Ok(Self::Regex),
            _ => Err(RuleError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => f.write_str("Substring"),
            Self::Regex => f.write_str("Regex"),
        }
    }
}

/// Named color from the fixed highlight palette.
///
/// `None` keeps a slot visible in the rule list but takes it out of
/// highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotColor {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Orange,
    Purple,
    Gray,
}

impl SlotColor {
    pub const PALETTE: [SlotColor; 6] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Orange,
        Self::Purple,
        Self::Gray,
    ];

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// RGB value used by color-capable sinks.
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::None => None,
            Self::Red => Some((0xe7, 0x4c, 0x3c)),
            Self::Green => Some((0x2e, 0xcc, 0x71)),
            Self::Blue => Some((0x34, 0x98, 0xdb)),
            Self::Orange => Some((0xf3, 0x9c, 0x12)),
            Self::Purple => Some((0x9b, 0x59, 0xb6)),
            Self::Gray => Some((0x95, 0xa5, 0xa6)),
        }
    }
}

impl FromStr for SlotColor {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "orange" => Ok(Self::Orange),
            "purple" => Ok(Self::Purple),
            "gray" | "grey" => Ok(Self::Gray),
            _ => Err(RuleError::UnknownColor {
                color: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SlotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Orange => "Orange",
            Self::Purple => "Purple",
            Self::Gray => "Gray",
        };
        f.write_str(name)
    }
}

/// One fixed-position rule entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSlot {
    /// User text; `;` separates tokens that must all match.
    pub pattern: String,
    pub mode: MatchMode,
    pub color: SlotColor,
}

impl PatternSlot {
    pub fn new(pattern: impl Into<String>, mode: MatchMode, color: SlotColor) -> Self {
        Self {
            pattern: pattern.into().trim().to_string(),
            mode,
            color,
        }
    }

    pub fn substring(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Substring, SlotColor::None)
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Regex, SlotColor::None)
    }

    pub fn with_color(mut self, color: SlotColor) -> Self {
        self.color = color;
        self
    }

    /// Blank slots never take part in matching.
    pub fn is_empty(&self) -> bool {
        self.pattern.trim().is_empty()
    }
}

/// Ordered, fixed-size array of slots for one rule category.
///
/// Updates never mutate in place: every edit returns a new `RuleSet` so the
/// compiled form can be rebuilt from a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    slots: [PatternSlot; SLOT_COUNT],
}

impl RuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a rule set from at most `SLOT_COUNT` slots, filling the rest
    /// with empty slots.
    pub fn from_slots<I>(slots: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = PatternSlot>,
    {
        let incoming: Vec<PatternSlot> = slots.into_iter().collect();
        if incoming.len() > SLOT_COUNT {
            return Err(RuleError::TooManySlots {
                count: incoming.len(),
            });
        }

        let mut out = Self::empty();
        for (i, slot) in incoming.into_iter().enumerate() {
            out.slots[i] = slot;
        }
        Ok(out)
    }

    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&PatternSlot> {
        self.slots.get(index)
    }

    /// Number of slots with a non-blank pattern.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(PatternSlot::is_empty)
    }

    pub fn with_slot(&self, index: usize, slot: PatternSlot) -> Result<Self, RuleError> {
        if index >= SLOT_COUNT {
            return Err(RuleError::SlotOutOfRange { index });
        }

        let mut next = self.clone();
        next.slots[index] = slot;
        Ok(next)
    }

    pub fn without_slot(&self, index: usize) -> Result<Self, RuleError> {
        self.with_slot(index, PatternSlot::default())
    }

    /// Place `slot` in the first free position.
    pub fn with_added(&self, slot: PatternSlot) -> Result<(usize, Self), RuleError> {
        let index = self.first_free_slot().ok_or(RuleError::NoFreeSlot)?;
        Ok((index, self.with_slot(index, slot)?))
    }
}
