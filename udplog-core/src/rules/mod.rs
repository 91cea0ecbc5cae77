//! Slot-based pattern rules.
//!
//! Three rule categories share the same slot model:
//!
//! - **filter**: a line must satisfy every active slot to be shown
//! - **exclude**: a line matching any active slot is dropped
//! - **highlight**: the first matching colored slot decides the line color
//!
//! Within one slot, `;` separates tokens that must all match. Slots are
//! edited through pure functions on [`RuleSet`] and compiled once into a
//! [`CompiledRuleSet`] for evaluation.

mod engine;
mod error;
mod matcher;
mod slot;

#[cfg(test)]
mod tests;

pub use engine::{CompiledRuleSet, match_exclude_slots, match_include_slots, resolve_highlight};
pub use error::RuleError;
pub use matcher::{CompiledMatcher, Matchers, compile, match_all, tokens};
pub use slot::{MatchMode, PatternSlot, RuleSet, SLOT_COUNT, SlotColor};

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Filter,
    Exclude,
    Highlight,
}

impl FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filter" | "include" => Ok(Self::Filter),
            "exclude" => Ok(Self::Exclude),
            "highlight" | "hl" => Ok(Self::Highlight),
            other => Err(format!("unknown rule category '{other}'")),
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("Filter"),
            Self::Exclude => f.write_str("Exclude"),
            Self::Highlight => f.write_str("Highlight"),
        }
    }
}

/// A single edit applied to one rule category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEdit {
    Set { index: usize, slot: PatternSlot },
    Add { slot: PatternSlot },
    Remove { index: usize },
    Reset,
}

/// The three rule categories as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    pub filters: RuleSet,
    pub excludes: RuleSet,
    pub highlights: RuleSet,
}

impl RuleBook {
    pub fn rules(&self, category: RuleCategory) -> &RuleSet {
        match category {
            RuleCategory::Filter => &self.filters,
            RuleCategory::Exclude => &self.excludes,
            RuleCategory::Highlight => &self.highlights,
        }
    }

    /// Apply `edit` to one category and return the updated book together
    /// with the slot index that changed (if any).
    pub fn apply(
        &self,
        category: RuleCategory,
        edit: SlotEdit,
    ) -> Result<(Self, Option<usize>), RuleError> {
        let current = self.rules(category);
        let (updated, index) = match edit {
            SlotEdit::Set { index, slot } => (current.with_slot(index, slot)?, Some(index)),
            SlotEdit::Add { slot } => {
                let (index, rules) = current.with_added(slot)?;
                (rules, Some(index))
            }
            SlotEdit::Remove { index } => (current.without_slot(index)?, Some(index)),
            SlotEdit::Reset => (RuleSet::empty(), None),
        };

        let mut next = self.clone();
        match category {
            RuleCategory::Filter => next.filters = updated,
            RuleCategory::Exclude => next.excludes = updated,
            RuleCategory::Highlight => next.highlights = updated,
        }
        Ok((next, index))
    }

    pub fn compile(&self) -> CompiledRules {
        CompiledRules {
            include: CompiledRuleSet::compile(&self.filters),
            exclude: CompiledRuleSet::compile(&self.excludes),
            highlight: CompiledRuleSet::compile(&self.highlights),
        }
    }
}

/// Compiled counterpart of [`RuleBook`].
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub include: CompiledRuleSet,
    pub exclude: CompiledRuleSet,
    pub highlight: CompiledRuleSet,
}

impl CompiledRules {
    /// Include check followed by exclude check.
    pub fn accepts(&self, line: &str) -> bool {
        match_include_slots(line, &self.include) && !match_exclude_slots(line, &self.exclude)
    }

    pub fn highlight(&self, line: &str) -> Option<SlotColor> {
        resolve_highlight(line, &self.highlight)
    }
}
