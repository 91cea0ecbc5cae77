use crate::rules::matcher::{Matchers, compile, match_all};
use crate::rules::slot::{RuleSet, SlotColor};

#[derive(Debug, Clone)]
struct CompiledSlot {
    index: usize,
    matchers: Matchers,
    color: SlotColor,
}

/// Compiled form of a [`RuleSet`], holding only the active slots in index
/// order.
///
/// A slot is active when its pattern is non-blank and at least one of its
/// tokens compiled. A slot whose every regex token was rejected drops out
/// instead of blocking (filter) or swallowing (exclude) all traffic.
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    slots: Vec<CompiledSlot>,
}

impl CompiledRuleSet {
    pub fn compile(rules: &RuleSet) -> Self {
        let slots = rules
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .filter_map(|(index, s)| {
                let matchers = compile(&s.pattern, s.mode);
                if matchers.is_empty() {
                    tracing::debug!(slot = index, pattern = %s.pattern, "slot has no usable tokens");
                    return None;
                }
                Some(CompiledSlot {
                    index,
                    matchers,
                    color: s.color,
                })
            })
            .collect();

        Self { slots }
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    /// Active slots that carry a highlight color.
    pub fn highlight_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.color.is_none()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indices of the active slots, in evaluation order.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(|s| s.index)
    }
}

/// Include check: every active slot must match. With no active slot the
/// check passes.
pub fn match_include_slots(line: &str, rules: &CompiledRuleSet) -> bool {
    rules.slots.iter().all(|s| match_all(line, &s.matchers))
}

/// Exclude check: any active slot matching excludes the line.
pub fn match_exclude_slots(line: &str, rules: &CompiledRuleSet) -> bool {
    rules.slots.iter().any(|s| match_all(line, &s.matchers))
}

/// First matching colored slot wins; later slots are not considered.
pub fn resolve_highlight(line: &str, rules: &CompiledRuleSet) -> Option<SlotColor> {
    rules
        .slots
        .iter()
        .filter(|s| !s.color.is_none())
        .find(|s| match_all(line, &s.matchers))
        .map(|s| s.color)
}
