use serde::{Deserialize, Serialize};

use crate::models::{SidePair, Tactic, TacticalModifier, TeamSide};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TacticChangeRecord {
    pub minute: u16,
    pub side: TeamSide,
    pub from: Tactic,
    pub to: Tactic,
}

/// Active tactic per side plus the change history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticalState {
    active: SidePair<Tactic>,
    history: Vec<TacticChangeRecord>,
}

impl TacticalState {
    pub fn new(initial: SidePair<Tactic>) -> Self {
        Self { active: initial, history: Vec::new() }
    }

    pub fn active(&self, side: TeamSide) -> Tactic {
        self.active[side]
    }

    pub fn both(&self) -> SidePair<Tactic> {
        self.active
    }

    pub fn modifier(&self, side: TeamSide) -> TacticalModifier {
        self.active[side].modifier()
    }

    /// Switch `side` to `tactic`. Returns the previous tactic only when it actually changed.
    pub fn apply(&mut self, side: TeamSide, tactic: Tactic, minute: u16) -> Option<Tactic> {
        let previous = self.active[side];
        if previous == tactic {
            return None;
        }
        self.active[side] = tactic;
        self.history.push(TacticChangeRecord { minute, side, from: previous, to: tactic });
        Some(previous)
    }

    pub fn history(&self) -> &[TacticChangeRecord] {
        &self.history
    }
}
