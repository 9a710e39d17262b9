//! The MRE's monotonically advancing startup phase (SPEC_FULL.md §3, §4.1).

/// One-way (except action↔draw) lifecycle stage of the MRE within a single
/// process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Stage {
    /// Host refs not yet recorded.
    Init = 0,
    /// Mods may register sprites.
    SpriteReg = 1,
    /// Mods may register fonts.
    FontReg = 2,
    /// Mods may register object classes.
    ObjectReg = 3,
    /// Mods may attach event listeners; object tree and subscriber masks
    /// are available.
    ListenerReg = 4,
    /// Normal per-frame game-step processing.
    Action = 5,
    /// Per-frame draw processing; alternates with [`Stage::Action`].
    Draw = 6,
}

impl Stage {
    /// `self == other`.
    pub fn exactly_at(self, other: Stage) -> bool {
        self == other
    }

    /// `self >= other`.
    pub fn at_or_past(self, other: Stage) -> bool {
        self >= other
    }

    /// `self > other`.
    pub fn past(self, other: Stage) -> bool {
        self > other
    }

    /// The stage that directly follows this one in the one-way startup
    /// sequence. `Action` advances to `Draw` and vice versa, modeling the
    /// per-frame alternation; every earlier stage advances linearly.
    pub fn next(self) -> Stage {
        match self {
            Stage::Init => Stage::SpriteReg,
            Stage::SpriteReg => Stage::FontReg,
            Stage::FontReg => Stage::ObjectReg,
            Stage::ObjectReg => Stage::ListenerReg,
            Stage::ListenerReg => Stage::Action,
            Stage::Action => Stage::Draw,
            Stage::Draw => Stage::Action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_monotonic_through_registration() {
        assert!(Stage::Init < Stage::SpriteReg);
        assert!(Stage::SpriteReg < Stage::FontReg);
        assert!(Stage::FontReg < Stage::ObjectReg);
        assert!(Stage::ObjectReg < Stage::ListenerReg);
        assert!(Stage::ListenerReg < Stage::Action);
    }

    #[test]
    fn action_and_draw_alternate() {
        assert_eq!(Stage::Action.next(), Stage::Draw);
        assert_eq!(Stage::Draw.next(), Stage::Action);
    }

    #[test]
    fn predicates_match_definitions() {
        assert!(Stage::Action.at_or_past(Stage::ObjectReg));
        assert!(!Stage::ObjectReg.at_or_past(Stage::Action));
        assert!(Stage::Action.past(Stage::ObjectReg));
        assert!(Stage::ObjectReg.exactly_at(Stage::ObjectReg));
    }
}
