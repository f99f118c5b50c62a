//! Pilot or crew state.

use serde::{Deserialize, Serialize};

/// Hits that kill the crew.
pub const CREW_DEATH_HITS: u8 = 6;

/// Which events may trigger an Edge reroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeTriggers {
    /// Reroll through-armor criticals.
    pub tac: bool,
    /// Reroll head hits.
    pub head_hit: bool,
}

impl Default for EdgeTriggers {
    fn default() -> Self {
        Self {
            tac: true,
            head_hit: true,
        }
    }
}

/// The unit's crew.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Crew {
    /// Accumulated hits (0..=6).
    pub hits: u8,
    /// Remaining Edge points.
    pub edge: u8,
    /// Events that may spend Edge.
    pub edge_triggers: EdgeTriggers,
    /// Crew has left the unit.
    pub ejected: bool,
    /// Knocked out.
    pub unconscious: bool,
    /// Killed.
    pub dead: bool,
}

impl Crew {
    /// A fresh crew with the given Edge.
    #[must_use]
    pub fn with_edge(edge: u8) -> Self {
        Self {
            edge,
            ..Self::default()
        }
    }

    /// Wound the crew `n` times. Six hits kill.
    pub fn hit(&mut self, n: u8) {
        self.hits = self.hits.saturating_add(n).min(CREW_DEATH_HITS);
        if self.hits >= CREW_DEATH_HITS {
            self.dead = true;
        }
    }

    /// Kill the crew outright.
    pub fn kill(&mut self) {
        self.hits = CREW_DEATH_HITS;
        self.dead = true;
    }

    /// Can the crew still act?
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.dead && !self.unconscious && !self.ejected
    }

    /// Spend one Edge point. Returns `false` when none is left.
    pub fn use_edge(&mut self) -> bool {
        if self.edge == 0 {
            return false;
        }
        self.edge -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_cap_and_kill() {
        let mut crew = Crew::default();
        crew.hit(4);
        assert_eq!(crew.hits, 4);
        assert!(!crew.dead);
        crew.hit(5);
        assert_eq!(crew.hits, CREW_DEATH_HITS);
        assert!(crew.dead);
        assert!(!crew.is_active());
    }

    #[test]
    fn test_edge_consumption() {
        let mut crew = Crew::with_edge(1);
        assert!(crew.use_edge());
        assert!(!crew.use_edge());
        assert_eq!(crew.edge, 0);
    }
}
