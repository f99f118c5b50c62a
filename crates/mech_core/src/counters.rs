//! Capped damage counters for unit systems.
//!
//! One fixed array keyed by [`SystemCounter`] replaces a field and a capped
//! setter per system. Caps are fixed per archetype at construction.

use serde::{Deserialize, Serialize};

/// A unit system whose hits are tracked as a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SystemCounter {
    /// Engine hits.
    Engine,
    /// Gyro hits (Mek).
    Gyro,
    /// Sensor hits.
    Sensors,
    /// Life support hits.
    LifeSupport,
    /// Cockpit hits (Mek).
    Cockpit,
    /// Avionics hits (aero).
    Avionics,
    /// Fire control system hits (fighters and small craft).
    Fcs,
    /// Combat information center hits (large craft).
    Cic,
    /// Left thruster hits.
    LeftThruster,
    /// Right thruster hits.
    RightThruster,
    /// Fuel tank hits.
    FuelTank,
    /// Landing gear hits.
    LandingGear,
}

impl SystemCounter {
    /// Number of counters.
    pub const COUNT: usize = 12;

    /// All counters in index order.
    pub const ALL: [SystemCounter; Self::COUNT] = [
        Self::Engine,
        Self::Gyro,
        Self::Sensors,
        Self::LifeSupport,
        Self::Cockpit,
        Self::Avionics,
        Self::Fcs,
        Self::Cic,
        Self::LeftThruster,
        Self::RightThruster,
        Self::FuelTank,
        Self::LandingGear,
    ];

    /// Array index of this counter.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Hit counters with per-system caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageCounters {
    hits: [u8; SystemCounter::COUNT],
    caps: [u8; SystemCounter::COUNT],
}

impl DamageCounters {
    /// Create zeroed counters with the given caps.
    ///
    /// A cap of 0 means the archetype does not have that system.
    #[must_use]
    pub const fn with_caps(caps: [u8; SystemCounter::COUNT]) -> Self {
        Self {
            hits: [0; SystemCounter::COUNT],
            caps,
        }
    }

    /// Current hits on a system.
    #[must_use]
    pub const fn get(&self, counter: SystemCounter) -> u8 {
        self.hits[counter.index()]
    }

    /// Maximum hits a system can take.
    #[must_use]
    pub const fn cap(&self, counter: SystemCounter) -> u8 {
        self.caps[counter.index()]
    }

    /// Does this archetype track the system at all?
    #[must_use]
    pub const fn has(&self, counter: SystemCounter) -> bool {
        self.caps[counter.index()] > 0
    }

    /// Has the system reached its cap?
    #[must_use]
    pub const fn is_maxed(&self, counter: SystemCounter) -> bool {
        self.has(counter) && self.get(counter) >= self.cap(counter)
    }

    /// Add one hit, never passing the cap. Returns the new value.
    pub fn increment(&mut self, counter: SystemCounter) -> u8 {
        let i = counter.index();
        if self.hits[i] < self.caps[i] {
            self.hits[i] += 1;
        }
        self.hits[i]
    }

    /// Set a counter directly, clamped to its cap. Returns the stored value.
    pub fn set(&mut self, counter: SystemCounter, value: u8) -> u8 {
        let i = counter.index();
        self.hits[i] = value.min(self.caps[i]);
        self.hits[i]
    }

    /// Sum of all hits.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.hits.iter().map(|&h| u32::from(h)).sum()
    }

    /// Iterate over `(counter, hits)` for systems with at least one hit.
    pub fn damaged(&self) -> impl Iterator<Item = (SystemCounter, u8)> + '_ {
        SystemCounter::ALL
            .iter()
            .map(move |&c| (c, self.get(c)))
            .filter(|&(_, hits)| hits > 0)
    }
}
