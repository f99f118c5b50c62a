//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the rules core produces
//! identical damage states given identical inputs.
//!
//! # Testing Strategy
//!
//! Replays and simulations depend on every rules call being 100%
//! deterministic. Sources of non-determinism include:
//!
//! - **Floating-point math**: Different CPUs can produce different results.
//!   We use fixed-point arithmetic via [`mech_core::math::Fixed`] throughout.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Chassis keep locations and equipment in ordered `Vec`s.
//!
//! - **System randomness**: The core never rolls on its own. All dice come
//!   from an injected [`mech_core::dice::Dice`], seeded for simulations.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual operations (resolution, damage, criticals)
//! 2. **Property tests**: Random inputs must still produce deterministic outputs
//! 3. **Integration tests**: Full seeded battles are reproducible
//! 4. **Parallel tests**: Running N battles on N threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use mech_core::prelude::*;

use crate::fixtures::{build, Battlefield};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic run).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs were deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Damage resolution is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Result of parallel battle runs.
#[derive(Debug, Clone)]
pub struct ParallelRunResult {
    /// Final state hash from each battle.
    pub hashes: Vec<u64>,
    /// Volleys each battle fired.
    pub volleys: u64,
    /// Number of battles run.
    pub num_runs: usize,
}

impl ParallelRunResult {
    /// Check if all battles produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert all battles matched.
    ///
    /// # Panics
    ///
    /// Panics if battles produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic() {
            let mut unique: Vec<u64> = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Parallel battles diverged!\n\
                 Battles: {}\n\
                 Volleys: {}\n\
                 Unique hashes: {}\n\
                 All hashes: {:?}",
                self.num_runs,
                self.volleys,
                unique.len(),
                self.hashes
            );
        }
    }
}

// ============================================================================
// Seeded battle
// ============================================================================

/// Hits per volley.
pub const SHOTS_PER_VOLLEY: usize = 3;

/// One unit under seeded fire.
///
/// Each volley fires [`SHOTS_PER_VOLLEY`] shots on the normal table,
/// rotating the attack side every volley, then ends the phase.
#[derive(Debug, Clone)]
pub struct Battle {
    /// Definition the target was built from.
    pub data: ChassisData,
    /// The target.
    pub chassis: UnitChassis,
    /// Dice for every roll.
    pub dice: SeededDice,
    /// Options and conditions.
    pub field: Battlefield,
    /// Damage per shot.
    pub damage: u32,
    /// Volleys fired so far.
    pub volleys: u64,
}

impl Battle {
    /// Set up a battle against a fresh unit.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not a valid chassis.
    #[must_use]
    pub fn new(data: ChassisData, seed: u64, damage: u32) -> Self {
        let chassis = build(&data);
        Self {
            data,
            chassis,
            dice: SeededDice::new(seed),
            field: Battlefield::new(),
            damage,
            volleys: 0,
        }
    }

    /// Use a different battlefield.
    #[must_use]
    pub fn with_field(mut self, field: Battlefield) -> Self {
        self.field = field;
        self
    }

    /// Fire one volley. Does nothing once the target is destroyed.
    pub fn fire_volley(&mut self) -> DamageReport {
        let mut report = DamageReport::default();
        if self.chassis.is_destroyed() {
            return report;
        }
        let side = Side::ALL[(self.volleys % 4) as usize];
        let request = HitRequest::new(HitTable::Normal, side);
        let ctx = self.field.ctx();
        for _ in 0..SHOTS_PER_VOLLEY {
            let hit = resolve_with_edge(&mut self.chassis, &request, &ctx, &mut self.dice);
            report.merge(apply_damage(&mut self.chassis, &hit, self.damage, &ctx, &mut self.dice));
            if self.chassis.is_destroyed() {
                break;
            }
        }
        self.chassis.new_round();
        self.volleys += 1;
        report
    }

    /// Hash of the target's damage state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        self.chassis.state_hash()
    }
}

/// Run a setup multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create the initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute the state hash
///
/// # Example
///
/// ```ignore
/// use mech_test_utils::determinism::{verify_determinism, Battle};
/// use mech_test_utils::fixtures::biped_data;
///
/// let result = verify_determinism(
///     5,  // Run 5 times
///     10, // 10 volleys each
///     || Battle::new(biped_data(), 42, 5),
///     |battle| { battle.fire_volley(); },
///     Battle::state_hash,
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    if !is_deterministic {
        tracing::warn!("{} runs of {} steps diverged: {:?}", runs, steps, hashes);
    }

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Run the same seeded battle twice and compare final hashes.
#[must_use]
pub fn verify_battle_determinism<F>(setup_fn: F, volleys: u64) -> bool
where
    F: Fn() -> Battle,
{
    verify_determinism(
        2,
        volleys,
        &setup_fn,
        |battle| {
            battle.fire_volley();
        },
        Battle::state_hash,
    )
    .is_deterministic
}

/// Run N battles on scoped threads and collect final hashes.
///
/// Chassis are `Send`, so independent units can be processed in parallel.
/// This catches any state shared between them by accident.
///
/// # Panics
///
/// Panics if a battle thread panics.
pub fn run_parallel_battles<F>(setup_fn: F, num_runs: usize, volleys: u64) -> ParallelRunResult
where
    F: Fn() -> Battle + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_runs)
            .map(|_| {
                s.spawn(|| {
                    let mut battle = setup_fn();
                    for _ in 0..volleys {
                        battle.fire_volley();
                    }
                    battle.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("battle thread panicked"))
            .collect()
    });

    ParallelRunResult {
        hashes,
        volleys,
        num_runs,
    }
}

/// Compare two battles volley by volley, finding the first divergence.
///
/// # Returns
///
/// `None` if the battles stay identical, `Some(volley)` for the first
/// volley after which they differ (0 for the initial state).
pub fn find_first_divergence<F>(setup_fn: F, volleys: u64) -> Option<u64>
where
    F: Fn() -> Battle,
{
    let mut first = setup_fn();
    let mut second = setup_fn();

    if first.state_hash() != second.state_hash() {
        return Some(0);
    }

    for volley in 1..=volleys {
        first.fire_volley();
        second.fire_volley();

        if first.state_hash() != second.state_hash() {
            return Some(volley);
        }
    }

    None
}

/// Verify that a snapshot round-trip through bytes reproduces the damage
/// state exactly on a freshly built chassis.
#[must_use]
pub fn verify_snapshot_determinism<F>(setup_fn: F, volleys: u64) -> bool
where
    F: Fn() -> Battle,
{
    let mut battle = setup_fn();

    for _ in 0..volleys {
        battle.fire_volley();
    }

    let hash_before = battle.state_hash();

    let Ok(bytes) = battle.chassis.snapshot().to_bytes() else {
        return false;
    };
    let Ok(snapshot) = ChassisSnapshot::from_bytes(&bytes) else {
        return false;
    };
    let Ok(mut restored) = UnitChassis::from_data(&battle.data) else {
        return false;
    };
    if restored.restore(&snapshot).is_err() {
        return false;
    }

    hash_before == restored.state_hash()
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for rules testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of the rules core.
pub mod strategies {
    use mech_core::prelude::*;
    use proptest::prelude::*;

    /// Any archetype.
    pub fn arb_archetype() -> impl Strategy<Value = Archetype> {
        prop::sample::select(Archetype::ALL.to_vec())
    }

    /// Any hit table.
    pub fn arb_hit_table() -> impl Strategy<Value = HitTable> {
        prop::sample::select(HitTable::ALL.to_vec())
    }

    /// Any attack side.
    pub fn arb_side() -> impl Strategy<Value = Side> {
        prop::sample::select(Side::ALL.to_vec())
    }

    /// An unaimed hit request without cover.
    pub fn arb_hit_request() -> impl Strategy<Value = HitRequest> {
        (arb_hit_table(), arb_side()).prop_map(|(table, side)| HitRequest::new(table, side))
    }

    /// Damage of a single weapon hit.
    ///
    /// Range: 1 to 20
    pub fn arb_damage() -> impl Strategy<Value = u32> {
        1u32..=20
    }

    /// Dice seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Engine hits, including more than any cap.
    pub fn arb_engine_hits() -> impl Strategy<Value = u8> {
        0u8..=8
    }

    /// Gravity in hundredths of a g.
    ///
    /// Range: 10 to 300
    pub fn arb_gravity_percent() -> impl Strategy<Value = u32> {
        10u32..=300
    }

    /// Any weather.
    pub fn arb_weather() -> impl Strategy<Value = Weather> {
        prop::sample::select(vec![
            Weather::Clear,
            Weather::LightRain,
            Weather::HeavyRain,
            Weather::LightSnow,
            Weather::HeavySnow,
            Weather::IceStorm,
        ])
    }

    /// Any atmosphere.
    pub fn arb_atmosphere() -> impl Strategy<Value = Atmosphere> {
        prop::sample::select(vec![
            Atmosphere::Vacuum,
            Atmosphere::Trace,
            Atmosphere::Thin,
            Atmosphere::Standard,
            Atmosphere::High,
            Atmosphere::VeryHigh,
        ])
    }

    /// Planetary conditions with calm wind.
    pub fn arb_conditions() -> impl Strategy<Value = PlanetaryConditions> {
        (arb_atmosphere(), arb_weather(), arb_gravity_percent()).prop_map(
            |(atmosphere, weather, gravity_percent)| PlanetaryConditions {
                atmosphere,
                weather,
                wind: Wind::Calm,
                gravity_percent,
            },
        )
    }

    /// A sequence of `(request, damage)` attacks.
    pub fn arb_attack_sequence(max_len: usize) -> impl Strategy<Value = Vec<(HitRequest, u32)>> {
        prop::collection::vec((arb_hit_request(), arb_damage()), 1..=max_len)
    }
}
