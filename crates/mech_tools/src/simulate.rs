//! Seeded damage simulations.
//!
//! Fires repeated volleys at a fresh copy of a unit until it is destroyed
//! or the volley limit is reached, and collects attrition statistics
//! across runs. Every run is reproducible from its seed.

use mech_core::chassis::UnitChassis;
use mech_core::context::RulesContext;
use mech_core::damage::apply_damage;
use mech_core::data::ChassisData;
use mech_core::dice::SeededDice;
use mech_core::hit_table::HitTable;
use mech_core::location::Side;
use mech_core::resolver::{resolve_with_edge, HitRequest};
use mech_core::severity::{damage_level, is_crippled, DamageLevel};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Seed of the first run; run `n` uses `seed + n`.
    pub seed: u64,
    /// Number of runs.
    pub runs: u32,
    /// Volleys per run.
    pub volleys: u32,
    /// Shots per volley.
    pub shots: u32,
    /// Damage per shot.
    pub damage: u32,
    /// Hit table.
    pub table: HitTable,
    /// Attack side.
    pub side: Side,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            runs: 10,
            volleys: 10,
            shots: 3,
            damage: 5,
            table: HitTable::Normal,
            side: Side::Front,
        }
    }
}

/// What happened in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Dice seed.
    pub seed: u64,
    /// Volleys fired before the run ended.
    pub volleys_fired: u32,
    /// Volley that destroyed the unit.
    pub destroyed_after: Option<u32>,
    /// First volley after which the unit was crippled.
    pub crippled_after: Option<u32>,
    /// Severity at the end of the run.
    pub final_level: DamageLevel,
    /// Critical hits taken.
    pub critical_hits: usize,
    /// Final damage state hash.
    pub state_hash: u64,
}

/// Statistics across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Unit name.
    pub unit: String,
    /// Individual runs.
    pub runs: Vec<RunOutcome>,
    /// Runs ending with the unit destroyed.
    pub destroyed: u32,
    /// Runs in which the unit was crippled at some point.
    pub crippled: u32,
    /// Average volleys to destruction over the destroyed runs.
    pub avg_volleys_to_destroy: Option<f64>,
}

impl SimulationSummary {
    /// Fraction of runs ending with the unit destroyed (0.0 to 1.0).
    #[must_use]
    pub fn destroy_rate(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        f64::from(self.destroyed) / self.runs.len() as f64
    }
}

fn run_once(data: &ChassisData, config: &SimulationConfig, ctx: &RulesContext<'_>, seed: u64) -> Result<RunOutcome> {
    let mut chassis = UnitChassis::from_data(data)?;
    let mut dice = SeededDice::new(seed);
    let request = HitRequest::new(config.table, config.side);

    let mut outcome = RunOutcome {
        seed,
        volleys_fired: 0,
        destroyed_after: None,
        crippled_after: None,
        final_level: DamageLevel::None,
        critical_hits: 0,
        state_hash: 0,
    };

    for volley in 1..=config.volleys {
        for _ in 0..config.shots {
            let hit = resolve_with_edge(&mut chassis, &request, ctx, &mut dice);
            let report = apply_damage(&mut chassis, &hit, config.damage, ctx, &mut dice);
            outcome.critical_hits += report.critical_hits();
            if chassis.is_destroyed() {
                break;
            }
        }
        chassis.new_round();
        outcome.volleys_fired = volley;

        if outcome.crippled_after.is_none() && is_crippled(&chassis) {
            outcome.crippled_after = Some(volley);
        }
        if chassis.is_destroyed() {
            outcome.destroyed_after = Some(volley);
            break;
        }
    }

    outcome.final_level = damage_level(&chassis);
    outcome.state_hash = chassis.state_hash();
    debug!("Run {} ended after {} volleys: {:?}", seed, outcome.volleys_fired, outcome.final_level);
    Ok(outcome)
}

/// Run a seeded simulation against a chassis definition.
///
/// # Errors
///
/// Fails if the chassis cannot be built.
pub fn run_simulation(data: &ChassisData, config: &SimulationConfig, ctx: &RulesContext<'_>) -> Result<SimulationSummary> {
    let runs = (0..config.runs)
        .map(|n| run_once(data, config, ctx, config.seed.wrapping_add(u64::from(n))))
        .collect::<Result<Vec<_>>>()?;

    let destroyed: Vec<u32> = runs.iter().filter_map(|r| r.destroyed_after).collect();
    let crippled = runs.iter().filter(|r| r.crippled_after.is_some()).count() as u32;
    let avg_volleys_to_destroy = (!destroyed.is_empty())
        .then(|| f64::from(destroyed.iter().sum::<u32>()) / destroyed.len() as f64);

    let summary = SimulationSummary {
        unit: data.name.clone(),
        destroyed: destroyed.len() as u32,
        crippled,
        avg_volleys_to_destroy,
        runs,
    };
    info!(
        "{}: {} runs, {} destroyed, {} crippled",
        summary.unit,
        summary.runs.len(),
        summary.destroyed,
        summary.crippled
    );
    Ok(summary)
}
