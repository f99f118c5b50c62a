//! Unit status reports.

use std::fmt::Write as _;

use mech_core::chassis::UnitChassis;
use mech_core::context::{MpSettings, RulesContext};
use mech_core::counters::SystemCounter;
use mech_core::heat::{heat_breakdown, HeatBreakdown};
use mech_core::location::Location;
use mech_core::movement::{compute_mp, MpKind};
use mech_core::severity::{damage_level, is_crippled, DamageLevel};
use serde::Serialize;

use crate::error::{Result, ToolError};

/// Movement points by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MpLine {
    /// Walk (or safe thrust).
    pub walk: u32,
    /// Run (or max thrust).
    pub run: u32,
    /// Sprint.
    pub sprint: u32,
    /// Jump.
    pub jump: u32,
}

/// Armor and structure of one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationLine {
    /// Location.
    pub location: Location,
    /// Front armor.
    pub armor: u32,
    /// Rear armor.
    pub rear_armor: u32,
    /// Internal structure.
    pub internal: u32,
    /// Destroyed or blown off.
    pub destroyed: bool,
}

/// Everything the `report` command prints about a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    /// Unit name.
    pub name: String,
    /// Archetype display name.
    pub archetype: String,
    /// Weight in tons.
    pub tonnage: u32,
    /// Current MP.
    pub mp: MpLine,
    /// MP with no heat, weather, gravity or cargo effects.
    pub base_mp: MpLine,
    /// Heat capacity parts.
    pub heat: HeatBreakdown,
    /// Total heat capacity.
    pub heat_capacity: u32,
    /// Severity.
    pub damage_level: DamageLevel,
    /// Crippled.
    pub crippled: bool,
    /// Destroyed.
    pub destroyed: bool,
    /// Per-location status.
    pub locations: Vec<LocationLine>,
    /// Systems with hits.
    pub damaged_systems: Vec<(SystemCounter, u8)>,
    /// Crew hits.
    pub crew_hits: u8,
}

fn mp_line(chassis: &UnitChassis, ctx: &RulesContext<'_>, settings: &MpSettings) -> MpLine {
    let mp = |kind| compute_mp(chassis, kind, ctx, settings);
    MpLine {
        walk: mp(MpKind::Walk),
        run: mp(MpKind::Run),
        sprint: mp(MpKind::Sprint),
        jump: mp(MpKind::Jump),
    }
}

/// Build a report for a unit.
#[must_use]
pub fn build_report(chassis: &UnitChassis, ctx: &RulesContext<'_>) -> UnitReport {
    let heat = heat_breakdown(chassis, ctx, true, true);
    UnitReport {
        name: chassis.name().to_string(),
        archetype: chassis.archetype().display_name().to_string(),
        tonnage: chassis.tonnage(),
        mp: mp_line(chassis, ctx, &MpSettings::standard()),
        base_mp: mp_line(chassis, ctx, &MpSettings::base()),
        heat,
        heat_capacity: heat.total(),
        damage_level: damage_level(chassis),
        crippled: is_crippled(chassis),
        destroyed: chassis.is_destroyed(),
        locations: chassis
            .locations()
            .iter()
            .map(|state| LocationLine {
                location: state.location,
                armor: chassis.armor(state.location, false),
                rear_armor: chassis.armor(state.location, true),
                internal: chassis.internal(state.location),
                destroyed: chassis.is_location_bad(state.location),
            })
            .collect(),
        damaged_systems: chassis.counters().damaged().collect(),
        crew_hits: chassis.crew().hits,
    }
}

/// Render a report as plain text.
#[must_use]
pub fn render_text(report: &UnitReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {}t)", report.name, report.archetype, report.tonnage);
    let _ = writeln!(
        out,
        "  MP        walk {} / run {} / sprint {} / jump {}",
        report.mp.walk, report.mp.run, report.mp.sprint, report.mp.jump
    );
    let _ = writeln!(
        out,
        "  Base MP   walk {} / run {} / sprint {} / jump {}",
        report.base_mp.walk, report.base_mp.run, report.base_mp.sprint, report.base_mp.jump
    );
    let _ = writeln!(
        out,
        "  Heat      {} ({} sinks, +{} wing, +{} radical, +{} water, -{} coolant)",
        report.heat_capacity,
        report.heat.sinks,
        report.heat.wing_bonus,
        report.heat.radical_bonus,
        report.heat.water_bonus,
        report.heat.coolant_penalty
    );
    let status = if report.destroyed {
        "destroyed"
    } else if report.crippled {
        "crippled"
    } else {
        report.damage_level.label()
    };
    let _ = writeln!(out, "  Damage    {status} (crew hits {})", report.crew_hits);
    for line in &report.locations {
        let _ = write!(
            out,
            "  {:<5} armor {:>3}",
            line.location.abbreviation(),
            line.armor
        );
        if line.rear_armor > 0 {
            let _ = write!(out, " / {:>2}", line.rear_armor);
        }
        let _ = write!(out, "  internal {:>3}", line.internal);
        if line.destroyed {
            out.push_str("  DESTROYED");
        }
        out.push('\n');
    }
    for (counter, hits) in &report.damaged_systems {
        let _ = writeln!(out, "  {counter:?} hits: {hits}");
    }
    out
}

/// Render a report as pretty JSON.
///
/// # Errors
///
/// [`ToolError::Render`] if serialization fails.
pub fn render_json(report: &UnitReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| ToolError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_core::damage::apply_damage;
    use mech_core::dice::ScriptedDice;
    use mech_core::resolver::HitData;
    use mech_test_utils::fixtures::{biped, fighter, Battlefield};

    #[test]
    fn test_fresh_biped_report() {
        let field = Battlefield::new();
        let report = build_report(&biped(), &field.ctx());
        assert_eq!(report.mp.walk, 4);
        assert_eq!(report.mp.run, 6);
        assert_eq!(report.mp.sprint, 0);
        assert_eq!(report.heat_capacity, 10);
        assert_eq!(report.damage_level, DamageLevel::None);
        assert_eq!(report.locations.len(), 8);
        assert!(report.damaged_systems.is_empty());
    }

    #[test]
    fn test_report_tracks_damage() {
        let field = Battlefield::new();
        let mut unit = biped();
        let mut dice = ScriptedDice::from_totals(&[2]);
        apply_damage(&mut unit, &HitData::at(Location::LeftArm), 30, &field.ctx(), &mut dice);
        let report = build_report(&unit, &field.ctx());
        let arm = report
            .locations
            .iter()
            .find(|l| l.location == Location::LeftArm)
            .unwrap();
        assert!(arm.destroyed);
        assert!(render_text(&report).contains("DESTROYED"));
    }

    #[test]
    fn test_json_output() {
        let field = Battlefield::new();
        let report = build_report(&fighter(), &field.ctx());
        let json = render_json(&report).unwrap();
        assert!(json.contains("\"name\": \"Sabre SB-27\""));
        assert!(json.contains("\"heat_capacity\": 10"));
    }
}
