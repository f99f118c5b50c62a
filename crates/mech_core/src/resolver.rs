//! Hit-location resolution.
//!
//! One generic resolver drives every archetype through its
//! [`LocationTable`](crate::hit_table::LocationTable). Aimed shots, ties,
//! through-armor criticals, floating criticals and Edge rerolls are all
//! handled here, in that order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chassis::UnitChassis;
use crate::context::RulesContext;
use crate::cover::Cover;
use crate::dice::Dice;
use crate::hit_table::{table_for, AeroCrit, Entry, HitTable, TableEntry};
use crate::location::{Location, Side};

/// Re-rolls allowed when a floating critical keeps landing behind cover.
pub const FLOATING_CRIT_MAX_ROLLS: u32 = 500;

/// Aimed shots on a 2d6 roll in this range land where aimed.
const AIMED_HIT_ROLLS: std::ops::RangeInclusive<u8> = 6..=8;

/// What makes an aimed shot possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AimingMode {
    /// The target cannot move.
    Immobile,
    /// The attacker has a targeting computer. Never at the head.
    TargetingComputer,
}

/// An aimed shot at a specific location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AimedShot {
    /// Aimed location.
    pub location: Location,
    /// Why aiming is allowed.
    pub mode: AimingMode,
}

/// Extra effect attached to a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HitEffect {
    /// Plain damage.
    #[default]
    None,
    /// Roll for criticals on the struck location even if armor holds.
    Critical,
    /// Aimed-shot critical.
    SpecialCrit,
}

/// Everything needed to resolve one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HitRequest {
    /// Table to roll on.
    pub table: HitTable,
    /// Side the attack comes from.
    pub side: Side,
    /// Aimed shot, if any.
    pub aimed: Option<AimedShot>,
    /// Cover from the attacker's point of view.
    pub cover: Cover,
}

impl HitRequest {
    /// A normal-table hit from `side`.
    #[must_use]
    pub fn new(table: HitTable, side: Side) -> Self {
        Self {
            table,
            side,
            ..Self::default()
        }
    }

    /// Aim at a location.
    #[must_use]
    pub fn aimed_at(mut self, location: Location, mode: AimingMode) -> Self {
        self.aimed = Some(AimedShot { location, mode });
        self
    }

    /// Add cover.
    #[must_use]
    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = cover;
        self
    }
}

/// Where a hit landed and what it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitData {
    /// Location struck.
    pub location: Location,
    /// Strikes rear armor.
    pub rear: bool,
    /// Extra effect.
    pub effect: HitEffect,
    /// The deciding roll.
    pub roll: u8,
    /// Through-armor critical roll on the table.
    pub tac: bool,
    /// Aerospace critical applied if the critical check passes.
    pub potential_crit: AeroCrit,
    /// Landed where aimed.
    pub aimed: bool,
    /// Location of the first result when Edge forced a reroll.
    pub undone_location: Option<Location>,
}

impl HitData {
    /// A plain hit, for callers that already know the location.
    #[must_use]
    pub const fn at(location: Location) -> Self {
        Self {
            location,
            rear: false,
            effect: HitEffect::None,
            roll: 0,
            tac: false,
            potential_crit: AeroCrit::None,
            aimed: false,
            undone_location: None,
        }
    }

    /// Hit the rear armor.
    #[must_use]
    pub const fn from_rear(mut self) -> Self {
        self.rear = true;
        self
    }

    /// Attach an effect.
    #[must_use]
    pub const fn with_effect(mut self, effect: HitEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Attach a potential aerospace critical.
    #[must_use]
    pub const fn with_potential_crit(mut self, crit: AeroCrit) -> Self {
        self.potential_crit = crit;
        self
    }

    /// Does this hit force a critical roll?
    #[must_use]
    pub const fn forces_critical(&self) -> bool {
        matches!(self.effect, HitEffect::Critical | HitEffect::SpecialCrit)
    }
}

fn roll_for(table: HitTable, dice: &mut dyn Dice) -> u8 {
    if table.uses_single_die() {
        dice.roll_1d6()
    } else {
        dice.roll_2d6()
    }
}

fn pick(entry: TableEntry, dice: &mut dyn Dice) -> Entry {
    match entry {
        TableEntry::Single(e) => e,
        TableEntry::Tie(first, second) => {
            if dice.roll_1d6() <= 3 {
                first
            } else {
                second
            }
        }
    }
}

/// Turn a table entry into a hit on this chassis.
fn to_hit(chassis: &UnitChassis, entry: Entry, side: Side, roll: u8) -> HitData {
    let archetype = chassis.archetype();
    let no_main_gun = archetype.is_proto() && !chassis.has_main_gun();
    let location = if no_main_gun && entry.location == Location::MainGun {
        Location::Torso
    } else {
        entry.location
    };
    let rear = !archetype.is_proto()
        && !archetype.is_aero()
        && (entry.rear || (side == Side::Rear && chassis.has_rear_armor(location)));
    HitData {
        location,
        rear,
        effect: HitEffect::None,
        roll,
        tac: entry.tac,
        potential_crit: entry.potential_crit,
        aimed: false,
        undone_location: None,
    }
}

fn try_aimed(chassis: &UnitChassis, request: &HitRequest, dice: &mut dyn Dice) -> Option<HitData> {
    let aimed = request.aimed?;
    let allowed = match aimed.mode {
        AimingMode::Immobile => chassis.is_immobile(),
        AimingMode::TargetingComputer => aimed.location != Location::Head,
    };
    if !allowed || !chassis.archetype().has_location(aimed.location) {
        return None;
    }
    let roll = dice.roll_2d6();
    if !AIMED_HIT_ROLLS.contains(&roll) {
        debug!("Aimed shot at {:?} missed its mark ({})", aimed.location, roll);
        return None;
    }
    let mut hit = to_hit(chassis, Entry::at(aimed.location), request.side, roll);
    hit.effect = HitEffect::SpecialCrit;
    hit.aimed = true;
    Some(hit)
}

fn floating_crit(chassis: &UnitChassis, request: &HitRequest, dice: &mut dyn Dice) -> HitData {
    let archetype = chassis.archetype();
    let tables = table_for(archetype);
    let mut last = None;
    for _ in 0..FLOATING_CRIT_MAX_ROLLS {
        let roll = dice.roll_2d6();
        let entry = pick(tables.entry(HitTable::Normal, request.side, roll), dice);
        let candidate = to_hit(chassis, entry, request.side, roll);
        if !request.cover.covers(archetype, request.side, candidate.location) {
            return candidate;
        }
        last = Some(candidate);
    }
    warn!(
        "Floating critical still covered after {} rolls; keeping last candidate",
        FLOATING_CRIT_MAX_ROLLS
    );
    last.unwrap_or_else(|| HitData::at(Location::CenterTorso))
}

/// Resolve where a hit lands.
///
/// Rolls are drawn from `dice` in a fixed order, so scripted dice replay a
/// resolution exactly.
#[must_use]
pub fn resolve(
    chassis: &UnitChassis,
    request: &HitRequest,
    ctx: &RulesContext<'_>,
    dice: &mut dyn Dice,
) -> HitData {
    if let Some(hit) = try_aimed(chassis, request, dice) {
        debug!("Aimed hit on {:?}", hit.location);
        return hit;
    }

    let tables = table_for(chassis.archetype());
    let table = tables.effective_table(request.table);
    let roll = roll_for(table, dice);
    let entry = pick(tables.entry(table, request.side, roll), dice);
    let mut hit = to_hit(chassis, entry, request.side, roll);

    if table == HitTable::Swarm {
        hit.effect = HitEffect::Critical;
    }

    if hit.tac {
        if ctx.options.no_tac {
            hit.effect = HitEffect::None;
        } else if ctx.options.floating_crit {
            let mut floated = floating_crit(chassis, request, dice);
            floated.effect = HitEffect::Critical;
            floated.tac = true;
            floated.potential_crit = hit.potential_crit;
            hit = floated;
        } else {
            hit.effect = HitEffect::Critical;
        }
    }

    debug!(
        "Resolved {:?} {:?} roll {} -> {:?} (rear: {}, effect: {:?})",
        request.table, request.side, roll, hit.location, hit.rear, hit.effect
    );
    hit
}

/// Resolve a hit, letting the target's crew spend Edge to reroll a
/// through-armor critical or a head hit once.
#[must_use]
pub fn resolve_with_edge(
    chassis: &mut UnitChassis,
    request: &HitRequest,
    ctx: &RulesContext<'_>,
    dice: &mut dyn Dice,
) -> HitData {
    let first = resolve(chassis, request, ctx, dice);
    if !ctx.options.edge || chassis.crew().edge == 0 {
        return first;
    }

    let triggers = chassis.crew().edge_triggers;
    let through_armor = first.tac && first.effect == HitEffect::Critical;
    let crit_trigger = triggers.tac && (through_armor || first.effect == HitEffect::SpecialCrit);
    let head_trigger = triggers.head_hit && first.location == Location::Head;
    if !(crit_trigger || head_trigger) || !chassis.crew_mut().use_edge() {
        return first;
    }

    info!(
        "{} spends Edge to reroll hit on {:?} ({} left)",
        chassis.name(),
        first.location,
        chassis.crew().edge
    );
    let mut second = resolve(chassis, request, ctx, dice);
    second.undone_location = Some(first.location);
    second
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::context::{GameOptions, PlanetaryConditions};
    use crate::data::{AeroData, ChassisData};
    use crate::dice::ScriptedDice;

    fn chassis(archetype: Archetype) -> UnitChassis {
        let mut data = ChassisData::new("Target", archetype, 50);
        data.walk_mp = 5;
        if archetype.is_aero() {
            data.aero = Some(AeroData::default());
        }
        data.crew.edge = 1;
        UnitChassis::from_data(&data).unwrap()
    }

    fn run(target: &UnitChassis, request: HitRequest, options: GameOptions, totals: &[u8]) -> HitData {
        let conditions = PlanetaryConditions::default();
        let ctx = RulesContext::new(&options, &conditions);
        let mut dice = ScriptedDice::from_totals(totals);
        resolve(target, &request, &ctx, &mut dice)
    }

    #[test]
    fn test_normal_front_roll() {
        let target = chassis(Archetype::Biped);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Front), GameOptions::default(), &[10]);
        assert_eq!(hit.location, Location::LeftArm);
        assert_eq!(hit.effect, HitEffect::None);
        assert!(!hit.rear);
        assert_eq!(hit.roll, 10);
    }

    #[test]
    fn test_rear_attack_hits_rear_torso() {
        let target = chassis(Archetype::Biped);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Rear), GameOptions::default(), &[7]);
        assert_eq!(hit.location, Location::CenterTorso);
        assert!(hit.rear);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Rear), GameOptions::default(), &[10]);
        assert!(!hit.rear);
    }

    #[test]
    fn test_tac_tagged_critical() {
        let target = chassis(Archetype::Biped);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Front), GameOptions::default(), &[2]);
        assert_eq!(hit.location, Location::CenterTorso);
        assert_eq!(hit.effect, HitEffect::Critical);
        assert!(hit.tac);
    }

    #[test]
    fn test_no_tac_option() {
        let target = chassis(Archetype::Biped);
        let options = GameOptions {
            no_tac: true,
            ..GameOptions::default()
        };
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Front), options, &[2]);
        assert_eq!(hit.location, Location::CenterTorso);
        assert_eq!(hit.effect, HitEffect::None);
    }

    #[test]
    fn test_floating_crit_skips_covered() {
        let target = chassis(Archetype::Biped);
        let options = GameOptions {
            floating_crit: true,
            ..GameOptions::default()
        };
        // Front attack: attacker-left cover covers the target's right side.
        let request = HitRequest::new(HitTable::Normal, Side::Front).with_cover(Cover::LEFT);
        // 2 = TAC, float: 3 -> RA (covered), 8 -> LT.
        let hit = run(&target, request, options, &[2, 3, 8]);
        assert_eq!(hit.location, Location::LeftTorso);
        assert_eq!(hit.effect, HitEffect::Critical);
    }

    #[test]
    fn test_floating_crit_exhaustion_keeps_last() {
        let target = chassis(Archetype::Biped);
        let options = GameOptions {
            floating_crit: true,
            ..GameOptions::default()
        };
        let request = HitRequest::new(HitTable::Normal, Side::Front).with_cover(Cover::UPPER);
        let mut totals = vec![2];
        totals.extend(std::iter::repeat(12).take(FLOATING_CRIT_MAX_ROLLS as usize));
        let hit = run(&target, request, options, &totals);
        assert_eq!(hit.location, Location::Head);
        assert_eq!(hit.effect, HitEffect::Critical);
    }

    #[test]
    fn test_aimed_shot_on_immobile_target() {
        let mut target = chassis(Archetype::Biped);
        target.set_shutdown(true);
        let request = HitRequest::new(HitTable::Normal, Side::Front)
            .aimed_at(Location::Head, AimingMode::Immobile);
        let hit = run(&target, request, GameOptions::default(), &[7]);
        assert_eq!(hit.location, Location::Head);
        assert!(hit.aimed);
        assert_eq!(hit.effect, HitEffect::SpecialCrit);

        // Aim roll 9 misses; normal roll 5 lands on the right leg.
        let hit = run(&target, request, GameOptions::default(), &[9, 5]);
        assert_eq!(hit.location, Location::RightLeg);
        assert!(!hit.aimed);
    }

    #[test]
    fn test_aimed_requires_immobile_target() {
        let target = chassis(Archetype::Biped);
        let request = HitRequest::new(HitTable::Normal, Side::Front)
            .aimed_at(Location::Head, AimingMode::Immobile);
        // No aim roll is consumed.
        let hit = run(&target, request, GameOptions::default(), &[7]);
        assert_eq!(hit.location, Location::CenterTorso);
    }

    #[test]
    fn test_targeting_computer_cannot_aim_at_head() {
        let target = chassis(Archetype::Biped);
        let request = HitRequest::new(HitTable::Normal, Side::Front)
            .aimed_at(Location::Head, AimingMode::TargetingComputer);
        let hit = run(&target, request, GameOptions::default(), &[7]);
        assert!(!hit.aimed);
        let request = HitRequest::new(HitTable::Normal, Side::Front)
            .aimed_at(Location::LeftArm, AimingMode::TargetingComputer);
        let hit = run(&target, request, GameOptions::default(), &[7]);
        assert!(hit.aimed);
        assert_eq!(hit.location, Location::LeftArm);
    }

    #[test]
    fn test_tie_uses_secondary_die() {
        let target = chassis(Archetype::Biped);
        let conditions = PlanetaryConditions::default();
        let options = GameOptions::default();
        let ctx = RulesContext::new(&options, &conditions);
        let request = HitRequest::new(HitTable::Above, Side::Front);
        let mut dice = ScriptedDice::new(&[3, 2]);
        assert_eq!(resolve(&target, &request, &ctx, &mut dice).location, Location::CenterTorso);
        let mut dice = ScriptedDice::new(&[4, 5]);
        assert_eq!(resolve(&target, &request, &ctx, &mut dice).location, Location::Head);
    }

    #[test]
    fn test_swarm_effects() {
        let target = chassis(Archetype::Biped);
        let hit = run(&target, HitRequest::new(HitTable::Swarm, Side::Front), GameOptions::default(), &[4]);
        assert_eq!(hit.location, Location::RightTorso);
        assert!(hit.rear);
        assert_eq!(hit.effect, HitEffect::Critical);
        let hit = run(
            &target,
            HitRequest::new(HitTable::SwarmConventional, Side::Front),
            GameOptions::default(),
            &[4],
        );
        assert_eq!(hit.effect, HitEffect::None);
    }

    #[test]
    fn test_aero_potential_crit_and_fallback() {
        let target = chassis(Archetype::Fighter);
        let hit = run(&target, HitRequest::new(HitTable::Punch, Side::Rear), GameOptions::default(), &[8]);
        assert_eq!(hit.location, Location::Aft);
        assert_eq!(hit.potential_crit, AeroCrit::FuelTank);
        assert!(!hit.rear);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Front), GameOptions::default(), &[12]);
        assert_eq!(hit.effect, HitEffect::Critical);
    }

    #[test]
    fn test_proto_main_gun_becomes_torso() {
        let target = chassis(Archetype::ProtoMek);
        let hit = run(&target, HitRequest::new(HitTable::Normal, Side::Front), GameOptions::default(), &[2]);
        assert_eq!(hit.location, Location::Torso);
        assert_eq!(hit.effect, HitEffect::None);
    }

    #[test]
    fn test_edge_rerolls_head_hit_once() {
        let mut target = chassis(Archetype::Biped);
        let options = GameOptions {
            edge: true,
            ..GameOptions::default()
        };
        let conditions = PlanetaryConditions::default();
        let ctx = RulesContext::new(&options, &conditions);
        let request = HitRequest::new(HitTable::Normal, Side::Front);
        let mut dice = ScriptedDice::from_totals(&[12, 12]);
        let hit = resolve_with_edge(&mut target, &request, &ctx, &mut dice);
        assert_eq!(hit.location, Location::Head);
        assert_eq!(hit.undone_location, Some(Location::Head));
        assert_eq!(target.crew().edge, 0);
        assert_eq!(dice.remaining(), 0);

        // No Edge left: no reroll.
        let mut dice = ScriptedDice::from_totals(&[12]);
        let hit = resolve_with_edge(&mut target, &request, &ctx, &mut dice);
        assert_eq!(hit.undone_location, None);
    }

    #[test]
    fn test_edge_ignored_when_option_off() {
        let mut target = chassis(Archetype::Biped);
        let options = GameOptions::default();
        let conditions = PlanetaryConditions::default();
        let ctx = RulesContext::new(&options, &conditions);
        let mut dice = ScriptedDice::from_totals(&[2]);
        let hit = resolve_with_edge(&mut target, &HitRequest::new(HitTable::Normal, Side::Front), &ctx, &mut dice);
        assert_eq!(hit.undone_location, None);
        assert_eq!(target.crew().edge, 1);
    }
}
