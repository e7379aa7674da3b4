//! The combatant: identity, condition, weapons, and engagement flags

use serde::{Deserialize, Serialize};

use crate::combat::aiming::AimingSpeed;
use crate::combat::constants::{
    BRAVERY_FAILURE_PENALTY, QUICKDRAW_PREP_FACTOR, REFLEX_PREP_FACTOR, SUPPRESSION_PENALTY,
};
use crate::combat::stance::{MovementPace, Stance};
use crate::combat::stats::{Skills, Stats};
use crate::combat::states::WeaponStateName;
use crate::combat::weapons::{MeleeWeapon, RangedWeapon};
use crate::combat::wounds::{Wound, WoundSeverity};
use crate::core::types::{CombatantId, FactionId, Tick, Vec2};

/// Which weapon the combatant fights with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatMode {
    Ranged,
    Melee,
}

/// Running battle statistics, persisted with the combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStatistics {
    pub shots_fired: u64,
    pub hits: u64,
    pub misses: u64,
    pub scratches_inflicted: u64,
    pub light_wounds_inflicted: u64,
    pub serious_wounds_inflicted: u64,
    pub critical_wounds_inflicted: u64,
    pub headshots: u64,
    pub targets_incapacitated: u64,
    pub damage_dealt: i64,
    pub attacks_attempted: u64,
    pub attacks_successful: u64,
    pub ticks_hesitating: u64,
}

impl CombatStatistics {
    pub fn record_wound(&mut self, severity: WoundSeverity) {
        match severity {
            WoundSeverity::Scratch => self.scratches_inflicted += 1,
            WoundSeverity::Light => self.light_wounds_inflicted += 1,
            WoundSeverity::Serious => self.serious_wounds_inflicted += 1,
            WoundSeverity::Critical => self.critical_wounds_inflicted += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub faction: FactionId,
    pub position: Vec2,
    /// Facing in radians, recomputed toward the live target while moving
    pub facing: f64,
    pub health: i32,
    pub max_health: i32,
    pub stats: Stats,
    pub skills: Skills,
    pub stance: Stance,
    pub combat_mode: CombatMode,
    pub ranged_weapon: Option<RangedWeapon>,
    pub melee_weapon: Option<MeleeWeapon>,
    pub weapon_state: WeaponStateName,
    /// Non-owning reference; validity re-checked on every use
    pub current_target: Option<CombatantId>,
    /// Last target actually fired upon; a fresh target costs accuracy
    pub last_engaged_target: Option<CombatantId>,
    pub is_attacking: bool,
    /// Counter stamped onto scheduled attack events; a new command or a
    /// later shot advances it and strands the superseded events
    pub attack_sequence: u64,
    pub is_automatic_firing: bool,
    pub burst_shots_fired: u32,
    pub uses_automatic_targeting: bool,
    pub persistent_attack: bool,
    pub is_reloading: bool,
    pub aiming_speed: AimingSpeed,
    /// Tick at which the current aim hold began
    pub aiming_since: Option<Tick>,
    pub hesitating_until: Option<Tick>,
    pub suppressed_until: Option<Tick>,
    pub bravery_failures: u32,
    pub incapacitated: bool,
    pub move_target: Option<Vec2>,
    pub move_pace: MovementPace,
    pub wounds: Vec<Wound>,
    pub statistics: CombatStatistics,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, faction: FactionId, position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            position,
            facing: 0.0,
            health: 60,
            max_health: 60,
            stats: Stats::average(),
            skills: Skills::default(),
            stance: Stance::Standing,
            combat_mode: CombatMode::Ranged,
            ranged_weapon: None,
            melee_weapon: None,
            weapon_state: WeaponStateName::Holstered,
            current_target: None,
            last_engaged_target: None,
            is_attacking: false,
            attack_sequence: 0,
            is_automatic_firing: false,
            burst_shots_fired: 0,
            uses_automatic_targeting: false,
            persistent_attack: false,
            is_reloading: false,
            aiming_speed: AimingSpeed::Normal,
            aiming_since: None,
            hesitating_until: None,
            suppressed_until: None,
            bravery_failures: 0,
            incapacitated: false,
            move_target: None,
            move_pace: MovementPace::Walk,
            wounds: Vec::new(),
            statistics: CombatStatistics::default(),
        }
    }

    pub fn with_ranged_weapon(mut self, weapon: RangedWeapon) -> Self {
        self.ranged_weapon = Some(weapon);
        self
    }

    pub fn with_melee_weapon(mut self, weapon: MeleeWeapon) -> Self {
        self.melee_weapon = Some(weapon);
        self.combat_mode = CombatMode::Melee;
        self.weapon_state = WeaponStateName::Sheathed;
        self
    }

    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.faction != other.faction
    }

    pub fn is_hesitating(&self, now: Tick) -> bool {
        self.hesitating_until.map_or(false, |until| now < until)
    }

    /// Combined accuracy penalty from every wound carried
    pub fn wound_accuracy_penalty(&self) -> i32 {
        self.wounds.iter().map(Wound::accuracy_penalty).sum()
    }

    pub fn bravery_penalty(&self) -> i32 {
        self.bravery_failures as i32 * BRAVERY_FAILURE_PENALTY
    }

    /// Stress penalty while under fire; a cool head shrinks it toward zero
    pub fn stress_modifier(&self, now: Tick) -> i32 {
        match self.suppressed_until {
            Some(until) if now < until => {
                (SUPPRESSION_PENALTY + self.stats.coolness_modifier()).min(0)
            }
            _ => 0,
        }
    }

    /// Current ground speed in feet per second, zero when stationary
    pub fn speed_fps(&self) -> f64 {
        if self.move_target.is_some() && !self.incapacitated {
            self.move_pace.speed_fps() * self.stance.speed_multiplier()
        } else {
            0.0
        }
    }

    /// Speed component perpendicular to a shot arriving from `shooter_pos`
    pub fn perpendicular_speed_fps(&self, shooter_pos: Vec2) -> f64 {
        let speed = self.speed_fps();
        if speed <= 0.0 {
            return 0.0;
        }
        let Some(dest) = self.move_target else {
            return 0.0;
        };
        let velocity = (dest - self.position).normalize() * speed;
        let line = (self.position - shooter_pos).normalize();
        let along = velocity.x * line.x + velocity.y * line.y;
        let perp_x = velocity.x - line.x * along;
        let perp_y = velocity.y - line.y * along;
        perp_x.hypot(perp_y)
    }

    /// Speed factor for preparation states (unsling, unsheathe)
    pub fn preparation_multiplier(&self) -> f64 {
        let reflex = 1.0 - self.stats.reflexes_modifier() as f64 * REFLEX_PREP_FACTOR;
        let quickdraw = 1.0 - self.skills.quickdraw as f64 * QUICKDRAW_PREP_FACTOR;
        (reflex * quickdraw).max(0.2)
    }

    /// Append a wound and deduct its damage
    pub fn apply_wound(&mut self, wound: Wound) {
        self.health -= wound.damage;
        self.wounds.push(wound);
    }

    /// Drop out of the fight: prone, stationary, all engagement flags off
    pub fn incapacitate(&mut self) {
        self.incapacitated = true;
        self.stance = Stance::Prone;
        self.move_target = None;
        self.is_attacking = false;
        self.is_automatic_firing = false;
        self.burst_shots_fired = 0;
        self.persistent_attack = false;
        self.current_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::body_part::BodyPart;

    fn soldier(id: u32, faction: u32) -> Combatant {
        Combatant::new(
            CombatantId::new(id),
            format!("soldier-{id}"),
            FactionId::new(faction),
            Vec2::default(),
        )
    }

    #[test]
    fn test_hostility_is_cross_faction() {
        let a = soldier(0, 0);
        let b = soldier(1, 1);
        let c = soldier(2, 0);
        assert!(a.is_hostile_to(&b));
        assert!(!a.is_hostile_to(&c));
    }

    #[test]
    fn test_wound_reduces_health() {
        let mut a = soldier(0, 0);
        a.apply_wound(Wound {
            body_part: BodyPart::Chest,
            severity: WoundSeverity::Serious,
            damage: 10,
            weapon: "test".to_string(),
            tick: 0,
        });
        assert_eq!(a.health, 50);
        assert_eq!(a.wounds.len(), 1);
    }

    #[test]
    fn test_incapacitation_clears_engagement() {
        let mut a = soldier(0, 0);
        a.move_target = Some(Vec2::new(10.0, 0.0));
        a.is_attacking = true;
        a.is_automatic_firing = true;
        a.current_target = Some(CombatantId::new(1));
        a.incapacitate();
        assert!(a.incapacitated);
        assert_eq!(a.stance, Stance::Prone);
        assert!(a.move_target.is_none());
        assert!(!a.is_attacking);
        assert!(!a.is_automatic_firing);
    }

    #[test]
    fn test_suppression_respects_coolness() {
        let mut a = soldier(0, 0);
        a.suppressed_until = Some(100);
        assert_eq!(a.stress_modifier(50), -20);
        a.stats.coolness = 100;
        assert_eq!(a.stress_modifier(50), 0);
        // Expired suppression has no effect
        assert_eq!(a.stress_modifier(150), 0);
    }

    #[test]
    fn test_perpendicular_speed() {
        let mut runner = soldier(0, 0);
        runner.move_target = Some(Vec2::new(0.0, 100.0));
        runner.move_pace = MovementPace::Run;
        // Shot arrives along +x, movement is along +y: fully perpendicular
        let perp = runner.perpendicular_speed_fps(Vec2::new(-50.0, 0.0));
        assert!((perp - 9.0).abs() < 1e-9);
        // Moving straight away from the shooter: no lateral component
        runner.move_target = Some(Vec2::new(100.0, 0.0));
        let perp = runner.perpendicular_speed_fps(Vec2::new(-50.0, 0.0));
        assert!(perp.abs() < 1e-9);
    }
}
