//! Notification hooks for external audio/visual layers
//!
//! Optional observer interface with no-op defaults. The core never
//! requires a registered hook; absence simply skips the side effect.

use crate::combat::body_part::BodyPart;
use crate::combat::wounds::WoundSeverity;
use crate::core::types::{CombatantId, Tick};

pub trait CombatHooks {
    fn weapon_fired(&mut self, _shooter: CombatantId, _weapon: &str, _tick: Tick) {}

    fn shot_hit(&mut self, _shooter: CombatantId, _target: CombatantId, _tick: Tick) {}

    fn shot_missed(&mut self, _shooter: CombatantId, _target: CombatantId, _tick: Tick) {}

    fn wound_inflicted(
        &mut self,
        _target: CombatantId,
        _body_part: BodyPart,
        _severity: WoundSeverity,
        _damage: i32,
        _tick: Tick,
    ) {
    }

    fn combatant_incapacitated(&mut self, _target: CombatantId, _tick: Tick) {}
}

/// Buffered hook call, emitted after combat mutation completes
#[derive(Debug, Clone)]
pub(crate) enum Notification {
    WeaponFired {
        shooter: CombatantId,
        weapon: String,
    },
    ShotHit {
        shooter: CombatantId,
        target: CombatantId,
    },
    ShotMissed {
        shooter: CombatantId,
        target: CombatantId,
    },
    WoundInflicted {
        target: CombatantId,
        body_part: BodyPart,
        severity: WoundSeverity,
        damage: i32,
    },
    Incapacitated {
        target: CombatantId,
    },
}

impl Notification {
    pub(crate) fn deliver(self, hooks: &mut dyn CombatHooks, tick: Tick) {
        match self {
            Notification::WeaponFired { shooter, weapon } => {
                hooks.weapon_fired(shooter, &weapon, tick)
            }
            Notification::ShotHit { shooter, target } => hooks.shot_hit(shooter, target, tick),
            Notification::ShotMissed { shooter, target } => {
                hooks.shot_missed(shooter, target, tick)
            }
            Notification::WoundInflicted {
                target,
                body_part,
                severity,
                damage,
            } => hooks.wound_inflicted(target, body_part, severity, damage, tick),
            Notification::Incapacitated { target } => hooks.combatant_incapacitated(target, tick),
        }
    }
}
