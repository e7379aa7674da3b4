//! Attack sequences: aiming, firing, impact, reload, hesitation, bravery
//!
//! Everything here runs off scheduled events. Handlers re-validate the
//! shooter and sequence flags before acting, so interrupted sequences
//! (fire-mode switch, new attack command, hesitation, incapacitation)
//! die quietly when their stale events come due.

use rand::Rng;
use tracing::debug;

use crate::combat::aiming::EarnedAimBonus;
use crate::combat::constants::{
    BRAVERY_RECOVERY_TICKS, FIRST_TARGET_PENALTY, SUPPRESSION_TICKS, SYNTHETIC_READY_TICKS,
};
use crate::combat::hesitation::{bravery_check_passes, hesitation_ticks};
use crate::combat::hit::{
    melee_hit_chance, ranged_hit_chance, resolve_impact, shot_quality, Impact, MeleeStrikeSpec,
    RangedShotSpec,
};
use crate::combat::states::WeaponStateName;
use crate::combat::weapons::FireMode;
use crate::combat::wounds::{Wound, WoundSeverity};
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{CombatantId, Tick};
use crate::simulation::events::EventKind;
use crate::simulation::hooks::Notification;
use crate::simulation::readiness::scaled_state_ticks;
use crate::simulation::world::World;

impl World {
    /// Begin a ranged attack sequence: aim, then fire
    ///
    /// Legal only from `Ready` or `Aiming`. A fresh command interrupts
    /// any automatic fire already in progress.
    pub(crate) fn start_ranged_attack(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
    ) -> Result<()> {
        let now = self.current_tick();
        if self.combatant(target)?.incapacitated {
            return Err(SkirmishError::TargetInvalid(target));
        }
        let shooter = self.combatant(attacker)?;
        if shooter.incapacitated || shooter.is_hesitating(now) {
            return Err(SkirmishError::InvalidStateTransition {
                combatant: attacker,
                state: shooter.weapon_state,
            });
        }
        let weapon = shooter
            .ranged_weapon
            .as_ref()
            .ok_or(SkirmishError::NoWeapon(attacker))?;
        if !shooter.weapon_state.is_ranged_attack_capable() {
            return Err(SkirmishError::InvalidStateTransition {
                combatant: attacker,
                state: shooter.weapon_state,
            });
        }
        let ammunition = weapon.ammunition;
        let base_aim = weapon.aim_ticks().unwrap_or(SYNTHETIC_READY_TICKS);
        if ammunition == 0 {
            self.start_reload(attacker, now)?;
            return Err(SkirmishError::AmmunitionDepleted(attacker));
        }

        let shooter = self.combatant_mut(attacker)?;
        // A fresh command supersedes any sequence still in flight; its
        // queued events carry the old stamp and fall through
        shooter.attack_sequence += 1;
        let sequence = shooter.attack_sequence;
        shooter.is_automatic_firing = false;
        shooter.burst_shots_fired = 0;
        shooter.current_target = Some(target);
        shooter.is_attacking = true;
        shooter.statistics.attacks_attempted += 1;
        if shooter.weapon_state == WeaponStateName::Ready {
            shooter.weapon_state = WeaponStateName::Aiming;
            shooter.aiming_since = Some(now);
        }
        let aim_ticks =
            ((base_aim as f64 * shooter.aiming_speed.time_multiplier()).round() as Tick).max(1);
        debug!(?attacker, ?target, due = now + aim_ticks, "aiming");
        self.scheduler.schedule(
            now + aim_ticks,
            attacker,
            EventKind::Fire {
                target,
                shot_number: 1,
                sequence,
            },
        );
        Ok(())
    }

    /// Begin a melee attack: swing if in reach, otherwise close distance
    pub(crate) fn start_melee_attack(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
    ) -> Result<()> {
        let now = self.current_tick();
        let target_pos = {
            let t = self.combatant(target)?;
            if t.incapacitated {
                return Err(SkirmishError::TargetInvalid(target));
            }
            t.position
        };
        let (reach, swing_ticks) = {
            let s = self.combatant(attacker)?;
            if s.incapacitated || s.is_hesitating(now) {
                return Err(SkirmishError::InvalidStateTransition {
                    combatant: attacker,
                    state: s.weapon_state,
                });
            }
            let weapon = s
                .melee_weapon
                .as_ref()
                .ok_or(SkirmishError::NoWeapon(attacker))?;
            if !s.weapon_state.is_melee_attack_capable() {
                return Err(SkirmishError::InvalidStateTransition {
                    combatant: attacker,
                    state: s.weapon_state,
                });
            }
            (
                weapon.reach,
                weapon
                    .state_ticks(WeaponStateName::MeleeAttack)
                    .unwrap_or(SYNTHETIC_READY_TICKS),
            )
        };
        let shooter = self.combatant_mut(attacker)?;
        shooter.current_target = Some(target);
        if shooter.position.distance(&target_pos) > reach {
            // Close the distance; readiness holds while travelling
            shooter.move_target = Some(target_pos);
            return Ok(());
        }
        shooter.move_target = None;
        shooter.attack_sequence += 1;
        let sequence = shooter.attack_sequence;
        shooter.is_attacking = true;
        shooter.statistics.attacks_attempted += 1;
        shooter.weapon_state = WeaponStateName::MeleeAttack;
        debug!(?attacker, ?target, due = now + swing_ticks, "melee swing");
        self.scheduler.schedule(
            now + swing_ticks,
            attacker,
            EventKind::MeleeImpact { target, sequence },
        );
        Ok(())
    }

    /// A scheduled trigger pull lands
    pub(crate) fn handle_fire(
        &mut self,
        shooter_id: CombatantId,
        target_id: CombatantId,
        shot_number: u32,
        sequence: u64,
    ) -> Result<()> {
        let now = self.current_tick();

        struct ShooterView {
            ammunition: u32,
            weapon_name: String,
            weapon_accuracy: i32,
            weapon_damage: i32,
            max_range: f64,
            firing_ticks: Tick,
            fire_mode: FireMode,
            burst_size: u32,
            firing_delay: Tick,
            aim_modifier: i32,
            skill_bonus: i32,
            first_target_penalty: i32,
        }

        let view = {
            let s = self.combatant(shooter_id)?;
            if s.incapacitated {
                return Ok(());
            }
            if shot_number == 1 {
                // Opening shots bind to their sequence stamp; a later
                // command strands them
                if s.attack_sequence != sequence || !s.is_attacking || s.is_hesitating(now) {
                    return Ok(());
                }
            } else if !s.is_automatic_firing {
                // Follow-ups are stamped before later shots advance the
                // counter, so the automatic-fire flag guards them instead
                return Ok(());
            }
            let Some(weapon) = s.ranged_weapon.as_ref() else {
                return Ok(());
            };
            let base_aim = weapon.aim_ticks().unwrap_or(SYNTHETIC_READY_TICKS);
            let held = s
                .aiming_since
                .map_or(0, |since| now.saturating_sub(since));
            let skill_level = s.skills.level_for(weapon.class);
            let earned = EarnedAimBonus::from_held_aim(held, base_aim, skill_level);
            let aim_modifier = earned
                .map(|b| b.accuracy_modifier())
                .unwrap_or_else(|| s.aiming_speed.accuracy_modifier());
            let skill_multiplier = if earned.map_or(false, |b| b.doubles_skill_bonus()) {
                2
            } else {
                1
            };
            let fresh_target = s.last_engaged_target != Some(target_id);
            let waived = earned.map_or(false, |b| b.waives_first_target_penalty());
            ShooterView {
                ammunition: weapon.ammunition,
                weapon_name: weapon.name.clone(),
                weapon_accuracy: weapon.accuracy,
                weapon_damage: weapon.damage,
                max_range: weapon.max_range,
                firing_ticks: weapon
                    .state_ticks(WeaponStateName::Firing)
                    .unwrap_or(SYNTHETIC_READY_TICKS),
                fire_mode: weapon.active_fire_mode,
                burst_size: weapon.burst_size,
                firing_delay: weapon.firing_delay.max(1),
                aim_modifier,
                skill_bonus: s.skills.accuracy_bonus(weapon.class) * skill_multiplier,
                first_target_penalty: if fresh_target && !waived {
                    FIRST_TARGET_PENALTY
                } else {
                    0
                },
            }
        };

        // Dry trigger pull: abort the attack and reload instead
        if view.ammunition == 0 {
            return self.start_reload(shooter_id, now);
        }

        let mut notifications = vec![Notification::WeaponFired {
            shooter: shooter_id,
            weapon: view.weapon_name.clone(),
        }];
        let sequence = {
            let s = self.combatant_mut(shooter_id)?;
            if let Some(weapon) = s.ranged_weapon.as_mut() {
                weapon.ammunition -= 1;
            }
            s.statistics.shots_fired += 1;
            s.weapon_state = WeaponStateName::Firing;
            s.last_engaged_target = Some(target_id);
            // Each executed shot opens a new recovery chain and strands
            // the previous shot's chain events
            s.attack_sequence += 1;
            s.attack_sequence
        };
        self.scheduler.schedule(
            now + view.firing_ticks,
            shooter_id,
            EventKind::StateTransition {
                to: WeaponStateName::Recovering,
                sequence,
            },
        );

        // Remaining automatic rounds go at the last aim point even if the
        // target has dropped; resolution against the fallen is a no-op
        let target_standing = self
            .combatant(target_id)
            .map(|t| !t.incapacitated)
            .unwrap_or(false);
        if target_standing {
            let spec = {
                let s = self.combatant(shooter_id)?;
                let t = self.combatant(target_id)?;
                RangedShotSpec {
                    weapon_accuracy: view.weapon_accuracy,
                    distance: s.position.distance(&t.position),
                    max_range: view.max_range,
                    dexterity_modifier: s.stats.dexterity_modifier(),
                    stress_modifier: s.stress_modifier(now),
                    shooter_pace: s.move_target.map(|_| s.move_pace),
                    aim_modifier: view.aim_modifier,
                    follow_up_shot: shot_number >= 2,
                    target_stance: t.stance,
                    target_perpendicular_fps: t.perpendicular_speed_fps(s.position),
                    wound_penalty: s.wound_accuracy_penalty(),
                    skill_bonus: view.skill_bonus,
                    bravery_penalty: s.bravery_penalty(),
                    first_target_penalty: view.first_target_penalty,
                }
            };
            let chance = ranged_hit_chance(&spec);
            let roll = self.rng.gen_range(1..=100);
            debug!(?shooter_id, ?target_id, chance, roll, shot_number, "shot resolved");
            // Incoming fire rattles the target, hit or miss
            self.combatant_mut(target_id)?.suppressed_until = Some(now + SUPPRESSION_TICKS);
            if roll <= chance {
                notifications.push(Notification::ShotHit {
                    shooter: shooter_id,
                    target: target_id,
                });
                let impact = resolve_impact(shot_quality(roll, chance), view.weapon_damage, &mut self.rng);
                self.apply_impact(shooter_id, target_id, impact, &view.weapon_name, &mut notifications)?;
            } else {
                self.combatant_mut(shooter_id)?.statistics.misses += 1;
                notifications.push(Notification::ShotMissed {
                    shooter: shooter_id,
                    target: target_id,
                });
            }
        }

        self.continue_automatic_fire(
            shooter_id,
            target_id,
            shot_number,
            view.fire_mode,
            view.burst_size,
            view.firing_delay,
            view.ammunition - 1,
            sequence,
            now,
        );
        self.notify_all(notifications);
        Ok(())
    }

    fn start_reload(&mut self, id: CombatantId, now: Tick) -> Result<()> {
        let reload_ticks = {
            let c = self.combatant_mut(id)?;
            let weapon = c
                .ranged_weapon
                .as_ref()
                .ok_or(SkirmishError::NoWeapon(id))?;
            let ticks = weapon.reload_ticks.max(1);
            c.is_automatic_firing = false;
            c.burst_shots_fired = 0;
            c.is_attacking = false;
            c.is_reloading = true;
            ticks
        };
        debug!(?id, due = now + reload_ticks, "reloading");
        self.scheduler
            .schedule(now + reload_ticks, id, EventKind::ReloadComplete);
        Ok(())
    }

    pub(crate) fn handle_reload_complete(&mut self, owner: CombatantId) -> Result<()> {
        let c = self.combatant_mut(owner)?;
        if c.incapacitated || !c.is_reloading {
            return Ok(());
        }
        if let Some(weapon) = c.ranged_weapon.as_mut() {
            weapon.ammunition = weapon.magazine_size;
        }
        c.is_reloading = false;
        debug!(?owner, "reload complete");
        Ok(())
    }

    /// A melee swing comes due
    pub(crate) fn handle_melee_impact(
        &mut self,
        attacker_id: CombatantId,
        target_id: CombatantId,
        sequence: u64,
    ) -> Result<()> {
        let now = self.current_tick();
        let (weapon_name, weapon_accuracy, damage, reach, recovery_ticks) = {
            let s = self.combatant(attacker_id)?;
            if s.incapacitated
                || s.weapon_state != WeaponStateName::MeleeAttack
                || s.attack_sequence != sequence
            {
                return Ok(());
            }
            let Some(weapon) = s.melee_weapon.as_ref() else {
                return Ok(());
            };
            (
                weapon.name.clone(),
                weapon.accuracy,
                (weapon.damage + s.stats.strength_modifier()).max(1),
                weapon.reach,
                weapon
                    .state_ticks(WeaponStateName::MeleeRecovery)
                    .unwrap_or(SYNTHETIC_READY_TICKS),
            )
        };
        self.combatant_mut(attacker_id)?.weapon_state = WeaponStateName::MeleeRecovery;
        self.scheduler.schedule(
            now + recovery_ticks,
            attacker_id,
            EventKind::StateTransition {
                to: WeaponStateName::MeleeReady,
                sequence,
            },
        );

        let target_standing = self
            .combatant(target_id)
            .map(|t| !t.incapacitated)
            .unwrap_or(false);
        if !target_standing {
            return Ok(());
        }
        let mut notifications = Vec::new();
        let (in_reach, spec) = {
            let s = self.combatant(attacker_id)?;
            let t = self.combatant(target_id)?;
            (
                s.position.distance(&t.position) <= reach,
                MeleeStrikeSpec {
                    weapon_accuracy,
                    dexterity_modifier: s.stats.dexterity_modifier(),
                    stress_modifier: s.stress_modifier(now),
                    target_stance: t.stance,
                    target_perpendicular_fps: t.perpendicular_speed_fps(s.position),
                    wound_penalty: s.wound_accuracy_penalty(),
                    skill_bonus: s.skills.blade_bonus(),
                    bravery_penalty: s.bravery_penalty(),
                },
            )
        };
        if !in_reach {
            // Target slipped away during the swing
            self.combatant_mut(attacker_id)?.statistics.misses += 1;
            self.notify_all(vec![Notification::ShotMissed {
                shooter: attacker_id,
                target: target_id,
            }]);
            return Ok(());
        }
        let chance = melee_hit_chance(&spec);
        let roll = self.rng.gen_range(1..=100);
        debug!(?attacker_id, ?target_id, chance, roll, "melee resolved");
        if roll <= chance {
            notifications.push(Notification::ShotHit {
                shooter: attacker_id,
                target: target_id,
            });
            let impact = resolve_impact(shot_quality(roll, chance), damage, &mut self.rng);
            self.apply_impact(attacker_id, target_id, impact, &weapon_name, &mut notifications)?;
        } else {
            self.combatant_mut(attacker_id)?.statistics.misses += 1;
            notifications.push(Notification::ShotMissed {
                shooter: attacker_id,
                target: target_id,
            });
        }
        self.notify_all(notifications);
        Ok(())
    }

    /// Apply a resolved hit to the victim and its aftermath
    fn apply_impact(
        &mut self,
        attacker_id: CombatantId,
        target_id: CombatantId,
        impact: Impact,
        weapon_name: &str,
        notifications: &mut Vec<Notification>,
    ) -> Result<()> {
        let now = self.current_tick();
        let (went_down, coolness_modifier) = {
            let t = self.combatant_mut(target_id)?;
            t.apply_wound(Wound {
                body_part: impact.body_part,
                severity: impact.severity,
                damage: impact.damage,
                weapon: weapon_name.to_string(),
                tick: now,
            });
            let down = t.health <= 0
                || (impact.severity == WoundSeverity::Critical && impact.body_part.is_vital());
            (down, t.stats.coolness_modifier())
        };
        notifications.push(Notification::WoundInflicted {
            target: target_id,
            body_part: impact.body_part,
            severity: impact.severity,
            damage: impact.damage,
        });
        {
            let a = self.combatant_mut(attacker_id)?;
            a.statistics.hits += 1;
            a.statistics.attacks_successful += 1;
            a.statistics.damage_dealt += impact.damage as i64;
            a.statistics.record_wound(impact.severity);
            if impact.body_part == crate::combat::body_part::BodyPart::Head {
                a.statistics.headshots += 1;
            }
            if went_down {
                a.statistics.targets_incapacitated += 1;
            }
        }
        if went_down {
            self.incapacitate_combatant(target_id)?;
            notifications.push(Notification::Incapacitated { target: target_id });
            return Ok(());
        }
        // Stagger, then nerve
        let stagger = hesitation_ticks(impact.severity);
        if stagger > 0 {
            let t = self.combatant_mut(target_id)?;
            let until = (now + stagger).max(t.hesitating_until.unwrap_or(0));
            t.hesitating_until = Some(until);
            // Taking a wound interrupts any automatic fire in progress
            t.is_automatic_firing = false;
            t.burst_shots_fired = 0;
            t.statistics.ticks_hesitating += stagger;
            self.scheduler
                .schedule(until, target_id, EventKind::HesitationEnd);
        }
        let roll = self.rng.gen_range(1..=100);
        if bravery_check_passes(roll, coolness_modifier) {
            // Steady nerves shake off the stagger early
            self.combatant_mut(target_id)?.hesitating_until = None;
        } else {
            self.combatant_mut(target_id)?.bravery_failures += 1;
            self.scheduler.schedule(
                now + BRAVERY_RECOVERY_TICKS,
                target_id,
                EventKind::BraveryRecovery,
            );
        }
        Ok(())
    }

    /// Drop a combatant and halt everyone still closing on it
    ///
    /// Also the entry point for scripted casualties from external layers.
    pub fn incapacitate_combatant(&mut self, victim: CombatantId) -> Result<()> {
        let idx = self.idx(victim)?;
        self.combatants[idx].incapacitate();
        debug!(?victim, "incapacitated");
        for mover in self.combatants.iter_mut() {
            if mover.incapacitated {
                continue;
            }
            if mover.current_target == Some(victim) && mover.move_target.is_some() {
                // Halt in place this same tick
                mover.move_target = Some(mover.position);
            }
        }
        Ok(())
    }

    /// Schedule the rest of a burst or the next full-auto round
    #[allow(clippy::too_many_arguments)]
    fn continue_automatic_fire(
        &mut self,
        shooter_id: CombatantId,
        target_id: CombatantId,
        shot_number: u32,
        fire_mode: FireMode,
        burst_size: u32,
        firing_delay: Tick,
        ammunition_after: u32,
        sequence: u64,
        now: Tick,
    ) {
        match fire_mode {
            FireMode::SingleShot => {}
            FireMode::Burst => {
                if shot_number == 1 && burst_size > 1 {
                    if let Ok(shooter) = self.combatant_mut(shooter_id) {
                        shooter.is_automatic_firing = true;
                        shooter.burst_shots_fired = 1;
                    }
                    // All follow-ups scheduled up front from the first shot
                    for n in 2..=burst_size {
                        self.scheduler.schedule(
                            now + firing_delay * (n - 1) as Tick,
                            shooter_id,
                            EventKind::Fire {
                                target: target_id,
                                shot_number: n,
                                sequence,
                            },
                        );
                    }
                } else if shot_number >= 2 {
                    if let Ok(shooter) = self.combatant_mut(shooter_id) {
                        shooter.burst_shots_fired += 1;
                        if shooter.burst_shots_fired >= burst_size {
                            shooter.is_automatic_firing = false;
                            shooter.burst_shots_fired = 0;
                        }
                    }
                }
            }
            FireMode::FullAuto => {
                if let Ok(shooter) = self.combatant_mut(shooter_id) {
                    if shot_number == 1 {
                        shooter.is_automatic_firing = true;
                        shooter.burst_shots_fired = 1;
                    } else {
                        shooter.burst_shots_fired += 1;
                    }
                }
                if ammunition_after > 0 {
                    // One link at a time until interrupted or dry
                    self.scheduler.schedule(
                        now + firing_delay,
                        shooter_id,
                        EventKind::Fire {
                            target: target_id,
                            shot_number: shot_number + 1,
                            sequence,
                        },
                    );
                } else if let Ok(shooter) = self.combatant_mut(shooter_id) {
                    shooter.is_automatic_firing = false;
                    shooter.burst_shots_fired = 0;
                }
            }
        }
    }

    pub(crate) fn handle_hesitation_end(&mut self, owner: CombatantId) -> Result<()> {
        let now = self.current_tick();
        let mut recovery: Option<(Tick, u64)> = None;
        {
            let c = self.combatant_mut(owner)?;
            if c.incapacitated {
                return Ok(());
            }
            match c.hesitating_until {
                Some(until) if until <= now => {
                    c.hesitating_until = None;
                    c.is_attacking = false;
                    if c.weapon_state == WeaponStateName::Recovering {
                        recovery = Some((
                            scaled_state_ticks(c, WeaponStateName::Recovering)
                                .unwrap_or(SYNTHETIC_READY_TICKS),
                            c.attack_sequence,
                        ));
                    }
                }
                // Extended by a later wound, or already shaken off
                _ => return Ok(()),
            }
        }
        if let Some((ticks, sequence)) = recovery {
            self.scheduler.schedule(
                now + ticks,
                owner,
                EventKind::StateTransition {
                    to: WeaponStateName::Aiming,
                    sequence,
                },
            );
        }
        Ok(())
    }

    pub(crate) fn handle_bravery_recovery(&mut self, owner: CombatantId) -> Result<()> {
        let c = self.combatant_mut(owner)?;
        if c.bravery_failures > 0 {
            c.bravery_failures -= 1;
        }
        Ok(())
    }
}
