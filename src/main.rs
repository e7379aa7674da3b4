//! Demo skirmish runner: two fire teams, deterministic under a seed

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skirmish::combat::combatant::Combatant;
use skirmish::combat::weapons::{MeleeWeapon, RangedWeapon};
use skirmish::{FactionId, Result, Vec2, World};

#[derive(Parser)]
#[command(name = "skirmish", about = "Run a scripted two-faction skirmish")]
struct Args {
    /// Random seed for deterministic replay
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Tick limit (60 ticks = 1 second)
    #[arg(long, default_value_t = 7200)]
    ticks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let red = FactionId::new(0);
    let blue = FactionId::new(1);
    let mut world = World::new(args.seed);
    let roster = vec![
        world.spawn(|id| {
            Combatant::new(id, "red-1", red, Vec2::new(0.0, 0.0))
                .with_ranged_weapon(RangedWeapon::service_pistol())
        }),
        world.spawn(|id| {
            Combatant::new(id, "red-2", red, Vec2::new(0.0, 12.0))
                .with_ranged_weapon(RangedWeapon::battle_rifle())
        }),
        world.spawn(|id| {
            Combatant::new(id, "blue-1", blue, Vec2::new(120.0, 0.0))
                .with_ranged_weapon(RangedWeapon::submachine_gun())
        }),
        world.spawn(|id| {
            Combatant::new(id, "blue-2", blue, Vec2::new(120.0, 12.0))
                .with_melee_weapon(MeleeWeapon::saber())
        }),
    ];
    for id in &roster {
        world.ready_weapon(*id)?;
        world.set_automatic_targeting(*id, true)?;
    }

    let end = world.run_until_decided(args.ticks);
    info!(tick = end, seconds = end / 60, "battle over");
    for combatant in world.combatants() {
        info!(
            name = %combatant.name,
            health = combatant.health,
            down = combatant.incapacitated,
            shots = combatant.statistics.shots_fired,
            hits = combatant.statistics.hits,
            wounds_taken = combatant.wounds.len(),
            "result"
        );
    }
    Ok(())
}
