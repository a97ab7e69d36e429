//! Roto Runner entry point
//!
//! Headless demo driver: runs the deterministic sim with a simple autopilot
//! steering toward the nearest collectable and logs the event stream.

use glam::Vec3;

use roto_runner::consts::*;
use roto_runner::sim::{
    Actor, AssetRegistry, GridMode, LevelSurface, Player, World, WorldEvent,
};

/// World position of the nearest attached collectable, or `None` when the
/// window holds none.
fn steer_target(world: &World, from: Vec3) -> Option<Vec3> {
    let ring = &world.ring;
    let angle = world.drum_angle;
    ring.occupied()
        .filter(|(_, _, item)| item.kind.is_collectable())
        .map(|(row, col, _)| ring.slot_position(row, col, angle))
        .min_by(|a, b| a.distance(from).total_cmp(&b.distance(from)))
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("Roto Runner (headless) starting, seed {seed}");

    let mut world = World::new(
        seed,
        GridMode::Authored,
        AssetRegistry::with_defaults(),
        Box::new(LevelSurface::default()),
    );
    let mut player = Player::new(GRAVITY);
    player.teleport(SPAWN_POINT);

    let frame_dt: f32 = 1.0 / 60.0;
    let frames = 60 * 60; // one simulated minute
    let mut deaths = 0u32;

    for frame in 0..frames {
        let dt = frame_dt.min(MAX_FRAME_DT) / STEPS_PER_FRAME as f32;
        for _ in 0..STEPS_PER_FRAME {
            if let Some(target) = steer_target(&world, player.body.position) {
                let to_target = target - player.body.position;
                let heading = Vec3::new(to_target.x, 0.0, to_target.z);
                if let Some(dir) = heading.try_normalize() {
                    player.push(dir * player.speed_delta(dt));
                }
                if to_target.y > 0.5 {
                    player.jump();
                }
            }

            player.update(dt, world.surface());

            if player.body.position.y < KILL_PLANE_Y {
                log::warn!("fell out of the world at frame {frame}; respawning");
                player.teleport(SPAWN_POINT);
            }

            for event in world.tick(&mut player, dt) {
                match event {
                    WorldEvent::Collected { color } => {
                        log::info!("collected egg (color {color}), score {}", player.score)
                    }
                    WorldEvent::Healed { health } => log::info!("healed to {health}"),
                    WorldEvent::Damaged { health } => log::info!("hit! health {health}"),
                    WorldEvent::LevelUp { level } => log::info!("level up -> {level}"),
                    WorldEvent::Died => {
                        deaths += 1;
                        log::info!("died at score {}; restarting run", player.score);
                        player.reset();
                        player.teleport(SPAWN_POINT);
                        world.reset();
                    }
                    WorldEvent::StateChanged => {}
                }
            }
        }
    }

    println!(
        "simulated {:.0}s: score {}, health {}, level {}, deaths {}",
        frames as f32 * frame_dt,
        player.score,
        player.body.health,
        world.level.level_number,
        deaths
    );
}
