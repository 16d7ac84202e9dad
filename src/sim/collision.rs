//! Player-vs-entity collision resolution
//!
//! Entities render as circles but collide as axis-aligned squares: two shapes
//! overlap when the center distance on each axis is below the sum of their
//! half-extents. Cheap, and forgiving enough at these sizes.

use glam::Vec2;

use super::buffs::{self, BuffKind};
use super::state::{Hazard, Pickup, PlayField, PlayerState};
use crate::tuning::Tuning;

/// Half-extent overlap test between an entity and the player
#[inline]
pub fn overlaps(entity_pos: Vec2, entity_half: f32, player_pos: Vec2, player_half: f32) -> bool {
    let d = (entity_pos - player_pos).abs();
    let reach = entity_half + player_half;
    d.x < reach && d.y < reach
}

/// A hazard that reached the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardHit {
    pub pos: Vec2,
    /// Shield absorbed the hit
    pub shielded: bool,
}

/// Everything a collision pass changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub hazard_hits: Vec<HazardHit>,
    pub collected: Vec<(BuffKind, Vec2)>,
    /// Hazards that fell past the bottom edge
    pub missed_hazards: usize,
    /// Pickups that fell past the bottom edge
    pub missed_pickups: usize,
}

impl CollisionReport {
    /// Lives lost during this pass
    pub fn lives_lost(&self) -> usize {
        self.hazard_hits.iter().filter(|h| !h.shielded).count()
    }
}

/// Resolve hazards against the player
///
/// Overlapping hazards are consumed; each one costs a life unless Shield is
/// active. Hazards below the bottom edge plus the purge margin are dropped.
pub fn resolve_hazards(
    player: &mut PlayerState,
    hazards: &mut Vec<Hazard>,
    field: &PlayField,
    tuning: &Tuning,
    report: &mut CollisionReport,
) {
    let purge_y = field.height + tuning.hazard_purge_margin;

    hazards.retain(|hazard| {
        if overlaps(hazard.pos, hazard.half_extent(), player.pos, player.half_size) {
            let shielded = player.buffs.is_active(BuffKind::Shield);
            if !shielded {
                player.lives = player.lives.saturating_sub(1);
            }
            report.hazard_hits.push(HazardHit {
                pos: hazard.pos,
                shielded,
            });
            false
        } else if hazard.pos.y > purge_y {
            report.missed_hazards += 1;
            false
        } else {
            true
        }
    });
}

/// Resolve pickups against the player, activating collected buffs
pub fn resolve_pickups(
    player: &mut PlayerState,
    pickups: &mut Vec<Pickup>,
    field: &PlayField,
    tuning: &Tuning,
    report: &mut CollisionReport,
) {
    let purge_y = field.height + tuning.pickup_purge_margin;

    pickups.retain(|pickup| {
        if overlaps(pickup.pos, pickup.half_extent(), player.pos, player.half_size) {
            buffs::activate(player, pickup.kind, tuning);
            report.collected.push((pickup.kind, pickup.pos));
            false
        } else if pickup.pos.y > purge_y {
            report.missed_pickups += 1;
            false
        } else {
            true
        }
    });
}

/// Run both passes for one tick
pub fn resolve(
    player: &mut PlayerState,
    hazards: &mut Vec<Hazard>,
    pickups: &mut Vec<Pickup>,
    field: &PlayField,
    tuning: &Tuning,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    resolve_hazards(player, hazards, field, tuning, &mut report);
    resolve_pickups(player, pickups, field, tuning, &mut report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::HazardOrigin;

    fn setup() -> (PlayerState, PlayField, Tuning) {
        let field = PlayField::default();
        let tuning = Tuning::default();
        (PlayerState::new(&field, &tuning), field, tuning)
    }

    fn hazard_at(pos: Vec2) -> Hazard {
        Hazard {
            pos,
            size: 30.0,
            descent: 0.2,
            magnitude: 40.0,
            origin: HazardOrigin::Synthetic,
            name: None,
        }
    }

    fn pickup_at(kind: BuffKind, pos: Vec2) -> Pickup {
        Pickup {
            kind,
            pos,
            radius: 16.0,
            speed: 1.0,
            pulse: 0.0,
        }
    }

    #[test]
    fn test_overlap_is_strict_per_axis() {
        let player = Vec2::new(100.0, 100.0);
        // reach = 15 + 20 = 35
        assert!(overlaps(Vec2::new(134.0, 100.0), 15.0, player, 20.0));
        assert!(!overlaps(Vec2::new(135.0, 100.0), 15.0, player, 20.0));
        // Square corner counts even though a circle would miss
        assert!(overlaps(Vec2::new(130.0, 130.0), 15.0, player, 20.0));
        assert!(!overlaps(Vec2::new(100.0, 140.0), 15.0, player, 20.0));
    }

    #[test]
    fn test_hazard_hit_costs_a_life() {
        let (mut player, field, tuning) = setup();
        let mut hazards = vec![hazard_at(player.pos), hazard_at(Vec2::new(50.0, 50.0))];
        let report = resolve(&mut player, &mut hazards, &mut Vec::new(), &field, &tuning);

        assert_eq!(player.lives, 2);
        assert_eq!(hazards.len(), 1);
        assert_eq!(report.lives_lost(), 1);
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let (mut player, field, tuning) = setup();
        buffs::activate(&mut player, BuffKind::Shield, &tuning);
        let mut hazards = vec![hazard_at(player.pos)];
        let report = resolve(&mut player, &mut hazards, &mut Vec::new(), &field, &tuning);

        assert!(hazards.is_empty());
        assert_eq!(player.lives, 3);
        assert_eq!(
            report.hazard_hits,
            vec![HazardHit {
                pos: player.pos,
                shielded: true
            }]
        );
    }

    #[test]
    fn test_lives_never_negative() {
        let (mut player, field, tuning) = setup();
        let mut hazards: Vec<Hazard> = (0..6).map(|_| hazard_at(player.pos)).collect();
        let report = resolve(&mut player, &mut hazards, &mut Vec::new(), &field, &tuning);

        assert_eq!(player.lives, 0);
        assert_eq!(report.hazard_hits.len(), 6);
        assert!(hazards.is_empty());
    }

    #[test]
    fn test_removal_visits_every_entity_once() {
        let (mut player, field, tuning) = setup();
        // Alternate overlapping and distant hazards so removal interleaves with survivors
        let mut hazards: Vec<Hazard> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    hazard_at(player.pos)
                } else {
                    hazard_at(Vec2::new(60.0 + i as f32, 60.0))
                }
            })
            .collect();
        buffs::activate(&mut player, BuffKind::Shield, &tuning);
        let report = resolve(&mut player, &mut hazards, &mut Vec::new(), &field, &tuning);

        assert_eq!(report.hazard_hits.len(), 5);
        assert_eq!(hazards.len(), 5);
        assert!(hazards.iter().enumerate().all(|(i, h)| h.pos.x == 61.0 + 2.0 * i as f32));
    }

    #[test]
    fn test_offscreen_purge() {
        let (mut player, field, tuning) = setup();
        let mut hazards = vec![
            hazard_at(Vec2::new(100.0, field.height + 119.0)),
            hazard_at(Vec2::new(100.0, field.height + 121.0)),
        ];
        let mut pickups = vec![
            pickup_at(BuffKind::Boost, Vec2::new(100.0, field.height + 39.0)),
            pickup_at(BuffKind::Boost, Vec2::new(100.0, field.height + 41.0)),
        ];
        let report = resolve(&mut player, &mut hazards, &mut pickups, &field, &tuning);

        assert_eq!(report.missed_hazards, 1);
        assert_eq!(report.missed_pickups, 1);
        assert_eq!(hazards.len(), 1);
        assert_eq!(pickups.len(), 1);
        assert_eq!(player.lives, 3);
    }

    #[test]
    fn test_pickup_activates_buff() {
        let (mut player, field, tuning) = setup();
        let mut pickups = vec![
            pickup_at(BuffKind::Boost, player.pos + Vec2::new(30.0, 0.0)),
            pickup_at(BuffKind::ScorePlus, player.pos - Vec2::new(0.0, 35.0)),
        ];
        let report = resolve(&mut player, &mut Vec::new(), &mut pickups, &field, &tuning);

        assert!(pickups.is_empty());
        assert_eq!(report.collected.len(), 2);
        assert!(player.buffs.is_active(BuffKind::Boost));
        assert_eq!(player.speed, player.base_speed * tuning.boost_factor);
        assert_eq!(player.score, 100.0);
    }
}
