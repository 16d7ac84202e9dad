//! Power-up kinds and the timed-effect engine
//!
//! Every kind carries its effect in one declarative table ([`BuffKind::effect`]),
//! so adding a power-up is a single new match arm the compiler will ask for.
//! Durations, the boost factor and score deltas come from [`Tuning`].

use serde::{Deserialize, Serialize};

use super::state::PlayerState;
use crate::sanitize;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    Shield,
    DoubleScore,
    SlowTime,
    Boost,
    ScorePlus,
    ScoreMinus,
}

/// What collecting a pickup does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuffEffect {
    /// Timed effect lasting the nominal duration (ms)
    Timed { duration_ms: f32 },
    /// Instant score change, floored at zero
    Score { delta: f32 },
}

impl BuffKind {
    /// All kinds in spawn-band order
    pub const ALL: [BuffKind; 6] = [
        BuffKind::Shield,
        BuffKind::DoubleScore,
        BuffKind::SlowTime,
        BuffKind::Boost,
        BuffKind::ScorePlus,
        BuffKind::ScoreMinus,
    ];

    /// Kinds that occupy a slot in the player's buff table
    pub const TIMED: [BuffKind; 4] = [
        BuffKind::Shield,
        BuffKind::DoubleScore,
        BuffKind::SlowTime,
        BuffKind::Boost,
    ];

    pub fn effect(self, tuning: &Tuning) -> BuffEffect {
        match self {
            BuffKind::Shield => BuffEffect::Timed {
                duration_ms: tuning.shield_ms,
            },
            BuffKind::DoubleScore => BuffEffect::Timed {
                duration_ms: tuning.double_score_ms,
            },
            BuffKind::SlowTime => BuffEffect::Timed {
                duration_ms: tuning.slow_time_ms,
            },
            BuffKind::Boost => BuffEffect::Timed {
                duration_ms: tuning.boost_ms,
            },
            BuffKind::ScorePlus => BuffEffect::Score {
                delta: tuning.score_pickup_delta,
            },
            BuffKind::ScoreMinus => BuffEffect::Score {
                delta: -tuning.score_pickup_delta,
            },
        }
    }

    /// Nominal duration for timed kinds, `None` for instantaneous ones
    pub fn nominal_duration_ms(self, tuning: &Tuning) -> Option<f32> {
        match self.effect(tuning) {
            BuffEffect::Timed { duration_ms } => Some(duration_ms),
            BuffEffect::Score { .. } => None,
        }
    }

    /// Half-open probability band `[lo, hi)` used by the buff spawner
    pub fn spawn_band(self) -> (f32, f32) {
        match self {
            BuffKind::Shield => (0.0, 0.15),
            BuffKind::DoubleScore => (0.15, 0.25),
            BuffKind::SlowTime => (0.25, 0.35),
            BuffKind::Boost => (0.35, 0.45),
            BuffKind::ScorePlus => (0.45, 0.55),
            BuffKind::ScoreMinus => (0.55, 0.65),
        }
    }

    /// Map a uniform roll in `[0, 1)` to at most one kind.
    /// Rolls at or above 0.65 produce nothing.
    pub fn from_roll(roll: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            let (lo, hi) = kind.spawn_band();
            roll >= lo && roll < hi
        })
    }

    /// RGBA color tag used for pickups and their particle bursts
    pub fn color(self) -> u32 {
        match self {
            BuffKind::Shield => 0x00CCFFFF,
            BuffKind::DoubleScore => 0xFFD700FF,
            BuffKind::SlowTime => 0x6666FFFF,
            BuffKind::Boost => 0x00FF66FF,
            BuffKind::ScorePlus => 0x00FF00FF,
            BuffKind::ScoreMinus => 0xFF3333FF,
        }
    }

    /// Short glyph drawn on the pickup
    pub fn label(self) -> &'static str {
        match self {
            BuffKind::Shield => "S",
            BuffKind::DoubleScore => "x2",
            BuffKind::SlowTime => "T",
            BuffKind::Boost => "B",
            BuffKind::ScorePlus => "+",
            BuffKind::ScoreMinus => "-",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuffKind::Shield => "shield",
            BuffKind::DoubleScore => "doubleScore",
            BuffKind::SlowTime => "slowTime",
            BuffKind::Boost => "boost",
            BuffKind::ScorePlus => "scorePlus",
            BuffKind::ScoreMinus => "scoreMinus",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    fn slot(self) -> Option<usize> {
        Self::TIMED.iter().position(|&k| k == self)
    }
}

/// Timer state of one timed buff
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffStatus {
    pub active: bool,
    pub remaining_ms: f32,
}

/// One slot per timed kind; instantaneous kinds are never stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffTable {
    slots: [BuffStatus; 4],
}

impl BuffTable {
    /// Status of a kind (instantaneous kinds always read as inactive)
    pub fn get(&self, kind: BuffKind) -> BuffStatus {
        kind.slot().map(|i| self.slots[i]).unwrap_or_default()
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.get(kind).active
    }

    /// Iterate timed kinds with their status
    pub fn iter(&self) -> impl Iterator<Item = (BuffKind, BuffStatus)> + '_ {
        BuffKind::TIMED.into_iter().zip(self.slots.iter().copied())
    }

    fn get_mut(&mut self, kind: BuffKind) -> Option<&mut BuffStatus> {
        kind.slot().map(|i| &mut self.slots[i])
    }
}

/// Apply a collected pickup to the player
///
/// Timed kinds restart at their nominal duration; re-collecting one that is
/// already running resets it rather than extending it.
pub fn activate(player: &mut PlayerState, kind: BuffKind, tuning: &Tuning) {
    match kind.effect(tuning) {
        BuffEffect::Timed { duration_ms } => {
            if let Some(status) = player.buffs.get_mut(kind) {
                *status = BuffStatus {
                    active: true,
                    remaining_ms: duration_ms,
                };
            }
            if kind == BuffKind::Boost {
                player.speed = player.base_speed * tuning.boost_factor;
            }
            log::debug!("Buff {} active for {}ms", kind.as_str(), duration_ms);
        }
        BuffEffect::Score { delta } => {
            player.score = (player.score + delta).max(0.0);
        }
    }
}

/// Count down active timers by `dt_ms` and expire the ones that run out
///
/// Returns the kinds that expired this call.
pub fn update_timers(player: &mut PlayerState, dt_ms: f32) -> Vec<BuffKind> {
    let dt_ms = sanitize(dt_ms);
    let mut expired = Vec::new();

    for kind in BuffKind::TIMED {
        let Some(status) = player.buffs.get_mut(kind) else {
            continue;
        };
        if !status.active {
            continue;
        }
        status.remaining_ms -= dt_ms;
        if status.remaining_ms <= 0.0 {
            *status = BuffStatus::default();
            expired.push(kind);
        }
    }

    for &kind in &expired {
        if kind == BuffKind::Boost {
            player.speed = player.base_speed;
        }
        log::debug!("Buff {} expired", kind.as_str());
    }

    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayField;

    const BOOST: f32 = 1.7;

    fn player() -> PlayerState {
        PlayerState::new(&PlayField::default(), &Tuning::default())
    }

    fn collect(p: &mut PlayerState, kind: BuffKind) {
        activate(p, kind, &Tuning::default());
    }

    #[test]
    fn test_bands_cover_65_percent() {
        assert_eq!(BuffKind::from_roll(0.0), Some(BuffKind::Shield));
        assert_eq!(BuffKind::from_roll(0.149), Some(BuffKind::Shield));
        assert_eq!(BuffKind::from_roll(0.15), Some(BuffKind::DoubleScore));
        assert_eq!(BuffKind::from_roll(0.3), Some(BuffKind::SlowTime));
        assert_eq!(BuffKind::from_roll(0.4), Some(BuffKind::Boost));
        assert_eq!(BuffKind::from_roll(0.5), Some(BuffKind::ScorePlus));
        assert_eq!(BuffKind::from_roll(0.6), Some(BuffKind::ScoreMinus));
        assert_eq!(BuffKind::from_roll(0.65), None);
        assert_eq!(BuffKind::from_roll(0.99), None);
    }

    #[test]
    fn test_reactivation_resets_instead_of_extending() {
        let mut p = player();
        collect(&mut p, BuffKind::Shield);
        update_timers(&mut p, 4000.0);
        assert_eq!(p.buffs.get(BuffKind::Shield).remaining_ms, 1000.0);

        collect(&mut p, BuffKind::Shield);
        assert_eq!(p.buffs.get(BuffKind::Shield).remaining_ms, 5000.0);
        assert!(p.buffs.is_active(BuffKind::Shield));
    }

    #[test]
    fn test_boost_speed_invariant() {
        let mut p = player();
        assert_eq!(p.speed, p.base_speed);

        collect(&mut p, BuffKind::Boost);
        assert_eq!(p.speed, p.base_speed * BOOST);

        // Re-collecting mid-boost does not compound the multiplier
        update_timers(&mut p, 1000.0);
        collect(&mut p, BuffKind::Boost);
        assert_eq!(p.speed, p.base_speed * BOOST);

        let expired = update_timers(&mut p, 4000.0);
        assert_eq!(expired, vec![BuffKind::Boost]);
        assert!(!p.buffs.is_active(BuffKind::Boost));
        assert_eq!(p.speed, p.base_speed);
    }

    #[test]
    fn test_expiry_clears_status() {
        let mut p = player();
        collect(&mut p, BuffKind::DoubleScore);
        assert!(update_timers(&mut p, 5999.0).is_empty());
        assert_eq!(update_timers(&mut p, 1.0), vec![BuffKind::DoubleScore]);
        assert_eq!(p.buffs.get(BuffKind::DoubleScore), BuffStatus::default());
    }

    #[test]
    fn test_score_pickups() {
        let mut p = player();
        collect(&mut p, BuffKind::ScorePlus);
        assert_eq!(p.score, 100.0);

        p.score = 50.0;
        collect(&mut p, BuffKind::ScoreMinus);
        assert_eq!(p.score, 0.0);

        // Instantaneous kinds never occupy a slot
        assert!(!p.buffs.is_active(BuffKind::ScorePlus));
    }

    #[test]
    fn test_degenerate_dt_is_ignored() {
        let mut p = player();
        collect(&mut p, BuffKind::SlowTime);
        update_timers(&mut p, f32::NAN);
        update_timers(&mut p, -500.0);
        assert_eq!(p.buffs.get(BuffKind::SlowTime).remaining_ms, 5000.0);
    }

    #[test]
    fn test_nominal_durations() {
        let tuning = Tuning::default();
        let durations: Vec<_> = BuffKind::ALL
            .into_iter()
            .map(|kind| kind.nominal_duration_ms(&tuning))
            .collect();
        assert_eq!(
            durations,
            vec![Some(5000.0), Some(6000.0), Some(5000.0), Some(4000.0), None, None]
        );
    }

    #[test]
    fn test_effects_follow_tuning() {
        let tuning = Tuning {
            boost_ms: 1000.0,
            boost_factor: 2.0,
            score_pickup_delta: 25.0,
            ..Default::default()
        };
        let mut p = player();
        activate(&mut p, BuffKind::Boost, &tuning);
        assert_eq!(p.speed, p.base_speed * 2.0);
        assert_eq!(p.buffs.get(BuffKind::Boost).remaining_ms, 1000.0);

        activate(&mut p, BuffKind::ScorePlus, &tuning);
        activate(&mut p, BuffKind::ScoreMinus, &tuning);
        activate(&mut p, BuffKind::ScorePlus, &tuning);
        assert_eq!(p.score, 25.0);
    }

    #[test]
    fn test_colors_and_labels_are_distinct() {
        for (i, a) in BuffKind::ALL.iter().enumerate() {
            assert!(!a.label().is_empty());
            assert_eq!(a.color() & 0xFF, 0xFF, "{} should be opaque", a.as_str());
            for b in &BuffKind::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.color(), b.color());
            }
        }
        assert_eq!(BuffKind::DoubleScore.label(), "x2");
        assert_eq!(BuffKind::ScoreMinus.color(), 0xFF3333FF);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(BuffKind::parse("doublescore"), Some(BuffKind::DoubleScore));
        assert_eq!(BuffKind::parse("laser"), None);
        for kind in BuffKind::ALL {
            assert_eq!(BuffKind::parse(kind.as_str()), Some(kind));
        }
    }
}
