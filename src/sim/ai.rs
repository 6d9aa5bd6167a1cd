//! Computer opponent
//!
//! Deliberately simple: pick a piece, shoot straight at it at a fixed speed,
//! with a little seeded jitter so replays stay deterministic.

use glam::Vec2;
use rand::Rng;

use super::board::Board;
use super::disc::{Disc, DiscKind};
use super::state::Player;
use crate::tuning::{AiTargeting, Tuning};

/// Offsets shorter than this have no usable direction
const MIN_AIM_DISTANCE: f32 = 1e-3;

/// Piece the AI shoots at; the queen only once nothing else is left
pub fn choose_target<'a>(
    discs: &'a [Disc],
    from: Vec2,
    targeting: AiTargeting,
) -> Option<&'a Disc> {
    let mut pieces = discs.iter().filter(|d| d.active && d.kind.keeps_match_alive());
    let target = match targeting {
        AiTargeting::First => pieces.next(),
        AiTargeting::Nearest => pieces.min_by(|a, b| {
            a.pos
                .distance_squared(from)
                .partial_cmp(&b.pos.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    };
    target.or_else(|| {
        discs
            .iter()
            .find(|d| d.active && d.kind == DiscKind::Queen)
    })
}

/// Unit direction from `from` to `to`, never NaN
///
/// Falls back to the board center, then straight at the opponent's side.
pub fn aim_direction(from: Vec2, to: Vec2, board: &Board, player: Player) -> Vec2 {
    let offset = to - from;
    if offset.length() > MIN_AIM_DISTANCE {
        return offset.normalize();
    }
    let to_center = board.center() - from;
    if to_center.length() > MIN_AIM_DISTANCE {
        return to_center.normalize();
    }
    match player {
        Player::One => Vec2::NEG_Y,
        Player::Two => Vec2::Y,
    }
}

/// Striker velocity for the AI's shot, or `None` when there is nothing to hit
pub fn plan_shot<R: Rng>(
    discs: &[Disc],
    board: &Board,
    tuning: &Tuning,
    player: Player,
    rng: &mut R,
) -> Option<Vec2> {
    let striker = discs.iter().find(|d| d.is_striker())?;
    let target = choose_target(discs, striker.pos, tuning.ai_targeting)?;
    let mut dir = aim_direction(striker.pos, target.pos, board, player);

    if tuning.ai_jitter > 0.0 {
        let angle = rng.random_range(-tuning.ai_jitter..=tuning.ai_jitter);
        dir = Vec2::from_angle(angle).rotate(dir);
    }

    log::debug!(
        "AI targets {:?} #{} at {:?}",
        target.kind,
        target.id,
        target.pos
    );
    Some(dir * tuning.ai_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Board, Tuning) {
        let tuning = Tuning::classic();
        (Board::new(600.0, &tuning), tuning)
    }

    fn disc(id: u32, kind: DiscKind, x: f32, y: f32) -> Disc {
        Disc::new(id, kind, Vec2::new(x, y), 10.0)
    }

    #[test]
    fn test_first_skips_queen_and_inactive() {
        let mut discs = vec![
            disc(0, DiscKind::Striker, 300.0, 108.0),
            disc(1, DiscKind::Queen, 300.0, 300.0),
            disc(2, DiscKind::Light, 100.0, 300.0),
            disc(3, DiscKind::Dark, 400.0, 300.0),
        ];
        discs[2].park();
        let target = choose_target(&discs, discs[0].pos, AiTargeting::First).expect("target");
        assert_eq!(target.id, 3);
    }

    #[test]
    fn test_nearest_picks_closest() {
        let discs = vec![
            disc(0, DiscKind::Striker, 300.0, 108.0),
            disc(2, DiscKind::Light, 300.0, 400.0),
            disc(3, DiscKind::Dark, 320.0, 200.0),
        ];
        let target = choose_target(&discs, discs[0].pos, AiTargeting::Nearest).expect("target");
        assert_eq!(target.id, 3);
    }

    #[test]
    fn test_queen_is_last_resort() {
        let discs = vec![
            disc(0, DiscKind::Striker, 300.0, 108.0),
            disc(1, DiscKind::Queen, 300.0, 300.0),
        ];
        let target = choose_target(&discs, discs[0].pos, AiTargeting::First).expect("target");
        assert_eq!(target.kind, DiscKind::Queen);
    }

    #[test]
    fn test_shot_is_colinear_with_target() {
        let (board, tuning) = setup();
        let discs = vec![
            disc(0, DiscKind::Striker, 300.0, 108.0),
            disc(2, DiscKind::Light, 360.0, 188.0),
        ];
        let mut rng = Pcg32::seed_from_u64(3);
        let v = plan_shot(&discs, &board, &tuning, Player::Two, &mut rng).expect("shot");
        assert!((v.length() - tuning.ai_speed).abs() < 1e-4);
        // Offset (60, 80) -> direction (0.6, 0.8)
        assert!((v / tuning.ai_speed - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let (board, mut tuning) = setup();
        tuning.ai_jitter = 0.1;
        let discs = vec![
            disc(0, DiscKind::Striker, 300.0, 108.0),
            disc(2, DiscKind::Light, 300.0, 400.0),
        ];
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let v = plan_shot(&discs, &board, &tuning, Player::Two, &mut rng).expect("shot");
            assert!((v.length() - tuning.ai_speed).abs() < 1e-3);
            let angle = Vec2::Y.angle_to(v);
            assert!(angle.abs() <= 0.1 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_offset_never_nan() {
        let (board, _) = setup();
        let point = Vec2::new(100.0, 100.0);
        let dir = aim_direction(point, point, &board, Player::Two);
        assert!(dir.is_finite());
        assert!((dir.length() - 1.0).abs() < 1e-5);

        let center = board.center();
        let dir = aim_direction(center, center, &board, Player::Two);
        assert_eq!(dir, Vec2::Y);
    }

    #[test]
    fn test_no_target_no_shot() {
        let (board, tuning) = setup();
        let discs = vec![disc(0, DiscKind::Striker, 300.0, 108.0)];
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(plan_shot(&discs, &board, &tuning, Player::Two, &mut rng).is_none());
    }
}
