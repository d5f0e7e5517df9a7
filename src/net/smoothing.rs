//! Client-side snapshot smoothing
//!
//! Each received snapshot moves the displayed state a fixed fraction of the
//! way toward it, hiding jitter between irregular network reads.

use crate::consts::NET_SMOOTHING;
use crate::sim::GameState;

const N: usize = GameState::FIELD_COUNT;

#[derive(Debug, Clone)]
pub struct SnapshotSmoother {
    factor: f32,
    current: Option<[f32; N]>,
}

impl Default for SnapshotSmoother {
    fn default() -> Self {
        Self::new(NET_SMOOTHING)
    }
}

impl SnapshotSmoother {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            current: None,
        }
    }

    /// Blend in a freshly received snapshot and return the displayed state.
    /// The first snapshot is taken as-is.
    pub fn push(&mut self, received: [f32; N]) -> GameState {
        let next = match self.current {
            None => received,
            Some(cur) => std::array::from_fn(|i| cur[i] + self.factor * (received[i] - cur[i])),
        };
        self.current = Some(next);
        GameState::from_fields(next)
    }

    /// Raw blended fields (scores not yet rounded)
    pub fn fields(&self) -> Option<[f32; N]> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_snapshot_taken_verbatim() {
        let mut s = SnapshotSmoother::default();
        let state = s.push([400.0, 300.0, 5.0, 0.0, 250.0, 250.0, 1.0, 2.0]);
        assert_eq!(state.ball_pos.x, 400.0);
        assert_eq!((state.score_left, state.score_right), (1, 2));
    }

    #[test]
    fn test_blend_step() {
        let mut s = SnapshotSmoother::default();
        s.push([0.0; N]);
        s.push([100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let f = s.fields().unwrap();
        assert!((f[0] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_scores_round_not_truncate() {
        let mut s = SnapshotSmoother::default();
        s.push([0.0; N]);
        // 0.1 of the way to 10 is 1.0; rounding keeps it at 1 even with float error
        let state = s.push([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 0.0]);
        assert_eq!(state.score_left, 1);

        let mut s = SnapshotSmoother::default();
        s.push([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
        let state = s.push([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 7.0, 0.0]);
        // 2.5 rounds away from zero
        assert_eq!(state.score_left, 3);
    }

    proptest! {
        #[test]
        fn converges_to_constant_input(start in -1000.0f32..1000.0, target in -1000.0f32..1000.0) {
            let mut s = SnapshotSmoother::default();
            s.push([start; N]);
            for _ in 0..200 {
                s.push([target; N]);
            }
            let f = s.fields().unwrap();
            for v in f {
                prop_assert!((v - target).abs() < 0.01);
            }
        }
    }
}
