//! Fixed timestep simulation tick
//!
//! Steps the ball once per call and classifies where it ended up. Row 0 is
//! the top of the pitch, so a negative y is above the top wall.

use glam::IVec2;

use super::pitch::PitchGrid;
use super::state::{GameEvent, GamePhase, MatchState, Side};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Serve the next round after a goal or fault
    pub serve: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) -> Option<GameEvent> {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return None;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if input.serve && matches!(state.phase, GamePhase::RoundOver | GamePhase::Fault) {
        state.start_round();
        return None;
    }

    if state.phase != GamePhase::Playing {
        return None;
    }
    let grid = state.grid.as_ref()?;

    state.time_ticks += 1;
    let ball = state.ball.step(grid);

    let event = classify_exit(grid, ball.position)?;
    match event {
        GameEvent::Goal { scorer } => {
            state.score.award(scorer);
            state.phase = GamePhase::RoundOver;
            log::info!(
                "Goal for {:?} at tick {} (score {}-{})",
                scorer,
                state.time_ticks,
                state.score.left,
                state.score.right
            );
        }
        GameEvent::WallBreach { position } => {
            state.phase = GamePhase::Fault;
            log::warn!("Ball escaped the pitch vertically at {:?}", position);
        }
    }
    Some(event)
}

/// Classify a ball position against the pitch bounds.
///
/// Vertical escapes are checked first; leaving through the left edge is a goal
/// for the right side and vice versa.
pub fn classify_exit(grid: &PitchGrid, position: IVec2) -> Option<GameEvent> {
    if position.y < 0 || position.y >= grid.height() {
        return Some(GameEvent::WallBreach { position });
    }
    if position.x < 0 {
        return Some(GameEvent::Goal {
            scorer: Side::Left.opponent(),
        });
    }
    if position.x >= grid.width() {
        return Some(GameEvent::Goal {
            scorer: Side::Right.opponent(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::ball::{BallSimulator, BallState};
    use crate::sim::state::Score;

    fn settings() -> Settings {
        Settings {
            seed: 12345,
            ..Default::default()
        }
    }

    fn match_with_ball(position: IVec2, velocity: IVec2) -> MatchState {
        let grid = PitchGrid::new(100.0, 100.0, 1.0, 1).unwrap();
        let mut state = MatchState::with_grid(settings(), grid);
        state.ball = BallSimulator::from_state(BallState { position, velocity }, &state.settings);
        state
    }

    #[test]
    fn test_classify_exit() {
        let grid = PitchGrid::new(100.0, 100.0, 1.0, 1).unwrap();
        assert_eq!(classify_exit(&grid, IVec2::new(50, 50)), None);
        assert_eq!(classify_exit(&grid, IVec2::new(0, 0)), None);
        assert_eq!(classify_exit(&grid, IVec2::new(99, 99)), None);
        assert_eq!(
            classify_exit(&grid, IVec2::new(-1, 50)),
            Some(GameEvent::Goal { scorer: Side::Right })
        );
        assert_eq!(
            classify_exit(&grid, IVec2::new(100, 50)),
            Some(GameEvent::Goal { scorer: Side::Left })
        );
        assert_eq!(
            classify_exit(&grid, IVec2::new(-1, 100)),
            Some(GameEvent::WallBreach { position: IVec2::new(-1, 100) })
        );
    }

    #[test]
    fn test_tick_top_wall_bounce() {
        let mut state = match_with_ball(IVec2::new(50, 1), IVec2::new(2, -3));
        assert_eq!(tick(&mut state, &TickInput::default()), None);
        assert_eq!(state.ball().velocity(), IVec2::new(2, 3));
        assert_eq!(state.ball().position(), IVec2::new(52, 4));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_goal_then_serve() {
        let mut state = match_with_ball(IVec2::new(1, 50), IVec2::new(-3, 1));
        let event = tick(&mut state, &TickInput::default());
        assert_eq!(event, Some(GameEvent::Goal { scorer: Side::Right }));
        assert_eq!(state.phase, GamePhase::RoundOver);
        assert_eq!(state.score.right, 1);

        // Round over: no more stepping
        let position = state.ball().position();
        assert_eq!(tick(&mut state, &TickInput::default()), None);
        assert_eq!(state.ball().position(), position);

        let serve = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &serve);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball().position(), IVec2::new(50, 50));
    }

    #[test]
    fn test_tick_wall_breach() {
        // Open row, moving faster than the wall band is deep
        let mut state = match_with_ball(IVec2::new(50, 2), IVec2::new(1, -4));
        let event = tick(&mut state, &TickInput::default());
        assert_eq!(
            event,
            Some(GameEvent::WallBreach { position: IVec2::new(51, -2) })
        );
        assert_eq!(state.phase, GamePhase::Fault);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = match_with_ball(IVec2::new(50, 50), IVec2::new(2, 1));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball().position(), IVec2::new(50, 50));

        // Unpause steps in the same tick
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball().position(), IVec2::new(52, 51));
    }

    #[test]
    fn test_tick_awaiting_geometry_is_noop() {
        let mut state = MatchState::new(settings());
        assert_eq!(tick(&mut state, &TickInput::default()), None);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_rally_off_paddle() {
        let grid = PitchGrid::new(100.0, 100.0, 1.0, 1)
            .unwrap()
            .with_paddle(3, 50, 6, Side::Left)
            .unwrap();
        let mut state = MatchState::with_grid(settings(), grid);
        state.ball = BallSimulator::from_state(
            BallState {
                position: IVec2::new(7, 50),
                velocity: IVec2::new(-4, 0),
            },
            &state.settings,
        );

        // (7,50) -> (3,50) lands on the flat paddle face, then bounces back
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball().position(), IVec2::new(3, 50));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball().velocity(), IVec2::new(4, 0));
        assert_eq!(state.ball().position(), IVec2::new(7, 50));
    }

    #[test]
    fn test_determinism() {
        let grid = PitchGrid::new(600.0, 1000.0, 10.0, 5).unwrap();
        let mut state1 = MatchState::with_grid(settings(), grid.clone());
        let mut state2 = MatchState::with_grid(settings(), grid);

        for _ in 0..200 {
            let e1 = tick(&mut state1, &TickInput::default());
            let e2 = tick(&mut state2, &TickInput::default());
            assert_eq!(e1, e2);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball().state(), state2.ball().state());
        assert_eq!(state1.score, state2.score);
    }
}
