//! Per-frame dispatch
//!
//! One call per frame: input edges in, state advanced, changed pixels
//! redrawn. The modal screens (title, auto-launch countdown, pause menu,
//! leaderboard) are phases checked against the clock every frame, never
//! nested loops.

use super::pause::{PauseAction, PauseOutcome};
use super::physics;
use super::state::{Descend, GameEvent, GamePhase, GameState, LossCause, SimError};
use crate::display::Display;
use crate::display::render;
use crate::highscores::HighScoreStore;
use crate::input::Buttons;
use crate::system::SystemControl;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Buttons currently down (direction keys act on level)
    pub held: Buttons,
    /// Buttons that went down this frame (A/B/Start act on edge)
    pub pressed: Buttons,
    /// Monotonic milliseconds
    pub now_ms: u64,
    /// Let the tracker play a started game
    pub autopilot: bool,
}

/// Advance the game by one frame
pub fn tick<D, H, S>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    scores: &mut H,
    system: &mut S,
) -> Result<(), SimError>
where
    D: Display + ?Sized,
    H: HighScoreStore + ?Sized,
    S: SystemControl + ?Sized,
{
    state.events.clear();

    if input.pressed.start && matches!(state.phase, GamePhase::Aiming | GamePhase::InFlight) {
        state.pause(input.now_ms);
        render::draw_pause_menu(display, &state.config, &state.pause);
        return Ok(());
    }

    match state.phase {
        GamePhase::Title => tick_title(state, input, display),
        GamePhase::Aiming => tick_aiming(state, input, display),
        GamePhase::InFlight => tick_in_flight(state, input, display),
        GamePhase::Paused => tick_paused(state, input, display, system),
        GamePhase::GameOver => tick_game_over(state, input, display, scores),
    }
}

/// A or the boot button takes over from attract mode
fn wants_start(input: &TickInput) -> bool {
    input.pressed.a || input.held.boot
}

fn tick_title<D: Display + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
) -> Result<(), SimError> {
    let until = match state.title_until_ms {
        Some(until) => until,
        None => {
            let until = input.now_ms + state.config.title_ms;
            state.title_until_ms = Some(until);
            render::draw_title(display, &state.config, &state.paddle);
            until
        }
    };

    if let Some(old_x) = state.paddle.oscillate(state.config.screen_width) {
        render::draw_paddle_moved(display, &state.paddle, old_x);
    }

    if input.pressed.a {
        state.start_game(display)?;
        render::draw_game_view(display, state);
    } else if input.now_ms >= until {
        log::info!("Title timed out, entering attract mode");
        state.title_until_ms = None;
        state.reset_run(display)?;
        render::draw_game_view(display, state);
    }
    Ok(())
}

fn tick_aiming<D: Display + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
) -> Result<(), SimError> {
    let now = input.now_ms;
    let len = state.config.aim_indicator_len;

    if state.is_attract() && wants_start(input) {
        state.start_game(display)?;
        render::draw_game_view(display, state);
        return Ok(());
    }

    // Countdown with a random angle when nobody is aiming
    if state.is_attract() || input.autopilot {
        let launch_at = match state.auto_launch_at_ms {
            Some(at) => at,
            None => {
                state.ball.launch_angle = state.random_launch_angle();
                let at = now + state.config.auto_launch_delay_ms;
                state.auto_launch_at_ms = Some(at);
                at
            }
        };
        render::draw_aim_indicator(display, &mut state.ball, len);
        if now >= launch_at {
            render::erase_aim_indicator(display, &mut state.ball);
            state.launch(now);
            render::draw_ball(display, state.ball.pos, state.ball.radius);
        }
        return Ok(());
    }

    state.ball.rest_on(&state.paddle);
    if input.pressed.a {
        render::erase_aim_indicator(display, &mut state.ball);
        state.launch(now);
        render::draw_ball(display, state.ball.pos, state.ball.radius);
        return Ok(());
    }

    let step = state.config.launch_angle_step;
    let delta = if input.held.left {
        step
    } else if input.held.right {
        -step
    } else {
        0.0
    };
    if delta != 0.0 {
        state.ball.adjust_aim(
            delta,
            state.config.launch_angle_min,
            state.config.launch_angle_max,
        );
    }
    render::draw_aim_indicator(display, &mut state.ball, len);
    Ok(())
}

fn tick_in_flight<D: Display + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
) -> Result<(), SimError> {
    let now = input.now_ms;

    if state.is_attract() && wants_start(input) {
        state.start_game(display)?;
        render::draw_game_view(display, state);
        return Ok(());
    }

    if state.descend_due(now) {
        render::clear_bricks(display, &state.grid);
        match state.check_descend(now, display)? {
            Descend::Overrun => {
                if state.phase != GamePhase::GameOver {
                    render::draw_game_view(display, state);
                }
                return Ok(());
            }
            Descend::Moved | Descend::Idle => {
                render::draw_bricks(display, &state.grid);
                render::draw_loss_boundary(display, &state.config);
            }
        }
    }

    // Paddle first, so the collision test sees where it ends up
    let moved = if state.is_attract() || input.autopilot {
        state.paddle.track(&state.ball, &state.config)
    } else if input.held.left {
        state
            .paddle
            .move_by(-state.paddle.speed, state.config.screen_width)
    } else if input.held.right {
        state
            .paddle
            .move_by(state.paddle.speed, state.config.screen_width)
    } else {
        None
    };
    if let Some(old_x) = moved {
        render::draw_paddle_moved(display, &state.paddle, old_x);
    }

    let bounce = state.config.bounce_factor;
    if state.paddle.collide(&mut state.ball, &mut state.rng, bounce) {
        state.events.push(GameEvent::PaddleHit);
    }

    let old_pos = state.ball.pos;
    let outcome = physics::step(&mut state.ball, &mut state.grid, &state.config);
    if outcome.walls.header_dirty {
        state.redraw_header = true;
    }

    render::erase_ball(display, old_pos, state.ball.radius);

    if outcome.lost {
        state.lose_life(LossCause::FloorMiss, display)?;
        if state.phase != GamePhase::GameOver {
            render::draw_game_view(display, state);
        }
        return Ok(());
    }

    let mut cleared = false;
    if let Some(contact) = outcome.brick {
        cleared = state.register_hit(contact.hit);
    }
    // Repaint the cell the ball last touched; the erase above may have
    // clipped it
    if let Some((row, col)) = state.ball.last_collided {
        render::draw_brick(display, &state.grid, row, col);
    }
    render::draw_loss_boundary(display, &state.config);
    render::draw_ball(display, state.ball.pos, state.ball.radius);

    if cleared {
        state.next_level(display)?;
        render::draw_game_view(display, state);
        return Ok(());
    }

    if state.redraw_header {
        render::draw_header(display, state);
        state.redraw_header = false;
    }
    if state.is_attract() {
        render::draw_start_text(display, &state.config);
    }
    Ok(())
}

fn tick_paused<D, S>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    system: &mut S,
) -> Result<(), SimError>
where
    D: Display + ?Sized,
    S: SystemControl + ?Sized,
{
    match state.pause.handle(&input.pressed) {
        PauseOutcome::Idle => {}
        PauseOutcome::Moved => {
            render::draw_pause_menu(display, &state.config, &state.pause);
        }
        PauseOutcome::Activated(action) => {
            let leaving = state.pause.selected().exits();
            match action {
                PauseAction::SetBrightness(duty) => system.set_brightness(duty),
                PauseAction::SetLedLevel(level) => system.set_led_level(level),
                PauseAction::ResetGame => {
                    log::info!("Game reset from pause menu");
                    state.events.push(GameEvent::GameReset);
                    state.reset_run(display)?;
                    render::draw_game_view(display, state);
                }
                PauseAction::RestartDevice => {
                    state.events.push(GameEvent::RestartRequested);
                    system.restart();
                    state.reboot();
                }
            }
            if !leaving {
                render::draw_pause_menu(display, &state.config, &state.pause);
            }
        }
        PauseOutcome::Resume => {
            state.resume(input.now_ms);
            render::draw_game_view(display, state);
        }
    }
    Ok(())
}

fn tick_game_over<D, H>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    scores: &mut H,
) -> Result<(), SimError>
where
    D: Display + ?Sized,
    H: HighScoreStore + ?Sized,
{
    let until = match state.game_over_until_ms {
        Some(until) => until,
        None => {
            // Attract runs end silently
            let until = if state.game_started {
                let new_high_score = state.record_high_score(scores);
                render::draw_leaderboard(
                    display,
                    &state.config,
                    state.points,
                    state.high_score,
                    new_high_score,
                );
                input.now_ms + state.config.leaderboard_ms
            } else {
                input.now_ms
            };
            state.game_over_until_ms = Some(until);
            until
        }
    };

    if input.now_ms >= until {
        state.finish_game_over(display)?;
        render::draw_game_view(display, state);
    }
    Ok(())
}
