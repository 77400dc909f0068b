//! The `animation` shorthand.

use css_syntax::split_whitespace_top_level;
use css_values_units::time_from_str;

use super::scalars::parse_iteration_count;
use crate::Styles;
use crate::keywords::{AnimationDirection, AnimationFillMode, AnimationPlayState};
use crate::model::TimingFunction;

/// Components of one `animation` value; every field is optional in the text.
#[derive(Default)]
struct AnimationParts {
    name: Option<String>,
    times: Vec<f32>,
    count: Option<f32>,
    timing: Option<TimingFunction>,
    direction: Option<AnimationDirection>,
    fill_mode: Option<AnimationFillMode>,
    play_state: Option<AnimationPlayState>,
}

impl AnimationParts {
    /// Classify `token`; `false` when it fits nowhere.
    fn push(&mut self, token: &str) -> bool {
        if let Some(seconds) = time_from_str(token).filter(|_| self.times.len() < 2) {
            self.times.push(seconds);
            return true;
        }
        if self.count.is_none() {
            if let Some(count) = parse_iteration_count(token) {
                self.count = Some(count);
                return true;
            }
        }
        if self.timing.is_none() {
            if let Some(timing) = TimingFunction::parse(token) {
                self.timing = Some(timing);
                return true;
            }
        }
        if self.direction.is_none() {
            if let Some(direction) = AnimationDirection::parse(token) {
                self.direction = Some(direction);
                return true;
            }
        }
        if self.fill_mode.is_none() {
            if let Some(fill_mode) = AnimationFillMode::parse(token) {
                self.fill_mode = Some(fill_mode);
                return true;
            }
        }
        if self.play_state.is_none() {
            if let Some(play_state) = AnimationPlayState::parse(token) {
                self.play_state = Some(play_state);
                return true;
            }
        }
        if self.name.is_none() {
            self.name = Some(token.to_owned());
            return true;
        }
        false
    }
}

/// `animation: <name> <duration> [<timing>] [<delay>] [<count>] [<direction>]
/// [<fill-mode>] [<play-state>]`, components in any order. Omitted
/// components reset to their initial values.
pub fn set_animation(styles: &mut Styles, value: &str) -> bool {
    let mut parts = AnimationParts::default();
    for token in split_whitespace_top_level(value) {
        if !parts.push(token) {
            return false;
        }
    }
    let Some(name) = parts.name else {
        return false;
    };
    styles.animation_name = Some(name);
    styles.animation_duration = Some(parts.times.first().copied().unwrap_or(0.0));
    styles.animation_delay = Some(parts.times.get(1).copied().unwrap_or(0.0));
    styles.animation_iteration_count = Some(parts.count.unwrap_or(1.0));
    styles.animation_timing_function = Some(parts.timing.unwrap_or_default());
    styles.animation_direction = Some(parts.direction.unwrap_or(AnimationDirection::Normal));
    styles.animation_fill_mode = Some(parts.fill_mode.unwrap_or(AnimationFillMode::None));
    styles.animation_play_state = Some(parts.play_state.unwrap_or(AnimationPlayState::Running));
    true
}
