//! `transition` and easing functions.

use css_syntax::{function_call, split_top_level, split_whitespace_top_level};
use css_values_units::{number_from_str, time_from_str};

/// Easing curve of a transition or animation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TimingFunction {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
    /// Step count and whether the jump happens at the start of each step.
    Steps(u32, bool),
}

impl TimingFunction {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "linear" => return Some(Self::Linear),
            "ease" => return Some(Self::Ease),
            "ease-in" => return Some(Self::EaseIn),
            "ease-out" => return Some(Self::EaseOut),
            "ease-in-out" => return Some(Self::EaseInOut),
            "step-start" => return Some(Self::Steps(1, true)),
            "step-end" => return Some(Self::Steps(1, false)),
            _ => {}
        }
        let (name, arguments) = function_call(trimmed)?;
        let parts = split_top_level(arguments, ',');
        if name.eq_ignore_ascii_case("cubic-bezier") {
            let values = parts
                .iter()
                .map(|part| number_from_str(part))
                .collect::<Option<Vec<f32>>>()?;
            return match values.as_slice() {
                &[x1, y1, x2, y2] if (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2) => {
                    Some(Self::CubicBezier(x1, y1, x2, y2))
                }
                _ => None,
            };
        }
        if name.eq_ignore_ascii_case("steps") {
            let count = parts.first()?.parse::<u32>().ok().filter(|count| *count > 0)?;
            let jump_start = match parts.get(1).map(|part| part.to_ascii_lowercase()) {
                None => false,
                Some(position) => match position.as_str() {
                    "start" | "jump-start" => true,
                    "end" | "jump-end" => false,
                    _ => return None,
                },
            };
            return Some(Self::Steps(count, jump_start));
        }
        None
    }

    /// Eased output for linear `progress` in `0.0..=1.0`.
    pub fn evaluate(self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => progress,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, progress),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, progress),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, progress),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, progress),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, progress),
            Self::Steps(count, jump_start) => {
                let steps = count as f32;
                let taken = if jump_start {
                    (progress * steps).floor() + 1.0
                } else {
                    (progress * steps).floor()
                };
                (taken / steps).min(1.0)
            }
        }
    }
}

/// One coordinate of a cubic Bézier with end points 0 and 1.
fn bezier_axis(first: f32, second: f32, time: f32) -> f32 {
    let inverse = 1.0 - time;
    (3.0 * inverse * inverse * time).mul_add(
        first,
        (3.0 * inverse * time * time).mul_add(second, time * time * time),
    )
}

/// Solve `x(t) = progress` by bisection and return `y(t)`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    let mut low = 0.0f32;
    let mut high = 1.0f32;
    let mut time = progress;
    for _ in 0..32 {
        let estimate = bezier_axis(x1, x2, time);
        if (estimate - progress).abs() < 1e-5 {
            break;
        }
        if estimate < progress {
            low = time;
        } else {
            high = time;
        }
        time = (low + high) * 0.5;
    }
    bezier_axis(y1, y2, time)
}

/// One `transition` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Property name, or `all`.
    pub property: String,
    /// Seconds.
    pub duration: f32,
    /// Seconds.
    pub delay: f32,
    pub timing: TimingFunction,
}

impl Transition {
    /// Parse `[<property>] <duration> [<timing>] [<delay>]` in any order; the
    /// first time is the duration and the second the delay.
    pub fn parse(text: &str) -> Option<Self> {
        let mut property: Option<String> = None;
        let mut times = Vec::with_capacity(2);
        let mut timing: Option<TimingFunction> = None;
        for token in split_whitespace_top_level(text) {
            if let Some(seconds) = time_from_str(token) {
                if times.len() == 2 {
                    return None;
                }
                times.push(seconds);
            } else if let Some(function) = TimingFunction::parse(token) {
                if timing.replace(function).is_some() {
                    return None;
                }
            } else if property.is_none() {
                property = Some(token.to_ascii_lowercase());
            } else {
                return None;
            }
        }
        Some(Self {
            property: property.unwrap_or_else(|| "all".to_owned()),
            duration: times.first().copied().unwrap_or(0.0),
            delay: times.get(1).copied().unwrap_or(0.0),
            timing: timing.unwrap_or_default(),
        })
    }
}

/// Comma separated transitions; `none` is the empty list.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TransitionList(pub Vec<Transition>);

impl TransitionList {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            return Some(Self::default());
        }
        split_top_level(trimmed, ',')
            .into_iter()
            .map(Transition::parse)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// The last entry naming `property`, or an `all` entry.
    pub fn find(&self, property: &str) -> Option<&Transition> {
        self.0
            .iter()
            .rev()
            .find(|entry| entry.property == "all" || entry.property.eq_ignore_ascii_case(property))
    }
}
