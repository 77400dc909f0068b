//! `@keyframes` animations.

use css_styles::Styles;
use css_syntax::{ParseError, ParseErrorKind};

/// Declarations at one point of an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Position in `0.0..=1.0`.
    pub progress: f32,
    pub styles: Styles,
}

/// A named animation: keyframes sorted by progress, no two at the same point.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct KeyframeBlock {
    name: String,
    frames: Vec<Keyframe>,
}

impl KeyframeBlock {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames in ascending progress.
    #[inline]
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Add a frame in progress order.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::DuplicateKeyframe` when a frame already sits
    /// at `progress`, or `Unexpected` when `progress` is outside `0..=1`.
    pub fn insert(&mut self, progress: f32, styles: Styles) -> Result<(), ParseError> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(ParseError::new(
                ParseErrorKind::Unexpected,
                format!("keyframe position {progress} is outside 0%..100%"),
            ));
        }
        if self.get(progress).is_some() {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateKeyframe,
                format!(
                    "keyframe {}% is defined twice in '{}'",
                    progress * 100.0,
                    self.name
                ),
            ));
        }
        let index = self
            .frames
            .partition_point(|frame| frame.progress < progress);
        self.frames.insert(index, Keyframe { progress, styles });
        Ok(())
    }

    /// The frame exactly at `progress`.
    pub fn get(&self, progress: f32) -> Option<&Keyframe> {
        self.frames
            .iter()
            .find(|frame| (frame.progress - progress).abs() <= f32::EPSILON)
    }

    /// The frames surrounding `progress` and how far between them it lies.
    ///
    /// Before the first or after the last frame the nearest frame is returned
    /// twice with a fraction of `0.0`.
    pub fn around(&self, progress: f32) -> Option<(&Keyframe, &Keyframe, f32)> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        if progress <= first.progress {
            return Some((first, first, 0.0));
        }
        if progress >= last.progress {
            return Some((last, last, 0.0));
        }
        let next_index = self
            .frames
            .partition_point(|frame| frame.progress <= progress);
        let previous = self.frames.get(next_index.checked_sub(1)?)?;
        let next = self.frames.get(next_index)?;
        let span = next.progress - previous.progress;
        let fraction = if span > 0.0 {
            (progress - previous.progress) / span
        } else {
            0.0
        };
        Some((previous, next, fraction))
    }
}

/// Parse one keyframe selector: `from`, `to` or a percentage.
pub(crate) fn parse_keyframe_selector(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("from") {
        return Some(0.0);
    }
    if trimmed.eq_ignore_ascii_case("to") {
        return Some(1.0);
    }
    let percent = trimmed.strip_suffix('%')?.trim_end().parse::<f32>().ok()?;
    (0.0..=100.0)
        .contains(&percent)
        .then_some(percent / 100.0)
}
