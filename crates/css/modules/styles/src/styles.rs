//! The `Styles` record: one optional typed field per longhand property.

use css_color::Color;
use css_syntax::split_declarations;
use css_values_units::{Length, fraction_from_str, number_from_str, time_from_str};

use crate::keywords::{
    Align, AnimationDirection, AnimationFillMode, AnimationPlayState, BackgroundRepeat, Display,
    FlexDirection, FlexWrap, FontStyle, ImageRendering, Justify, OverflowMode, PointerEvents,
    PositionMode, TextAlign, TextOverflow, TextTransform, WhiteSpace, WordBreak,
};
use crate::model::{BorderImage, FilterList, ShadowList, TimingFunction, TransformList, TransitionList};
use crate::parsers::scalars::{
    parse_font_weight, parse_image, parse_integer, parse_iteration_count, parse_ratio, parse_text,
};
use crate::parsers::{set_shorthand, shorthand_longhands};

/// Declare the longhand table: field, type, property name, value parser and
/// whether the property inherits.
macro_rules! properties {
    ($($field:ident: $ty:ty = $name:literal => $parser:expr, inherited = $inherited:literal;)*) => {
        /// Every declared property of a block, or the merged result of a
        /// cascade. `None` means "not set".
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct Styles {
            $(pub $field: Option<$ty>,)*
        }

        /// Every longhand property name.
        pub const LONGHANDS: &[&str] = &[$($name),*];

        /// Whether `name` is an inherited longhand.
        pub fn is_inherited(name: &str) -> bool {
            match name {
                $($name => $inherited,)*
                _ => false,
            }
        }

        impl Styles {
            /// `None` when `name` is not a longhand.
            fn set_longhand(&mut self, name: &str, value: &str) -> Option<bool> {
                match name {
                    $($name => {
                        let parsed = ($parser)(value);
                        let accepted = parsed.is_some();
                        if accepted {
                            self.$field = parsed;
                        }
                        Some(accepted)
                    })*
                    _ => None,
                }
            }

            fn longhand_is_set(&self, name: &str) -> Option<bool> {
                match name {
                    $($name => Some(self.$field.is_some()),)*
                    _ => None,
                }
            }

            fn clear_longhand(&mut self, name: &str) -> bool {
                match name {
                    $($name => {
                        self.$field = None;
                        true
                    })*
                    _ => false,
                }
            }

            /// Copy every property `other` sets over this record. Unset
            /// properties of `other` never clear values here.
            pub fn apply(&mut self, other: &Self) {
                $(if other.$field.is_some() {
                    self.$field.clone_from(&other.$field);
                })*
            }

            /// Fill unset inherited properties from `parent`.
            pub fn inherit_from(&mut self, parent: &Self) {
                $(if $inherited && self.$field.is_none() {
                    self.$field.clone_from(&parent.$field);
                })*
            }

            /// Number of longhands that are set.
            pub fn set_count(&self) -> usize {
                [$(self.$field.is_some()),*]
                    .into_iter()
                    .filter(|set| *set)
                    .count()
            }

            /// Names of the longhands that are set, in table order.
            pub fn set_names(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $(if self.$field.is_some() {
                    names.push($name);
                })*
                names
            }
        }
    };
}

properties! {
    display: Display = "display" => Display::parse, inherited = false;
    position: PositionMode = "position" => PositionMode::parse, inherited = false;
    top: Length = "top" => Length::parse, inherited = false;
    right: Length = "right" => Length::parse, inherited = false;
    bottom: Length = "bottom" => Length::parse, inherited = false;
    left: Length = "left" => Length::parse, inherited = false;
    width: Length = "width" => Length::parse, inherited = false;
    height: Length = "height" => Length::parse, inherited = false;
    min_width: Length = "min-width" => Length::parse, inherited = false;
    max_width: Length = "max-width" => Length::parse, inherited = false;
    min_height: Length = "min-height" => Length::parse, inherited = false;
    max_height: Length = "max-height" => Length::parse, inherited = false;
    aspect_ratio: f32 = "aspect-ratio" => parse_ratio, inherited = false;
    margin_top: Length = "margin-top" => Length::parse, inherited = false;
    margin_right: Length = "margin-right" => Length::parse, inherited = false;
    margin_bottom: Length = "margin-bottom" => Length::parse, inherited = false;
    margin_left: Length = "margin-left" => Length::parse, inherited = false;
    padding_top: Length = "padding-top" => Length::parse, inherited = false;
    padding_right: Length = "padding-right" => Length::parse, inherited = false;
    padding_bottom: Length = "padding-bottom" => Length::parse, inherited = false;
    padding_left: Length = "padding-left" => Length::parse, inherited = false;
    flex_direction: FlexDirection = "flex-direction" => FlexDirection::parse, inherited = false;
    flex_wrap: FlexWrap = "flex-wrap" => FlexWrap::parse, inherited = false;
    justify_content: Justify = "justify-content" => Justify::parse, inherited = false;
    align_items: Align = "align-items" => Align::parse, inherited = false;
    align_self: Align = "align-self" => Align::parse, inherited = false;
    align_content: Align = "align-content" => Align::parse, inherited = false;
    flex_grow: f32 = "flex-grow" => number_from_str, inherited = false;
    flex_shrink: f32 = "flex-shrink" => number_from_str, inherited = false;
    flex_basis: Length = "flex-basis" => Length::parse, inherited = false;
    row_gap: Length = "row-gap" => Length::parse, inherited = false;
    column_gap: Length = "column-gap" => Length::parse, inherited = false;
    overflow_x: OverflowMode = "overflow-x" => OverflowMode::parse, inherited = false;
    overflow_y: OverflowMode = "overflow-y" => OverflowMode::parse, inherited = false;
    order: i32 = "order" => parse_integer, inherited = false;
    z_index: i32 = "z-index" => parse_integer, inherited = false;
    border_top_width: Length = "border-top-width" => Length::parse, inherited = false;
    border_right_width: Length = "border-right-width" => Length::parse, inherited = false;
    border_bottom_width: Length = "border-bottom-width" => Length::parse, inherited = false;
    border_left_width: Length = "border-left-width" => Length::parse, inherited = false;
    border_top_color: Color = "border-top-color" => Color::parse, inherited = false;
    border_right_color: Color = "border-right-color" => Color::parse, inherited = false;
    border_bottom_color: Color = "border-bottom-color" => Color::parse, inherited = false;
    border_left_color: Color = "border-left-color" => Color::parse, inherited = false;
    border_top_left_radius: Length = "border-top-left-radius" => Length::parse, inherited = false;
    border_top_right_radius: Length = "border-top-right-radius" => Length::parse, inherited = false;
    border_bottom_right_radius: Length = "border-bottom-right-radius" => Length::parse, inherited = false;
    border_bottom_left_radius: Length = "border-bottom-left-radius" => Length::parse, inherited = false;
    border_image: BorderImage = "border-image" => BorderImage::parse, inherited = false;
    background_color: Color = "background-color" => Color::parse, inherited = false;
    background_image: String = "background-image" => parse_image, inherited = false;
    background_size_x: Length = "background-size-x" => Length::parse, inherited = false;
    background_size_y: Length = "background-size-y" => Length::parse, inherited = false;
    background_position_x: Length = "background-position-x" => Length::parse, inherited = false;
    background_position_y: Length = "background-position-y" => Length::parse, inherited = false;
    background_repeat: BackgroundRepeat = "background-repeat" => BackgroundRepeat::parse, inherited = false;
    background_tint: Color = "background-tint" => Color::parse, inherited = false;
    image_rendering: ImageRendering = "image-rendering" => ImageRendering::parse, inherited = false;
    opacity: f32 = "opacity" => fraction_from_str, inherited = false;
    box_shadow: ShadowList = "box-shadow" => ShadowList::parse, inherited = false;
    filter: FilterList = "filter" => FilterList::parse, inherited = false;
    backdrop_filter: FilterList = "backdrop-filter" => FilterList::parse, inherited = false;
    transform: TransformList = "transform" => TransformList::parse, inherited = false;
    transform_origin_x: Length = "transform-origin-x" => Length::parse, inherited = false;
    transform_origin_y: Length = "transform-origin-y" => Length::parse, inherited = false;
    mix_blend_mode: String = "mix-blend-mode" => parse_text, inherited = false;
    cursor: String = "cursor" => parse_text, inherited = true;
    pointer_events: PointerEvents = "pointer-events" => PointerEvents::parse, inherited = true;
    color: Color = "color" => Color::parse, inherited = true;
    font_family: String = "font-family" => parse_text, inherited = true;
    font_size: Length = "font-size" => Length::parse, inherited = true;
    font_weight: i32 = "font-weight" => parse_font_weight, inherited = true;
    font_style: FontStyle = "font-style" => FontStyle::parse, inherited = true;
    line_height: Length = "line-height" => Length::parse, inherited = true;
    letter_spacing: Length = "letter-spacing" => Length::parse, inherited = true;
    word_spacing: Length = "word-spacing" => Length::parse, inherited = true;
    text_align: TextAlign = "text-align" => TextAlign::parse, inherited = true;
    text_transform: TextTransform = "text-transform" => TextTransform::parse, inherited = true;
    text_overflow: TextOverflow = "text-overflow" => TextOverflow::parse, inherited = false;
    white_space: WhiteSpace = "white-space" => WhiteSpace::parse, inherited = true;
    word_break: WordBreak = "word-break" => WordBreak::parse, inherited = false;
    text_shadow: ShadowList = "text-shadow" => ShadowList::parse, inherited = false;
    content: String = "content" => parse_text, inherited = false;
    transition: TransitionList = "transition" => TransitionList::parse, inherited = false;
    animation_name: String = "animation-name" => parse_text, inherited = false;
    animation_duration: f32 = "animation-duration" => time_from_str, inherited = false;
    animation_delay: f32 = "animation-delay" => time_from_str, inherited = false;
    animation_iteration_count: f32 = "animation-iteration-count" => parse_iteration_count, inherited = false;
    animation_timing_function: TimingFunction = "animation-timing-function" => TimingFunction::parse, inherited = false;
    animation_direction: AnimationDirection = "animation-direction" => AnimationDirection::parse, inherited = false;
    animation_fill_mode: AnimationFillMode = "animation-fill-mode" => AnimationFillMode::parse, inherited = false;
    animation_play_state: AnimationPlayState = "animation-play-state" => AnimationPlayState::parse, inherited = false;
}

/// Drop a trailing `!important`; the panel cascade has no importance layer.
fn strip_important(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .rfind('!')
        .filter(|&bang| {
            trimmed
                .get(bang.saturating_add(1)..)
                .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("important"))
        })
        .and_then(|bang| trimmed.get(..bang))
        .map_or(trimmed, str::trim_end)
}

impl Styles {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one property from its textual value. Shorthands set all of their
    /// longhands or none of them. Returns `false` for unknown properties and
    /// values that do not parse, leaving the record unchanged.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let property = name.trim().to_ascii_lowercase();
        let value = strip_important(value);
        if value.is_empty() {
            return false;
        }
        if let Some(accepted) = self.set_longhand(&property, value) {
            return accepted;
        }
        set_shorthand(self, &property, value).unwrap_or(false)
    }

    /// Apply `name: value; name: value` text. Every declaration is attempted;
    /// returns whether all of them were accepted.
    pub fn set_raw(&mut self, text: &str) -> bool {
        let mut all_accepted = true;
        for (name, value) in split_declarations(text) {
            if name.is_empty() || !self.set(name, value) {
                all_accepted = false;
            }
        }
        all_accepted
    }

    /// Whether `name` is unset; for a shorthand, whether every longhand is.
    /// Unknown names are reported as default.
    pub fn is_default(&self, name: &str) -> bool {
        let property = name.trim().to_ascii_lowercase();
        if let Some(set) = self.longhand_is_set(&property) {
            return !set;
        }
        shorthand_longhands(&property).is_none_or(|longhands| {
            longhands
                .iter()
                .all(|longhand| self.longhand_is_set(longhand) != Some(true))
        })
    }

    /// Reset a longhand or every longhand of a shorthand; returns whether the
    /// name was known.
    pub fn clear(&mut self, name: &str) -> bool {
        let property = name.trim().to_ascii_lowercase();
        if self.clear_longhand(&property) {
            return true;
        }
        let Some(longhands) = shorthand_longhands(&property) else {
            return false;
        };
        for longhand in longhands {
            self.clear_longhand(longhand);
        }
        true
    }

    /// No property is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set_count() == 0
    }

    /// A visible background: non-transparent color, an image, or a border image.
    pub fn has_background(&self) -> bool {
        self.background_color
            .is_some_and(|color| !color.is_transparent())
            || self
                .background_image
                .as_ref()
                .is_some_and(|image| !image.is_empty())
            || self.border_image.is_some()
    }

    #[inline]
    pub fn has_filter(&self) -> bool {
        self.filter.as_ref().is_some_and(|filters| !filters.is_empty())
    }

    #[inline]
    pub fn has_backdrop_filter(&self) -> bool {
        self.backdrop_filter
            .as_ref()
            .is_some_and(|filters| !filters.is_empty())
    }

    /// Either overflow axis scrolls.
    pub fn is_scrollable(&self) -> bool {
        [self.overflow_x, self.overflow_y]
            .into_iter()
            .flatten()
            .any(|mode| mode == OverflowMode::Scroll)
    }
}
