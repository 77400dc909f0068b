#![cfg(test)]

use core::error::Error;
use css_color::Color;
use css_styles::{
    Align, BorderImageRepeat, Display, Filter, Justify, OverflowMode, Styles, TimingFunction,
    Transform, is_inherited, is_known_property,
};
use css_values_units::{Length, LengthUnit};

const EPSILON: f32 = 1e-4;

#[test]
fn set_then_is_default_round_trip() {
    let mut styles = Styles::new();
    assert!(styles.is_default("width"));
    assert!(styles.set("Width", "100px"));
    assert!(!styles.is_default("width"));
    assert_eq!(styles.width, Some(Length::px(100.0)));
    assert!(styles.clear("width"));
    assert!(styles.is_default("width"));
}

#[test]
fn rejected_values_leave_styles_untouched() {
    let mut styles = Styles::new();
    assert!(styles.set("height", "5px"));
    assert!(!styles.set("height", "tall"));
    assert_eq!(styles.height, Some(Length::px(5.0)));
    assert!(!styles.set("no-such-property", "1px"));
    assert!(!styles.set("margin", "1px 2px 3px 4px 5px"));
    assert!(styles.is_default("margin"));
}

#[test]
fn set_raw_applies_every_declaration() {
    let mut styles = Styles::new();
    assert!(styles.set_raw("width: 100px; height: 5px"));
    assert_eq!(styles.width, Some(Length::px(100.0)));
    assert_eq!(styles.height, Some(Length::px(5.0)));
    assert!(!styles.set_raw("opacity: 0.5; bogus"));
    assert_eq!(styles.opacity, Some(0.5));
}

#[test]
fn important_is_ignored() {
    let mut styles = Styles::new();
    assert!(styles.set("display", "none !important"));
    assert_eq!(styles.display, Some(Display::None));
}

#[test]
fn margin_shorthand_expands_like_css() {
    let mut styles = Styles::new();
    assert!(styles.set("margin", "1px 2px 3px"));
    assert_eq!(styles.margin_top, Some(Length::px(1.0)));
    assert_eq!(styles.margin_right, Some(Length::px(2.0)));
    assert_eq!(styles.margin_bottom, Some(Length::px(3.0)));
    assert_eq!(styles.margin_left, Some(Length::px(2.0)));
    assert!(!styles.is_default("margin"));
    assert!(styles.is_default("padding"));
}

#[test]
fn shorthand_is_default_only_when_all_longhands_unset() {
    let mut styles = Styles::new();
    assert!(styles.set("padding-left", "4px"));
    assert!(!styles.is_default("padding"));
    assert!(styles.clear("padding"));
    assert!(styles.is_default("padding-left"));
}

#[test]
fn border_shorthands() {
    let mut styles = Styles::new();
    assert!(styles.set("border", "2px solid red"));
    assert_eq!(styles.border_left_width, Some(Length::px(2.0)));
    assert_eq!(styles.border_top_color, Color::parse("red"));
    assert!(styles.set("border-bottom", "none"));
    assert_eq!(styles.border_bottom_width, Some(Length::px(0.0)));
    assert!(styles.set("border-radius", "4px 8px"));
    assert_eq!(styles.border_bottom_right_radius, Some(Length::px(4.0)));
    assert_eq!(styles.border_bottom_left_radius, Some(Length::px(8.0)));
    assert!(!styles.set("border", "2px 3px"));
}

#[test]
fn flex_shorthand_forms() {
    let mut styles = Styles::new();
    assert!(styles.set("flex", "2"));
    assert_eq!(
        (styles.flex_grow, styles.flex_shrink, styles.flex_basis.clone()),
        (Some(2.0), Some(1.0), Some(Length::px(0.0)))
    );
    assert!(styles.set("flex", "none"));
    assert_eq!((styles.flex_grow, styles.flex_shrink), (Some(0.0), Some(0.0)));
    assert!(styles.set("flex", "1 0 50%"));
    assert_eq!(styles.flex_basis, Some(Length::percent(50.0)));
    assert!(styles.set("flex-flow", "column wrap"));
    assert!(styles.set("justify-content", "space-between"));
    assert_eq!(styles.justify_content, Some(Justify::SpaceBetween));
    assert!(styles.set("align-items", "center"));
    assert_eq!(styles.align_items, Some(Align::Center));
}

#[test]
fn gap_and_overflow() {
    let mut styles = Styles::new();
    assert!(styles.set("gap", "4px 8px"));
    assert_eq!(styles.row_gap, Some(Length::px(4.0)));
    assert_eq!(styles.column_gap, Some(Length::px(8.0)));
    assert!(styles.set("overflow", "hidden scroll"));
    assert_eq!(styles.overflow_x, Some(OverflowMode::Hidden));
    assert!(styles.is_scrollable());
}

#[test]
fn background_shorthand_and_flags() {
    let mut styles = Styles::new();
    assert!(!styles.has_background());
    assert!(styles.set("background-color", "transparent"));
    assert!(!styles.has_background());
    assert!(styles.set("background", "url(\"ui/bg.png\") no-repeat #123"));
    assert_eq!(styles.background_image.as_deref(), Some("ui/bg.png"));
    assert!(styles.has_background());
    assert!(styles.set("background-size", "cover"));
    assert_eq!(
        styles.background_size_y.as_ref().map(|length| length.unit),
        Some(LengthUnit::Cover)
    );
    assert!(styles.set("background-position", "top right"));
    assert_eq!(styles.background_position_x, Some(Length::percent(100.0)));
    assert_eq!(styles.background_position_y, Some(Length::percent(0.0)));
}

#[test]
fn shadows_and_filters() -> Result<(), Box<dyn Error>> {
    let mut styles = Styles::new();
    assert!(styles.set("box-shadow", "0 2px 4px rgba(0, 0, 0, 0.5), inset 1px 1px red"));
    let shadows = styles.box_shadow.as_ref().ok_or("box-shadow unset")?;
    assert_eq!(shadows.0.len(), 2);
    let second = shadows.0.get(1).ok_or("missing second shadow")?;
    assert!(second.inset);
    assert_eq!(second.blur, Length::px(0.0));

    assert!(!styles.has_filter());
    assert!(styles.set("filter", "blur(4px) brightness(150%)"));
    assert!(styles.has_filter());
    assert_eq!(
        styles.filter.as_ref().and_then(|list| list.0.get(1)),
        Some(&Filter::Brightness(1.5))
    );
    assert!(styles.set("backdrop-filter", "none"));
    assert!(!styles.has_backdrop_filter());
    assert!(!styles.set("filter", "wobble(3)"));
    Ok(())
}

#[test]
fn transforms() -> Result<(), Box<dyn Error>> {
    let mut styles = Styles::new();
    assert!(styles.set("transform", "translateX(10px) rotate(0.25turn) scale(2)"));
    let list = styles.transform.as_ref().ok_or("transform unset")?;
    assert_eq!(list.0.first(), Some(&Transform::Translate(Length::px(10.0), Length::px(0.0))));
    match list.0.get(1) {
        Some(Transform::Rotate(degrees)) => assert!((degrees - 90.0).abs() < EPSILON),
        other => return Err(format!("expected rotate, found {other:?}").into()),
    }
    assert_eq!(list.0.get(2), Some(&Transform::Scale(2.0, 2.0)));
    Ok(())
}

#[test]
fn border_image_with_widths() -> Result<(), Box<dyn Error>> {
    let mut styles = Styles::new();
    assert!(styles.set("border-image", "url(frame.png) 10 20 / 4px round fill"));
    let image = styles.border_image.as_ref().ok_or("border-image unset")?;
    assert_eq!(image.source, "frame.png");
    assert_eq!(image.slice.right, Length::px(20.0));
    assert_eq!(image.width.as_ref().map(|width| width.left.clone()), Some(Length::px(4.0)));
    assert_eq!(image.repeat, BorderImageRepeat::Round);
    assert!(image.fill);
    assert!(styles.has_background());
    assert!(!styles.set("border-image", "10 20"));
    Ok(())
}

#[test]
fn transitions_and_easing() -> Result<(), Box<dyn Error>> {
    let mut styles = Styles::new();
    assert!(styles.set("transition", "opacity 0.2s ease-out, width 300ms linear 100ms"));
    let list = styles.transition.as_ref().ok_or("transition unset")?;
    let width = list.find("width").ok_or("no width transition")?;
    assert!((width.duration - 0.3).abs() < EPSILON);
    assert!((width.delay - 0.1).abs() < EPSILON);
    assert_eq!(width.timing, TimingFunction::Linear);
    assert!(list.find("height").is_none());

    let ease = TimingFunction::EaseInOut;
    assert!(ease.evaluate(0.0).abs() < 1e-3);
    assert!((ease.evaluate(0.5) - 0.5).abs() < 1e-3);
    assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-3);
    assert!((TimingFunction::Steps(4, false).evaluate(0.3) - 0.25).abs() < EPSILON);
    Ok(())
}

#[test]
fn animation_shorthand() {
    let mut styles = Styles::new();
    assert!(styles.set("animation", "pulse 2s infinite alternate ease-in"));
    assert_eq!(styles.animation_name.as_deref(), Some("pulse"));
    assert_eq!(styles.animation_duration, Some(2.0));
    assert_eq!(styles.animation_iteration_count, Some(f32::INFINITY));
    assert_eq!(styles.animation_timing_function, Some(TimingFunction::EaseIn));
    assert!(!styles.is_default("animation"));
}

#[test]
fn apply_only_copies_set_properties() {
    let mut base = Styles::new();
    assert!(base.set_raw("width: 10px; color: red"));
    let mut overlay = Styles::new();
    assert!(overlay.set("width", "20px"));
    base.apply(&overlay);
    assert_eq!(base.width, Some(Length::px(20.0)));
    assert_eq!(base.color, Color::parse("red"));
}

#[test]
fn inheritance_table() {
    assert!(is_inherited("color"));
    assert!(is_inherited("font-size"));
    assert!(!is_inherited("width"));
    let mut parent = Styles::new();
    assert!(parent.set_raw("color: blue; width: 10px; font-weight: bold"));
    let mut child = Styles::new();
    child.inherit_from(&parent);
    assert_eq!(child.color, Color::parse("blue"));
    assert_eq!(child.font_weight, Some(700));
    assert_eq!(child.width, None);
}

#[test]
fn known_property_names() {
    assert!(is_known_property("Margin"));
    assert!(is_known_property("border-top-left-radius"));
    assert!(!is_known_property("grid-template"));
}
