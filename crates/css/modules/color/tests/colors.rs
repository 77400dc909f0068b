#![cfg(test)]

use core::error::Error;
use css_color::Color;

/// Parse `text` and return its 8-bit channels.
///
/// # Errors
/// Returns an error when the color does not parse.
fn rgba8(text: &str) -> Result<(u8, u8, u8, u8), Box<dyn Error>> {
    Color::parse(text)
        .map(Color::to_rgba8)
        .ok_or_else(|| format!("`{text}` did not parse").into())
}

#[test]
fn hex_forms() -> Result<(), Box<dyn Error>> {
    assert_eq!(rgba8("#f00")?, (255, 0, 0, 255));
    assert_eq!(rgba8("#f008")?, (255, 0, 0, 136));
    assert_eq!(rgba8("#00ff00")?, (0, 255, 0, 255));
    assert_eq!(rgba8("#0000ff80")?, (0, 0, 255, 128));
    Ok(())
}

#[test]
fn named_and_transparent() -> Result<(), Box<dyn Error>> {
    assert_eq!(rgba8("white")?, (255, 255, 255, 255));
    assert_eq!(rgba8("RED")?, (255, 0, 0, 255));
    let clear = Color::parse("transparent").ok_or("transparent did not parse")?;
    assert!(clear.is_transparent());
    Ok(())
}

#[test]
fn rgb_functions() -> Result<(), Box<dyn Error>> {
    assert_eq!(rgba8("rgb(255, 128, 0)")?, (255, 128, 0, 255));
    assert_eq!(rgba8("rgba(0, 0, 255, 0.5)")?, (0, 0, 255, 128));
    assert_eq!(rgba8("rgba(#fff, 50%)")?, (255, 255, 255, 128));
    assert_eq!(rgba8("rgba(rgb(255, 0, 0), 0)")?, (255, 0, 0, 0));
    Ok(())
}

#[test]
fn float_tuples() -> Result<(), Box<dyn Error>> {
    assert_eq!(rgba8("1, 0, 0")?, (255, 0, 0, 255));
    assert_eq!(rgba8("0 0 1 0.5")?, (0, 0, 255, 128));
    assert_eq!(Color::parse("1, 0"), None);
    Ok(())
}

#[test]
fn transforms_nest() -> Result<(), Box<dyn Error>> {
    assert_eq!(rgba8("invert(#000)")?, (255, 255, 255, 255));
    assert_eq!(rgba8("lighten(#000, 0.5)")?, (128, 128, 128, 255));
    assert_eq!(rgba8("mix(#000, #fff)")?, (128, 128, 128, 255));
    assert_eq!(rgba8("mix(#000, #fff, 25%)")?, (64, 64, 64, 255));
    assert_eq!(rgba8("invert(darken(#fff, 100%))")?, (255, 255, 255, 255));
    assert_eq!(rgba8("rgba(mix(red, blue), 0.5)")?, (128, 0, 128, 128));
    Ok(())
}

#[test]
fn rejects_garbage() {
    assert_eq!(Color::parse(""), None);
    assert_eq!(Color::parse("notacolor"), None);
    assert_eq!(Color::parse("darken(#fff)"), None);
    assert_eq!(Color::parse("mix(red)"), None);
}
