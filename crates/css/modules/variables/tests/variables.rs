#![cfg(test)]

use core::error::Error;
use css_syntax::ParseErrorKind;
use css_variables::VariableScope;

#[test]
fn substitutes_names_case_insensitively() -> Result<(), Box<dyn Error>> {
    let mut scope = VariableScope::new();
    scope.set("$Accent", "#FF0000");
    scope.set("gap", "4px");
    assert_eq!(scope.substitute("1px solid $accent")?, "1px solid #FF0000");
    assert_eq!(scope.substitute("$GAP $gap")?, "4px 4px");
    assert_eq!(scope.substitute("no variables")?, "no variables");
    assert_eq!(scope.substitute("$ 5")?, "$ 5");
    Ok(())
}

#[test]
fn missing_variable_is_reported() {
    let scope = VariableScope::new();
    let error = scope.substitute("width: $missing-width").err();
    assert_eq!(
        error.as_ref().map(|err| (err.kind(), err.message().to_owned())),
        Some((
            ParseErrorKind::MissingVariable,
            "missing variable $missing-width".to_owned()
        ))
    );
}

#[test]
fn default_binds_only_when_unbound() {
    let mut scope = VariableScope::new();
    assert!(scope.assign("size", "10px", true));
    assert!(!scope.assign("size", "20px", true));
    assert_eq!(scope.get("size"), Some("10px"));

    let mut later = VariableScope::new();
    later.assign("size", "20px", false);
    assert!(!later.assign("size", "10px", true));
    assert_eq!(later.get("size"), Some("20px"));
}

#[test]
fn block_locals_shadow_and_disappear() {
    let mut scope = VariableScope::new();
    scope.set("color", "red");
    scope.push();
    scope.set("color", "blue");
    scope.set("inner", "1px");
    assert_eq!(scope.get("color"), Some("blue"));
    scope.pop();
    assert_eq!(scope.get("color"), Some("red"));
    assert_eq!(scope.get("inner"), None);
    assert_eq!(scope.globals().len(), 1);
}
