//! `@mixin` definitions and `@include` argument binding.

use css_syntax::{ParseError, ParseErrorKind, find_top_level, is_identifier_char, split_top_level};
use css_variables::normalize_name;

/// One declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixinParameter {
    /// Normalized name without `$`.
    pub name: String,
    /// Unsubstituted default value.
    pub default: Option<String>,
    /// `$name...`: collects the remaining positional arguments.
    pub variadic: bool,
}

/// One `@include` argument, already substituted at the include site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixinArgument {
    /// Normalized parameter name for `$name: value`, `None` when positional.
    pub name: Option<String>,
    pub value: String,
}

/// A parsed `@mixin`. The body is kept as text and parsed at every include.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixinDefinition {
    /// Normalized name.
    pub name: String,
    pub parameters: Vec<MixinParameter>,
    /// Body text between the braces, comments already stripped.
    pub body: String,
    /// File the mixin was defined in.
    pub file: Option<String>,
    /// Lines before the body in that file.
    pub line_offset: usize,
}

/// Split `name(args)` or `name` into the name and the optional argument text.
pub(crate) fn split_call(text: &str) -> Result<(&str, Option<&str>), ParseError> {
    let trimmed = text.trim();
    let (name, arguments) = match trimmed.find('(') {
        Some(open) => {
            let arguments = trimmed
                .get(open.saturating_add(1)..)
                .and_then(|rest| rest.trim_end().strip_suffix(')'))
                .ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::Unexpected,
                        format!("missing ')' in '{trimmed}'"),
                    )
                })?;
            (trimmed.get(..open).unwrap_or_default().trim(), Some(arguments))
        }
        None => (trimmed, None),
    };
    if name.is_empty() || !name.chars().all(is_identifier_char) {
        return Err(ParseError::new(
            ParseErrorKind::Unexpected,
            format!("invalid mixin name '{name}'"),
        ));
    }
    Ok((name, arguments))
}

/// Whether `text` is a `$name` with a valid identifier after the `$`.
fn variable_name(text: &str) -> Option<&str> {
    let name = text.trim().strip_prefix('$')?;
    (!name.is_empty() && name.chars().all(is_identifier_char)).then_some(name)
}

/// Parse a parameter list such as `$color, $size: 8px, $rest...`.
///
/// # Errors
/// Returns `ParseErrorKind::InvalidMixin` for parameters without `$`, a
/// variadic parameter that is not last, or a repeated name.
pub(crate) fn parse_parameters(text: &str) -> Result<Vec<MixinParameter>, ParseError> {
    let mut parameters = Vec::new();
    if text.trim().is_empty() {
        return Ok(parameters);
    }
    for piece in split_top_level(text, ',') {
        let invalid = |message: String| ParseError::new(ParseErrorKind::InvalidMixin, message);
        if parameters.last().is_some_and(|previous| previous.variadic) {
            return Err(invalid(format!(
                "'{piece}' follows a variadic parameter; only the last parameter may be variadic"
            )));
        }
        let (head, default) = match find_top_level(piece, &[':']) {
            Some((offset, _)) => (
                piece.get(..offset).unwrap_or_default(),
                Some(piece.get(offset.saturating_add(1)..).unwrap_or_default().trim()),
            ),
            None => (piece, None),
        };
        let head = head.trim();
        let (head, variadic) = match head.strip_suffix("...") {
            Some(stripped) => (stripped, true),
            None => (head, false),
        };
        let Some(name) = variable_name(head) else {
            return Err(invalid(format!("parameter '{piece}' must start with '$'")));
        };
        let name = normalize_name(name);
        if parameters.iter().any(|parameter| parameter.name == name) {
            return Err(invalid(format!("parameter ${name} is declared twice")));
        }
        if default.is_some_and(str::is_empty) {
            return Err(invalid(format!("parameter ${name} has an empty default")));
        }
        parameters.push(MixinParameter {
            name,
            default: default.map(ToOwned::to_owned),
            variadic,
        });
    }
    Ok(parameters)
}

/// Split an argument list into positional and `$name: value` arguments,
/// values still unsubstituted.
///
/// # Errors
/// Returns `ParseErrorKind::MixinArguments` for a positional argument after a
/// named one or an empty argument.
pub(crate) fn parse_arguments(text: &str) -> Result<Vec<MixinArgument>, ParseError> {
    let mut arguments = Vec::new();
    if text.trim().is_empty() {
        return Ok(arguments);
    }
    for piece in split_top_level(text, ',') {
        let error = |message: String| ParseError::new(ParseErrorKind::MixinArguments, message);
        if piece.is_empty() {
            return Err(error("empty argument".to_owned()));
        }
        let named = find_top_level(piece, &[':']).and_then(|(offset, _)| {
            let name = variable_name(piece.get(..offset)?)?;
            Some((name, piece.get(offset.saturating_add(1)..)?.trim()))
        });
        match named {
            Some((name, value)) => arguments.push(MixinArgument {
                name: Some(normalize_name(name)),
                value: value.to_owned(),
            }),
            None => {
                if arguments.iter().any(|argument| argument.name.is_some()) {
                    return Err(error(format!(
                        "positional argument '{piece}' follows a named argument"
                    )));
                }
                arguments.push(MixinArgument {
                    name: None,
                    value: piece.to_owned(),
                });
            }
        }
    }
    Ok(arguments)
}

impl MixinDefinition {
    /// Bind include arguments to parameters, in parameter order. `None`
    /// means "use the default"; a variadic parameter with nothing left to
    /// collect binds to the empty string.
    ///
    /// # Errors
    /// Returns `ParseErrorKind::MixinArguments` for excess positional
    /// arguments, unknown or repeated names, and missing required parameters.
    pub fn bind(&self, arguments: &[MixinArgument]) -> Result<Vec<Option<String>>, ParseError> {
        let error = |message: String| {
            ParseError::new(
                ParseErrorKind::MixinArguments,
                format!("@include {}: {message}", self.name),
            )
        };
        let mut bound = vec![None; self.parameters.len()];
        let positional: Vec<&str> = arguments
            .iter()
            .filter(|argument| argument.name.is_none())
            .map(|argument| argument.value.as_str())
            .collect();

        let mut remaining = positional.as_slice();
        for (slot, parameter) in bound.iter_mut().zip(&self.parameters) {
            if parameter.variadic {
                if !remaining.is_empty() {
                    *slot = Some(remaining.join(", "));
                }
                remaining = &[];
                break;
            }
            let Some((first, rest)) = remaining.split_first() else {
                break;
            };
            *slot = Some((*first).to_owned());
            remaining = rest;
        }
        if !remaining.is_empty() {
            return Err(error(format!(
                "{} positional arguments given but only {} parameters declared",
                positional.len(),
                self.parameters.len()
            )));
        }

        for argument in arguments {
            let Some(name) = &argument.name else {
                continue;
            };
            let Some(index) = self
                .parameters
                .iter()
                .position(|parameter| &parameter.name == name)
            else {
                return Err(error(format!("unknown parameter ${name}")));
            };
            let Some(slot) = bound.get_mut(index) else {
                continue;
            };
            if slot.is_some() {
                return Err(error(format!("parameter ${name} is bound twice")));
            }
            *slot = Some(argument.value.clone());
        }

        for (slot, parameter) in bound.iter_mut().zip(&self.parameters) {
            if slot.is_none() && parameter.default.is_none() {
                if parameter.variadic {
                    *slot = Some(String::new());
                } else {
                    return Err(error(format!("missing argument ${}", parameter.name)));
                }
            }
        }
        Ok(bound)
    }
}
