//! `@keyframes`, `@mixin`, `@include`, `@content` and `@import`.

use core::mem;
use std::sync::Arc;

use css_selectors::SelectorList;
use css_syntax::{Parse, ParseError, ParseErrorKind, function_call, split_top_level, unquote};
use css_variables::normalize_name;
use log::debug;

use super::declarations::read_statement;
use super::{ContentBody, ContentFrame, MAX_INCLUDE_DEPTH, RuleContext, StyleParser};
use crate::keyframes::{KeyframeBlock, parse_keyframe_selector};
use crate::mixin::{MixinArgument, MixinDefinition, parse_arguments, parse_parameters, split_call};

impl StyleParser<'_> {
    /// Dispatch on the name after `@`.
    pub(super) fn parse_at_rule(
        &mut self,
        cursor: &mut Parse<'_>,
        context: &mut RuleContext,
    ) -> Result<(), ParseError> {
        let start = cursor.position();
        cursor.advance(1);
        let name = cursor.read_identifier().to_ascii_lowercase();
        match name.as_str() {
            "keyframes" | "-webkit-keyframes" => self.parse_keyframes(cursor, start),
            "mixin" => self.parse_mixin(cursor, start),
            "include" => self.parse_include(cursor, context, start),
            "content" => self.parse_content(cursor, context, start),
            "import" => self.parse_import(cursor, context, start),
            _ => Err(cursor.error_at(
                start,
                ParseErrorKind::UnknownAtRule,
                format!("unknown at-rule '@{name}'"),
            )),
        }
    }

    /// `@keyframes name { <selector>[, <selector>] { ... } ... }`
    fn parse_keyframes(&mut self, cursor: &mut Parse<'_>, start: usize) -> Result<(), ParseError> {
        let (prelude, terminator) = read_statement(cursor);
        if terminator != Some('{') {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::Unexpected,
                "expected '{' after @keyframes",
            ));
        }
        let name = unquote(prelude).to_owned();
        if name.is_empty() {
            return Err(cursor.error_at(start, ParseErrorKind::Unexpected, "@keyframes needs a name"));
        }
        let mut body = cursor.read_block()?;
        let mut keyframes = KeyframeBlock::new(name.as_str());
        loop {
            body.skip_whitespace();
            if body.is_end() {
                break;
            }
            let frame_start = body.position();
            let (selector, frame_terminator) = read_statement(&mut body);
            if frame_terminator != Some('{') {
                return Err(body.error_at(
                    frame_start,
                    ParseErrorKind::InvalidSelector,
                    format!("expected a keyframe block but found '{}'", selector.trim()),
                ));
            }
            let mut positions = Vec::new();
            for piece in split_top_level(selector, ',') {
                let Some(progress) = parse_keyframe_selector(piece) else {
                    return Err(body.error_at(
                        frame_start,
                        ParseErrorKind::InvalidSelector,
                        format!("invalid keyframe selector '{piece}'"),
                    ));
                };
                positions.push(progress);
            }

            let line = body.location(frame_start).0;
            let mut frame_body = body.read_block()?;
            let mut frame = RuleContext::nested(
                vec![selector.trim().to_owned()],
                SelectorList::default(),
                body.file().map(ToOwned::to_owned),
                line,
            );
            self.scope.push();
            let parsed = self.parse_body(&mut frame_body, &mut frame);
            self.scope.pop();
            parsed?;
            if !frame.blocks.is_empty() {
                return Err(body.error_at(
                    frame_start,
                    ParseErrorKind::Unexpected,
                    "nested rules are not allowed inside @keyframes",
                ));
            }
            for progress in positions {
                keyframes
                    .insert(progress, frame.styles.clone())
                    .map_err(|error| body.locate(frame_start, error))?;
            }
        }
        debug!(target: "css_stylesheet", "keyframes '{name}' with {} frames", keyframes.frames().len());
        self.keyframes.insert(name, keyframes);
        Ok(())
    }

    /// `@mixin name[(parameters)] { body }`
    fn parse_mixin(&mut self, cursor: &mut Parse<'_>, start: usize) -> Result<(), ParseError> {
        let (header, terminator) = read_statement(cursor);
        if terminator != Some('{') {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::InvalidMixin,
                "expected '{' after @mixin",
            ));
        }
        let (name, parameter_text) = split_call(header).map_err(|error| {
            cursor.locate(start, ParseError::new(ParseErrorKind::InvalidMixin, error.message()))
        })?;
        let parameters = parse_parameters(parameter_text.unwrap_or_default())
            .map_err(|error| cursor.locate(start, error))?;
        let body = cursor.read_block()?;
        let definition = MixinDefinition {
            name: normalize_name(name),
            parameters,
            body: body.remaining().to_owned(),
            file: cursor.file().map(ToOwned::to_owned),
            line_offset: cursor.lines_before(body.position()),
        };
        self.mixins
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    /// `@include name[(arguments)];` or `@include name[(arguments)] { content }`
    fn parse_include(
        &mut self,
        cursor: &mut Parse<'_>,
        context: &mut RuleContext,
        start: usize,
    ) -> Result<(), ParseError> {
        let (header, terminator) = read_statement(cursor);
        let (name, argument_text) = split_call(header).map_err(|error| cursor.locate(start, error))?;
        let content = if terminator == Some('{') {
            let block = cursor.read_block()?;
            Some(ContentBody {
                text: block.remaining().to_owned(),
                file: cursor.file().map(ToOwned::to_owned),
                line_offset: cursor.lines_before(block.position()),
            })
        } else {
            None
        };
        let key = normalize_name(name);
        let Some(mixin) = self.mixins.get(&key).map(Arc::clone) else {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::UnknownMixin,
                format!("unknown mixin '{name}'"),
            ));
        };
        if self.include_depth >= MAX_INCLUDE_DEPTH {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::RecursionLimit,
                format!("@include {name} nests deeper than {MAX_INCLUDE_DEPTH} levels"),
            ));
        }

        // Arguments are substituted where the include is written.
        let arguments = parse_arguments(argument_text.unwrap_or_default())
            .and_then(|arguments| {
                arguments
                    .into_iter()
                    .map(|argument| {
                        Ok(MixinArgument {
                            name: argument.name,
                            value: self.scope.substitute(&argument.value)?,
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()
            })
            .and_then(|arguments| mixin.bind(&arguments))
            .map_err(|error| cursor.locate(start, error))?;

        let caller_locals = self.scope.replace_locals(Vec::new());
        self.content.push(ContentFrame {
            body: content,
            caller_locals,
        });
        self.include_depth = self.include_depth.saturating_add(1);
        self.scope.push();
        let expanded = self.expand_mixin(&mixin, arguments, context);
        self.scope.pop();
        self.include_depth = self.include_depth.saturating_sub(1);
        if let Some(frame) = self.content.pop() {
            self.scope.replace_locals(frame.caller_locals);
        }
        expanded.map_err(|error| cursor.locate(start, error))
    }

    /// Bind parameters in a fresh frame and parse the body in `context`.
    fn expand_mixin(
        &mut self,
        mixin: &MixinDefinition,
        arguments: Vec<Option<String>>,
        context: &mut RuleContext,
    ) -> Result<(), ParseError> {
        for (parameter, argument) in mixin.parameters.iter().zip(arguments) {
            let value = match (argument, &parameter.default) {
                (Some(value), _) => value,
                // Defaults may refer to earlier parameters.
                (None, Some(default)) => self.scope.substitute(default)?,
                (None, None) => String::new(),
            };
            self.scope.set(&parameter.name, value);
        }
        let mut body = Parse::new(&mixin.body)
            .with_file(mixin.file.as_deref())
            .with_line_offset(mixin.line_offset);
        self.parse_body(&mut body, context)
    }

    /// `@content;` inside a mixin body.
    fn parse_content(
        &mut self,
        cursor: &mut Parse<'_>,
        context: &mut RuleContext,
        start: usize,
    ) -> Result<(), ParseError> {
        let (rest, terminator) = read_statement(cursor);
        if !rest.trim().is_empty() || terminator == Some('{') {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::Unexpected,
                "@content takes no arguments or block",
            ));
        }
        // Content nested in content refers to the next include out, so the
        // frame is taken off the stack while its body runs.
        let Some(mut frame) = self.content.pop() else {
            return Err(cursor.error_at(
                start,
                ParseErrorKind::Unexpected,
                "@content outside of a mixin",
            ));
        };
        let Some(content) = frame.body.take() else {
            self.content.push(frame);
            return Ok(());
        };
        let mixin_locals = self.scope.replace_locals(mem::take(&mut frame.caller_locals));
        let mut body = Parse::new(&content.text)
            .with_file(content.file.as_deref())
            .with_line_offset(content.line_offset);
        let parsed = self.parse_body(&mut body, context);
        frame.caller_locals = self.scope.replace_locals(mixin_locals);
        frame.body = Some(content);
        self.content.push(frame);
        parsed
    }

    /// `@import "a.scss"[, "b.scss"];`
    fn parse_import(
        &mut self,
        cursor: &mut Parse<'_>,
        context: &mut RuleContext,
        start: usize,
    ) -> Result<(), ParseError> {
        let (text, terminator) = read_statement(cursor);
        let import_error =
            |message: String| cursor.error_at(start, ParseErrorKind::Import, message);
        if terminator == Some('{') {
            return Err(import_error("expected ';' after @import".to_owned()));
        }
        if !context.is_top_level() {
            return Err(import_error("@import is only allowed at the top level".to_owned()));
        }
        let Some(files) = self.files else {
            return Err(import_error(format!(
                "cannot import '{}' without a file system",
                text.trim()
            )));
        };
        for target in split_top_level(text, ',') {
            let path = match function_call(target) {
                Some((name, argument)) if name.eq_ignore_ascii_case("url") => unquote(argument),
                _ => unquote(target),
            };
            if path.is_empty() {
                return Err(import_error("empty @import path".to_owned()));
            }
            let resolved = files.resolve(self.file.as_deref(), path);
            if self.file.as_deref() == Some(resolved.as_str())
                || self.import_stack.contains(&resolved)
            {
                let mut chain = self.import_stack.clone();
                chain.extend(self.file.clone());
                chain.push(resolved);
                return Err(import_error(format!("import cycle: {}", chain.join(" -> "))));
            }
            let source = files.read_all_text(&resolved).map_err(|error| {
                import_error(format!("cannot read '{resolved}': {error:#}"))
            })?;
            debug!(target: "css_stylesheet", "importing {resolved}");

            let mut child = StyleParser::with_file_system(files)
                .file_name(&resolved)
                .with_variables(self.scope.globals().clone());
            child.mixins.clone_from(&self.mixins);
            child.import_stack.clone_from(&self.import_stack);
            child.import_stack.extend(self.file.clone());
            let imported = child.parse_sheet(&source)?;

            context.blocks.extend(imported.blocks().iter().cloned());
            for (name, mixin) in imported.mixins() {
                self.mixins.insert(name.clone(), Arc::clone(mixin));
            }
            for (name, keyframes) in imported.keyframes() {
                self.keyframes.insert(name.clone(), keyframes.clone());
            }
            // The importer's own bindings win over the imported file's.
            let globals = self.scope.globals_mut();
            for (name, value) in imported.variables() {
                globals.entry(name.clone()).or_insert_with(|| value.clone());
            }
            if !self.imports.contains(&resolved) {
                self.imports.push(resolved);
            }
            for nested in imported.imports() {
                if !self.imports.contains(nested) {
                    self.imports.push(nested.clone());
                }
            }
        }
        Ok(())
    }
}
