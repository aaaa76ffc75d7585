//! The line-oriented parser.
//!
//! The parser is a small state machine over the lines of the file.
//! Lines are macro-substituted and then either start a new section (if they begin with `[`)
//!     or are buffered in the open section.
//! A section's buffered lines are processed when the section is closed:
//!     key-value sections assign their members line by line,
//!     while free-text sections copy their lines verbatim.
//! The first error aborts the parse.
//! After the last section is closed the document is validated and its shaders are compiled.

use crate::compiler::ShaderCompiler;
use crate::document::{Document, DocumentKind};
use crate::error::{ErrorKind, ParseError};
use crate::lexical::{extract_key_and_value, get_word, trim};
use crate::macros::Macros;
use crate::path::{self, Resolved};
use crate::section::{MemberType, Schema, SectionType};
use crate::value::{append_array, parse_value};
use std::ops::Range;

/// A line of the file after macro substitution.
///
/// Lines are kept as bytes until they are known to belong to a key-value section,
///     because shader sources need not be UTF-8.
struct Line {
    number: usize,
    span: Range<usize>,
    text: Vec<u8>,
}

impl Line {
    fn as_str(&self) -> Result<&str, ParseError> {
        std::str::from_utf8(&self.text)
            .map_err(|_| ParseError::new(self.number, self.span.clone(), ErrorKind::InvalidUtf8))
    }
}

struct OpenSection {
    section_type: SectionType,
    index: usize,
    header: Line,
    lines: Vec<Line>,
}

enum State {
    NoSection,
    InKeyValueSection(OpenSection),
    InSourceSection(OpenSection),
}

struct Parser<'m> {
    document: Document,
    macros: &'m Macros,
    state: State,
    line_spans: Vec<Range<usize>>,
}

pub(crate) fn parse(
    source: &[u8],
    file_name: &str,
    kind: DocumentKind,
    macros: &Macros,
    compiler: &mut dyn ShaderCompiler,
) -> Document {
    let mut parser = Parser {
        document: Document::new(kind, file_name),
        macros,
        state: State::NoSection,
        line_spans: vec![],
    };
    if let Err(err) = parser.parse_lines(source) {
        parser.document.push_error(err);
        return parser.document;
    }
    let violations = parser.document.validate();
    if !violations.is_empty() {
        parser.push_errors(violations);
        return parser.document;
    }
    let failures = parser.document.compile_shaders(compiler);
    parser.push_errors(failures);
    parser.document
}

impl<'m> Parser<'m> {
    fn parse_lines(&mut self, source: &[u8]) -> Result<(), ParseError> {
        let mut offset = 0;
        for (i, raw) in source.split_inclusive(|b| *b == b'\n').enumerate() {
            let content = raw.strip_suffix(b"\n").unwrap_or(raw);
            let span = offset..offset + content.len();
            offset += raw.len();
            self.line_spans.push(span.clone());
            self.parse_line(i + 1, span, content)?;
        }
        self.end_section()
    }

    fn parse_line(&mut self, number: usize, span: Range<usize>, raw: &[u8]) -> Result<(), ParseError> {
        let err = |kind| ParseError::new(number, span.clone(), kind);
        if raw.len() >= crate::MAX_LINE_LENGTH {
            return Err(err(ErrorKind::LineTooLong {
                max: crate::MAX_LINE_LENGTH,
            }));
        }
        let mut text = self
            .macros
            .substitute(raw, crate::MAX_LINE_LENGTH)
            .map_err(err)?;
        if !matches!(self.state, State::InSourceSection(_)) {
            if let Some(i) = text.iter().position(|b| *b == b';') {
                text.truncate(i);
            }
        }
        let line = Line { number, span, text };
        if line.text.starts_with(b"[") {
            self.end_section()?;
            return self.begin_section(line);
        }
        match &mut self.state {
            State::NoSection => {}
            State::InKeyValueSection(open) | State::InSourceSection(open) => open.lines.push(line),
        }
        Ok(())
    }

    fn begin_section(&mut self, header: Line) -> Result<(), ParseError> {
        let err = |kind| ParseError::new(header.number, header.span.clone(), kind);
        let text = header.as_str()?;
        let Some(close) = text.find(']') else {
            return Err(err(ErrorKind::MissingClosingBracket));
        };
        let inner = &text[1..close];
        let inner = inner.split(',').next().unwrap_or(inner);
        let name = get_word(inner).map(|(word, _)| word).unwrap_or("");
        let (section_type, index) = self
            .document
            .free_section(name, header.number)
            .map_err(err)?;
        let open = OpenSection {
            section_type,
            index,
            header,
            lines: vec![],
        };
        self.state = if section_type.is_free_text() {
            State::InSourceSection(open)
        } else {
            State::InKeyValueSection(open)
        };
        Ok(())
    }

    fn end_section(&mut self) -> Result<(), ParseError> {
        match std::mem::replace(&mut self.state, State::NoSection) {
            State::NoSection => Ok(()),
            State::InSourceSection(open) => {
                let Some(text) = self
                    .document
                    .section_mut(open.section_type, open.index)
                    .and_then(|section| section.text_mut())
                else {
                    return Ok(());
                };
                for line in &open.lines {
                    text.extend_from_slice(&line.text);
                    text.push(b'\n');
                }
                Ok(())
            }
            State::InKeyValueSection(open) => {
                let Some(schema) = self
                    .document
                    .section_mut(open.section_type, open.index)
                    .and_then(|section| section.schema_mut())
                else {
                    return Ok(());
                };
                for line in &open.lines {
                    let text = line.as_str()?;
                    if trim(text).is_empty() {
                        continue;
                    }
                    assign(schema, text)
                        .map_err(|kind| ParseError::new(line.number, line.span.clone(), kind))?;
                }
                if open.section_type == SectionType::Version {
                    self.document.check_version().map_err(|kind| {
                        ParseError::new(open.header.number, open.header.span.clone(), kind)
                    })?;
                }
                Ok(())
            }
        }
    }

    fn push_errors(&mut self, errors: Vec<(usize, ErrorKind)>) {
        for (line, kind) in errors {
            let span = line
                .checked_sub(1)
                .and_then(|i| self.line_spans.get(i))
                .cloned()
                .unwrap_or(0..0);
            self.document.push_error(ParseError::new(line, span, kind));
        }
    }
}

/// Assigns the value on a `key = value` line.
fn assign(schema: &mut dyn Schema, line: &str) -> Result<(), ErrorKind> {
    let (key, value) = extract_key_and_value(line, '=')?;
    let Resolved {
        section,
        member,
        member_type,
    } = path::resolve(schema, key)?;
    match member_type {
        MemberType::Value(value_type) => section.set(member, parse_value(value, value_type)?),
        MemberType::Array(array_type) => match section.array_mut(member) {
            Some(buffer) => append_array(value, array_type, buffer),
            None => Err(ErrorKind::UnknownMember {
                name: member.to_string(),
                allowed_member_names: section.member_names(),
            }),
        },
        MemberType::Section | MemberType::SectionArray { .. } => Err(ErrorKind::SectionUsedAsValue {
            name: member.to_string(),
        }),
    }
}
