//! Errors generated while parsing VFX documents

use crate::section::ShaderStage;

/// Error generated while parsing a VFX document.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ParseError {
    /// Line in the source file that generated the error, starting at 1.
    ///
    /// Errors that are not tied to a particular line (for example, failing to
    ///     read the file) have a line number of 0.
    pub line: usize,
    /// Location of the offending line within the source file.
    ///
    /// The span is in bytes and excludes the line terminator.
    pub span: std::ops::Range<usize>,
    /// Kind of the error.
    pub kind: ErrorKind,
}

/// Broad class of an error.
///
/// Every error other than [`Category::CompilationFailure`] and
///     [`Category::ValidationFailure`] aborts the parse at the line where it occurs.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Category {
    /// Malformed syntax: section headers, key-value lines, array accesses or literals.
    FormatError,
    /// A section name, member name or enum name that doesn't exist.
    UnknownIdentifier,
    /// Too many sections of one type.
    CapacityExceeded,
    /// A line that is longer than [`crate::MAX_LINE_LENGTH`].
    LengthExceeded,
    /// The shader compiler rejected a shader.
    CompilationFailure,
    /// The document as a whole is not consistent.
    ValidationFailure,
    /// The file could not be read.
    Io,
}

/// Kind of parse error.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ErrorKind {
    /// A section header has no closing bracket; e.g. `[VertexShader`.
    MissingClosingBracket,
    /// A section header or key-value line is not valid UTF-8.
    ///
    /// Only shader sources and compile logs may contain arbitrary bytes.
    InvalidUtf8,
    /// A key-value line does not contain the delimiter.
    MissingDelimiter { delimiter: char },
    /// A key-value line has nothing after the delimiter.
    MissingValue { delimiter: char },
    /// A path segment contains brackets that are not a valid array access;
    ///     e.g. `stages[x]` or `stages[1]junk`.
    InvalidArrayAccess { segment: String },
    /// A path, or a segment of a path, is empty; e.g. `= 1` or `stages..entryPoint`.
    EmptyPathSegment { path: String },
    /// A literal does not start with a number.
    InvalidNumber { token: String },
    /// A vector literal has more components than the vector.
    TooManyComponents { max: usize, provided: usize },
    /// An array index was applied to a member that is not an array of sections.
    IndexOnNonArray { name: String },
    /// A path ends on a sub-section instead of a value.
    SectionUsedAsValue { name: String },
    /// A section header names a section that doesn't exist in this kind of document.
    UnknownSection { name: String },
    /// A path segment names a member that doesn't exist.
    UnknownMember {
        /// The name that was provided.
        name: String,
        /// Names that are allowed in this position.
        allowed_member_names: &'static [&'static str],
    },
    /// An enum value that is not in the enum table.
    UnknownEnum { name: String },
    /// An array index is beyond the declared size of a sub-section array.
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
    /// A section appears more times than the document allows.
    TooManySections { name: String, max: usize },
    /// A line, after macro substitution, is too long.
    LineTooLong { max: usize },
    /// The `[Version]` section specifies a version that is newer than this parser supports.
    UnsupportedVersion { version: u32, max: u32 },
    /// A shader in a pipeline document has no corresponding shader info section.
    MissingShaderInfo { stage: ShaderStage, index: usize },
    /// A pipeline document contains both a compute shader and graphics shaders.
    MixedComputeAndGraphics,
    /// A resource section doesn't specify its binding.
    MissingBinding { section: &'static str },
    /// The shader compiler rejected a shader.
    CompilationFailed { stage: ShaderStage, message: String },
    /// The file could not be read.
    Io { path: String, message: String },
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        use ErrorKind::*;
        match self {
            MissingClosingBracket
            | InvalidUtf8
            | MissingDelimiter { .. }
            | MissingValue { .. }
            | InvalidArrayAccess { .. }
            | EmptyPathSegment { .. }
            | InvalidNumber { .. }
            | TooManyComponents { .. }
            | IndexOnNonArray { .. }
            | SectionUsedAsValue { .. }
            | IndexOutOfRange { .. }
            | UnsupportedVersion { .. } => Category::FormatError,
            UnknownSection { .. } | UnknownMember { .. } | UnknownEnum { .. } => {
                Category::UnknownIdentifier
            }
            TooManySections { .. } => Category::CapacityExceeded,
            LineTooLong { .. } => Category::LengthExceeded,
            CompilationFailed { .. } => Category::CompilationFailure,
            MissingShaderInfo { .. } | MixedComputeAndGraphics | MissingBinding { .. } => {
                Category::ValidationFailure
            }
            Io { .. } => Category::Io,
        }
    }

    pub fn message(&self) -> String {
        use ErrorKind::*;
        match self {
            MissingClosingBracket => "expected `]` to close the section header".into(),
            InvalidUtf8 => "the line is not valid UTF-8".into(),
            MissingDelimiter { delimiter } => format!["expected `{delimiter}`"],
            MissingValue { delimiter } => format!["expected a value after `{delimiter}`"],
            InvalidArrayAccess { segment } => {
                format!["expected `[]` for array access in `{segment}`"]
            }
            EmptyPathSegment { path } => format!["the key `{path}` contains an empty member name"],
            InvalidNumber { token } => format!["`{token}` is not a number"],
            TooManyComponents { max, provided } => {
                format!["{provided} components were provided for a vector with {max} components"]
            }
            IndexOnNonArray { name } => format!["the member `{name}` is not an array"],
            SectionUsedAsValue { name } => {
                format!["the member `{name}` is a section and can't be assigned a value"]
            }
            UnknownSection { name } => format!["unknown section `{name}`"],
            UnknownMember { name, .. } => format!["unknown member `{name}`"],
            UnknownEnum { name } => format!["unknown enum `{name}`"],
            IndexOutOfRange { name, index, len } => {
                format!["index {index} is out of range for `{name}`, which has {len} elements"]
            }
            TooManySections { name, max } => {
                format!["too many `{name}` sections; at most {max} may appear"]
            }
            LineTooLong { max } => {
                format!["line length after macro substitution exceeds {max} bytes"]
            }
            UnsupportedVersion { version, max } => {
                format!["version {version} is not supported; the maximum supported version is {max}"]
            }
            MissingShaderInfo { stage, index } => format![
                "the {} shader with index {index} has no `{}` section",
                stage.name(),
                stage.info_section_name()
            ],
            MixedComputeAndGraphics => {
                "a compute shader can't be combined with graphics shaders".into()
            }
            MissingBinding { section } => format!["a `{section}` section has no binding"],
            CompilationFailed { stage, message } => {
                format!["failed to compile the {} shader: {message}", stage.name()]
            }
            Io { path, message } => format!["failed to read `{path}`: {message}"],
        }
    }

    pub fn notes(&self) -> Vec<String> {
        use ErrorKind::*;
        match self {
            UnknownMember {
                allowed_member_names,
                ..
            } => {
                if allowed_member_names.is_empty() {
                    vec!["no members can be accessed in this position".into()]
                } else {
                    vec![format![
                        "allowed member names: {}",
                        allowed_member_names.join(", ")
                    ]]
                }
            }
            TooManyComponents { .. } => {
                vec!["components are separated by commas or whitespace".into()]
            }
            InvalidArrayAccess { .. } => {
                vec!["array indices are non-negative integers; e.g. `stages[2].entryPoint`".into()]
            }
            MissingShaderInfo { .. } => vec![
                "shaders and shader info sections are paired by the order they appear in".into(),
            ],
            _ => vec![],
        }
    }
}

impl ParseError {
    pub fn new(line: usize, span: std::ops::Range<usize>, kind: ErrorKind) -> ParseError {
        ParseError { line, span, kind }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Returns the error in the `file:line: message` form used by [`crate::Document::error_message`].
    pub fn diagnostic(&self, file_name: &str) -> String {
        format!["{}:{}: {}", file_name, self.line, self.kind.message()]
    }

    #[cfg(feature = "ariadne")]
    pub fn ariadne_report<'a>(
        &self,
        file_name: &'a str,
    ) -> ariadne::Report<'static, (&'a str, std::ops::Range<usize>)> {
        let mut report =
            ariadne::Report::build(ariadne::ReportKind::Error, (file_name, self.span.clone()))
                .with_config(ariadne::Config::default().with_index_type(ariadne::IndexType::Byte))
                .with_message(self.kind.message());
        if self.line > 0 {
            report = report.with_label(
                ariadne::Label::new((file_name, self.span.clone()))
                    .with_message(format!["{:?} on line {}", self.category(), self.line])
                    .with_color(ariadne::Color::BrightRed),
            );
        }
        for note in self.kind.notes() {
            report = report.with_note(note);
        }
        report.finish()
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind.message())
    }
}

impl std::error::Error for ParseError {}
