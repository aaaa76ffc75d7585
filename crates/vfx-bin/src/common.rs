use vfx::{Document, DocumentKind, Macros};

/// Path to a render (.vfx) or pipeline (.pipe) document.
#[derive(Clone, Debug)]
pub struct VfxPath {
    pub path: std::path::PathBuf,
    pub kind: DocumentKind,
}

impl VfxPath {
    pub fn parse(input: &str) -> Result<Self, InvalidExtension> {
        let path: std::path::PathBuf = input.into();
        let extension = path.extension().and_then(std::ffi::OsStr::to_str);
        match extension.and_then(DocumentKind::from_extension) {
            Some(kind) => Ok(VfxPath { path, kind }),
            None => Err(InvalidExtension {
                provided: extension.map(str::to_string),
                allowed: vec!["vfx", "pipe"],
            }),
        }
    }

    /// Reads and parses the document, printing a report for every error.
    pub fn read(&self, macros: &Macros) -> Result<Document, String> {
        let path = self.path.as_os_str().to_string_lossy();
        let data = std::fs::read(&self.path)
            .map_err(|err| format!("failed to read `{}`: {}", path, err))?;
        let document = vfx::parse_bytes(&data, &path, self.kind, macros);
        if document.is_valid() {
            return Ok(document);
        }
        // Shader sources may hold arbitrary bytes; such files get one-line diagnostics.
        let Ok(source) = std::str::from_utf8(&data) else {
            eprint!("{}", document.error_message());
            return Ok(document);
        };
        let cache: (&str, _) = (&path, ariadne::Source::from(source));
        for error in document.errors() {
            if error.ariadne_report(&path).eprint(cache.clone()).is_err() {
                eprintln!("{}", error.diagnostic(&path));
            }
        }
        Ok(document)
    }
}

impl clap::builder::ValueParserFactory for VfxPath {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(VfxPath::parse)
    }
}

#[derive(Debug)]
pub struct InvalidExtension {
    pub provided: Option<String>,
    pub allowed: Vec<&'static str>,
}

impl std::fmt::Display for InvalidExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let allowed = self
            .allowed
            .iter()
            .map(|s| format![".{s}"])
            .collect::<Vec<String>>()
            .join(" or ");
        match &self.provided {
            None => write!(
                f,
                "the file extension must be {} but it is missing",
                allowed
            ),
            Some(extension) => write!(
                f,
                "the file extension must be {} but it is .{}",
                allowed, extension
            ),
        }
    }
}

impl std::error::Error for InvalidExtension {}

/// A macro definition of the form `NAME=VALUE`, or just `NAME` to define the macro as `1`.
#[derive(Clone, Debug)]
pub struct MacroDefinition {
    pub name: String,
    pub value: String,
}

impl MacroDefinition {
    pub fn parse(input: &str) -> Result<Self, InvalidMacroDefinition> {
        let (name, value) = input.split_once('=').unwrap_or((input, "1"));
        if name.is_empty() {
            return Err(InvalidMacroDefinition(input.to_string()));
        }
        Ok(MacroDefinition {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

impl clap::builder::ValueParserFactory for MacroDefinition {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(MacroDefinition::parse)
    }
}

#[derive(Debug)]
pub struct InvalidMacroDefinition(String);

impl std::fmt::Display for InvalidMacroDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "the macro definition `{}` must have the form NAME=VALUE or NAME",
            self.0
        )
    }
}

impl std::error::Error for InvalidMacroDefinition {}
