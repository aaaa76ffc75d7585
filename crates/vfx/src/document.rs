//! The parsed document and the typed views over it.

use crate::compiler::ShaderCompiler;
use crate::error::{ErrorKind, ParseError};
use crate::section::*;
use std::collections::BTreeMap;

/// Kind of a document.
///
/// The kind determines which sections may appear in the document and how many times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DocumentKind {
    /// A standalone draw or dispatch test; `.vfx` files.
    Render,
    /// A pipeline description; `.pipe` files.
    Pipeline,
}

impl DocumentKind {
    /// Returns the kind of document conventionally stored in files with the given extension.
    pub fn from_extension(extension: &str) -> Option<DocumentKind> {
        match extension {
            "vfx" => Some(DocumentKind::Render),
            "pipe" => Some(DocumentKind::Pipeline),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Render => "render",
            DocumentKind::Pipeline => "pipeline",
        }
    }

    /// Maximum number of sections of the given type.
    ///
    /// Sections with a maximum of 0 are unknown in documents of this kind.
    pub fn max_section_count(&self, section_type: SectionType) -> usize {
        use SectionType::*;
        match (self, section_type) {
            (_, Version | CompileLog) => 1,
            (DocumentKind::Render, Result | VertexState | DrawState) => 1,
            (DocumentKind::Render, BufferView | ImageView | Sampler | PushConstRange) => 16,
            (DocumentKind::Render, Shader(_)) => 1,
            (
                DocumentKind::Pipeline,
                GraphicsPipelineState | ComputePipelineState | VertexInputState,
            ) => 1,
            (DocumentKind::Pipeline, Shader(_) | ShaderInfo(_)) => 2,
            _ => 0,
        }
    }

    /// Newest version of the format that is supported.
    pub fn max_version(&self) -> u32 {
        match self {
            DocumentKind::Render => 2,
            DocumentKind::Pipeline => 52,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A parsed document.
///
/// The document owns all of its sections.
/// If parsing failed the document contains the sections parsed before the failure,
///     and [`Document::errors`] describes what went wrong.
#[derive(Debug)]
pub struct Document {
    kind: DocumentKind,
    file_name: String,
    sections: BTreeMap<SectionType, Vec<Section>>,
    errors: Vec<ParseError>,
}

macro_rules! sections_of {
    ($document: expr, $variant: ident) => {
        sections_of!($document, SectionType::$variant, $variant)
    };
    ($document: expr, $section_type: expr, $variant: ident) => {
        $document
            .sections($section_type)
            .iter()
            .filter_map(|section| match &section.data {
                SectionData::$variant(data) => Some(data),
                _ => None,
            })
    };
}

impl Document {
    pub(crate) fn new(kind: DocumentKind, file_name: &str) -> Document {
        Document {
            kind,
            file_name: file_name.to_string(),
            sections: Default::default(),
            errors: vec![],
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Name of the file the document was parsed from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns whether the document was parsed, validated and compiled without errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns all errors as text, one `file:line: message` line per error.
    pub fn error_message(&self) -> String {
        let mut s = String::new();
        for error in &self.errors {
            s.push_str(&error.diagnostic(&self.file_name));
            s.push('\n');
        }
        s
    }

    /// Sections of the given type, in the order they appear in the file.
    pub fn sections(&self, section_type: SectionType) -> &[Section] {
        self.sections
            .get(&section_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over all sections, grouped by type.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values().flatten()
    }

    /// Releases the document.
    ///
    /// This is equivalent to dropping it.
    pub fn close(self) {}

    /// Writes the human readable dump of the document.
    ///
    /// Unlike the [`std::fmt::Display`] implementation,
    ///     the text of shader sources and compile logs is written byte-for-byte.
    pub fn print<W: std::io::Write>(&self, w: &mut W) -> std::io::Result<()> {
        for (i, section) in self.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            match section.text() {
                Some(text) => {
                    writeln!(w, "[{}]", section.header())?;
                    w.write_all(text)?;
                }
                None => write!(w, "{section}")?,
            }
        }
        Ok(())
    }

    pub(crate) fn push_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Adds a new section for a section header.
    ///
    /// Returns the type of the section and its index among the sections of that type.
    pub(crate) fn free_section(
        &mut self,
        name: &str,
        line: usize,
    ) -> Result<(SectionType, usize), ErrorKind> {
        let Some((section_type, language)) = SectionType::lookup(name) else {
            return Err(ErrorKind::UnknownSection {
                name: name.to_string(),
            });
        };
        let max = self.kind.max_section_count(section_type);
        if max == 0 {
            return Err(ErrorKind::UnknownSection {
                name: name.to_string(),
            });
        }
        let sections = self.sections.entry(section_type).or_default();
        if sections.len() >= max {
            return Err(ErrorKind::TooManySections {
                name: section_type.name().to_string(),
                max,
            });
        }
        sections.push(Section::new(section_type, language, line));
        Ok((section_type, sections.len() - 1))
    }

    pub(crate) fn section_mut(&mut self, section_type: SectionType, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(&section_type)?.get_mut(index)
    }

    /// Version declared in the `[Version]` section, or 0 if there is none.
    pub fn version(&self) -> u32 {
        sections_of!(self, Version)
            .next()
            .map(|v| v.version)
            .unwrap_or(0)
    }

    pub(crate) fn check_version(&self) -> Result<(), ErrorKind> {
        let version = self.version();
        let max = self.kind.max_version();
        if version > max {
            return Err(ErrorKind::UnsupportedVersion { version, max });
        }
        Ok(())
    }

    /// Checks the consistency of the document as a whole.
    ///
    /// Returns every violation found, with the line of the section that caused it.
    pub(crate) fn validate(&self) -> Vec<(usize, ErrorKind)> {
        let mut violations = vec![];
        match self.kind {
            DocumentKind::Pipeline => {
                for stage in ShaderStage::ALL {
                    let num_infos = self.sections(SectionType::ShaderInfo(stage)).len();
                    for (index, shader) in self.sections(SectionType::Shader(stage)).iter().enumerate() {
                        if index >= num_infos {
                            violations.push((shader.line, ErrorKind::MissingShaderInfo { stage, index }));
                        }
                    }
                }
                let has_graphics = ShaderStage::ALL
                    .iter()
                    .filter(|stage| stage.is_graphics())
                    .any(|stage| !self.sections(SectionType::Shader(*stage)).is_empty());
                if has_graphics {
                    for compute in self.sections(SectionType::Shader(ShaderStage::Compute)) {
                        violations.push((compute.line, ErrorKind::MixedComputeAndGraphics));
                    }
                }
            }
            DocumentKind::Render => {
                for section_type in [
                    SectionType::BufferView,
                    SectionType::ImageView,
                    SectionType::Sampler,
                ] {
                    for section in self.sections(section_type) {
                        let binding = match &section.data {
                            SectionData::BufferView(b) => &b.binding,
                            SectionData::ImageView(i) => &i.binding,
                            SectionData::Sampler(s) => &s.binding,
                            _ => continue,
                        };
                        if binding.len == 0 {
                            violations.push((
                                section.line,
                                ErrorKind::MissingBinding {
                                    section: section_type.name(),
                                },
                            ));
                        }
                    }
                }
            }
        }
        violations.sort_by_key(|(line, _)| *line);
        violations
    }

    /// Compiles every shader section.
    ///
    /// Every shader is compiled even if an earlier one fails.
    /// Returns the failures, with the line of the shader section that caused each.
    pub(crate) fn compile_shaders(&mut self, compiler: &mut dyn ShaderCompiler) -> Vec<(usize, ErrorKind)> {
        let mut failures = vec![];
        for stage in ShaderStage::ALL {
            let results: Vec<Result<Vec<u8>, String>> = {
                let infos: Vec<&ShaderInfo> =
                    sections_of!(self, SectionType::ShaderInfo(stage), ShaderInfo).collect();
                sections_of!(self, SectionType::Shader(stage), Shader)
                    .enumerate()
                    .map(|(i, source)| compiler.compile(source, infos.get(i).copied()))
                    .collect()
            };
            let Some(shaders) = self.sections.get_mut(&SectionType::Shader(stage)) else {
                continue;
            };
            for (shader, result) in shaders.iter_mut().zip(results) {
                let SectionData::Shader(source) = &mut shader.data else {
                    continue;
                };
                match result {
                    Ok(binary) => source.binary = binary,
                    Err(message) => failures.push((
                        shader.line,
                        ErrorKind::CompilationFailed { stage, message },
                    )),
                }
            }
        }
        failures
    }

    /// Returns the view of a render document.
    pub fn render_state(&self) -> Result<RenderState<'_>, TypeMismatch> {
        self.expect_kind(DocumentKind::Render)?;
        Ok(RenderState {
            version: self.version(),
            compile_log: sections_of!(self, CompileLog).next().map(Vec::as_slice),
            result: sections_of!(self, Result).next(),
            buffer_views: sections_of!(self, BufferView).collect(),
            vertex_state: sections_of!(self, VertexState).next(),
            image_views: sections_of!(self, ImageView).collect(),
            samplers: sections_of!(self, Sampler).collect(),
            draw_state: sections_of!(self, DrawState).next(),
            push_const_ranges: sections_of!(self, PushConstRange).collect(),
            shaders: ShaderStage::ALL
                .iter()
                .flat_map(|stage| sections_of!(self, SectionType::Shader(*stage), Shader))
                .collect(),
        })
    }

    /// Returns the view of a pipeline document.
    pub fn pipeline_state(&self) -> Result<PipelineState<'_>, TypeMismatch> {
        self.expect_kind(DocumentKind::Pipeline)?;
        let mut stages = vec![];
        for stage in ShaderStage::ALL {
            let infos: Vec<&ShaderInfo> =
                sections_of!(self, SectionType::ShaderInfo(stage), ShaderInfo).collect();
            for (i, source) in sections_of!(self, SectionType::Shader(stage), Shader).enumerate() {
                stages.push(PipelineShader {
                    source,
                    info: infos.get(i).copied(),
                });
            }
        }
        Ok(PipelineState {
            version: self.version(),
            compile_log: sections_of!(self, CompileLog).next().map(Vec::as_slice),
            graphics: sections_of!(self, GraphicsPipelineState).next(),
            compute: sections_of!(self, ComputePipelineState).next(),
            vertex_input: sections_of!(self, VertexInputState).next(),
            stages,
        })
    }

    fn expect_kind(&self, expected: DocumentKind) -> Result<(), TypeMismatch> {
        if self.kind != expected {
            return Err(TypeMismatch {
                expected,
                actual: self.kind,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, section) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

/// Error returned when a view is requested for a document of the other kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: DocumentKind,
    pub actual: DocumentKind,
}

impl std::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected a {} document but this is a {} document",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for TypeMismatch {}

/// The contents of a render document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderState<'a> {
    pub version: u32,
    pub compile_log: Option<&'a [u8]>,
    pub result: Option<&'a ResultState>,
    pub buffer_views: Vec<&'a BufferView>,
    pub vertex_state: Option<&'a VertexState>,
    pub image_views: Vec<&'a ImageView>,
    pub samplers: Vec<&'a Sampler>,
    pub draw_state: Option<&'a DrawState>,
    pub push_const_ranges: Vec<&'a PushConstRange>,
    /// Shaders in pipeline stage order.
    pub shaders: Vec<&'a ShaderSource>,
}

/// A shader of a pipeline document together with its shader info.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineShader<'a> {
    pub source: &'a ShaderSource,
    pub info: Option<&'a ShaderInfo>,
}

/// The contents of a pipeline document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineState<'a> {
    pub version: u32,
    pub compile_log: Option<&'a [u8]>,
    pub graphics: Option<&'a GraphicsPipelineState>,
    pub compute: Option<&'a ComputePipelineState>,
    pub vertex_input: Option<&'a VertexInputState>,
    /// Shaders in pipeline stage order.
    pub stages: Vec<PipelineShader<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::PassthroughCompiler;

    #[test]
    fn section_counts() {
        let render = DocumentKind::Render;
        assert_eq!(render.max_section_count(SectionType::BufferView), 16);
        assert_eq!(render.max_section_count(SectionType::Shader(ShaderStage::Vertex)), 1);
        assert_eq!(render.max_section_count(SectionType::ShaderInfo(ShaderStage::Vertex)), 0);
        let pipeline = DocumentKind::Pipeline;
        assert_eq!(pipeline.max_section_count(SectionType::Shader(ShaderStage::Vertex)), 2);
        assert_eq!(pipeline.max_section_count(SectionType::DrawState), 0);
    }

    #[test]
    fn free_section_enforces_limits() {
        let mut document = Document::new(DocumentKind::Pipeline, "a.pipe");
        assert_eq!(
            document.free_section("VsInfo", 1),
            Ok((SectionType::ShaderInfo(ShaderStage::Vertex), 0))
        );
        assert_eq!(
            document.free_section("VsInfo", 2),
            Ok((SectionType::ShaderInfo(ShaderStage::Vertex), 1))
        );
        assert_eq!(
            document.free_section("VsInfo", 3),
            Err(ErrorKind::TooManySections {
                name: "VsInfo".into(),
                max: 2
            })
        );
        assert_eq!(
            document.free_section("BufferView", 4),
            Err(ErrorKind::UnknownSection {
                name: "BufferView".into()
            })
        );
        assert_eq!(
            document.sections(SectionType::ShaderInfo(ShaderStage::Vertex)).len(),
            2
        );
    }

    #[test]
    fn validation_reports_every_violation() {
        let mut document = Document::new(DocumentKind::Pipeline, "a.pipe");
        document.free_section("VsGlsl", 1).unwrap();
        document.free_section("CsGlsl", 5).unwrap();
        document.free_section("CsInfo", 9).unwrap();
        assert_eq!(
            document.validate(),
            vec![
                (
                    1,
                    ErrorKind::MissingShaderInfo {
                        stage: ShaderStage::Vertex,
                        index: 0
                    }
                ),
                (5, ErrorKind::MixedComputeAndGraphics),
            ]
        );
    }

    #[test]
    fn render_sections_need_bindings() {
        let mut document = Document::new(DocumentKind::Render, "a.vfx");
        document.free_section("Sampler", 3).unwrap();
        assert_eq!(
            document.validate(),
            vec![(3, ErrorKind::MissingBinding { section: "Sampler" })]
        );
    }

    #[test]
    fn compilation_attempts_every_shader() {
        let mut document = Document::new(DocumentKind::Render, "a.vfx");
        document.free_section("VertexShader", 1).unwrap();
        document.free_section("FragmentShader", 4).unwrap();
        let failures = document.compile_shaders(&mut PassthroughCompiler);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[1].0, 4);
    }

    #[test]
    fn views_check_the_kind() {
        let document = Document::new(DocumentKind::Render, "a.vfx");
        assert!(document.render_state().is_ok());
        assert_eq!(
            document.pipeline_state().err(),
            Some(TypeMismatch {
                expected: DocumentKind::Pipeline,
                actual: DocumentKind::Render
            })
        );
        assert_eq!(
            TypeMismatch {
                expected: DocumentKind::Pipeline,
                actual: DocumentKind::Render
            }
            .to_string(),
            "expected a pipeline document but this is a render document"
        );
    }
}
