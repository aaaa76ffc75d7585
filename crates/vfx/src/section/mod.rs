//! Sections of VFX documents.
//!
//! Each `[Name]` block of a document becomes one [`Section`].
//! There are two kinds of sections:
//!
//! - Key-value sections, like `[BufferView]`, whose lines assign members by path.
//!     Each of these has a schema type, like [`BufferView`], that implements [`Schema`].
//!
//! - Free-text sections: shader sources and the compile log.
//!     Their lines are kept verbatim.

#[macro_use]
pub(crate) mod schema;
mod pipeline;
mod render;
mod shader;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use pipeline::*;
pub use render::*;
pub use schema::{MemberType, Schema};
pub use shader::*;

section! {
    /// The `[Version]` section.
    Version {
        values: [
            (version, "version", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

/// Type of a section.
///
/// Shader sections written in different languages, like `[VsGlsl]` and `[VsSpirv]`,
///     have the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionType {
    Version,
    CompileLog,
    Result,
    BufferView,
    VertexState,
    ImageView,
    Sampler,
    DrawState,
    PushConstRange,
    GraphicsPipelineState,
    ComputePipelineState,
    VertexInputState,
    Shader(ShaderStage),
    ShaderInfo(ShaderStage),
}

impl SectionType {
    const NOT_PER_STAGE: [SectionType; 12] = [
        SectionType::Version,
        SectionType::CompileLog,
        SectionType::Result,
        SectionType::BufferView,
        SectionType::VertexState,
        SectionType::ImageView,
        SectionType::Sampler,
        SectionType::DrawState,
        SectionType::PushConstRange,
        SectionType::GraphicsPipelineState,
        SectionType::ComputePipelineState,
        SectionType::VertexInputState,
    ];

    /// Canonical name of the section, as it appears in the section header.
    pub fn name(&self) -> &'static str {
        use SectionType::*;
        match self {
            Version => "Version",
            CompileLog => "CompileLog",
            Result => "Result",
            BufferView => "BufferView",
            VertexState => "VertexState",
            ImageView => "ImageView",
            Sampler => "Sampler",
            DrawState => "DrawState",
            PushConstRange => "PushConstRange",
            GraphicsPipelineState => "GraphicsPipelineState",
            ComputePipelineState => "ComputePipelineState",
            VertexInputState => "VertexInputState",
            Shader(stage) => match stage {
                ShaderStage::Vertex => "VertexShader",
                ShaderStage::TessControl => "TessControlShader",
                ShaderStage::TessEval => "TessEvalShader",
                ShaderStage::Geometry => "GeometryShader",
                ShaderStage::Fragment => "FragmentShader",
                ShaderStage::Compute => "ComputeShader",
            },
            ShaderInfo(stage) => stage.info_section_name(),
        }
    }

    /// Returns whether the lines of the section are kept verbatim.
    ///
    /// Comments are not stripped from these sections.
    pub fn is_free_text(&self) -> bool {
        matches!(self, SectionType::CompileLog | SectionType::Shader(_))
    }

    /// Looks up a section header name.
    ///
    /// Shader sections have a canonical name, like `VertexShader`, that implies GLSL,
    ///     and a short name per language, like `VsSpirv`.
    pub fn lookup(name: &str) -> Option<(SectionType, ShaderLanguage)> {
        registry().get(name).copied()
    }
}

fn registry() -> &'static HashMap<String, (SectionType, ShaderLanguage)> {
    static REGISTRY: OnceLock<HashMap<String, (SectionType, ShaderLanguage)>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut m = HashMap::new();
        for section_type in SectionType::NOT_PER_STAGE {
            m.insert(
                section_type.name().to_string(),
                (section_type, ShaderLanguage::Glsl),
            );
        }
        for stage in ShaderStage::ALL {
            let shader = SectionType::Shader(stage);
            m.insert(shader.name().to_string(), (shader, ShaderLanguage::Glsl));
            for language in ShaderLanguage::ALL {
                m.insert(
                    format!["{}{}", stage.abbreviation(), language.suffix()],
                    (shader, language),
                );
            }
            let info = SectionType::ShaderInfo(stage);
            m.insert(info.name().to_string(), (info, ShaderLanguage::Glsl));
        }
        m
    })
}

/// Contents of a section.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionData {
    Version(Version),
    CompileLog(Vec<u8>),
    Result(ResultState),
    BufferView(BufferView),
    VertexState(VertexState),
    ImageView(ImageView),
    Sampler(Sampler),
    DrawState(DrawState),
    PushConstRange(PushConstRange),
    GraphicsPipelineState(GraphicsPipelineState),
    ComputePipelineState(ComputePipelineState),
    VertexInputState(VertexInputState),
    Shader(ShaderSource),
    ShaderInfo(ShaderInfo),
}

/// One section of a document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    /// Line of the section header, starting at 1.
    pub line: usize,
    pub section_type: SectionType,
    pub data: SectionData,
}

impl Section {
    /// Creates an empty section.
    ///
    /// The language is ignored for sections other than shader sources.
    pub fn new(section_type: SectionType, language: ShaderLanguage, line: usize) -> Section {
        let data = match section_type {
            SectionType::Version => SectionData::Version(Default::default()),
            SectionType::CompileLog => SectionData::CompileLog(vec![]),
            SectionType::Result => SectionData::Result(Default::default()),
            SectionType::BufferView => SectionData::BufferView(Default::default()),
            SectionType::VertexState => SectionData::VertexState(Default::default()),
            SectionType::ImageView => SectionData::ImageView(Default::default()),
            SectionType::Sampler => SectionData::Sampler(Default::default()),
            SectionType::DrawState => SectionData::DrawState(Default::default()),
            SectionType::PushConstRange => SectionData::PushConstRange(Default::default()),
            SectionType::GraphicsPipelineState => {
                SectionData::GraphicsPipelineState(Default::default())
            }
            SectionType::ComputePipelineState => {
                SectionData::ComputePipelineState(Default::default())
            }
            SectionType::VertexInputState => SectionData::VertexInputState(Default::default()),
            SectionType::Shader(stage) => {
                SectionData::Shader(ShaderSource::new(stage, language))
            }
            SectionType::ShaderInfo(_) => SectionData::ShaderInfo(Default::default()),
        };
        Section {
            line,
            section_type,
            data,
        }
    }

    /// Returns the schema of a key-value section, or [`None`] for free-text sections.
    pub fn schema(&self) -> Option<&dyn Schema> {
        let schema: &dyn Schema = match &self.data {
            SectionData::Version(s) => s,
            SectionData::Result(s) => s,
            SectionData::BufferView(s) => s,
            SectionData::VertexState(s) => s,
            SectionData::ImageView(s) => s,
            SectionData::Sampler(s) => s,
            SectionData::DrawState(s) => s,
            SectionData::PushConstRange(s) => s,
            SectionData::GraphicsPipelineState(s) => s,
            SectionData::ComputePipelineState(s) => s,
            SectionData::VertexInputState(s) => s,
            SectionData::ShaderInfo(s) => s,
            SectionData::CompileLog(_) | SectionData::Shader(_) => return None,
        };
        Some(schema)
    }

    /// Mutable version of [`Section::schema`].
    pub fn schema_mut(&mut self) -> Option<&mut dyn Schema> {
        let schema: &mut dyn Schema = match &mut self.data {
            SectionData::Version(s) => s,
            SectionData::Result(s) => s,
            SectionData::BufferView(s) => s,
            SectionData::VertexState(s) => s,
            SectionData::ImageView(s) => s,
            SectionData::Sampler(s) => s,
            SectionData::DrawState(s) => s,
            SectionData::PushConstRange(s) => s,
            SectionData::GraphicsPipelineState(s) => s,
            SectionData::ComputePipelineState(s) => s,
            SectionData::VertexInputState(s) => s,
            SectionData::ShaderInfo(s) => s,
            SectionData::CompileLog(_) | SectionData::Shader(_) => return None,
        };
        Some(schema)
    }

    /// Returns the raw text of a free-text section, or [`None`] for key-value sections.
    pub fn text(&self) -> Option<&[u8]> {
        match &self.data {
            SectionData::CompileLog(text) => Some(text),
            SectionData::Shader(source) => Some(&source.text),
            _ => None,
        }
    }

    pub(crate) fn text_mut(&mut self) -> Option<&mut Vec<u8>> {
        match &mut self.data {
            SectionData::CompileLog(text) => Some(text),
            SectionData::Shader(source) => Some(&mut source.text),
            _ => None,
        }
    }

    /// Name used in the header when the section is displayed.
    pub(crate) fn header(&self) -> String {
        match &self.data {
            SectionData::Shader(source) if source.language != ShaderLanguage::Glsl => {
                format!["{}{}", source.stage.abbreviation(), source.language.suffix()]
            }
            _ => self.section_type.name().to_string(),
        }
    }
}

/// Writes the section in the same format it is parsed from.
///
/// Members that have their default value are omitted.
impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.header())?;
        match (self.schema(), self.text()) {
            (Some(schema), _) => schema.fmt_members(f, 0),
            (None, Some(text)) => write!(f, "{}", String::from_utf8_lossy(text)),
            (None, None) => Ok(()),
        }
    }
}
