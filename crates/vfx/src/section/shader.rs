//! Shader source sections and the shader info sections that accompany them in pipeline documents.

/// A programmable stage of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEval,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEval => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        }
    }

    /// Prefix of the short section names for this stage; e.g. `Vs` in `[VsGlsl]`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vs",
            ShaderStage::TessControl => "Tcs",
            ShaderStage::TessEval => "Tes",
            ShaderStage::Geometry => "Gs",
            ShaderStage::Fragment => "Fs",
            ShaderStage::Compute => "Cs",
        }
    }

    /// Name of the section that holds the shader info for this stage.
    pub fn info_section_name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VsInfo",
            ShaderStage::TessControl => "TcsInfo",
            ShaderStage::TessEval => "TesInfo",
            ShaderStage::Geometry => "GsInfo",
            ShaderStage::Fragment => "FsInfo",
            ShaderStage::Compute => "CsInfo",
        }
    }

    pub fn is_graphics(&self) -> bool {
        *self != ShaderStage::Compute
    }
}

/// Language a shader source is written in.
///
/// This is determined by the header of the section;
///     e.g. `[VsSpirv]` holds SPIR-V assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShaderLanguage {
    #[default]
    Glsl,
    SpirvAssembly,
    Hlsl,
}

impl ShaderLanguage {
    pub const ALL: [ShaderLanguage; 3] = [
        ShaderLanguage::Glsl,
        ShaderLanguage::SpirvAssembly,
        ShaderLanguage::Hlsl,
    ];

    /// Suffix of the short section names for this language; e.g. `Spirv` in `[VsSpirv]`.
    pub fn suffix(&self) -> &'static str {
        match self {
            ShaderLanguage::Glsl => "Glsl",
            ShaderLanguage::SpirvAssembly => "Spirv",
            ShaderLanguage::Hlsl => "Hlsl",
        }
    }
}

/// Contents of a shader source section.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub language: ShaderLanguage,
    /// The source text, byte-for-byte as it appeared in the file.
    ///
    /// Every line, including the last, ends with `\n`.
    /// The text is not required to be UTF-8.
    pub text: Vec<u8>,
    /// Output of the shader compiler, once the document has been compiled.
    pub binary: Vec<u8>,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, language: ShaderLanguage) -> ShaderSource {
        ShaderSource {
            stage,
            language,
            text: vec![],
            binary: vec![],
        }
    }
}

section! {
    /// Per-shader compiler options.
    ShaderOptions {
        values: [
            (trap_present, "trapPresent", Bool),
            (debug_mode, "debugMode", Bool),
            (enable_performance_data, "enablePerformanceData", Bool),
            (allow_re_z, "allowReZ", Bool),
            (vgpr_limit, "vgprLimit", Uint),
            (sgpr_limit, "sgprLimit", Uint),
            (max_thread_groups_per_compute_unit, "maxThreadGroupsPerComputeUnit", Uint),
            (wave_size, "waveSize", Uint),
            (wgp_mode, "wgpMode", Bool),
            (unroll_threshold, "unrollThreshold", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    SpecConstMapEntry {
        values: [
            (constant_id, "constantID", Uint),
            (offset, "offset", Uint),
            (size, "size", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// Specialization constants.
    ///
    /// Every data key appends to the same specialization data,
    ///     and the `offset` of each map entry is a byte offset into it.
    SpecConst {
        values: [],
        arrays: [
            (data, [
                ("uintData", Uint),
                ("intData", Int),
                ("floatData", Float),
                ("doubleData", Double),
            ]),
        ],
        sections: [],
        section_arrays: [
            (map_entry, "mapEntry", SpecConstMapEntry, 32),
        ],
    }
}

section! {
    /// An immutable descriptor value, such as a static sampler.
    DescriptorRangeValue {
        values: [
            (descriptor_type, "type", Enum),
            (set, "set", Uint),
            (binding, "binding", Uint),
            (array_size, "arraySize", Uint),
        ],
        arrays: [
            (uint_data, [("uintData", Uint),]),
        ],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// A node of the root user data layout.
    UserDataNode {
        values: [
            (node_type, "type", Enum),
            (offset_in_dwords, "offsetInDwords", Uint),
            (size_in_dwords, "sizeInDwords", Uint),
            (set, "set", Uint),
            (binding, "binding", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The shader info sections: `[VsInfo]`, `[FsInfo]` and so on.
    ShaderInfo {
        values: [
            (entry_point, "entryPoint", String),
        ],
        arrays: [],
        sections: [
            (options, "options", ShaderOptions),
            (spec_const, "specConst", SpecConst),
        ],
        section_arrays: [
            (descriptor_range_value, "descriptorRangeValue", DescriptorRangeValue, 16),
            (user_data_node, "userDataNode", UserDataNode, 16),
        ],
    }
}
