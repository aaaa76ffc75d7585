//! Sections of pipeline documents.
//!
//! A pipeline document describes the state needed to build a pipeline object from a set of shaders.

section! {
    ColorBuffer {
        values: [
            (format, "format", Enum),
            (blend_enable, "blendEnable", Bool),
            (blend_src_alpha_to_color, "blendSrcAlphaToColor", Bool),
            (channel_write_mask, "channelWriteMask", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// Entry point of the shader for one stage.
    StageEntry {
        values: [
            (stage, "stage", Enum),
            (entry_point, "entryPoint", String),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[GraphicsPipelineState]` section.
    GraphicsPipelineState {
        values: [
            (topology, "topology", Enum),
            (patch_control_points, "patchControlPoints", Uint),
            (device_index, "deviceIndex", Int),
            (disable_vertex_reuse, "disableVertexReuse", Bool),
            (depth_clip_enable, "depthClipEnable", Bool),
            (rasterizer_discard_enable, "rasterizerDiscardEnable", Bool),
            (per_sample_shading, "perSampleShading", Bool),
            (num_samples, "numSamples", Uint),
            (sample_pattern_idx, "samplePatternIdx", Uint),
            (user_clip_plane_mask, "usrClipPlaneMask", Uint),
            (polygon_mode, "polygonMode", Enum),
            (cull_mode, "cullMode", Enum),
            (front_face, "frontFace", Enum),
            (depth_bias_enable, "depthBiasEnable", Bool),
            (alpha_to_coverage_enable, "alphaToCoverageEnable", Bool),
            (dual_source_blend_enable, "dualSourceBlendEnable", Bool),
        ],
        arrays: [],
        sections: [],
        section_arrays: [
            (color_buffer, "colorBuffer", ColorBuffer, 8),
            (stages, "stages", StageEntry, 6),
        ],
    }
}

section! {
    /// The `[ComputePipelineState]` section.
    ComputePipelineState {
        values: [
            (device_index, "deviceIndex", Int),
            (workgroup_size, "workgroupSize", IVec4),
        ],
        arrays: [],
        sections: [
            (stage, "stage", StageEntry),
        ],
        section_arrays: [],
    }
}

section! {
    VertexInputBinding {
        values: [
            (binding, "binding", Uint),
            (stride, "stride", Uint),
            (input_rate, "inputRate", Enum),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    VertexInputAttribute {
        values: [
            (location, "location", Uint),
            (binding, "binding", Uint),
            (format, "format", Enum),
            (offset, "offset", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    VertexInputDivisor {
        values: [
            (binding, "binding", Uint),
            (divisor, "divisor", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[VertexInputState]` section.
    VertexInputState {
        values: [],
        arrays: [],
        sections: [],
        section_arrays: [
            (binding, "binding", VertexInputBinding, 16),
            (attribute, "attribute", VertexInputAttribute, 32),
            (divisor, "divisor", VertexInputDivisor, 16),
        ],
    }
}
