//! Sections of render documents.
//!
//! A render document describes a standalone draw or dispatch:
//!     the resources bound to the shaders, the draw parameters and the expected results.

section! {
    /// One expected result of the test.
    ResultItem {
        values: [
            (result_source, "resultSource", Enum),
            (buffer_binding, "bufferBinding", Binding),
            (offset, "offset", IVec4),
            (i_vec4, "iVec4", IVec4),
            (i64_vec2, "i64Vec2", I64Vec2),
            (f_vec4, "fVec4", FVec4),
            (f16_vec4, "f16Vec4", F16Vec4),
            (d_vec2, "dVec2", DVec2),
            (compare_method, "compareMethod", Enum),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[Result]` section.
    ResultState {
        values: [],
        arrays: [],
        sections: [],
        section_arrays: [
            (result, "result", ResultItem, 16),
        ],
    }
}

section! {
    /// The `[BufferView]` section: a buffer and its initial contents.
    ///
    /// Every data key appends to the same buffer, in the order the lines appear,
    ///     so `intData = 1` followed by `floatData = 2.0` gives an eight byte buffer.
    BufferView {
        values: [
            (binding, "binding", Binding),
            (descriptor_type, "descriptorType", Enum),
            (size, "size", Uint),
            (format, "format", Enum),
        ],
        arrays: [
            (data, [
                ("uintData", Uint),
                ("intData", Int),
                ("int64Data", Int64),
                ("uint64Data", Uint64),
                ("floatData", Float),
                ("float16Data", Float16),
                ("doubleData", Double),
            ]),
        ],
        sections: [],
        section_arrays: [],
    }
}

section! {
    VertexBinding {
        values: [
            (binding, "binding", Uint),
            (stride_in_bytes, "strideInBytes", Uint),
            (input_rate, "inputRate", Enum),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    VertexAttribute {
        values: [
            (location, "location", Uint),
            (binding, "binding", Uint),
            (format, "format", Enum),
            (offset_in_bytes, "offsetInBytes", Uint),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[VertexState]` section.
    VertexState {
        values: [],
        arrays: [],
        sections: [],
        section_arrays: [
            (vb_binding, "vbBinding", VertexBinding, 16),
            (attribute, "attribute", VertexAttribute, 32),
        ],
    }
}

section! {
    /// The `[ImageView]` section: an image filled with a generated pattern.
    ImageView {
        values: [
            (binding, "binding", Binding),
            (descriptor_type, "descriptorType", Enum),
            (size, "size", IVec4),
            (view_type, "viewType", Enum),
            (data_pattern, "dataPattern", Enum),
            (samples, "samples", Uint),
            (mipmap, "mipmap", Bool),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[Sampler]` section.
    Sampler {
        values: [
            (binding, "binding", Binding),
            (descriptor_type, "descriptorType", Enum),
            (mag_filter, "magFilter", Enum),
            (min_filter, "minFilter", Enum),
            (mipmap_mode, "mipmapMode", Enum),
            (address_mode_u, "addressModeU", Enum),
            (address_mode_v, "addressModeV", Enum),
            (address_mode_w, "addressModeW", Enum),
            (mip_lod_bias, "mipLodBias", Float),
            (anisotropy_enable, "anisotropyEnable", Bool),
            (max_anisotropy, "maxAnisotropy", Float),
            (compare_enable, "compareEnable", Bool),
            (compare_op, "compareOp", Enum),
            (min_lod, "minLod", Float),
            (max_lod, "maxLod", Float),
            (border_color, "borderColor", Enum),
            (unnormalized_coordinates, "unnormalizedCoordinates", Bool),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[DrawState]` section: parameters of the draw or dispatch.
    DrawState {
        values: [
            (instance, "instance", Uint),
            (vertex, "vertex", Uint),
            (first_instance, "firstInstance", Uint),
            (first_vertex, "firstVertex", Uint),
            (index, "index", Uint),
            (first_index, "firstIndex", Uint),
            (vertex_offset, "vertexOffset", Int),
            (topology, "topology", Enum),
            (polygon_mode, "polygonMode", Enum),
            (cull_mode, "cullMode", Enum),
            (front_face, "frontFace", Enum),
            (depth_bias_enable, "depthBiasEnable", Bool),
            (patch_control_points, "patchControlPoints", Uint),
            (dispatch, "dispatch", IVec4),
            (width, "width", Uint),
            (height, "height", Uint),
            (line_width, "lineWidth", Float),
            (vs, "vs", String),
            (tcs, "tcs", String),
            (tes, "tes", String),
            (gs, "gs", String),
            (fs, "fs", String),
            (cs, "cs", String),
            (clear_color, "clearColor", FVec4),
        ],
        arrays: [],
        sections: [],
        section_arrays: [],
    }
}

section! {
    /// The `[PushConstRange]` section.
    PushConstRange {
        values: [
            (start, "start", Uint),
            (length, "length", Uint),
        ],
        arrays: [
            (data, [
                ("intData", Int),
                ("floatData", Float),
            ]),
        ],
        sections: [],
        section_arrays: [],
    }
}
