//! Table of enum names that may appear as values of enum members.
//!
//! The table is built on first use and never modified afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Returns the integer value of an enum name, if it exists.
pub fn lookup(name: &str) -> Option<i32> {
    table().get(name).copied()
}

/// Returns all enum names that share a prefix, in table order.
///
/// For example, `names_with_prefix("VK_CULL_MODE_")` returns the four cull modes.
pub fn names_with_prefix(prefix: &str) -> Vec<&'static str> {
    ENUMS
        .iter()
        .filter(|(name, _)| name.starts_with(prefix))
        .map(|(name, _)| *name)
        .collect()
}

fn table() -> &'static HashMap<&'static str, i32> {
    static TABLE: OnceLock<HashMap<&'static str, i32>> = OnceLock::new();
    TABLE.get_or_init(|| ENUMS.iter().copied().collect())
}

const ENUMS: &[(&str, i32)] = &[
    // Formats
    ("VK_FORMAT_UNDEFINED", 0),
    ("VK_FORMAT_R8_UNORM", 9),
    ("VK_FORMAT_R8_SNORM", 10),
    ("VK_FORMAT_R8_UINT", 13),
    ("VK_FORMAT_R8_SINT", 14),
    ("VK_FORMAT_R8G8_UNORM", 16),
    ("VK_FORMAT_R8G8B8A8_UNORM", 37),
    ("VK_FORMAT_R8G8B8A8_SNORM", 38),
    ("VK_FORMAT_R8G8B8A8_UINT", 41),
    ("VK_FORMAT_R8G8B8A8_SINT", 42),
    ("VK_FORMAT_R8G8B8A8_SRGB", 43),
    ("VK_FORMAT_B8G8R8A8_UNORM", 44),
    ("VK_FORMAT_B8G8R8A8_SRGB", 50),
    ("VK_FORMAT_A2B10G10R10_UNORM_PACK32", 64),
    ("VK_FORMAT_R16_UNORM", 70),
    ("VK_FORMAT_R16_UINT", 74),
    ("VK_FORMAT_R16_SINT", 75),
    ("VK_FORMAT_R16_SFLOAT", 76),
    ("VK_FORMAT_R16G16_SFLOAT", 83),
    ("VK_FORMAT_R16G16B16A16_UNORM", 91),
    ("VK_FORMAT_R16G16B16A16_UINT", 95),
    ("VK_FORMAT_R16G16B16A16_SINT", 96),
    ("VK_FORMAT_R16G16B16A16_SFLOAT", 97),
    ("VK_FORMAT_R32_UINT", 98),
    ("VK_FORMAT_R32_SINT", 99),
    ("VK_FORMAT_R32_SFLOAT", 100),
    ("VK_FORMAT_R32G32_UINT", 101),
    ("VK_FORMAT_R32G32_SINT", 102),
    ("VK_FORMAT_R32G32_SFLOAT", 103),
    ("VK_FORMAT_R32G32B32_UINT", 104),
    ("VK_FORMAT_R32G32B32_SINT", 105),
    ("VK_FORMAT_R32G32B32_SFLOAT", 106),
    ("VK_FORMAT_R32G32B32A32_UINT", 107),
    ("VK_FORMAT_R32G32B32A32_SINT", 108),
    ("VK_FORMAT_R32G32B32A32_SFLOAT", 109),
    ("VK_FORMAT_R64_UINT", 110),
    ("VK_FORMAT_R64_SINT", 111),
    ("VK_FORMAT_R64_SFLOAT", 112),
    ("VK_FORMAT_R64G64_SFLOAT", 115),
    ("VK_FORMAT_R64G64B64A64_SFLOAT", 121),
    ("VK_FORMAT_D16_UNORM", 124),
    ("VK_FORMAT_D32_SFLOAT", 126),
    ("VK_FORMAT_S8_UINT", 127),
    ("VK_FORMAT_D24_UNORM_S8_UINT", 129),
    ("VK_FORMAT_D32_SFLOAT_S8_UINT", 130),
    // Primitive topologies
    ("VK_PRIMITIVE_TOPOLOGY_POINT_LIST", 0),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_LIST", 1),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_STRIP", 2),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST", 3),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP", 4),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_FAN", 5),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_LIST_WITH_ADJACENCY", 6),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_STRIP_WITH_ADJACENCY", 7),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST_WITH_ADJACENCY", 8),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP_WITH_ADJACENCY", 9),
    ("VK_PRIMITIVE_TOPOLOGY_PATCH_LIST", 10),
    // Descriptor types
    ("VK_DESCRIPTOR_TYPE_SAMPLER", 0),
    ("VK_DESCRIPTOR_TYPE_COMBINED_IMAGE_SAMPLER", 1),
    ("VK_DESCRIPTOR_TYPE_SAMPLED_IMAGE", 2),
    ("VK_DESCRIPTOR_TYPE_STORAGE_IMAGE", 3),
    ("VK_DESCRIPTOR_TYPE_UNIFORM_TEXEL_BUFFER", 4),
    ("VK_DESCRIPTOR_TYPE_STORAGE_TEXEL_BUFFER", 5),
    ("VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER", 6),
    ("VK_DESCRIPTOR_TYPE_STORAGE_BUFFER", 7),
    ("VK_DESCRIPTOR_TYPE_UNIFORM_BUFFER_DYNAMIC", 8),
    ("VK_DESCRIPTOR_TYPE_STORAGE_BUFFER_DYNAMIC", 9),
    ("VK_DESCRIPTOR_TYPE_INPUT_ATTACHMENT", 10),
    // Image view types
    ("VK_IMAGE_VIEW_TYPE_1D", 0),
    ("VK_IMAGE_VIEW_TYPE_2D", 1),
    ("VK_IMAGE_VIEW_TYPE_3D", 2),
    ("VK_IMAGE_VIEW_TYPE_CUBE", 3),
    ("VK_IMAGE_VIEW_TYPE_1D_ARRAY", 4),
    ("VK_IMAGE_VIEW_TYPE_2D_ARRAY", 5),
    ("VK_IMAGE_VIEW_TYPE_CUBE_ARRAY", 6),
    // Samplers
    ("VK_FILTER_NEAREST", 0),
    ("VK_FILTER_LINEAR", 1),
    ("VK_SAMPLER_MIPMAP_MODE_NEAREST", 0),
    ("VK_SAMPLER_MIPMAP_MODE_LINEAR", 1),
    ("VK_SAMPLER_ADDRESS_MODE_REPEAT", 0),
    ("VK_SAMPLER_ADDRESS_MODE_MIRRORED_REPEAT", 1),
    ("VK_SAMPLER_ADDRESS_MODE_CLAMP_TO_EDGE", 2),
    ("VK_SAMPLER_ADDRESS_MODE_CLAMP_TO_BORDER", 3),
    ("VK_SAMPLER_ADDRESS_MODE_MIRROR_CLAMP_TO_EDGE", 4),
    ("VK_BORDER_COLOR_FLOAT_TRANSPARENT_BLACK", 0),
    ("VK_BORDER_COLOR_INT_TRANSPARENT_BLACK", 1),
    ("VK_BORDER_COLOR_FLOAT_OPAQUE_BLACK", 2),
    ("VK_BORDER_COLOR_INT_OPAQUE_BLACK", 3),
    ("VK_BORDER_COLOR_FLOAT_OPAQUE_WHITE", 4),
    ("VK_BORDER_COLOR_INT_OPAQUE_WHITE", 5),
    // Compare operations
    ("VK_COMPARE_OP_NEVER", 0),
    ("VK_COMPARE_OP_LESS", 1),
    ("VK_COMPARE_OP_EQUAL", 2),
    ("VK_COMPARE_OP_LESS_OR_EQUAL", 3),
    ("VK_COMPARE_OP_GREATER", 4),
    ("VK_COMPARE_OP_NOT_EQUAL", 5),
    ("VK_COMPARE_OP_GREATER_OR_EQUAL", 6),
    ("VK_COMPARE_OP_ALWAYS", 7),
    // Rasterization
    ("VK_POLYGON_MODE_FILL", 0),
    ("VK_POLYGON_MODE_LINE", 1),
    ("VK_POLYGON_MODE_POINT", 2),
    ("VK_CULL_MODE_NONE", 0),
    ("VK_CULL_MODE_FRONT_BIT", 1),
    ("VK_CULL_MODE_BACK_BIT", 2),
    ("VK_CULL_MODE_FRONT_AND_BACK", 3),
    ("VK_FRONT_FACE_COUNTER_CLOCKWISE", 0),
    ("VK_FRONT_FACE_CLOCKWISE", 1),
    // Vertex input
    ("VK_VERTEX_INPUT_RATE_VERTEX", 0),
    ("VK_VERTEX_INPUT_RATE_INSTANCE", 1),
    ("VK_INDEX_TYPE_UINT16", 0),
    ("VK_INDEX_TYPE_UINT32", 1),
    ("VK_INDEX_TYPE_UINT8_EXT", 1000265000),
    // Shader stages
    ("VK_SHADER_STAGE_VERTEX_BIT", 0x01),
    ("VK_SHADER_STAGE_TESSELLATION_CONTROL_BIT", 0x02),
    ("VK_SHADER_STAGE_TESSELLATION_EVALUATION_BIT", 0x04),
    ("VK_SHADER_STAGE_GEOMETRY_BIT", 0x08),
    ("VK_SHADER_STAGE_FRAGMENT_BIT", 0x10),
    ("VK_SHADER_STAGE_COMPUTE_BIT", 0x20),
    ("VK_SHADER_STAGE_ALL_GRAPHICS", 0x1f),
    ("VK_SHADER_STAGE_ALL", 0x7fffffff),
    ("ShaderStageVertex", 0),
    ("ShaderStageTessControl", 1),
    ("ShaderStageTessEval", 2),
    ("ShaderStageGeometry", 3),
    ("ShaderStageFragment", 4),
    ("ShaderStageCompute", 5),
    // Result checks
    ("ResultSourceColor", 0),
    ("ResultSourceDepthStencil", 1),
    ("ResultSourceBuffer", 2),
    ("ResultCompareMethodEqual", 0),
    ("ResultCompareMethodNotEqual", 1),
    // Image data patterns
    ("ImagePatternColor0", 0),
    ("ImagePatternColor1", 1),
    ("ImagePatternColor2", 2),
    ("ImagePatternColor3", 3),
    ("ImagePatternColor4", 4),
    ("ImagePatternColor5", 5),
    ("ImagePatternColor6", 6),
    ("ImagePatternColor7", 7),
    ("ImagePatternDefault", 8),
    ("ImagePatternLinear", 9),
    ("ImagePatternCheckBoard", 10),
    ("ImagePatternRandom", 11),
    ("ImagePatternDepth", 12),
    ("ImagePatternStencil", 13),
    // Resource mapping nodes
    ("DescriptorResource", 1),
    ("DescriptorSampler", 2),
    ("DescriptorCombinedTexture", 3),
    ("DescriptorTexelBuffer", 4),
    ("DescriptorFmask", 5),
    ("DescriptorBuffer", 6),
    ("DescriptorTableVaPtr", 7),
    ("IndirectUserDataVaPtr", 8),
    ("PushConst", 9),
    ("DescriptorBufferCompact", 10),
    ("StreamOutTableVaPtr", 11),
    ("DescriptorYCbCrSampler", 14),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(lookup("VK_FORMAT_R32G32B32A32_SFLOAT"), Some(109));
        assert_eq!(lookup("VK_CULL_MODE_BACK_BIT"), Some(2));
        assert_eq!(lookup("vk_cull_mode_back_bit"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn names_are_unique() {
        assert_eq!(table().len(), ENUMS.len());
    }

    #[test]
    fn prefix_search() {
        assert_eq!(
            names_with_prefix("VK_FRONT_FACE_"),
            vec!["VK_FRONT_FACE_COUNTER_CLOCKWISE", "VK_FRONT_FACE_CLOCKWISE"]
        );
    }
}
