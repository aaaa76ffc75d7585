//! Parser for the VFX test-description format
//!
//! VFX files describe GPU tests as a sequence of sections.
//! Each section starts with a header like `[BufferView]` and contains either
//!     `key = value` lines or, for shader sources, verbatim text:
//!
//! ```
//! let source = r#"
//! [Version]
//! version = 2
//!
//! [BufferView]
//! binding = 0, 1
//! intData = 1, 2, 3 ; the first three elements
//! intData = 4
//!
//! [VertexShader]
//! void main() {}
//! "#;
//! let document = vfx::parse_str(source, "example.vfx", vfx::DocumentKind::Render, &vfx::Macros::new());
//! assert!(document.is_valid(), "{}", document.error_message());
//! let state = document.render_state().unwrap();
//! assert_eq!(state.buffer_views[0].data.len(), 16);
//! assert_eq!(state.shaders[0].text, b"void main() {}\n");
//! ```
//!
//! There are two kinds of documents:
//!     render documents (`.vfx` files) describe a standalone draw or dispatch,
//!     and pipeline documents (`.pipe` files) describe a pipeline built from shaders
//!     and per-shader info sections.

pub mod compiler;
pub mod document;
pub mod enums;
pub mod error;
pub mod lexical;
pub mod macros;
pub mod path;
pub mod section;
pub mod value;

mod parser;

pub use compiler::{PassthroughCompiler, ShaderCompiler};
pub use document::{
    Document, DocumentKind, PipelineShader, PipelineState, RenderState, TypeMismatch,
};
pub use error::{Category, ErrorKind, ParseError};
pub use macros::Macros;

/// Maximum length of a line in bytes, before and after macro substitution.
pub const MAX_LINE_LENGTH: usize = 65536;

/// Parses a document from a string, compiling shaders with the [`PassthroughCompiler`].
///
/// The file name is only used in diagnostics.
pub fn parse_str(source: &str, file_name: &str, kind: DocumentKind, macros: &Macros) -> Document {
    parse_bytes(source.as_bytes(), file_name, kind, macros)
}

/// Parses a document from a string, compiling shaders with the provided compiler.
pub fn parse_str_with(
    source: &str,
    file_name: &str,
    kind: DocumentKind,
    macros: &Macros,
    compiler: &mut dyn ShaderCompiler,
) -> Document {
    parse_bytes_with(source.as_bytes(), file_name, kind, macros, compiler)
}

/// Parses a document from raw bytes, compiling shaders with the [`PassthroughCompiler`].
///
/// Shader sources and compile logs are kept byte-for-byte and need not be UTF-8.
/// Section headers and key-value lines must be UTF-8.
pub fn parse_bytes(source: &[u8], file_name: &str, kind: DocumentKind, macros: &Macros) -> Document {
    parse_bytes_with(source, file_name, kind, macros, &mut PassthroughCompiler)
}

/// Parses a document from raw bytes, compiling shaders with the provided compiler.
pub fn parse_bytes_with(
    source: &[u8],
    file_name: &str,
    kind: DocumentKind,
    macros: &Macros,
    compiler: &mut dyn ShaderCompiler,
) -> Document {
    parser::parse(source, file_name, kind, macros, compiler)
}

/// Parses a document from a file, compiling shaders with the [`PassthroughCompiler`].
pub fn parse_file<P: AsRef<std::path::Path>>(path: P, kind: DocumentKind, macros: &Macros) -> Document {
    parse_file_with(path, kind, macros, &mut PassthroughCompiler)
}

/// Parses a document from a file, compiling shaders with the provided compiler.
///
/// If the file can't be read the returned document is empty and has a single [`ErrorKind::Io`] error.
pub fn parse_file_with<P: AsRef<std::path::Path>>(
    path: P,
    kind: DocumentKind,
    macros: &Macros,
    compiler: &mut dyn ShaderCompiler,
) -> Document {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    match std::fs::read(path) {
        Ok(source) => parse_bytes_with(&source, &file_name, kind, macros, compiler),
        Err(err) => {
            let mut document = Document::new(kind, &file_name);
            document.push_error(ParseError::new(
                0,
                0..0,
                ErrorKind::Io {
                    path: file_name.clone(),
                    message: err.to_string(),
                },
            ));
            document
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_file_reads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".pipe").tempfile().unwrap();
        write!(
            file,
            "[Version]\nversion = 52\n\n[ComputePipelineState]\nworkgroupSize = 8, 8\nstage.entryPoint = main\n\n[CsInfo]\nentryPoint = main\n\n[CsGlsl]\n#version 450\nvoid main() {{}}\n"
        )
        .unwrap();
        let document = parse_file(file.path(), DocumentKind::Pipeline, &Macros::new());
        assert!(document.is_valid(), "{}", document.error_message());
        let state = document.pipeline_state().unwrap();
        let compute = state.compute.unwrap();
        assert_eq!(compute.workgroup_size.components(), &[8, 8]);
        assert_eq!(compute.stage.entry_point, "main");
        assert_eq!(state.stages.len(), 1);
        assert_eq!(state.stages[0].info.unwrap().entry_point, "main");
        assert_eq!(
            state.stages[0].source.binary,
            b"#version 450\nvoid main() {}\n".to_vec()
        );
        assert!(document.render_state().is_err());
        document.close();
    }

    #[test]
    fn parse_file_keeps_non_utf8_shader_bytes() {
        let mut file = tempfile::Builder::new().suffix(".vfx").tempfile().unwrap();
        file.write_all(b"[Version]\nversion = 1\n[VertexShader]\n// caf\xe9\nvoid main() {}\n")
            .unwrap();
        let document = parse_file(file.path(), DocumentKind::Render, &Macros::new());
        assert!(document.is_valid(), "{}", document.error_message());
        let state = document.render_state().unwrap();
        assert_eq!(state.shaders[0].text, b"// caf\xe9\nvoid main() {}\n");

        let mut printed = vec![];
        document.print(&mut printed).unwrap();
        assert_eq!(
            printed,
            b"[Version]\nversion = 1\n\n[VertexShader]\n// caf\xe9\nvoid main() {}\n"
        );
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.vfx");
        let document = parse_file(&path, DocumentKind::Render, &Macros::new());
        assert!(!document.is_valid());
        assert_eq!(document.errors()[0].category(), Category::Io);
        assert_eq!(document.errors()[0].line, 0);
    }

    #[test]
    fn flat_macros() {
        let macros = Macros::from_flat(&["#N", "3"]);
        let document = parse_str(
            "[DrawState]\nvertex = #N\n",
            "macros.vfx",
            DocumentKind::Render,
            &macros,
        );
        assert!(document.is_valid(), "{}", document.error_message());
        assert_eq!(document.render_state().unwrap().draw_state.unwrap().vertex, 3);
    }

    #[test]
    fn print_dumps_non_default_members() {
        let source = "[Version]\nversion = 1\n\n[DrawState]\nvertex = 3\ntopology = VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST\n\n[VertexShader]\nvoid main() {}\n";
        let document = parse_str(source, "a.vfx", DocumentKind::Render, &Macros::new());
        assert!(document.is_valid(), "{}", document.error_message());
        let mut printed = vec![];
        document.print(&mut printed).unwrap();
        let printed = String::from_utf8(printed).unwrap();
        assert_eq!(
            printed,
            "[Version]\nversion = 1\n\n[DrawState]\nvertex = 3\ntopology = 3\n\n[VertexShader]\nvoid main() {}\n"
        );
        assert_eq!(document.to_string(), printed);
    }
}
