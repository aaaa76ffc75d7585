//! The interface to the shader compiler that runs once a document has been parsed.

use crate::section::{ShaderInfo, ShaderSource};

/// A shader compiler.
///
/// The parser invokes the compiler once for every shader section in the document,
///     passing the shader info section with the same index if there is one.
pub trait ShaderCompiler {
    /// Compiles one shader and returns the binary.
    ///
    /// On failure the error string is reported as a compilation error on the shader's section.
    fn compile(&mut self, source: &ShaderSource, info: Option<&ShaderInfo>) -> Result<Vec<u8>, String>;
}

/// Compiler that returns the shader source as the binary.
///
/// This is the compiler used when none is provided.
/// It only rejects shaders with no source text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCompiler;

impl ShaderCompiler for PassthroughCompiler {
    fn compile(&mut self, source: &ShaderSource, _: Option<&ShaderInfo>) -> Result<Vec<u8>, String> {
        if source.text.iter().all(u8::is_ascii_whitespace) {
            return Err("the shader source is empty".into());
        }
        Ok(source.text.clone())
    }
}

impl<F> ShaderCompiler for F
where
    F: FnMut(&ShaderSource, Option<&ShaderInfo>) -> Result<Vec<u8>, String>,
{
    fn compile(&mut self, source: &ShaderSource, info: Option<&ShaderInfo>) -> Result<Vec<u8>, String> {
        self(source, info)
    }
}
