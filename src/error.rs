use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path : PathBuf,
        #[source]
        source : std::io::Error,
    },

    #[error("could not decode image {}: {source}", path.display())]
    Image {
        path : PathBuf,
        #[source]
        source : image::ImageError,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path : PathBuf,
        #[source]
        source : toml::de::Error,
    },

    #[error("could not create window or context: {0}")]
    Context(String),

    #[error("{stage} shader compilation failed:\n{log}")]
    ShaderCompile {
        stage : ShaderStage,
        log : String,
    },

    #[error("program linking failed:\n{0}")]
    ProgramLink(String),

    #[error("OpenGL: {0}")]
    Gl(String),

    #[error("{what} must be finite, got {value}")]
    InvalidInput {
        what : &'static str,
        value : f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
