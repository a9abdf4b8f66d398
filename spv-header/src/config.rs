//! Transcoder configuration
//!
//! [`TranscodeConfig`] names one shader to embed: where its SPIR-V lives, where
//! the header goes and which C++ identifiers the header declares. The default
//! value targets the vector-multiply compute shader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TranscodeError, TranscodeResult};

/// Directory, relative to the shader sources, that receives generated headers.
pub const DEFAULT_INCLUDE_DIR: &str = "../include/parallax/shaders";

/// Namespace every generated declaration lives in by default.
pub const DEFAULT_NAMESPACE: [&str; 2] = ["parallax", "shaders"];

const DEFAULT_SHADER: &str = "vector_multiply";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(4)
    }
}

/// Layout of the array initializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indentation of each initializer line
    pub indent_style: IndentStyle,

    /// Hex literals per initializer line
    pub words_per_line: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::default(),
            words_per_line: 6,
        }
    }
}

impl RenderOptions {
    /// Get the indent string for one level
    pub fn indent_str(&self) -> String {
        match self.indent_style {
            IndentStyle::Spaces(n) => " ".repeat(n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }

    /// Words per line, never less than one
    pub fn line_width(&self) -> usize {
        self.words_per_line.max(1)
    }
}

/// Identity and location of one embedded shader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Compiled SPIR-V module to read
    pub source_path: PathBuf,

    /// Header file to (re)generate
    pub destination_path: PathBuf,

    /// Name of the `uint32_t` array
    pub array_name: String,

    /// Include-guard macro
    pub guard_token: String,

    /// Enclosing namespaces, outermost first
    pub namespace_path: Vec<String>,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self::for_shader(DEFAULT_SHADER)
    }
}

impl TranscodeConfig {
    /// Derive every field from a shader's logical name.
    ///
    /// `vector_multiply` reads `vector_multiply.spv`, writes
    /// `../include/parallax/shaders/vector_multiply.hpp` and declares
    /// `VECTOR_MULTIPLY_SPV` guarded by `PARALLAX_SHADERS_VECTOR_MULTIPLY_HPP`.
    pub fn for_shader(name: &str) -> Self {
        let upper = upper_snake(name);
        let namespace_path: Vec<String> = DEFAULT_NAMESPACE.iter().map(|s| s.to_string()).collect();
        let guard_prefix = namespace_path
            .iter()
            .map(|s| upper_snake(s))
            .collect::<Vec<_>>()
            .join("_");

        Self {
            source_path: PathBuf::from(format!("{name}.spv")),
            destination_path: Path::new(DEFAULT_INCLUDE_DIR).join(format!("{name}.hpp")),
            array_name: format!("{upper}_SPV"),
            guard_token: format!("{guard_prefix}_{upper}_HPP"),
            namespace_path,
        }
    }

    /// Load a config from a TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> TranscodeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> TranscodeResult<Self> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }

    /// Name of the derived byte-size constant
    pub fn size_constant_name(&self) -> String {
        format!("{}_SIZE", self.array_name)
    }

    /// Check that every emitted name is a valid C identifier
    pub fn validate(&self) -> TranscodeResult<()> {
        if !is_c_identifier(&self.array_name) {
            return Err(TranscodeError::InvalidConfig(format!(
                "array name '{}' is not a C identifier",
                self.array_name
            )));
        }
        if !is_c_identifier(&self.guard_token) {
            return Err(TranscodeError::InvalidConfig(format!(
                "guard token '{}' is not a C identifier",
                self.guard_token
            )));
        }
        if let Some(segment) = self.namespace_path.iter().find(|s| !is_c_identifier(s)) {
            return Err(TranscodeError::InvalidConfig(format!(
                "namespace '{segment}' is not a C identifier"
            )));
        }
        Ok(())
    }
}

/// Several shaders regenerated in one go (`[[shaders]]` tables)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderManifest {
    #[serde(default)]
    pub shaders: Vec<TranscodeConfig>,
}

impl ShaderManifest {
    pub fn from_toml_str(source: &str) -> TranscodeResult<Self> {
        let manifest: Self = toml::from_str(source)?;
        for shader in &manifest.shaders {
            shader.validate()?;
        }
        Ok(manifest)
    }

    pub fn from_file(path: impl AsRef<Path>) -> TranscodeResult<Self> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }
}

fn read_config(path: &Path) -> TranscodeResult<String> {
    fs::read_to_string(path).map_err(|source| TranscodeError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

fn upper_snake(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
