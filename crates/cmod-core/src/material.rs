use std::collections::BTreeMap;

use crate::color::Color;
use crate::error::{CmodError, Result};

/// Alpha blending mode declared by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Additive,
    PremultipliedAlpha,
}

impl BlendMode {
    /// Decodes the 16-bit code used by the binary encoding.
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => BlendMode::Normal,
            1 => BlendMode::Additive,
            2 => BlendMode::PremultipliedAlpha,
            _ => return None,
        })
    }
}

/// Which sampler slot a texture path feeds.
///
/// The ASCII encoding spells these as `texture0`..`texture3`, with the
/// digit equal to the binary code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextureSemantic {
    Diffuse,
    Normal,
    Specular,
    Emissive,
}

impl TextureSemantic {
    /// Decodes the 16-bit code used by the binary encoding (and the digit
    /// of the ASCII `textureN` keyword).
    pub fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => TextureSemantic::Diffuse,
            1 => TextureSemantic::Normal,
            2 => TextureSemantic::Specular,
            3 => TextureSemantic::Emissive,
            _ => return None,
        })
    }
}

/// One decoded material block. Immutable once the decoder returns it.
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub diffuse: Option<Color>,
    pub specular: Option<Color>,
    pub emissive: Option<Color>,
    pub specular_power: Option<f32>,
    pub opacity: Option<f32>,
    pub blend_mode: Option<BlendMode>,
    textures: BTreeMap<TextureSemantic, String>,
}

impl Material {
    /// Assigns a texture path, replacing any previous path for the same
    /// semantic. This is the ASCII decoder's behavior.
    pub fn set_texture(&mut self, semantic: TextureSemantic, path: String) {
        self.textures.insert(semantic, path);
    }

    /// Assigns a texture path, rejecting a second assignment to the same
    /// semantic. This is the binary decoder's behavior.
    pub fn add_texture(&mut self, semantic: TextureSemantic, path: String) -> Result<()> {
        if self.textures.contains_key(&semantic) {
            return Err(CmodError::format("Multiple entries for texture"));
        }
        self.textures.insert(semantic, path);
        Ok(())
    }

    pub fn texture(&self, semantic: TextureSemantic) -> Option<&str> {
        self.textures.get(&semantic).map(String::as_str)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
