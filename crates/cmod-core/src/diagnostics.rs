use std::fmt;

use crate::vertex_attribute::AttributeType;

/// A degraded-feature notice produced while converting a model.
///
/// Warnings are observable side effects, not errors: conversion continues
/// past every one of them. A mesh with no position data is dropped from the
/// output (but stays in the decoded model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A declared attribute has no counterpart in the output format.
    UnsupportedAttribute(AttributeType),
    /// A mesh declares no position attribute and contributes nothing.
    NoPositionData,
    /// Texture channels carry diverging UVs; only `texcoordN` is kept.
    PerTextureUv { primary: u8 },
    /// The output format has a single texture slot per map kind.
    MultiTexturing,
    /// Non-normal blend modes cannot be expressed.
    BlendModeUnsupported,
    /// Sprite sizes cannot be expressed; sprites become points.
    SpriteSizeUnsupported,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedAttribute(attribute) => {
                write!(f, "Unsupported attribute {attribute:?} found, skipping")
            }
            Warning::NoPositionData => write!(f, "No position data for mesh, skipping"),
            Warning::PerTextureUv { primary } => write!(
                f,
                "Per-texture UV mapping not supported, using texcoord{primary} for all textures"
            ),
            Warning::MultiTexturing => {
                write!(f, "Multi-texturing not supported, using only base texture")
            }
            Warning::BlendModeUnsupported => write!(f, "Blend mode not supported, ignoring"),
            Warning::SpriteSizeUnsupported => {
                write!(f, "Point sprite sizes not supported, using points instead")
            }
        }
    }
}

/// Caller-supplied receiver for conversion warnings.
pub trait DiagnosticSink {
    fn warning(&mut self, warning: Warning);
}

/// Prints each warning to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn warning(&mut self, warning: Warning) {
        eprintln!("Warning: {warning}");
    }
}

/// Collects warnings, mainly for tests.
impl DiagnosticSink for Vec<Warning> {
    fn warning(&mut self, warning: Warning) {
        self.push(warning);
    }
}
