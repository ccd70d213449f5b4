//! Core data model for Celestia CMOD documents.
//!
//! A CMOD document is an ordered collection of materials followed by an
//! ordered collection of meshes. Each mesh declares a vertex description
//! (which attributes exist and in which on-disk format), carries one
//! attribute-interleaved vertex stream, and finishes with a list of
//! primitive records referencing materials by index.
//!
//! This crate holds the decoded representation plus the small shared
//! contracts the encoding layer is written against: the [`DataRead`] trait
//! used to pull raw attribute values out of either wire encoding, and the
//! [`DiagnosticSink`] through which lossy conversions report degraded
//! features.

pub mod color;
pub mod data_read;
pub mod diagnostics;
pub mod error;
pub mod material;
pub mod mesh;
pub mod model;
pub mod primitive;
pub mod token;
pub mod variant;
pub mod vertex_attribute;

pub use color::Color;
pub use data_read::DataRead;
pub use diagnostics::{ConsoleSink, DiagnosticSink, Warning};
pub use error::{CmodError, Result};
pub use material::{BlendMode, Material, TextureSemantic};
pub use mesh::Mesh;
pub use model::Model;
pub use primitive::{Primitive, PrimitiveCategory, PrimitiveType};
pub use token::Token;
pub use variant::{AttributeFormat, Variant};
pub use vertex_attribute::{AttributeType, VariantIter, VertexAttribute};
