//! Encoding layer for CMOD documents.
//!
//! A CMOD file opens with a 16-byte magic line selecting one of two
//! encodings of the same grammar: a whitespace-tokenized text form and a
//! little-endian binary form. [`read_cmod`] sniffs the magic and drives the
//! matching decoder; both feed the same model types through the shared
//! component-read contract, so everything downstream is encoding-blind.
//!
//! The other half of the crate is [`WavefrontWriter`], which emits an
//! assembled [`cmod_wavefront::WavefrontMesh`] as OBJ/MTL text.

pub mod decode_buffer;
pub mod reader;
pub mod token_reader;
pub mod wavefront_writer;

pub use decode_buffer::DecodeBuffer;
pub use reader::read_cmod;
pub use token_reader::TokenReader;
pub use wavefront_writer::WavefrontWriter;
