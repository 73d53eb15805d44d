//! Runtime support for generated lazy accessors.
//!
//! Generated code never copies out of the backing buffer: every accessor is a
//! [`View`] (borrowed slice plus address) and every getter decodes its field on
//! demand. This crate pins down the byte contract those getters rely on:
//!
//! - integers are little-endian; `bool` is one byte; `char` is a `u32` scalar;
//! - strings, sequences, options, results and abstract types occupy a
//!   [`POINTER_SIZE`] slot holding the absolute address of their body;
//! - a string body is a `u32` length and UTF-8 bytes, a sequence body a `u32`
//!   count and packed element slots, an option body a `u8` tag and the element
//!   slot, a result body a `u32` tag and the value slot;
//! - an abstract body starts with a `u32` discriminant and the variant object
//!   follows at [`DISCRIMINANT_SIZE`].

pub mod decode;
pub mod error;
pub mod view;
pub mod visit;

pub use decode::{Decode, Sequence, SequenceIter};
pub use error::DecodeError;
pub use view::{DISCRIMINANT_OFFSET, DISCRIMINANT_SIZE, POINTER_SIZE, View};
pub use visit::{LazyObject, ObjectVisitor, VisitValue};
