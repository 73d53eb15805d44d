use thiserror::Error;

/// Errors raised while reading a value through a generated accessor.
///
/// None of these are retried: they signal a corrupted buffer or a buffer that
/// was produced against a different schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A union body carried a tag that is not one of its declared variants.
    #[error("unknown discriminant {tag} for abstract type '{type_name}'")]
    UnknownDiscriminant { type_name: &'static str, tag: u32 },

    /// A read or seek reached past the end of the backing buffer.
    #[error("read of {len} byte(s) at address {address} exceeds buffer of {buffer_len} byte(s)")]
    OutOfBounds {
        address: usize,
        len: usize,
        buffer_len: usize,
    },

    /// An option or result body carried a tag other than 0 or 1.
    #[error("invalid {container} tag {tag} at address {address}")]
    InvalidTag {
        container: &'static str,
        tag: u32,
        address: usize,
    },

    #[error("invalid char value {value:#x} at address {address}")]
    InvalidChar { value: u32, address: usize },

    #[error("string at address {address} is not valid UTF-8")]
    InvalidUtf8 { address: usize },
}
