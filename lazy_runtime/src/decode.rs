/* Decoding of nested values.
   Every value kind knows the width of the slot it occupies inside its owner and
   how to materialize itself from that slot. Indirect kinds store a pointer in
   the slot and keep their body elsewhere in the buffer. */

use crate::error::DecodeError;
use crate::view::{POINTER_SIZE, View};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A value that can be read from a slot of a buffer.
pub trait Decode<'a>: Sized {
    /// Bytes the value occupies inline in its owner.
    const WIDTH: usize;

    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError>;
}

macro_rules! decode_primitive {
    ($ty:ty, $width:expr, $read:ident) => {
        impl<'a> Decode<'a> for $ty {
            const WIDTH: usize = $width;

            fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
                view.$read(offset)
            }
        }
    };
}

decode_primitive!(bool, 1, read_bool);
decode_primitive!(u32, 4, read_u32);
decode_primitive!(i32, 4, read_i32);
decode_primitive!(u64, 8, read_u64);
decode_primitive!(i64, 8, read_i64);
decode_primitive!(char, 4, read_char);

impl<'a> Decode<'a> for &'a str {
    const WIDTH: usize = POINTER_SIZE;

    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
        view.pointer(offset)?.read_str(0)
    }
}

/* Option body: u8 tag, then the element slot */
impl<'a, T: Decode<'a>> Decode<'a> for Option<T> {
    const WIDTH: usize = POINTER_SIZE;

    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
        let body = view.pointer(offset)?;
        match body.read_u8(0)? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(body, 1)?)),
            tag => Err(DecodeError::InvalidTag {
                container: "option",
                tag: tag as u32,
                address: body.address(),
            }),
        }
    }
}

/* Result body: u32 tag, then the value slot */
impl<'a, T: Decode<'a>, E: Decode<'a>> Decode<'a> for Result<T, E> {
    const WIDTH: usize = POINTER_SIZE;

    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
        let body = view.pointer(offset)?;
        match body.read_u32(0)? {
            0 => Ok(Ok(T::decode(body, 4)?)),
            1 => Ok(Err(E::decode(body, 4)?)),
            tag => Err(DecodeError::InvalidTag {
                container: "result",
                tag,
                address: body.address(),
            }),
        }
    }
}

/// Lazily decoded sequence: elements are materialized one at a time on access.
pub struct Sequence<'a, T> {
    elements: View<'a>,
    len: usize,
    _element: PhantomData<fn() -> T>,
}

impl<'a, T: Decode<'a>> Sequence<'a, T> {
    /* Sequence body: u32 element count, then packed element slots */
    pub fn read(body: View<'a>) -> Result<Self, DecodeError> {
        let len = body.read_u32(0)? as usize;
        let elements = body.seek(4)?;
        Ok(Self { elements, len, _element: PhantomData })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<Result<T, DecodeError>> {
        if index >= self.len {
            return None;
        }
        Some(T::decode(self.elements, index * T::WIDTH))
    }

    pub fn iter(&self) -> SequenceIter<'a, T> {
        SequenceIter { sequence: *self, index: 0 }
    }
}

impl<'a, T: Decode<'a>> Decode<'a> for Sequence<'a, T> {
    const WIDTH: usize = POINTER_SIZE;

    fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
        Sequence::read(view.pointer(offset)?)
    }
}

impl<T> Clone for Sequence<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sequence<'_, T> {}

impl<T> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("address", &self.elements.address())
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: Decode<'a>> IntoIterator for Sequence<'a, T> {
    type Item = Result<T, DecodeError>;
    type IntoIter = SequenceIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SequenceIter<'a, T> {
    sequence: Sequence<'a, T>,
    index: usize,
}

impl<'a, T: Decode<'a>> Iterator for SequenceIter<'a, T> {
    type Item = Result<T, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.sequence.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Decode<'a>> ExactSizeIterator for SequenceIter<'a, T> {}

impl<'a, T: Decode<'a>> FusedIterator for SequenceIter<'a, T> {}
