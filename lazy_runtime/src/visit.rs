/* Tree-visiting protocol shared by every generated accessor.
   `O` is the generated object registry: a closed enum with one variant per
   schema type, so visitors receive every nested object as one value type. */

use crate::decode::{Decode, Sequence};
use crate::error::DecodeError;
use crate::view::View;

/// Callback invoked once per nested object; `true` means "found".
pub trait ObjectVisitor<O> {
    fn visit(&mut self, object: O) -> bool;
}

impl<O, F: FnMut(O) -> bool> ObjectVisitor<O> for F {
    fn visit(&mut self, object: O) -> bool {
        self(object)
    }
}

/// Base of every generated accessor.
///
/// The default `visit_children` visits nothing, which is what a type without
/// nested objects needs; generated types with nested objects override it.
pub trait LazyObject<'a, O>: Copy {
    fn view(&self) -> View<'a>;

    fn visit_children<V: ObjectVisitor<O>>(&self, _visitor: &mut V) -> Result<bool, DecodeError> {
        Ok(false)
    }
}

/// Hands a decoded field value to a visitor.
///
/// Objects are passed to the visitor directly; containers forward each element;
/// primitives are never visited. Results are OR-combined without stopping early.
pub trait VisitValue<O> {
    fn visit_value<V: ObjectVisitor<O>>(&self, visitor: &mut V) -> Result<bool, DecodeError>;
}

macro_rules! visit_nothing {
    ($($ty:ty),*) => {
        $(
            impl<O> VisitValue<O> for $ty {
                fn visit_value<V: ObjectVisitor<O>>(&self, _visitor: &mut V) -> Result<bool, DecodeError> {
                    Ok(false)
                }
            }
        )*
    };
}

visit_nothing!(bool, u32, i32, u64, i64, char, &str);

impl<'a, O, T: Decode<'a> + VisitValue<O>> VisitValue<O> for Sequence<'a, T> {
    fn visit_value<V: ObjectVisitor<O>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {
        let mut found = false;
        for element in self.iter() {
            found |= element?.visit_value(visitor)?;
        }
        Ok(found)
    }
}

impl<O, T: VisitValue<O>> VisitValue<O> for Option<T> {
    fn visit_value<V: ObjectVisitor<O>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {
        match self {
            Some(value) => value.visit_value(visitor),
            None => Ok(false),
        }
    }
}

impl<O, T: VisitValue<O>, E: VisitValue<O>> VisitValue<O> for Result<T, E> {
    fn visit_value<V: ObjectVisitor<O>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {
        match self {
            Ok(value) => value.visit_value(visitor),
            Err(value) => value.visit_value(visitor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /* Minimal stand-in for a generated object: a u32 "node" inline */
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Leaf(u32);

    impl<'a> Decode<'a> for Leaf {
        const WIDTH: usize = 4;

        fn decode(view: View<'a>, offset: usize) -> Result<Self, DecodeError> {
            Ok(Leaf(view.read_u32(offset)?))
        }
    }

    impl VisitValue<Leaf> for Leaf {
        fn visit_value<V: ObjectVisitor<Leaf>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {
            Ok(visitor.visit(*self))
        }
    }

    fn visit<T: VisitValue<Leaf>>(value: &T, visitor: &mut impl ObjectVisitor<Leaf>) -> bool {
        value.visit_value(visitor).unwrap()
    }

    fn leaves(values: &[u32]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&(values.len() as u32).to_le_bytes());
        for v in values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    #[test]
    fn sequence_visits_every_element_even_after_found() {
        let buf = leaves(&[1, 2, 3]);
        let seq: Sequence<Leaf> = View::new(&buf).decode(0).unwrap();
        let mut seen = Vec::new();
        let found = visit(&seq, &mut |leaf: Leaf| {
            seen.push(leaf.0);
            leaf.0 == 1
        });
        assert!(found);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn primitives_and_empty_containers_visit_nothing() {
        let mut calls = 0;
        let mut visitor = |_: Leaf| {
            calls += 1;
            true
        };
        assert!(!visit(&7u32, &mut visitor));
        assert!(!visit(&"text", &mut visitor));
        assert!(!visit(&None::<Leaf>, &mut visitor));
        assert!(!visit(&Err::<Leaf, i64>(3), &mut visitor));
        assert!(visit(&Ok::<Leaf, i64>(Leaf(9)), &mut visitor));
        assert_eq!(calls, 1);
    }
}
