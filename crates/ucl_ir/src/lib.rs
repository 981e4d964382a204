//! Document tree for the UCL configuration parser.
//!
//! The grammar engine (`ucl_parse`) produces one root [`Object`] per parser.
//! Objects are plain owned values: cloning one detaches it from the parser,
//! and nothing in the tree borrows from the source text.
//!
//! # Shape
//!
//! ```text
//! Object { key, value }
//!     value: Object(ObjectMap) | Array(Vec<Object>) | Int | Float
//!          | String | Bool | Time | Null
//!
//! ObjectMap: [Entry { key, values: [Object, ...] }, ...]
//!                              ^ implicit array for repeated keys
//! ```

pub mod de;
mod map;
mod object;
mod span;

pub use de::{from_object, DecodeError, KEY_FIELD};
pub use map::{Entry, Iter, ObjectMap};
pub use object::{Object, ObjectType, Value};
pub use span::{Span, SpanError};
