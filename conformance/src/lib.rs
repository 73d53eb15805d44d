//! Accessors generated at build time from the documents in `schemas/`.
//!
//! Nothing here is written by hand; the tests in `tests/` decode hand-built
//! buffers through these modules.

pub mod shapes {
    include!(concat!(env!("OUT_DIR"), "/shapes.rs"));
}

pub mod tree {
    include!(concat!(env!("OUT_DIR"), "/tree.rs"));
}

pub mod notes {
    include!(concat!(env!("OUT_DIR"), "/notes.rs"));
}
