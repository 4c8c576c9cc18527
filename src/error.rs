//! Error types for the tree-building protocol

use thiserror::Error;

/// Errors raised while building or serializing an SVG document.
///
/// Stack violations (`MismatchedEnd`, `NoOpenElement`) are caller bugs and
/// surface immediately; they are never papered over by silently closing or
/// reopening elements.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("no element is open, cannot end </{tag}>")]
    NoOpenElement { tag: String },

    #[error("no element is open, cannot append content")]
    NoCurrentElement,

    #[error("the root element is already closed")]
    DocumentClosed,

    #[error("{0} element(s) still open at close")]
    UnclosedElements(usize),

    #[error("no root element was produced")]
    NoRoot,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),
}
