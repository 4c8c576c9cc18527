//! svg-scribe - an incremental SVG document builder
//!
//! This library wraps an event-based element-tree builder in an ergonomic
//! "draw shape" API: construction opens the root `svg` element, shape and
//! grouping calls accumulate a well-formed tree, and a final `write` closes
//! the root and serializes the document.
//!
//! # Example
//!
//! ```rust
//! use svg_scribe::{Attrs, SvgBuilder};
//!
//! let mut svg = SvgBuilder::with_size(200, 200);
//! {
//!     let mut chart = svg.g(Attrs::new().set("id", "chart"));
//!     chart.circle(100.0, 100.0, 80.0, Attrs::new().set("fill", "none").set("stroke", "#333")).unwrap();
//!     chart.circle_sector(100.0, 100.0, 80.0, 0.0, 1.2, Attrs::new().set("fill", "steelblue")).unwrap();
//! }
//! svg.text("demo", 100.0, 190.0, Attrs::new().set("text_anchor", "middle")).unwrap();
//!
//! let mut out = Vec::new();
//! svg.write_to(&mut out).unwrap();
//! let doc = String::from_utf8(out).unwrap();
//! assert!(doc.contains("<path d=\"M100,100 "));
//! assert!(doc.ends_with("</svg>"));
//! ```
//!
//! Attribute keys use underscores in place of hyphens (`stroke_width`
//! becomes `stroke-width`); nothing is validated against the SVG spec.
//! Grouping calls return a scoped [`Group`] handle that closes its element
//! when dropped or explicitly closed.

pub mod attrs;
pub mod builder;
pub mod error;
pub mod path;
pub mod stylesheet;
pub mod tree;

pub use attrs::Attrs;
pub use builder::{Group, SvgBuilder, SvgOptions};
pub use error::BuildError;
pub use path::sector_path;
pub use stylesheet::{StyleSheet, StylesheetError};
pub use tree::{Element, Node, TreeBuilder, WriteOptions};
