//! Incremental SVG document builder
//!
//! [`SvgBuilder`] wraps a [`TreeBuilder`]: construction opens the root
//! `svg` element, shape methods emit balanced start/end events, grouping
//! methods return a scoped [`Group`] handle, and one of the `write`
//! variants closes the root and serializes the finished tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

use chrono::Local;
use log::info;

use crate::attrs::Attrs;
use crate::error::BuildError;
use crate::path::sector_path;
use crate::tree::{Element, TreeBuilder, WriteOptions};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Options for the root `svg` element.
///
/// Width and height are stringified as-is; extra attributes go through the
/// usual underscore-to-hyphen normalization.
#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    width: Option<String>,
    height: Option<String>,
    extra: Attrs,
}

impl SvgOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root `width` attribute.
    pub fn with_width(mut self, width: impl ToString) -> Self {
        self.width = Some(width.to_string());
        self
    }

    /// Set the root `height` attribute.
    pub fn with_height(mut self, height: impl ToString) -> Self {
        self.height = Some(height.to_string());
        self
    }

    /// Add a single extra root attribute.
    pub fn with_attr(mut self, key: &str, value: impl ToString) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Add a set of extra root attributes.
    pub fn with_attrs(mut self, extra: Attrs) -> Self {
        for (key, value) in extra.iter() {
            self.extra.insert(key, value);
        }
        self
    }
}

/// A stateful builder for one SVG document.
///
/// The builder exclusively owns the in-progress tree; all methods take
/// `&mut self` and the finalizing `write*`/`finish` methods consume the
/// builder, so a finished document cannot be touched again.
///
/// ```
/// use svg_scribe::{Attrs, SvgBuilder};
///
/// let mut svg = SvgBuilder::with_size(100, 100);
/// svg.circle(50.0, 50.0, 40.0, Attrs::new().set("fill", "steelblue")).unwrap();
/// let mut out = Vec::new();
/// svg.write_to(&mut out).unwrap();
/// let doc = String::from_utf8(out).unwrap();
/// assert!(doc.contains("<circle cx=\"50\" cy=\"50\" r=\"40\""));
/// ```
#[derive(Debug)]
pub struct SvgBuilder {
    tree: TreeBuilder,
}

impl SvgBuilder {
    /// Create a builder with no explicit width or height.
    pub fn new() -> Self {
        Self::with_options(SvgOptions::new())
    }

    /// Create a builder with `width` and `height` root attributes.
    pub fn with_size(width: impl ToString, height: impl ToString) -> Self {
        Self::with_options(SvgOptions::new().with_width(width).with_height(height))
    }

    /// Create a builder from full root-element options.
    ///
    /// Opens the root `svg` element with `xmlns`, `version="1.1"`, the
    /// extra attributes, then `width`/`height` if given, and appends a
    /// provenance comment with the generation timestamp as its first child.
    pub fn with_options(options: SvgOptions) -> Self {
        let mut attrs = Attrs::new().set("xmlns", SVG_NS).set("version", "1.1");
        for (key, value) in options.extra.iter() {
            attrs.insert(key, value);
        }
        if let Some(width) = options.width {
            attrs.insert("width", width);
        }
        if let Some(height) = options.height {
            attrs.insert("height", height);
        }

        let mut tree = TreeBuilder::new();
        tree.start("svg", attrs.into_pairs());
        let stamp = format!("svg-scribe generated at {}", Local::now().to_rfc3339());
        tree.comment(&stamp).expect("root element is open");
        Self { tree }
    }

    /// Emit a complete element: start with merged attributes, then end.
    fn item(&mut self, tag: &str, geometry: Attrs, extra: Attrs) -> Result<(), BuildError> {
        let attrs = geometry.with_defaults(extra);
        self.tree.start(tag, attrs.into_pairs());
        self.tree.end(tag)
    }

    /// Add a `circle` element.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, extra: Attrs) -> Result<(), BuildError> {
        let geometry = Attrs::new().set("cx", cx).set("cy", cy).set("r", r);
        self.item("circle", geometry, extra)
    }

    /// Add a `line` element.
    pub fn line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        extra: Attrs,
    ) -> Result<(), BuildError> {
        let geometry = Attrs::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2);
        self.item("line", geometry, extra)
    }

    /// Add a `rect` element.
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        extra: Attrs,
    ) -> Result<(), BuildError> {
        let geometry = Attrs::new()
            .set("x", x)
            .set("y", y)
            .set("width", w)
            .set("height", h);
        self.item("rect", geometry, extra)
    }

    /// Add a `text` element with character data as its body.
    pub fn text(&mut self, text: &str, x: f64, y: f64, extra: Attrs) -> Result<(), BuildError> {
        let attrs = Attrs::new().set("x", x).set("y", y).with_defaults(extra);
        self.tree.start("text", attrs.into_pairs());
        self.tree.data(text)?;
        self.tree.end("text")
    }

    /// Add a pie slice as a `path` element.
    ///
    /// `alpha` is the start angle and `theta` the signed sweep, both in
    /// radians; see [`sector_path`] for the geometry and its limits.
    pub fn circle_sector(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        alpha: f64,
        theta: f64,
        extra: Attrs,
    ) -> Result<(), BuildError> {
        let geometry = Attrs::new().set("d", sector_path(cx, cy, r, alpha, theta));
        self.item("path", geometry, extra)
    }

    /// Add an arbitrary empty element with normalized attributes.
    pub fn element(&mut self, tag: &str, extra: Attrs) -> Result<(), BuildError> {
        self.item(tag, Attrs::new(), extra)
    }

    /// Open a `g` element; the returned handle closes it.
    pub fn g(&mut self, extra: Attrs) -> Group<'_> {
        self.tree.start("g", extra.into_pairs());
        Group::new(self, "g")
    }

    /// Open a `defs` element; the returned handle closes it.
    pub fn defs(&mut self) -> Group<'_> {
        self.tree.start("defs", Vec::new());
        Group::new(self, "defs")
    }

    /// Open a `text` element to be filled with child content (for example
    /// `tspan` children via [`SvgBuilder::element`]); the returned handle
    /// closes it.
    pub fn text_group(&mut self, x: f64, y: f64, extra: Attrs) -> Group<'_> {
        let attrs = Attrs::new().set("x", x).set("y", y).with_defaults(extra);
        self.tree.start("text", attrs.into_pairs());
        Group::new(self, "text")
    }

    /// Append character data to the innermost open element.
    pub fn data(&mut self, text: &str) -> Result<(), BuildError> {
        self.tree.data(text)
    }

    /// Close the root element and return the completed tree.
    ///
    /// Fails if anything other than the root is still open; nested unclosed
    /// elements are never silently closed.
    pub fn finish(mut self) -> Result<Element, BuildError> {
        self.tree.end("svg")?;
        self.tree.close()
    }

    /// Close the root and write the document to a file, with the default
    /// XML declaration and UTF-8 encoding.
    pub fn write(self, path: impl AsRef<Path>) -> Result<(), BuildError> {
        let path = path.as_ref();
        info!("writing SVG to {}", path.display());
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Close the root and serialize to any writer with default options.
    pub fn write_to<W: Write>(self, dest: W) -> Result<(), BuildError> {
        self.write_with(dest, &WriteOptions::default())
    }

    /// Close the root and serialize with explicit [`WriteOptions`].
    pub fn write_with<W: Write>(self, dest: W, options: &WriteOptions) -> Result<(), BuildError> {
        let root = self.finish()?;
        root.serialize_to(dest, options)
    }
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle for an open grouping element (`g`, `defs`, `text`).
///
/// Dereferences to the underlying [`SvgBuilder`] so drawing continues
/// through the handle, and the borrow checker enforces that nested handles
/// close in strict reverse-of-open order. Dropping the handle closes the
/// element; [`Group::close`] does the same but reports errors.
#[derive(Debug)]
pub struct Group<'a> {
    builder: &'a mut SvgBuilder,
    tag: &'static str,
    closed: bool,
}

impl<'a> Group<'a> {
    fn new(builder: &'a mut SvgBuilder, tag: &'static str) -> Self {
        Self {
            builder,
            tag,
            closed: false,
        }
    }

    /// Close the element this handle opened.
    pub fn close(mut self) -> Result<(), BuildError> {
        self.closed = true;
        self.builder.tree.end(self.tag)
    }
}

impl Deref for Group<'_> {
    type Target = SvgBuilder;

    fn deref(&self) -> &SvgBuilder {
        self.builder
    }
}

impl DerefMut for Group<'_> {
    fn deref_mut(&mut self) -> &mut SvgBuilder {
        self.builder
    }
}

impl Drop for Group<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.builder.tree.end(self.tag) {
            // Unreachable through the public API; a mismatch here means the
            // element stack was corrupted.
            if !std::thread::panicking() {
                panic!("group </{}> left the element stack unbalanced: {err}", self.tag);
            }
        }
    }
}
