//! objrepr gives domain objects uniform, introspective string representations.
//!
//! Types implement [`BaseObject`] by reporting their data as a [`DataSnapshot`]
//! at three verbosity [levels](`Level`), and get single line, multi-line and
//! debug representations from the [`Repr`] extension trait. Any [`Value`]
//! (primitives, containers, objects, or opaque values) can be rendered with
//! [`render_value`] or [`Value::render`].
//!
//! # Features
//!
//! - Deterministic output. Rendering only reads the values and keeps no state between calls.
//! - Bounded single line output. Line breaks are replaced and long output is truncated at 100 characters.
//! - Safe on self-referencing object graphs. Objects that refer back to themselves are rendered as `<cycle: TypeName>`.
//! - Code timing. A [`Timer`] logs nested elapsed-time measurements through the [tracing crate](https://crates.io/crates/tracing).
//! - File logging. The [`logging`] module installs a `tracing` subscriber writing to a size-rotated log file.
//!
//! # Objects
//!
//! ```rust
//! use objrepr::{BaseObject, DataSnapshot, Level, Repr};
//!
//! struct Page {
//!     title: String,
//!     code: Option<u16>,
//!     tables: Vec<&'static str>,
//! }
//!
//! impl BaseObject for Page {
//!     fn get_data(&self, level: Level) -> DataSnapshot {
//!         let mut data = DataSnapshot::new();
//!         data.insert("code", self.code);
//!         data.insert("title", &self.title);
//!         if level >= Level::Expanded {
//!             data.insert("tables", self.tables.clone());
//!         }
//!         data
//!     }
//! }
//!
//! let page = Page {
//!     title: "Orders".to_string(),
//!     code: Some(200),
//!     tables: vec!["pending", "shipped"],
//! };
//!
//! assert_eq!(page.to_single_line(), r#"Page code = 200, title = "Orders""#);
//! assert_eq!(
//!     page.to_multi_line(),
//!     "<Page\n  code = 200,\n  title = \"\n      Orders\n    \",\n  tables = list(\n    0: pending,\n    1: shipped\n  )\n/Page>"
//! );
//! ```
//!
//! # Values
//!
//! ```rust
//! use objrepr::{render_value, Value};
//!
//! let value = Value::from((1..=25).collect::<Vec<i32>>());
//!
//! // single line
//! assert_eq!(render_value(&Value::from(true), 0).unwrap(), "true");
//! assert!(render_value(&value, 0).unwrap().starts_with("1,2,3"));
//!
//! // multi-line output lists up to 20 items
//! assert!(render_value(&value, 1).unwrap().ends_with("  ... + 5 items\n)"));
//!
//! // only levels 0, 1 and 2 exist
//! assert!(render_value(&value, 3).is_err());
//! ```
pub mod errors;
pub mod logging;

mod level;
mod object;
mod render;
mod snapshot;
mod timer;
mod value;

pub use level::Level;
pub use object::{BaseObject, Repr};
pub use render::render_value;
pub use snapshot::DataSnapshot;
pub use timer::{timed, Timer, TIMER_TARGET};
pub use value::{Complex, Opaque, RangeValue, SeqKind, Value};
