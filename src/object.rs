use std::fmt;

use crate::errors::{InvalidLevelError, NotImplementedError};
use crate::level::Level;
use crate::render::Renderer;
use crate::snapshot::DataSnapshot;
use crate::value::short_type_name;

/// A domain object that can describe itself
///
/// Implementors report their data at each verbosity [`Level`] through
/// [`BaseObject::get_data`]; the textual representations are derived from
/// that data by the [`Repr`] extension trait.
///
/// - [`Level::Short`] should contain only the identity fields of the object.
/// - [`Level::Expanded`] should contain all the public-facing fields.
/// - [`Level::Debug`] should contain everything, including internal fields.
///
/// Equality, ordering and hashing are deliberately not part of this trait,
/// types that need them must implement the standard traits themselves.
///
/// # Example
/// ```rust
/// use objrepr::{BaseObject, DataSnapshot, Level, Repr};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl BaseObject for Point {
///     fn get_data(&self, level: Level) -> DataSnapshot {
///         let data = DataSnapshot::new().with("x", self.x);
///         match level {
///             Level::Short => data,
///             Level::Expanded | Level::Debug => data.with("y", self.y),
///         }
///     }
/// }
///
/// let point = Point { x: 5, y: 2 };
/// assert_eq!(point.to_single_line(), "Point x = 5");
/// assert_eq!(point.to_multi_line(), "<Point\n  x = 5,\n  y = 2\n/Point>");
/// ```
pub trait BaseObject: Send + Sync {
    /// The name used for the object in its representations
    ///
    /// Defaults to the unqualified name of the implementing type.
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The named data of the object at the given level
    fn get_data(&self, level: Level) -> DataSnapshot {
        let _ = level;
        DataSnapshot::new()
    }

    /// Create a deep copy of the object that shares no references with it
    fn duplicate(&self) -> Result<Box<dyn BaseObject>, NotImplementedError> {
        Err(NotImplementedError::new("duplicate", self.type_name()))
    }
}

/// Representations derived from the data of a [`BaseObject`]
///
/// This trait is implemented for every [`BaseObject`], including trait
/// objects.
pub trait Repr: BaseObject {
    /// Get the object data from a raw integer level
    fn data_at(&self, level: i64) -> Result<DataSnapshot, InvalidLevelError> {
        let level = Level::try_from(level)?;
        Ok(self.get_data(level))
    }

    /// Single line representation from the [`Level::Short`] data
    fn to_single_line(&self) -> String {
        Renderer::new().single_line(self)
    }

    /// Multiple line representation from the [`Level::Expanded`] data
    fn to_multi_line(&self) -> String {
        Renderer::new().multi_line(self)
    }

    /// Multiple line representation of everything in the [`Level::Debug`] data
    ///
    /// Every line is indented by `indent` additional units.
    fn to_debug(&self, indent: usize) -> String {
        Renderer::new().debug(self, indent)
    }
}

impl<T: BaseObject + ?Sized> Repr for T {}

impl fmt::Debug for dyn BaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_single_line())
    }
}

impl fmt::Display for dyn BaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_single_line())
    }
}
