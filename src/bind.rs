//! Typed-field binding
//!
//! [`Bind`] fills a caller-owned struct from a [`Registry`]. It is normally
//! derived:
//!
//! ```rust,ignore
//! use argbind::Bind;
//!
//! #[derive(Default, Bind)]
//! struct ServerConfig {
//!     #[config("port")]
//!     port: u16,
//!     #[config(key = "s3_bucket")]
//!     bucket: Option<String>,
//!     // untagged: never touched
//!     started_at: u64,
//! }
//! ```
//!
//! Each tagged field is resolved by key (case-insensitive) and converted with
//! [`FromValue`]. A key that was never loaded leaves the field as it was, unless
//! the registry was built with `strict_binding(true)`.

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::value::Value;
use log::debug;

/// Conversion from a resolved [`Value`] into a field type
pub trait FromValue: Sized {
    /// Convert `value`; `field` names the destination for error messages.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the value's type is incompatible.
    fn from_value(field: &str, value: Value) -> Result<Self>;

    /// Value to assign when the argument resolves to nothing.
    ///
    /// `None` leaves the field untouched.
    fn from_absent() -> Option<Self> {
        None
    }
}

fn mismatch(field: &str, expected: &str, value: &Value) -> Error {
    Error::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: match value {
            Value::String(_) => "string".to_string(),
            Value::Uint { ty, value } => format!("{ty} {value}"),
        },
    }
}

impl FromValue for Value {
    fn from_value(_field: &str, value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(field, "String", &other)),
        }
    }
}

macro_rules! impl_from_value_uint {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(field: &str, value: Value) -> Result<Self> {
                    match value {
                        Value::Uint { value: n, .. } => <$t>::try_from(n)
                            .map_err(|_| mismatch(field, stringify!($t), &value)),
                        other => Err(mismatch(field, stringify!($t), &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value_uint!(u8, u16, u32, u64, usize);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        T::from_value(field, value).map(Some)
    }

    fn from_absent() -> Option<Self> {
        Some(None)
    }
}

/// Types that can be filled from a [`Registry`]
///
/// Fields assigned before an error stay assigned.
pub trait Bind {
    /// Assign every tagged field from `registry`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`], [`Error::MissingRequired`], and
    /// [`Error::NotFound`] under strict binding.
    fn bind_from(&mut self, registry: &Registry) -> Result<()>;
}

impl Registry {
    /// Fill `target` from this registry.
    pub fn bind<T: Bind + ?Sized>(&self, target: &mut T) -> Result<()> {
        target.bind_from(self)
    }

    /// Resolve `key` into `target`, the building block of derived [`Bind`].
    ///
    /// Returns whether `target` was assigned.
    pub fn bind_field<T: FromValue>(&self, key: &str, field: &str, target: &mut T) -> Result<bool> {
        if !self.contains(key) {
            if self.config.strict_binding {
                return Err(Error::NotFound(key.to_lowercase()));
            }
            debug!("No argument '{key}' for field '{field}', leaving it unchanged");
            return Ok(false);
        }

        match self.resolve(key)? {
            Some(value) => {
                *target = T::from_value(field, value)?;
                Ok(true)
            }
            None => match T::from_absent() {
                Some(absent) => {
                    *target = absent;
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }
}
