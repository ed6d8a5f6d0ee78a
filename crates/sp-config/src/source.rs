//! Typed, policy-aware access to raw parameter values.

use crate::{ConfigError, ConfigResult};

/// Conversion from one raw parameter token.
pub trait FromParam: Sized {
    /// Human-readable type name used in parse errors.
    const EXPECTED: &'static str;

    fn from_param(raw: &str) -> Option<Self>;
}

impl FromParam for f64 {
    const EXPECTED: &'static str = "real number";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for usize {
    const EXPECTED: &'static str = "non-negative integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromParam for bool {
    const EXPECTED: &'static str = "boolean (0/1/true/false)";

    fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}

impl FromParam for String {
    const EXPECTED: &'static str = "string";

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// A hierarchical, string-keyed parameter store.
///
/// Implementors only provide raw lookup. A key that was defined with no
/// values (`key =`) is present but has a count of zero. Scalar reads take the
/// first value of a multi-valued key.
pub trait ConfigSource {
    /// Raw values recorded for `key`, or `None` if the key was never defined.
    fn values(&self, key: &str) -> Option<&[String]>;

    /// Fully qualified name of `key`, used in error messages.
    fn qualified(&self, key: &str) -> String {
        key.to_string()
    }

    fn contains(&self, key: &str) -> bool {
        self.values(key).is_some()
    }

    /// Number of values defined for `key` (0 when absent).
    fn count(&self, key: &str) -> usize {
        self.values(key).map_or(0, <[String]>::len)
    }

    /// Optional scalar read.
    fn query<T: FromParam>(&self, key: &str) -> ConfigResult<Option<T>> {
        match self.values(key).and_then(<[String]>::first) {
            Some(raw) => self.parse_one(key, raw).map(Some),
            None => Ok(None),
        }
    }

    /// Required scalar read.
    fn get<T: FromParam>(&self, key: &str) -> ConfigResult<T> {
        self.query(key)?.ok_or_else(|| ConfigError::Missing {
            key: self.qualified(key),
        })
    }

    /// Optional array read; every value must parse.
    fn query_arr<T: FromParam>(&self, key: &str) -> ConfigResult<Option<Vec<T>>> {
        match self.values(key) {
            Some(raw) if !raw.is_empty() => raw
                .iter()
                .map(|v| self.parse_one(key, v))
                .collect::<ConfigResult<Vec<T>>>()
                .map(Some),
            _ => Ok(None),
        }
    }

    /// Required array read; at least one value must be present.
    fn get_arr<T: FromParam>(&self, key: &str) -> ConfigResult<Vec<T>> {
        self.query_arr(key)?.ok_or_else(|| ConfigError::Missing {
            key: self.qualified(key),
        })
    }

    /// Scalar read falling back to `default` when absent.
    fn query_or<T: FromParam>(&self, key: &str, default: T) -> ConfigResult<T> {
        Ok(self.query(key)?.unwrap_or(default))
    }

    /// View of the keys under `prefix.`.
    fn prefixed(&self, prefix: &str) -> Prefixed<'_, Self> {
        Prefixed {
            inner: self,
            prefix: prefix.to_string(),
        }
    }

    #[doc(hidden)]
    fn parse_one<T: FromParam>(&self, key: &str, raw: &str) -> ConfigResult<T> {
        T::from_param(raw).ok_or_else(|| ConfigError::Parse {
            key: self.qualified(key),
            value: raw.to_string(),
            expected: T::EXPECTED,
        })
    }
}

/// Namespace view: `prefixed("particles").get("cfl")` reads `particles.cfl`.
#[derive(Debug)]
pub struct Prefixed<'a, S: ?Sized> {
    inner: &'a S,
    prefix: String,
}

impl<S: ConfigSource + ?Sized> ConfigSource for Prefixed<'_, S> {
    fn values(&self, key: &str) -> Option<&[String]> {
        self.inner.values(&format!("{}.{}", self.prefix, key))
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(&format!("{}.{}", self.prefix, key))
    }

    fn count(&self, key: &str) -> usize {
        self.inner.count(&format!("{}.{}", self.prefix, key))
    }

    fn qualified(&self, key: &str) -> String {
        self.inner.qualified(&format!("{}.{}", self.prefix, key))
    }
}
