//! Per-argument resolution

use super::flags::FlagSet;
use crate::config::ValueType;
use crate::error::{Error, Result};
use crate::value::Value;
use std::fmt;

/// Which source produced a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Flag,
    Env,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Flag => "flag",
            Source::Env => "env",
            Source::Default => "default",
        })
    }
}

/// Lazily-evaluated binding for one declared argument
///
/// Holds every candidate the argument can resolve from. Resolution only reads,
/// so it can be repeated freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub(crate) name: String,
    pub(crate) value_type: ValueType,
    pub(crate) description: String,
    pub(crate) flag: Option<String>,
    pub(crate) env_name: Option<String>,
    pub(crate) env: Option<Value>,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
}

impl ResolvedValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flag_name(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    pub fn env_name(&self) -> Option<&str> {
        self.env_name.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Environment value captured at load time
    pub fn env_value(&self) -> Option<&Value> {
        self.env.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Effective value under flag > environment > default
    ///
    /// A flag only counts when it was given on the command line.
    pub(crate) fn resolve_in<'a>(&'a self, flags: &'a FlagSet) -> Option<(&'a Value, Source)> {
        let from_flag = self
            .flag
            .as_deref()
            .and_then(|flag| flags.explicit_value(flag))
            .map(|value| (value, Source::Flag));

        from_flag
            .or_else(|| self.env.as_ref().map(|value| (value, Source::Env)))
            .or_else(|| self.default.as_ref().map(|value| (value, Source::Default)))
    }

    /// Like [`resolve_in`](Self::resolve_in) but enforces `required`
    pub(crate) fn resolve_required(&self, flags: &FlagSet) -> Result<Option<(Value, Source)>> {
        match self.resolve_in(flags) {
            Some((value, source)) => Ok(Some((value.clone(), source))),
            None if self.required => Err(Error::MissingRequired(self.name.clone())),
            None => Ok(None),
        }
    }
}
