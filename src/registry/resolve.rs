//! Value resolution, typed accessors and flag parsing

use super::Registry;
use super::resolved::{ResolvedValue, Source};
use crate::bind::FromValue;
use crate::config::ValueType;
use crate::error::{Error, Result};
use crate::value::Value;
use log::debug;

/// Summary row for one loaded argument, see [`Registry::describe`]
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentInfo {
    pub name: String,
    pub value_type: ValueType,
    pub description: String,
    pub flag_name: Option<String>,
    pub env_name: Option<String>,
    pub required: bool,
    /// Effective value and where it came from, if any
    pub resolved: Option<(Value, Source)>,
}

impl Registry {
    // =========================================================================
    // Command line
    // =========================================================================

    /// Parse command-line flags; `args` starts with the program name.
    ///
    /// Only flags given explicitly take precedence over environment values.
    /// Parsing stops at the first positional argument (or after `--`); the
    /// rest is available from [`remaining_args`](Registry::remaining_args).
    /// May be called again after more declarations were loaded.
    ///
    /// # Errors
    ///
    /// [`Error::FlagParse`] for unknown flags, missing values or `--help`
    /// (call `exit()` on the inner `clap::Error` to print it), and
    /// [`Error::Parse`] when a flag value does not coerce.
    pub fn parse_args<I, T>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        self.flags
            .parse_from(&self.config.app_name, self.config.about.as_deref(), args)
    }

    /// Parse the flags of the running process.
    pub fn parse_env_args(&mut self) -> Result<()> {
        self.parse_args(std::env::args_os())
    }

    /// Whether [`parse_args`](Registry::parse_args) has succeeded.
    pub fn flags_parsed(&self) -> bool {
        self.flags.is_parsed()
    }

    /// Arguments left over after the flags, in order.
    pub fn remaining_args(&self) -> &[String] {
        self.flags.remaining()
    }

    /// Rendered `--help` text for the registered flags.
    pub fn usage(&self) -> String {
        self.flags
            .command(&self.config.app_name, self.config.about.as_deref())
            .render_help()
            .to_string()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Loaded entry for `name` (case-insensitive).
    pub fn entry(&self, name: &str) -> Option<&ResolvedValue> {
        self.values.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Loaded argument names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn require_entry(&self, name: &str) -> Result<&ResolvedValue> {
        self.entry(name)
            .ok_or_else(|| Error::NotFound(name.to_lowercase()))
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Effective value of `name` under flag > environment > default.
    ///
    /// `Ok(None)` means no source produced a value for an optional argument.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for unknown names, [`Error::MissingRequired`] for a
    /// required argument without any value.
    pub fn resolve(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.resolve_with_source(name)?.map(|(value, _)| value))
    }

    /// Like [`resolve`](Registry::resolve), also reporting the winning source.
    pub fn resolve_with_source(&self, name: &str) -> Result<Option<(Value, Source)>> {
        let entry = self.require_entry(name)?;
        let resolved = entry.resolve_required(&self.flags)?;
        if let Some((_, source)) = &resolved {
            debug!("Resolved '{}' from {source}", entry.name);
        }
        Ok(resolved)
    }

    /// Resolve and convert into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Registry::resolve) returns, plus
    /// [`Error::TypeMismatch`] when the value does not convert.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        self.resolve(name)?
            .map(|value| T::from_value(name, value))
            .transpose()
    }

    /// Resolve a `string` argument.
    pub fn get_string(&self, name: &str) -> Result<Option<String>> {
        self.get(name)
    }

    /// Resolve any argument of the unsigned family as `u64`.
    pub fn get_uint(&self, name: &str) -> Result<Option<u64>> {
        self.get(name)
    }

    /// Check every required argument resolves to something.
    ///
    /// # Errors
    ///
    /// [`Error::MissingRequired`] naming the first (alphabetically) offender.
    pub fn check_required(&self) -> Result<()> {
        for name in self.names() {
            self.resolve(name)?;
        }
        Ok(())
    }

    /// Summary of every loaded argument, sorted by name.
    pub fn describe(&self) -> Vec<ArgumentInfo> {
        let mut rows: Vec<ArgumentInfo> = self
            .values
            .values()
            .map(|entry| ArgumentInfo {
                name: entry.name.clone(),
                value_type: entry.value_type,
                description: entry.description.clone(),
                flag_name: entry.flag.clone(),
                env_name: entry.env_name.clone(),
                required: entry.required,
                resolved: entry
                    .resolve_in(&self.flags)
                    .map(|(value, source)| (value.clone(), source)),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Argument, MemoryEnvSource};

    fn registry(vars: &[(&str, &str)]) -> Registry {
        Registry::builder("test")
            .about("resolution tests")
            .env_source(vars.iter().copied().collect::<MemoryEnvSource>())
            .build()
    }

    #[test]
    fn test_uint32_default_and_env_agree() {
        let expected = Value::Uint {
            ty: ValueType::Uint32,
            value: 123,
        };

        let mut from_default = registry(&[]);
        from_default
            .load([("n", Argument::typed(ValueType::Uint32, 123.0).env("N"))])
            .unwrap();
        assert_eq!(
            from_default.resolve_with_source("n").unwrap(),
            Some((expected.clone(), Source::Default))
        );

        let mut from_env = registry(&[("N", "123")]);
        from_env
            .load([("n", Argument::typed(ValueType::Uint32, 7).env("N"))])
            .unwrap();
        assert_eq!(
            from_env.resolve_with_source("n").unwrap(),
            Some((expected, Source::Env))
        );
    }

    #[test]
    fn test_flag_beats_env() {
        let mut registry = registry(&[("PORT", "9000")]);
        registry
            .load([("port", Argument::uint(8080).env("PORT").flag("port"))])
            .unwrap();

        registry.parse_args(["test"]).unwrap();
        assert_eq!(registry.get_uint("port").unwrap(), Some(9000));

        registry.parse_args(["test", "--port", "7000"]).unwrap();
        assert_eq!(
            registry.resolve_with_source("port").unwrap(),
            Some((
                Value::Uint {
                    ty: ValueType::Uint,
                    value: 7000
                },
                Source::Flag
            ))
        );
    }

    #[test]
    fn test_subcommand_after_flags() {
        let mut registry = registry(&[]);
        registry
            .load([("port", Argument::uint(8080).flag("port"))])
            .unwrap();

        registry
            .parse_args(["app", "--port", "9000", "serve"])
            .unwrap();

        assert_eq!(registry.get_uint("port").unwrap(), Some(9000));
        assert_eq!(registry.remaining_args(), ["serve"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = registry(&[]);
        registry
            .load([("S3_Bucket", Argument::string("logs"))])
            .unwrap();

        assert!(registry.contains("s3_bucket"));
        assert_eq!(
            registry.get_string("S3_BUCKET").unwrap().as_deref(),
            Some("logs")
        );
    }

    #[test]
    fn test_unknown_name() {
        let registry = registry(&[]);
        let err = registry.resolve("Missing").unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, Error::NotFound(ref name) if name == "missing"));
    }

    #[test]
    fn test_wrong_accessor_is_type_mismatch() {
        let mut registry = registry(&[]);
        registry.load([("name", Argument::string("svc"))]).unwrap();

        assert!(matches!(
            registry.get_uint("name"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_required() {
        let mut registry = registry(&[]);
        registry
            .load([
                (
                    "token",
                    Argument::without_default(ValueType::String)
                        .env("TOKEN")
                        .required(),
                ),
                ("optional", Argument::without_default(ValueType::Uint)),
            ])
            .unwrap();

        assert_eq!(registry.resolve("optional").unwrap(), None);
        assert!(matches!(
            registry.resolve("token"),
            Err(Error::MissingRequired(ref name)) if name == "token"
        ));
        assert!(registry.check_required().is_err());
    }

    #[test]
    fn test_describe_and_usage() {
        let mut registry = registry(&[("WORKERS", "8")]);
        registry
            .load([
                (
                    "workers",
                    Argument::typed(ValueType::Uint8, 4)
                        .env("WORKERS")
                        .flag("workers")
                        .description("number of worker threads"),
                ),
                ("region", Argument::string("eu-west-1")),
            ])
            .unwrap();

        let rows = registry.describe();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "region");
        assert_eq!(rows[1].name, "workers");
        assert_eq!(rows[1].resolved.as_ref().map(|(_, s)| *s), Some(Source::Env));

        let usage = registry.usage();
        assert!(usage.contains("--workers"));
        assert!(usage.contains("number of worker threads"));
        assert!(usage.contains("[default: 4]"));
    }
}
