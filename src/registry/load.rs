//! Declaration loading
//!
//! Turns declarations into flag registrations and value-table entries.

use super::Registry;
use super::flags::FlagSpec;
use super::resolved::ResolvedValue;
use crate::config::Argument;
use crate::error::{Error, Result};
use crate::source::read_declarations;
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

/// Flags `clap` claims for itself.
const RESERVED_FLAGS: &[&str] = &["help"];

/// Check a flag name can be used as `--<flag>`
fn validate_flag_name(name: &str, flag: &str) -> Result<()> {
    let reason = if flag.starts_with('-') {
        "flag names are given without leading dashes"
    } else if flag.contains('=') {
        "flag names cannot contain '='"
    } else if flag.chars().any(char::is_whitespace) {
        "flag names cannot contain whitespace"
    } else {
        return Ok(());
    };
    Err(Error::parse(name, flag, reason))
}

impl Registry {
    /// Load declarations into the registry.
    ///
    /// Names are lower-cased. For every declaration the default is coerced, a
    /// flag is registered when `flag_name` is set, and the environment variable
    /// is read and coerced when `env_name` is set (an unset variable is fine).
    ///
    /// The call is all-or-nothing: if any declaration fails, neither the value
    /// table nor the flag set is touched. Loading is additive; use
    /// [`reset`](Registry::reset) to start over.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedType`] for an unknown `type`
    /// - [`Error::Parse`] for a default or environment value that does not
    ///   coerce, or a flag name that is not usable as `--<flag>`
    /// - [`Error::DuplicateFlag`] when a flag name is already taken
    /// - [`Error::DuplicateArgument`] when a name is already loaded
    pub fn load<I, K>(&mut self, declarations: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Argument)>,
        K: Into<String>,
    {
        let mut names = HashSet::new();
        let mut staged_values = Vec::new();
        let mut staged_flags: Vec<FlagSpec> = Vec::new();

        for (name, argument) in declarations {
            let name = name.into().to_lowercase();
            if self.values.contains_key(&name) || !names.insert(name.clone()) {
                return Err(Error::DuplicateArgument(name));
            }

            let value_type = argument.value_type(&name)?;
            let default = argument.typed_default(&name, value_type)?;

            if let Some(flag) = &argument.flag_name {
                validate_flag_name(&name, flag)?;
                let first = self
                    .flags
                    .owner_of(flag)
                    .map(String::from)
                    .or_else(|| {
                        staged_flags
                            .iter()
                            .find(|spec| &spec.flag == flag)
                            .map(|spec| spec.owner.clone())
                    })
                    .or_else(|| {
                        RESERVED_FLAGS
                            .contains(&flag.as_str())
                            .then(|| "clap".to_string())
                    });
                if let Some(first) = first {
                    return Err(Error::DuplicateFlag {
                        flag: flag.clone(),
                        first,
                        second: name,
                    });
                }

                staged_flags.push(FlagSpec {
                    flag: flag.clone(),
                    owner: name.clone(),
                    value_type,
                    default: default.as_ref().map(ToString::to_string),
                    help: argument.description.clone(),
                });
            }

            let env = match &argument.env_name {
                Some(env_name) => self.env.read(&name, env_name, value_type)?,
                None => None,
            };

            debug!(
                "Staged '{name}' ({value_type}): flag={:?} env={:?} default={}",
                argument.flag_name,
                argument.env_name,
                default.is_some()
            );

            staged_values.push(ResolvedValue {
                name,
                value_type,
                description: argument.description,
                flag: argument.flag_name,
                env_name: argument.env_name,
                env,
                default,
                required: argument.required,
            });
        }

        let loaded = staged_values.len();
        let registered = staged_flags.len();
        for spec in staged_flags {
            self.flags.register(spec);
        }
        for value in staged_values {
            self.values.insert(value.name.clone(), value);
        }

        info!("Loaded {loaded} argument(s), registered {registered} flag(s)");
        Ok(())
    }

    /// Read a schema file and load its declarations.
    ///
    /// # Errors
    ///
    /// [`Error::FileRead`] and [`Error::Decode`] from reading the file, then
    /// everything [`load`](Registry::load) can return.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let declarations = read_declarations(path.as_ref())?;
        self.load(declarations)
    }

    /// Drop every loaded argument and registered flag.
    pub fn reset(&mut self) {
        debug!(
            "Resetting registry ({} argument(s), {} flag(s))",
            self.values.len(),
            self.flags.len()
        );
        self.values.clear();
        self.flags.clear();
    }
}
