//! Command-line flag handling
//!
//! Builds a `clap::Command` from the registered declarations and keeps the
//! coerced value of every flag that was given explicitly on the command line.
//! Parsing stops at the first positional argument; it and everything after it
//! are kept as remaining arguments.

use crate::config::ValueType;
use crate::error::Result;
use crate::value::Value;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use log::debug;
use std::collections::HashMap;

/// Id of the catch-all positional; flag names cannot contain spaces
const REMAINING_ID: &str = "remaining args";

/// A flag candidate registered by one declaration
#[derive(Debug, Clone)]
pub(crate) struct FlagSpec {
    /// Long flag name, without `--`
    pub flag: String,
    /// Argument that declared the flag
    pub owner: String,
    pub value_type: ValueType,
    /// Stringified default, shown in help
    pub default: Option<String>,
    pub help: String,
}

/// Registered flags plus the values parsed for them
#[derive(Debug, Default)]
pub(crate) struct FlagSet {
    specs: Vec<FlagSpec>,
    explicit: HashMap<String, Value>,
    remaining: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    /// Argument that registered `flag`, if any
    pub fn owner_of(&self, flag: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|spec| spec.flag == flag)
            .map(|spec| spec.owner.as_str())
    }

    /// Add a flag; the caller has already ruled out duplicates
    pub fn register(&mut self, spec: FlagSpec) {
        debug!(
            "Registered flag --{} ({}) for '{}'",
            spec.flag, spec.value_type, spec.owner
        );
        self.specs.push(spec);
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Value given on the command line for `flag`
    pub fn explicit_value(&self, flag: &str) -> Option<&Value> {
        self.explicit.get(flag)
    }

    /// Positional arguments left after the flags
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn clear(&mut self) {
        self.specs.clear();
        self.explicit.clear();
        self.remaining.clear();
        self.parsed = false;
    }

    /// Build the `clap` command describing every registered flag
    pub fn command(&self, app_name: &str, about: Option<&str>) -> Command {
        let mut command = Command::new(app_name.to_string());
        if let Some(about) = about {
            command = command.about(about.to_string());
        }

        for spec in &self.specs {
            let mut arg = Arg::new(spec.flag.clone())
                .long(spec.flag.clone())
                .help(spec.help.clone())
                .value_name(spec.value_type.as_str().to_uppercase())
                .value_parser(clap::value_parser!(String))
                .action(ArgAction::Set);
            if let Some(default) = &spec.default {
                arg = arg.default_value(default.clone());
            }
            command = command.arg(arg);
        }
        command.arg(
            Arg::new(REMAINING_ID)
                .value_name("ARGS")
                .value_parser(clap::value_parser!(String))
                .action(ArgAction::Set)
                .num_args(1..)
                .trailing_var_arg(true)
                .hide(true),
        )
    }

    /// Parse `args` (program name first) and coerce every explicit flag
    ///
    /// Nothing is stored unless every explicit flag coerces.
    pub fn parse_from<I, T>(&mut self, app_name: &str, about: Option<&str>, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = self.command(app_name, about).try_get_matches_from(args)?;

        let mut explicit = HashMap::new();
        for spec in &self.specs {
            if matches.value_source(&spec.flag) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(raw) = matches.get_one::<String>(&spec.flag) else {
                continue;
            };
            let value = spec.value_type.coerce_str(&spec.owner, raw)?;
            debug!("Flag --{} set on command line to '{value}'", spec.flag);
            explicit.insert(spec.flag.clone(), value);
        }

        let remaining: Vec<String> = matches
            .get_many::<String>(REMAINING_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        if let Some(first) = remaining.first() {
            debug!("Flag parsing stopped at '{first}'");
        }

        self.explicit = explicit;
        self.remaining = remaining;
        self.parsed = true;
        Ok(())
    }
}
