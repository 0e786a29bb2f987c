// Basic usage example for argbind
//
// Run with: cargo run --example basic_usage -- --port 9000
// Try also: APP_BUCKET=uploads cargo run --example basic_usage

use argbind::{Argument, JsonFormat, Registry, ValueType, parse_declarations};
use std::path::Path;

const SCHEMA: &str = r#"{
    "Port": {
        "description": "Port the HTTP listener binds to",
        "default": 8080,
        "env_name": "APP_PORT",
        "flag_name": "port",
        "type": "uint16"
    },
    "bucket": {
        "description": "Bucket for uploads",
        "default": "scratch",
        "env_name": "APP_BUCKET",
        "type": "string"
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = Registry::builder("basic_usage")
        .about("Shows how flags, env vars and defaults combine")
        .build();

    // Declarations from a schema document...
    registry.load(parse_declarations(&JsonFormat, SCHEMA, Path::new("inline"))?)?;

    // ...and from code
    registry.load([(
        "workers",
        Argument::typed(ValueType::Uint8, 4)
            .flag("workers")
            .description("Worker threads"),
    )])?;

    if let Err(e) = registry.parse_env_args() {
        match e {
            argbind::Error::FlagParse(clap_err) => clap_err.exit(),
            other => return Err(other.into()),
        }
    }

    for row in registry.describe() {
        match row.resolved {
            Some((value, source)) => {
                println!("{:<8} {:<7} = {value} (from {source})", row.name, row.value_type)
            }
            None => println!("{:<8} {:<7} (unset)", row.name, row.value_type),
        }
    }

    Ok(())
}
