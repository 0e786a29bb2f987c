// Derive macro example for argbind
//
// Run with: cargo run --example derive_usage --features derive -- --port 9000

use argbind::{Argument, Bind, Registry, ValueType};

#[derive(Debug, Default, Bind)]
struct ServerConfig {
    #[config("port")]
    port: u16,

    #[config("s3_bucket")]
    bucket: Option<String>,

    #[config(flatten)]
    limits: Limits,
}

#[derive(Debug, Default, Bind)]
struct Limits {
    #[config(key = "max_conns")]
    max_conns: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = Registry::builder("derive_usage").build();
    registry.load([
        (
            "port",
            Argument::typed(ValueType::Uint16, 8080)
                .flag("port")
                .env("APP_PORT"),
        ),
        ("s3_bucket", Argument::without_default(ValueType::String).env("S3_BUCKET")),
        ("max_conns", Argument::typed(ValueType::Uint32, 1024).flag("max-conns")),
    ])?;
    registry.parse_env_args()?;

    let mut config = ServerConfig::default();
    registry.bind(&mut config)?;

    println!("{config:#?}");
    Ok(())
}
