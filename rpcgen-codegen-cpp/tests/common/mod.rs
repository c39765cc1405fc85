#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rpcgen_codegen::{GeneratorConfig, StubPlacement};
use rpcgen_ir::Package;

pub const ECHO: &str = r#"
name = "my.pkg"
source = "my/pkg/echo.proto"

[[services]]
name = "Echo"

[[services.methods]]
name = "Echo"
type = "UNARY"
request = "my.pkg.EchoMessage"
response = "my.pkg.EchoMessage"
"#;

pub const GREETER: &str = r#"
name = "demo"
source = "demo/greeter.proto"

[[services]]
name = "Greeter"

[[services.methods]]
name = "Say"
type = "UNARY"
request = "demo.Hello"
response = "demo.Reply"

[[services.methods]]
name = "Listen"
type = "SERVER_STREAMING"
request = "demo.Topic"
response = "demo.Event"

[[services]]
name = "Chatter"

[[services.methods]]
name = "Upload"
type = "CLIENT_STREAMING"
request = "demo.Chunk"
response = "demo.Reply"

[[services.methods]]
name = "Chat"
type = "BIDIRECTIONAL_STREAMING"
request = "demo.Line"
response = "demo.Line"
"#;

pub fn load(tree: &str) -> Package {
    tree.parse().expect("Failed to parse service tree")
}

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

pub fn config(stubs: StubPlacement) -> GeneratorConfig {
    GeneratorConfig {
        stubs,
        timestamp: Some(timestamp()),
        ..GeneratorConfig::default()
    }
}
