#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    /// A server configuration exercising every tag and most field kinds.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct ServerConfig {
        pub log_level: String,
        pub port: u16,
        pub request_timeout: Duration,
        pub verbose: bool,
        pub ratio: f64,
        pub retries: i8,
        #[serde(rename = "HTTPServer")]
        pub http_server: String,
        #[serde(default)]
        pub internal: u32,
        #[serde(skip)]
        pub secret: String,
        #[serde(default)]
        pub peers: Vec<String>,
    }

    crate::tags! {
        ServerConfig {
            "LogLevel" => { default: "info", help: "Log verbosity", s: "v" },
            "Port" => { d: "8080", short: "p", help: "Listen port" },
            "RequestTimeout" => { default: "5s" },
            "Ratio" => { default: "0.25" },
            "Retries" => { default: "-3", env: "APP_RETRIES" },
            "HTTPServer" => { long: "http", e: "HTTP_ADDR" },
            "Internal" => { ignored: "true", default: "notanumber" },
        }
    }

    /// A struct whose second field carries a default that cannot be coerced.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    pub struct BrokenDefaults {
        pub name: String,
        pub count: u32,
        pub after: bool,
    }

    crate::tags! {
        BrokenDefaults {
            "Name" => { default: "svc" },
            "Count" => { default: "notanumber" },
            "After" => { default: "true" },
        }
    }

    /// A struct with a malformed short tag.
    #[derive(Serialize, Debug, Default)]
    pub struct LongShort {
        pub level: u8,
    }

    crate::tags! {
        LongShort {
            "level" => { short: "lv" },
        }
    }

    /// A field whose short alias collides with clap's usual help flag.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    pub struct HostConfig {
        pub host: String,
    }

    crate::tags! {
        HostConfig {
            "host" => { short: "h", default: "localhost" },
        }
    }

    /// An `f32` default that only fits in 64 bits.
    #[derive(Serialize, Debug, Default)]
    pub struct Gauges {
        pub ratio: f32,
    }

    crate::tags! {
        Gauges {
            "ratio" => { default: "1e40" },
        }
    }

    /// Not a struct: binding it must fail before anything is registered.
    #[derive(Serialize, Debug, Clone, Copy)]
    pub enum Mode {
        Fast,
    }

    impl crate::Spec for Mode {}

    #[test]
    fn server_config_serializes_pascal_case_names() {
        let config = ServerConfig {
            port: 1,
            ..ServerConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("Port").is_some());
        assert!(json.get("HTTPServer").is_some());
        assert!(json.get("Secret").is_none());
    }
}
