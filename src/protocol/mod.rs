use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Declares a closed set of wire strings as a serde enum, with the list of
/// accepted values available for JSON Schema `enum` clauses.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }
    };
}

pub mod direct;
pub mod fields;
pub mod metrika;
pub mod request;
pub mod response;

pub use request::{ClientInfo, InitializeParams, JsonRpcRequest, RpcId, ToolCallParams};
pub use response::{JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};

/// Typed arguments of a single tool.
///
/// The schema is what `tools/list` advertises and what incoming arguments are
/// validated against before deserialization.
pub trait ToolParams: DeserializeOwned {
    fn input_schema() -> serde_json::Value;
}

/// Output format for listing and reporting tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Json,
}

impl ResponseFormat {
    pub const VALUES: &'static [&'static str] = &["markdown", "json"];
}
