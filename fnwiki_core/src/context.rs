use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::record::FunctionData;

/// The execution environment a documented function is available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionContext {
	/// Available on both the client and the server.
	Shared,
	/// Client-side only.
	Client,
	/// Server-side only. Also the fallback for entries without any marker.
	Server,
}

impl FunctionContext {
	/// All contexts in precedence order.
	pub const ALL: [FunctionContext; 3] = [Self::Shared, Self::Client, Self::Server];

	/// The key used for this context's marker in function files.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Shared => "shared",
			Self::Client => "client",
			Self::Server => "server",
		}
	}

	/// Label shown on listing pages.
	pub fn pretty(self) -> &'static str {
		match self {
			Self::Shared => "Shared",
			Self::Client => "Client-side",
			Self::Server => "Server-side",
		}
	}
}

impl fmt::Display for FunctionContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Decide which context a function belongs to.
///
/// `shared` wins over `client`, which wins over `server`. Entries with no
/// truthy marker at all still classify as [`FunctionContext::Server`].
pub fn classify(data: &FunctionData) -> FunctionContext {
	if data.marker(FunctionContext::Shared).is_some() {
		return FunctionContext::Shared;
	}

	if data.marker(FunctionContext::Client).is_some() {
		return FunctionContext::Client;
	}

	FunctionContext::Server
}

/// Truthiness of a content value: `null`, `false`, `0` and `""` are falsy,
/// everything else (including empty mappings and sequences) is truthy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
