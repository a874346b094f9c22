use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::category::derive_category;
use crate::context::FunctionContext;
use crate::context::classify;
use crate::context::is_truthy;

/// Metadata parsed from a single function file.
///
/// ```yaml
/// shared:
///   name: getElementType
///   description: Returns the type of an element.
///   pair: setElementType
/// ```
///
/// Only the presence and truthiness of the three context markers matters for
/// classification. Their contents, and any other top-level keys, are kept
/// as-is for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionData {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shared: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server: Option<Value>,
	/// Top-level keys other than the context markers.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl FunctionData {
	/// Returns the marker for `context` if it is present and truthy.
	pub fn marker(&self, context: FunctionContext) -> Option<&Value> {
		let value = match context {
			FunctionContext::Shared => self.shared.as_ref(),
			FunctionContext::Client => self.client.as_ref(),
			FunctionContext::Server => self.server.as_ref(),
		};

		value.filter(|value| is_truthy(value))
	}

	/// Returns `true` when none of the three markers is set.
	pub fn is_unmarked(&self) -> bool {
		FunctionContext::ALL
			.iter()
			.all(|context| self.marker(*context).is_none())
	}

	/// First truthy `key` across the markers, in precedence order.
	fn first_field(&self, key: &str) -> Option<&Value> {
		FunctionContext::ALL
			.iter()
			.filter_map(|context| self.marker(*context))
			.filter_map(|marker| marker.get(key))
			.find(|value| is_truthy(value))
	}

	/// Description from the first marker that has one, or an empty string.
	pub fn description(&self) -> &str {
		self.first_field("description")
			.and_then(Value::as_str)
			.unwrap_or_default()
	}

	/// Name of the paired function (e.g. a setter for a getter), if any.
	pub fn pair(&self) -> Option<&str> {
		self.first_field("pair").and_then(Value::as_str)
	}

	/// The `name` declared by the highest-precedence marker.
	pub fn name(&self) -> Option<&str> {
		FunctionContext::ALL
			.iter()
			.find_map(|context| self.marker(*context))
			.and_then(|marker| marker.get("name"))
			.and_then(Value::as_str)
	}

	/// Whether the function is listed as disabled. The flag may be `true` or a
	/// message string.
	///
	/// Every truthy marker overrides the flag of the one before it, so the
	/// last marker wins. Keys that `client` or `server` repeat verbatim from
	/// `shared` do not count, and a marker that only repeats `shared` is
	/// ignored entirely.
	pub fn is_disabled(&self) -> bool {
		let shared = self
			.marker(FunctionContext::Shared)
			.and_then(Value::as_object);
		let mut disabled = false;

		for context in FunctionContext::ALL {
			let Some(marker) = self.marker(context) else {
				continue;
			};
			let Some(fields) = marker.as_object() else {
				disabled = false;
				continue;
			};

			let repeated = |key: &str, value: &Value| {
				context != FunctionContext::Shared
					&& shared.is_some_and(|shared| shared.get(key) == Some(value))
			};
			if fields.iter().all(|(key, value)| repeated(key.as_str(), value)) {
				continue;
			}

			disabled = fields
				.get("disabled")
				.is_some_and(|value| !repeated("disabled", value) && is_truthy(value));
		}

		disabled
	}
}

/// A documented scripting API function.
///
/// Deserializing goes through [`FunctionRecord::new`], so a stored `context`
/// is ignored and always recomputed from `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredFunctionRecord")]
pub struct FunctionRecord {
	/// Identifier derived from the file name, e.g. `getElementType`.
	pub id: String,
	/// Where the record was loaded from. Only used to derive the category.
	pub file_path: Option<String>,
	pub data: FunctionData,
	/// Resolved once from `data` when the record is constructed.
	pub context: FunctionContext,
}

#[derive(Deserialize)]
struct StoredFunctionRecord {
	id: String,
	#[serde(default)]
	file_path: Option<String>,
	#[serde(default)]
	data: FunctionData,
}

impl From<StoredFunctionRecord> for FunctionRecord {
	fn from(stored: StoredFunctionRecord) -> Self {
		Self::new(stored.id, stored.file_path, stored.data)
	}
}

impl FunctionRecord {
	pub fn new(id: impl Into<String>, file_path: Option<String>, data: FunctionData) -> Self {
		let context = classify(&data);

		Self {
			id: id.into(),
			file_path,
			data,
			context,
		}
	}

	/// Name of the folder the record was loaded from.
	pub fn category(&self) -> String {
		derive_category(self.file_path.as_deref())
	}

	/// Returns `true` when the record fell back to server for lack of any
	/// context marker.
	pub fn is_unmarked(&self) -> bool {
		self.data.is_unmarked()
	}

	/// Summary used by listing pages.
	pub fn info(&self) -> FunctionInfo {
		FunctionInfo {
			description: self.data.description().to_string(),
			r#type: self.context,
			type_pretty: self.context.pretty().to_string(),
			pair: self.data.pair().map(ToString::to_string),
		}
	}
}

/// Per-function summary rendered next to each entry in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
	pub description: String,
	pub r#type: FunctionContext,
	pub type_pretty: String,
	pub pair: Option<String>,
}
