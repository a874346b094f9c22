use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use serde_json::json;

use crate::FunctionData;
use crate::FunctionRecord;

pub fn data_with(
	shared: Option<Value>,
	client: Option<Value>,
	server: Option<Value>,
) -> FunctionData {
	FunctionData {
		shared,
		client,
		server,
		..FunctionData::default()
	}
}

pub fn shared_record(id: &str, file_path: &str) -> FunctionRecord {
	FunctionRecord::new(
		id,
		Some(file_path.to_string()),
		data_with(Some(json!({ "name": id })), None, None),
	)
}

pub fn client_record(id: &str, file_path: &str) -> FunctionRecord {
	FunctionRecord::new(
		id,
		Some(file_path.to_string()),
		data_with(None, Some(json!({ "name": id })), None),
	)
}

pub fn server_record(id: &str, file_path: &str) -> FunctionRecord {
	FunctionRecord::new(
		id,
		Some(file_path.to_string()),
		data_with(None, None, Some(json!({ "name": id }))),
	)
}

pub fn arced(records: Vec<FunctionRecord>) -> Vec<Arc<FunctionRecord>> {
	records.into_iter().map(Arc::new).collect()
}

pub fn ids(records: &[Arc<FunctionRecord>]) -> Vec<&str> {
	records.iter().map(|record| record.id.as_str()).collect()
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

pub const GET_ELEMENT_TYPE_YAML: &str = r"shared:
  name: getElementType
  description: Returns the type of the given element.
  pair: setElementType
";

pub const SET_ELEMENT_TYPE_YAML: &str = r"server:
  name: setElementType
  description: Changes the type of the given element.
  pair: getElementType
";

pub const GET_CAMERA_YAML: &str = r"client:
  name: getCamera
  description: Returns the local player's camera.
";
