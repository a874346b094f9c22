use std::path::Path;
use std::sync::Arc;

use crate::FnWikiResult;
use crate::config::FnWikiConfig;
use crate::index::FunctionIndex;
use crate::index::FunctionsByCategory;
use crate::index::FunctionsByContext;
use crate::index::build_indexes;
use crate::record::FunctionRecord;
use crate::source::LoadOptions;
use crate::source::load_functions;

/// An immutable snapshot of every loaded function together with its indexes.
///
/// The indexes are built exactly once, when the catalog is created. Every
/// accessor is a borrow of that snapshot, so a catalog can be shared between
/// threads and queried any number of times. Picking up content changes
/// means building a new catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionCatalog {
	records: Vec<Arc<FunctionRecord>>,
	index: FunctionIndex,
}

impl FunctionCatalog {
	/// Build a catalog from records in their source order.
	pub fn from_records(records: Vec<FunctionRecord>) -> Self {
		let records: Vec<Arc<FunctionRecord>> = records.into_iter().map(Arc::new).collect();
		let index = build_indexes(&records);

		tracing::debug!(
			functions = records.len(),
			categories = index.by_category.len(),
			shared = index.by_context.shared.record_count(),
			client = index.by_context.client.record_count(),
			server = index.by_context.server.record_count(),
			"built function indexes"
		);

		for record in records.iter().filter(|record| record.is_unmarked()) {
			tracing::warn!(
				id = %record.id,
				path = record.file_path.as_deref().unwrap_or_default(),
				"function has no context marker, defaulting to server"
			);
		}

		Self { records, index }
	}

	/// Discover the project config at `root`, load the function files and
	/// build the indexes.
	pub fn load(root: &Path) -> FnWikiResult<Self> {
		let config = FnWikiConfig::load(root)?;
		let options = LoadOptions::from_config(config.as_ref());
		Self::load_with_options(root, &options)
	}

	/// Load the function files described by `options` and build the indexes.
	pub fn load_with_options(root: &Path, options: &LoadOptions) -> FnWikiResult<Self> {
		let records = load_functions(root, options)?;
		Ok(Self::from_records(records))
	}

	/// Functions grouped by category.
	pub fn functions_by_category(&self) -> &FunctionsByCategory {
		&self.index.by_category
	}

	/// Functions grouped by execution context, then by category.
	pub fn functions_by_type_by_category(&self) -> &FunctionsByContext {
		&self.index.by_context
	}

	/// Both indexes.
	pub fn index(&self) -> &FunctionIndex {
		&self.index
	}

	/// Every record in source order.
	pub fn records(&self) -> &[Arc<FunctionRecord>] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Look up a function by id.
	pub fn get(&self, id: &str) -> Option<&Arc<FunctionRecord>> {
		self.records.iter().find(|record| record.id == id)
	}

	/// Category names in sorted order.
	pub fn categories(&self) -> impl Iterator<Item = &str> {
		self.index.by_category.keys().map(String::as_str)
	}

	/// Records that carry no context marker and were classified as server by
	/// default.
	pub fn unmarked(&self) -> impl Iterator<Item = &Arc<FunctionRecord>> {
		self.records.iter().filter(|record| record.is_unmarked())
	}
}
