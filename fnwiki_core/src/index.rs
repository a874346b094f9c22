use std::collections::BTreeMap;
use std::sync::Arc;

use derive_more::Deref;
use serde::Serialize;

use crate::category::derive_category;
use crate::context::FunctionContext;
use crate::record::FunctionRecord;

/// Functions keyed by category. Categories iterate in sorted order; records
/// within a category keep the order they were indexed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deref)]
#[serde(transparent)]
pub struct FunctionsByCategory(BTreeMap<String, Vec<Arc<FunctionRecord>>>);

impl FunctionsByCategory {
	fn push(&mut self, category: &str, record: Arc<FunctionRecord>) {
		if let Some(bucket) = self.0.get_mut(category) {
			bucket.push(record);
		} else {
			self.0.insert(category.to_string(), vec![record]);
		}
	}

	/// Records in `category`, or an empty slice for an unknown category.
	pub fn records(&self, category: &str) -> &[Arc<FunctionRecord>] {
		self.0
			.get(category)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Total number of records across every category.
	pub fn record_count(&self) -> usize {
		self.0.values().map(Vec::len).sum()
	}
}

/// Functions keyed by execution context, then by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunctionsByContext {
	pub shared: FunctionsByCategory,
	pub client: FunctionsByCategory,
	pub server: FunctionsByCategory,
}

impl FunctionsByContext {
	pub fn get(&self, context: FunctionContext) -> &FunctionsByCategory {
		match context {
			FunctionContext::Shared => &self.shared,
			FunctionContext::Client => &self.client,
			FunctionContext::Server => &self.server,
		}
	}

	fn get_mut(&mut self, context: FunctionContext) -> &mut FunctionsByCategory {
		match context {
			FunctionContext::Shared => &mut self.shared,
			FunctionContext::Client => &mut self.client,
			FunctionContext::Server => &mut self.server,
		}
	}
}

/// Both groupings over the same set of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunctionIndex {
	pub by_category: FunctionsByCategory,
	pub by_context: FunctionsByContext,
}

/// Group `records` by category and by context then category in a single
/// pass. Every record lands in exactly one bucket of each grouping.
pub fn build_indexes<'a, I>(records: I) -> FunctionIndex
where
	I: IntoIterator<Item = &'a Arc<FunctionRecord>>,
{
	let mut index = FunctionIndex::default();

	for record in records {
		let category = derive_category(record.file_path.as_deref());
		index.by_category.push(&category, Arc::clone(record));
		index
			.by_context
			.get_mut(record.context)
			.push(&category, Arc::clone(record));
	}

	index
}
