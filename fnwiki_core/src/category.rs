use std::path::is_separator;

/// Derive a function's category from the path it was loaded from.
///
/// The path is normalized lexically (segments are split on the platform's
/// separators, so `\` only separates on Windows; empty and `.` segments are
/// dropped, `..` pops the previous segment) and the name of the immediate
/// parent directory is returned.
///
/// ```
/// use fnwiki_core::derive_category;
///
/// assert_eq!(derive_category(Some("functions/Element/getElementType.yaml")), "Element");
/// assert_eq!(derive_category(Some("functions/getElementType.yaml")), "functions");
/// assert_eq!(derive_category(Some("functions/./Element//../Ped/x.yaml")), "Ped");
/// ```
///
/// A missing or empty path, a bare file name and a file at the filesystem
/// root all land in the catch-all `""` category.
pub fn derive_category(file_path: Option<&str>) -> String {
	let Some(file_path) = file_path else {
		return String::new();
	};

	let segments = normalize_segments(file_path);
	if segments.len() < 2 {
		return String::new();
	}

	segments[segments.len() - 2].to_string()
}

fn normalize_segments(path: &str) -> Vec<&str> {
	let is_absolute = path.starts_with(is_separator);
	let mut segments: Vec<&str> = Vec::new();

	for segment in path.split(is_separator) {
		match segment {
			"" | "." => {}
			".." => {
				if segments.last().is_some_and(|last| *last != "..") {
					segments.pop();
				} else if !is_absolute {
					segments.push(segment);
				}
				// `..` above the root stays at the root.
			}
			_ => segments.push(segment),
		}
	}

	segments
}
