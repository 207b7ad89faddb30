//! Failures while bootstrapping from the host page.

/// Why the page data or canvas could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// Not running in a browser page.
	#[error("no browser window or document available")]
	NoDocument,

	/// No element with the given id.
	#[error("element #{id} not found")]
	MissingElement {
		/// Element id.
		id: String,
	},

	/// The element exists but has the wrong type.
	#[error("element #{id} is not a {expected}")]
	WrongElement {
		/// Element id.
		id: String,
		/// What was expected.
		expected: &'static str,
	},

	/// The element text is not valid JSON for the target type.
	#[error("invalid JSON in #{id}: {source}")]
	InvalidJson {
		/// Element id.
		id: String,
		/// Parser error.
		#[source]
		source: serde_json::Error,
	},

	/// `getContext("2d")` failed.
	#[error("canvas has no 2d context")]
	NoCanvasContext,
}

/// Result with a [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
