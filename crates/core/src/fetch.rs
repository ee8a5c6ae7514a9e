use reqwest::blocking::Client;
use tracing::debug;

use crate::{Error, Result};

/// Blocking HTTP client for listing pages. One GET per call, no retries.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
	client: Client,
}

impl Fetcher {
	#[must_use]
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	/// # Errors
	///
	/// Returns [`Error::Fetch`] when the request fails or the server answers
	/// with a non-success status.
	pub fn fetch(&self, url: &str) -> Result<String> {
		let fetch_err = |source| Error::Fetch {
			url: url.to_string(),
			source,
		};

		let response = self
			.client
			.get(url)
			.send()
			.and_then(reqwest::blocking::Response::error_for_status)
			.map_err(fetch_err)?;

		debug!(url, status = %response.status(), "fetched page");

		response.text().map_err(fetch_err)
	}
}
