//! Extraction of event records and pagination links from one listing page.

use std::collections::BTreeSet;

use chrono_tz::Tz;
use select::{
	document::Document,
	node::Node,
	predicate::{Class, Name, Predicate},
};
use tracing::{debug, warn};

use crate::{
	event::{EventRecord, NO_TITLE},
	time, Config, Result,
};

/// Query prefix of the pager links that point at further listing pages.
const PAGE_QUERY: &str = "?page=";

/// Everything found on a single listing page.
#[derive(Debug, Default)]
pub struct Page {
	pub events: Vec<EventRecord>,
	/// Absolute URLs of the other listing pages linked from the pager.
	pub pages: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct PageParser {
	origin: String,
	base_url: String,
	tz: Tz,
}

impl PageParser {
	/// # Errors
	///
	/// Returns [`crate::Error::InvalidUrl`] if the configured source URL is not
	/// absolute.
	pub fn new(config: &Config) -> Result<Self> {
		Ok(Self {
			origin: config.origin()?,
			base_url: config.source_url.clone(),
			tz: config.timezone,
		})
	}

	#[must_use]
	pub fn parse(&self, html: &str) -> Page {
		let document = Document::from(html);

		Page {
			events: self.events(&document),
			pages: self.pages(&document),
		}
	}

	fn events(&self, document: &Document) -> Vec<EventRecord> {
		let containers = document
			.find(Name("div").and(Class("views-field-title")))
			.collect::<Vec<_>>();

		if containers.is_empty() {
			warn!("could not find any event containers; the page structure may have changed");
			return Vec::new();
		}

		containers
			.into_iter()
			.filter_map(|container| self.event(container))
			.collect()
	}

	fn event(&self, container: Node) -> Option<EventRecord> {
		let anchor = container.find(Name("a")).next();
		let title = anchor.and_then(title);
		let link = anchor.and_then(|a| link(a, &self.origin));
		let location = location(container);

		let Some(raw) = timestamp(container) else {
			warn!(
				title = title.as_deref().unwrap_or(NO_TITLE),
				"could not find date-time for event; skipping"
			);
			return None;
		};

		let start = match time::normalize(raw, self.tz) {
			Ok(start) => start,
			Err(err) => {
				warn!(
					title = title.as_deref().unwrap_or(NO_TITLE),
					raw,
					"{err}; skipping event"
				);
				return None;
			}
		};

		let event = EventRecord::new(title, link, start, location);
		debug!(title = %event.title, start = %event.start, location = %event.location, "found event");

		Some(event)
	}

	fn pages(&self, document: &Document) -> BTreeSet<String> {
		document
			.find(Name("li").and(Class("pager__item")))
			.flat_map(|item| item.find(Name("a")))
			.filter_map(|a| a.attr("href"))
			.filter(|href| href.starts_with(PAGE_QUERY))
			.map(|href| format!("{}{href}", self.base_url))
			.collect()
	}
}

fn non_empty(text: &str) -> Option<String> {
	let text = text.trim();

	(!text.is_empty()).then(|| text.to_string())
}

/// The anchor's `href`, made absolute when it is rooted at the site origin.
fn link(anchor: Node, origin: &str) -> Option<String> {
	anchor.attr("href").map(|href| {
		if href.starts_with('/') {
			format!("{origin}{href}")
		} else {
			href.to_string()
		}
	})
}

/// The bold span inside the anchor, falling back to the anchor's own text.
fn title(anchor: Node) -> Option<String> {
	anchor
		.find(Name("span").and(Class("font-bold")))
		.next()
		.and_then(|span| non_empty(&span.text()))
		.or_else(|| non_empty(&anchor.text()))
}

fn timestamp(container: Node) -> Option<&str> {
	container
		.find(Name("time"))
		.next()
		.and_then(|tag| tag.attr("datetime"))
}

fn location(container: Node) -> Option<String> {
	container
		.find(Name("span").and(Class("location")))
		.next()
		.and_then(|span| non_empty(&span.text()))
}

#[cfg(test)]
mod tests {
	use chrono::{NaiveDate, NaiveDateTime};

	use super::*;
	use crate::event::NO_LOCATION;

	fn parser() -> PageParser {
		PageParser::new(&Config::default()).unwrap()
	}

	fn container(inner: &str) -> String {
		format!(r#"<div class="views-field views-field-title">{inner}</div>"#)
	}

	fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d)
			.unwrap()
			.and_hms_opt(h, min, 0)
			.unwrap()
	}

	#[test]
	fn full_container() {
		let html = container(
			r#"<a href="/events/tax-policy-forum">
				<span class="font-bold"> Tax Policy Forum </span>
				<span>Lecture series</span>
			</a>
			<time datetime="2025-03-10T14:30:00Z">March 10, 2:30pm</time>
			<span class="location"> Tilton Hall 301 </span>"#,
		);

		let page = parser().parse(&html);

		assert_eq!(page.events.len(), 1);
		let event = &page.events[0];
		assert_eq!(event.title, "Tax Policy Forum");
		assert_eq!(
			event.link,
			"https://murphy.tulane.edu/events/tax-policy-forum"
		);
		assert_eq!(event.location, "Tilton Hall 301");
		assert_eq!(event.start.naive_local(), at(2025, 3, 10, 14, 30));
		assert_eq!(event.start.timezone(), chrono_tz::America::Chicago);
	}

	#[test]
	fn title_falls_back_to_anchor_text() {
		let html = container(
			r#"<a href="https://example.org/talk">  Guest <em>Lecture</em>  </a>
			<time datetime="2025-03-11T09:00:00Z"></time>"#,
		);

		let page = parser().parse(&html);

		assert_eq!(page.events[0].title, "Guest Lecture");
		assert_eq!(page.events[0].link, "https://example.org/talk");
	}

	#[test]
	fn missing_fields_degrade_to_placeholders() {
		let html = container(r#"<time datetime="2025-03-11T09:00:00Z"></time>"#);

		let page = parser().parse(&html);

		let event = &page.events[0];
		assert_eq!(event.title, NO_TITLE);
		assert_eq!(event.link, "");
		assert_eq!(event.location, NO_LOCATION);
	}

	#[test]
	fn blank_text_degrades_to_placeholders() {
		let html = container(
			r#"<a href="/e"><span class="font-bold">  </span>  </a>
			<time datetime="2025-03-11T09:00:00Z"></time>
			<span class="location">	</span>"#,
		);

		let event = &parser().parse(&html).events[0];

		assert_eq!(event.title, NO_TITLE);
		assert_eq!(event.location, NO_LOCATION);
		assert_eq!(event.link, "https://murphy.tulane.edu/e");
	}

	#[test]
	fn anchor_without_href_has_empty_link() {
		let html = container(
			r#"<a><span class="font-bold">Open House</span></a>
			<time datetime="2025-03-11T09:00:00Z"></time>"#,
		);

		let event = &parser().parse(&html).events[0];

		assert_eq!(event.title, "Open House");
		assert_eq!(event.link, "");
	}

	#[test]
	fn container_without_timestamp_is_dropped() {
		let html = [
			container(r#"<a href="/a"><span class="font-bold">No time</span></a>"#),
			container(r#"<a href="/b"><span class="font-bold">Empty tag</span></a><time>soon</time>"#),
			container(
				r#"<a href="/c"><span class="font-bold">Bad time</span></a><time datetime="TBA"></time>"#,
			),
			container(
				r#"<a href="/d"><span class="font-bold">Good</span></a><time datetime="2025-05-01T12:00:00Z"></time>"#,
			),
		]
		.concat();

		let page = parser().parse(&html);

		assert_eq!(page.events.len(), 1);
		assert_eq!(page.events[0].title, "Good");
	}

	#[test]
	fn no_containers_is_not_an_error() {
		let page = parser().parse("<html><body><p>Nothing scheduled.</p></body></html>");

		assert!(page.events.is_empty());
		assert!(page.pages.is_empty());

		assert!(parser().parse("").events.is_empty());
	}

	#[test]
	fn pagination_links() {
		let html = r#"
			<ul class="pager">
				<li class="pager__item is-active"><a href="?page=0">1</a></li>
				<li class="pager__item"><a href="?page=1">2</a></li>
				<li class="pager__item"><a href="?page=2">3</a></li>
				<li class="pager__item pager__item--next"><a href="?page=1">Next</a></li>
				<li class="pager__item"><a href="/events/archive">Archive</a></li>
				<li class="pager__item"><span>…</span></li>
			</ul>
			<a href="?page=9">outside the pager</a>
		"#;

		let pages = parser().parse(html).pages;

		assert_eq!(
			pages.into_iter().collect::<Vec<_>>(),
			[
				"https://murphy.tulane.edu/events/upcoming-events?page=0",
				"https://murphy.tulane.edu/events/upcoming-events?page=1",
				"https://murphy.tulane.edu/events/upcoming-events?page=2",
			]
		);
	}

	#[test]
	fn relative_links_use_configured_origin() {
		let config = Config {
			source_url: "http://127.0.0.1:8080/listing".to_string(),
			..Config::default()
		};
		let parser = PageParser::new(&config).unwrap();

		assert_eq!(
			link_of(&parser, "/events/foo"),
			"http://127.0.0.1:8080/events/foo"
		);
		assert_eq!(
			link_of(&parser, "https://tulane.edu/x"),
			"https://tulane.edu/x"
		);
	}

	fn link_of(parser: &PageParser, href: &str) -> String {
		let html = container(&format!(
			r#"<a href="{href}">x</a><time datetime="2025-05-01T12:00:00Z"></time>"#
		));

		parser.parse(&html).events.remove(0).link
	}

	#[test]
	fn default_origin() {
		let parser = parser();

		assert_eq!(
			link_of(&parser, "/events/foo"),
			"https://murphy.tulane.edu/events/foo"
		);
		assert_eq!(
			link_of(&parser, "https://murphy.tulane.edu/events/bar"),
			"https://murphy.tulane.edu/events/bar"
		);
	}
}
