use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Element lookups over a parsed document.
///
/// Every lookup treats malformed or absent markup as "not found"; none of
/// these functions fail.
pub struct PageExtractor;

impl PageExtractor {
    /// Whether the document has a `<title>` element at all, empty or not.
    pub fn has_title(html: &Html) -> bool {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector).next().is_some()
    }

    /// Trimmed text of the first `<title>`, `None` when absent or blank.
    pub fn extract_title(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Whether any `<meta>` element exists.
    pub fn has_any_meta(html: &Html) -> bool {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());
        html.select(selector).next().is_some()
    }

    /// Whether a `<tag attr="value">` element exists.
    ///
    /// `rel` is a token list, so it matches when `value` is one of its
    /// whitespace-separated tokens. Other attributes must match exactly.
    pub fn has_element_with(html: &Html, tag: &str, attr: &str, value: &str) -> bool {
        html.select(Self::tag_selector(tag))
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .filter_map(|el| el.value().attr(attr))
            .any(|found| {
                if attr.eq_ignore_ascii_case("rel") {
                    found.split_ascii_whitespace().any(|token| token == value)
                } else {
                    found == value
                }
            })
    }

    pub fn count_h1(html: &Html) -> usize {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1").unwrap());
        html.select(selector).count()
    }

    /// `(total images, images without a non-empty alt)`.
    pub fn count_images_missing_alt(html: &Html) -> (usize, usize) {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        html.select(selector).fold((0, 0), |(total, missing), img| {
            let has_alt = img
                .value()
                .attr("alt")
                .map(|alt| !alt.is_empty())
                .unwrap_or(false);
            (total + 1, if has_alt { missing } else { missing + 1 })
        })
    }

    fn tag_selector(tag: &str) -> &'static Selector {
        static META: OnceLock<Selector> = OnceLock::new();
        static LINK: OnceLock<Selector> = OnceLock::new();
        static SCRIPT: OnceLock<Selector> = OnceLock::new();
        static ANY: OnceLock<Selector> = OnceLock::new();

        match tag {
            "meta" => META.get_or_init(|| Selector::parse("meta").unwrap()),
            "link" => LINK.get_or_init(|| Selector::parse("link").unwrap()),
            "script" => SCRIPT.get_or_init(|| Selector::parse("script").unwrap()),
            _ => ANY.get_or_init(|| Selector::parse("*").unwrap()),
        }
    }
}
