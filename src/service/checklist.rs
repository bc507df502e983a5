//! On-page SEO checklist evaluator.
//!
//! Scores a parsed document against a fixed list of independent checks.
//! Each check either awards its full point value or nothing, and records a
//! status string. The total is capped at [`MAX_SCORE`](crate::domain::MAX_SCORE).
//!
//! Evaluation is pure: no I/O, no shared state. It is safe to run on many
//! documents in parallel.

use scraper::Html;
use url::Url;

use crate::domain::{CheckOutcome, Evaluation};
use crate::extractor::PageExtractor;

pub const TITLE_TAG: &str = "Title Tag";
pub const META_DESCRIPTION: &str = "Meta Description";
pub const CANONICAL_TAG: &str = "Canonical Tag";
pub const OPEN_GRAPH_TITLE: &str = "Open Graph Title";
pub const OPEN_GRAPH_DESCRIPTION: &str = "Open Graph Description";
pub const TWITTER_CARD: &str = "Twitter Card";
pub const H1_TAG: &str = "H1 Tag";
pub const ROBOTS_META_TAG: &str = "Robots Meta Tag";
pub const VIEWPORT_TAG: &str = "Viewport Tag";
pub const IMAGE_ALT_ATTRIBUTES: &str = "Image Alt Attributes";
pub const HTTPS: &str = "HTTPS";
pub const STRUCTURED_DATA: &str = "Structured Data";

const H1_POINTS: u32 = 5;
const IMAGE_ALT_POINTS: u32 = 5;
const HTTPS_POINTS: u32 = 5;

/// Which element a presence check looks for.
#[derive(Debug, Clone, Copy)]
enum Target {
    Title,
    /// `<tag attr="value">`
    Element {
        tag: &'static str,
        attr: &'static str,
        value: &'static str,
    },
}

impl Target {
    fn is_present(&self, html: &Html) -> bool {
        match *self {
            Target::Title => PageExtractor::has_title(html),
            Target::Element { tag, attr, value } => {
                PageExtractor::has_element_with(html, tag, attr, value)
            }
        }
    }
}

/// A binary check: present earns `points`, absent records `guidance`.
#[derive(Debug, Clone, Copy)]
struct PresenceCheck {
    key: &'static str,
    points: u32,
    target: Target,
    guidance: &'static str,
}

impl PresenceCheck {
    const fn element(
        key: &'static str,
        points: u32,
        tag: &'static str,
        attr: &'static str,
        value: &'static str,
        guidance: &'static str,
    ) -> Self {
        Self {
            key,
            points,
            target: Target::Element { tag, attr, value },
            guidance,
        }
    }

    fn run(&self, html: &Html) -> CheckOutcome {
        if self.target.is_present(html) {
            CheckOutcome::pass(self.key, self.points, "Present")
        } else {
            CheckOutcome::fail(self.key, format!("Missing - {}", self.guidance))
        }
    }
}

const PRESENCE_CHECKS: [PresenceCheck; 9] = [
    PresenceCheck {
        key: TITLE_TAG,
        points: 10,
        target: Target::Title,
        guidance: "Add a <title> tag.",
    },
    PresenceCheck::element(META_DESCRIPTION, 10, "meta", "name", "description", "Add a meta description."),
    PresenceCheck::element(CANONICAL_TAG, 8, "link", "rel", "canonical", "Add a canonical tag."),
    PresenceCheck::element(OPEN_GRAPH_TITLE, 5, "meta", "property", "og:title", "Add og:title for social sharing."),
    PresenceCheck::element(OPEN_GRAPH_DESCRIPTION, 5, "meta", "property", "og:description", "Add og:description for social preview."),
    PresenceCheck::element(TWITTER_CARD, 5, "meta", "name", "twitter:card", "Add Twitter Card metadata."),
    PresenceCheck::element(ROBOTS_META_TAG, 3, "meta", "name", "robots", "Add a robots meta tag."),
    PresenceCheck::element(VIEWPORT_TAG, 5, "meta", "name", "viewport", "Add a responsive <meta name='viewport'> tag."),
    PresenceCheck::element(STRUCTURED_DATA, 5, "script", "type", "application/ld+json", "Add schema.org structured data using JSON-LD."),
];

/// Highest score the checklist can award when every check passes.
pub fn max_attainable() -> u32 {
    PRESENCE_CHECKS.iter().map(|c| c.points).sum::<u32>() + H1_POINTS + IMAGE_ALT_POINTS + HTTPS_POINTS
}

/// Evaluate a document.
///
/// `source_url` only drives the HTTPS check; when it is `None` (or empty)
/// that check is left out of the result entirely.
pub fn evaluate(html: &Html, source_url: Option<&str>) -> Evaluation {
    let mut outcomes: Vec<CheckOutcome> = PRESENCE_CHECKS.iter().map(|c| c.run(html)).collect();

    outcomes.push(check_h1(html));
    outcomes.push(check_image_alt(html));
    if let Some(url) = source_url.filter(|u| !u.is_empty()) {
        outcomes.push(check_https(url));
    }

    Evaluation::from_outcomes(outcomes)
}

fn check_h1(html: &Html) -> CheckOutcome {
    match PageExtractor::count_h1(html) {
        1 => CheckOutcome::pass(H1_TAG, H1_POINTS, "Present (1 H1)"),
        0 => CheckOutcome::fail(H1_TAG, "Missing - Add one <h1> tag."),
        n => CheckOutcome::warn(H1_TAG, format!("{} found - Use only one <h1> tag.", n)),
    }
}

fn check_image_alt(html: &Html) -> CheckOutcome {
    let (_, missing) = PageExtractor::count_images_missing_alt(html);
    if missing == 0 {
        CheckOutcome::pass(IMAGE_ALT_ATTRIBUTES, IMAGE_ALT_POINTS, "All images have alt tags.")
    } else {
        CheckOutcome::warn(
            IMAGE_ALT_ATTRIBUTES,
            format!("{} image(s) missing alt attributes.", missing),
        )
    }
}

/// Secure when the URL parses with an `https` scheme (schemes are case-insensitive).
fn check_https(url: &str) -> CheckOutcome {
    let secure = Url::parse(url)
        .map(|parsed| parsed.scheme() == "https")
        .unwrap_or(false);
    if secure {
        CheckOutcome::pass(HTTPS, HTTPS_POINTS, "Secure HTTPS used.")
    } else {
        CheckOutcome::fail(HTTPS, "Insecure HTTP used.")
    }
}
