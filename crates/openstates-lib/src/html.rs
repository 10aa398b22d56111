// ABOUTME: Small helpers over the scraper crate for field extraction
// ABOUTME: Selector compilation, text content, child lookup and link resolution

use crate::{Result, ScrapeError};
use scraper::{ElementRef, Selector};
use url::Url;

/// Compile a CSS selector
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

/// Concatenated text of an element and its descendants
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Trimmed text of the first match of `sel` under `scope`
pub(crate) fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(|el| text_of(el).trim().to_string())
}

/// `attr` of the first match of `sel` under `scope`
pub(crate) fn first_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .find_map(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Direct children of `el` with tag `name`
pub(crate) fn children_named<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

/// Resolve `href` against `base`, leaving it unchanged if it cannot be joined
pub(crate) fn absolutize(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
