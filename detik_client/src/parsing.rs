use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::consts::EXCERPT_MAX_CHARS;
use crate::image::select_image;
use crate::result::*;

lazy_static! {
    static ref SOURCE_PREFIX: Regex =
        Regex::new(r"(?i)^(detikNews|detikcom|CNN Indonesia|CNBC Indonesia|Liputan6|Kompas|Tempo|Tribun|Okezone)\s*")
            .unwrap();
    static ref DATE_PREFIX: Regex = Regex::new(
        r"(?i)^(Senin|Selasa|Rabu|Kamis|Jumat|Sabtu|Minggu),?\s*\d{1,2}\s+(Jan|Feb|Mar|Apr|Mei|Jun|Jul|Agu|Sep|Okt|Nov|Des)\s+\d{4}\s+\d{1,2}:\d{2}\s+(WIB|WITA|WIT)\s*"
    )
    .unwrap();
    static ref TIME: Regex = Regex::new(
        r"(?i)(\d+\s+(detik|menit|jam|hari)\s+lalu|Kemarin\s+\d{1,2}:\d{2}|\d{1,2}\s+(Jan|Feb|Mar|Apr|Mei|Jun|Jul|Agu|Sep|Okt|Nov|Des)\s+\d{4}|\d{1,2}:\d{2})"
    )
    .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref PARAGRAPH_BOILERPLATE: Regex = Regex::new(
        r"(?i)^(ADVERTISEMENT|Baca juga|Lihat juga|Simak|Tonton|Loading|googletag|function|var\s|window\.|document\.)"
    )
    .unwrap();
    static ref PARAGRAPH_SELF_REFERENCE: Regex = Regex::new(r"(?i)detik\.com|@detikcom|detikNews").unwrap();
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref SCRIPT_REMNANT: Regex = Regex::new(r"(?i)googletag|function|var\s|window\.|document\.").unwrap();
}

const MIN_PARAGRAPH_CHARS: usize = 15;
const MIN_CONTAINER_CHARS: usize = 200;
const MIN_SENTENCE_CHARS: usize = 30;
const MAX_FALLBACK_SENTENCES: usize = 8;

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn has_letter(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic())
}

/// Resolve `raw` against `base`, keeping `raw` unchanged if it cannot be resolved.
pub fn resolve_url(base: &Url, raw: &str) -> String {
    base.join(raw.trim())
        .map(|url| url.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// First non-empty text, trying `selectors` in order.
fn first_text(e: ElementRef, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        e.select(selector).find_map(|e| {
            let text = e.text().collect::<String>();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
    })
}

fn clean_title(s: &str) -> String {
    let s = SOURCE_PREFIX.replace(s, "");
    let s = DATE_PREFIX.replace(&s, "");
    collapse_whitespace(&s)
}

fn clean_time(s: &str) -> String {
    match TIME.find(s) {
        Some(m) => m.as_str().to_string(),
        None => collapse_whitespace(&SOURCE_PREFIX.replace(s, "")),
    }
}

fn clean_excerpt(s: &str) -> String {
    if s.chars().count() > EXCERPT_MAX_CHARS {
        format!("{}...", s.chars().take(EXCERPT_MAX_CHARS).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Parse all article entries of a tag listing page.
/// Entries without a title or a link are skipped.
pub fn parse_listing(doc: &Html, base: &Url) -> Vec<ListingEntry> {
    use super::selectors::list::*;

    fn parse_link(e: ElementRef) -> Option<String> {
        let non_empty = |s: &&str| !s.trim().is_empty();
        let anchor = e.select(&LINK).next();
        anchor
            .and_then(|a| a.value().attr("href"))
            .filter(non_empty)
            // Sometimes the anchor is the entry itself, or only carries `data-href`
            .or_else(|| e.value().attr("href").filter(non_empty))
            .or_else(|| anchor?.value().attr("data-href").filter(non_empty))
            .map(|s| s.to_string())
    }

    fn parse_entry(e: ElementRef, base: &Url) -> Option<ListingEntry> {
        let title = first_text(e, &TITLE[..]).map(|s| clean_title(&s)).filter(|s| !s.is_empty())?;
        let link = parse_link(e)?;
        let time = first_text(e, &TIME[..]).map(|s| clean_time(&s)).unwrap_or_default();
        let excerpt = first_text(e, &EXCERPT[..]).map(|s| clean_excerpt(&s));
        let image = select_image(e)
            .map(|image| resolve_url(base, &image.replace("&amp;", "&")))
            .filter(|image| !crate::image::is_placeholder(image));

        Some(ListingEntry {
            title,
            link: resolve_url(base, &link),
            time,
            excerpt,
            image,
        })
    }

    doc.select(&ARTICLE).filter_map(|e| parse_entry(e, base)).collect()
}

/// Whether `e`, or any of its ancestors below `root`, matches `noise`.
fn inside_noise(e: ElementRef, root: ElementRef, noise: &Selector) -> bool {
    noise.matches(&e)
        || e.ancestors()
            .take_while(|node| node.id() != root.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| noise.matches(&ancestor))
}

/// Text of `e` with every subtree matching `noise` left out.
fn visible_text(e: ElementRef, noise: &Selector) -> String {
    fn collect(e: ElementRef, noise: &Selector, out: &mut String) {
        for child in e.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        if !noise.matches(&child) {
                            collect(child, noise, out);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let mut out = String::new();
    collect(e, noise, &mut out);
    out
}

fn keep_paragraph(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_CHARS
        && !PARAGRAPH_BOILERPLATE.is_match(text)
        && !PARAGRAPH_SELF_REFERENCE.is_match(text)
        && has_letter(text)
}

/// Extract the raw article text from the first content container that yields anything usable.
fn parse_content(doc: &Html) -> Option<String> {
    use super::selectors::article::*;

    for selector in CONTENT.iter() {
        let containers = doc.select(selector).collect::<Vec<_>>();
        if containers.is_empty() {
            continue;
        }

        let paragraphs = containers
            .iter()
            .flat_map(|container| {
                container
                    .select(&PARAGRAPH)
                    .filter(|p| !inside_noise(*p, *container, &CONTENT_NOISE))
                    .map(|p| visible_text(p, &CONTENT_NOISE).trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|text| keep_paragraph(text))
            .collect::<Vec<_>>();
        if !paragraphs.is_empty() {
            return Some(paragraphs.join("\n\n"));
        }

        let text = containers
            .iter()
            .map(|container| visible_text(*container, &CONTAINER_NOISE))
            .collect::<String>();
        let text = text.trim();
        if text.chars().count() > MIN_CONTAINER_CHARS {
            return Some(text.to_string());
        }
    }

    // No known container, take meaningful sentences from the whole body
    let body = doc.select(&BODY).next()?;
    let text = visible_text(body, &BODY_NOISE);
    let sentences = SENTENCE_END
        .split(&text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS && !SCRIPT_REMNANT.is_match(s) && has_letter(s))
        .collect::<Vec<_>>();
    (sentences.len() >= 2).then(|| {
        let joined = sentences
            .iter()
            .take(MAX_FALLBACK_SENTENCES)
            .map(|s| collapse_whitespace(s))
            .collect::<Vec<_>>()
            .join(". ");
        format!("{}.", joined)
    })
}

fn parse_og_image(doc: &Html, url: &Url) -> Option<String> {
    use super::selectors::article::OG_IMAGE;

    OG_IMAGE
        .iter()
        .find_map(|selector| {
            doc.select(selector)
                .find_map(|e| e.value().attr("content").filter(|s| !s.trim().is_empty()))
        })
        .map(|image| resolve_url(url, &image.replace("&amp;", "&")))
}

/// Parse an article detail page.
pub fn parse_article_page(doc: &Html, url: &Url) -> ArticlePage {
    ArticlePage {
        og_image: parse_og_image(doc, url),
        content: parse_content(doc),
    }
}
