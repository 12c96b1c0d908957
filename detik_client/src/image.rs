use lazy_static::lazy_static;
use regex::Regex;
use scraper::ElementRef;

use crate::selectors::list::IMAGE;

lazy_static! {
    static ref PREFERRED_HOST: Regex = Regex::new(r"(?i)akcdn\.detik\.net\.id|community/media|/visual/").unwrap();
    static ref DIMENSIONS: Regex = Regex::new(r"(\d+)x(\d+)").unwrap();
}

const PLACEHOLDER_WORDS: [&str; 7] = [
    "default-",
    "detik2/images/default",
    "placeholder",
    "logo",
    "watermark",
    "spacer",
    "pixel",
];

const BAD_IMAGE_WORDS: [&str; 6] = ["logo", "watermark", "placeholder", "blank", "spacer", "pixel"];

/// Whether the URL encodes a tiny `WxH` size like `50x50`, typical for icons and tracking pixels.
fn has_tiny_dimensions(lower: &str) -> bool {
    DIMENSIONS.captures_iter(lower).any(|caps| {
        let (w, h) = (&caps[1], &caps[2]);
        if w.len() > 3 || h.len() > 3 {
            return false;
        }
        matches!((w.parse::<u32>(), h.parse::<u32>()), (Ok(w), Ok(h)) if w <= 50 && h <= 50)
    })
}

/// Heuristic used while picking listing images.
pub fn is_placeholder(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    if lower.is_empty() || lower.starts_with("data:") {
        return true;
    }
    if PLACEHOLDER_WORDS.iter().any(|w| lower.contains(w)) {
        return true;
    }
    if lower.ends_with(".gif") && lower.contains("default") {
        return true;
    }
    has_tiny_dimensions(&lower)
}

/// Heuristic deciding whether an already chosen image is worth replacing with `og:image`.
pub fn looks_like_bad_image(url: &str) -> bool {
    let lower = url.to_lowercase();
    BAD_IMAGE_WORDS.iter().any(|w| lower.contains(w)) || has_tiny_dimensions(&lower)
}

/// Pick the candidate with the largest declared width from a `srcset` value.
/// Ties keep the earliest candidate; candidates without a descriptor count as width 0.
pub fn pick_from_srcset(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .filter_map(|candidate| {
            let mut parts = candidate.split_whitespace();
            let url = parts.next()?;
            let size = parts
                .next()
                .map(|s| s.chars().filter(char::is_ascii_digit).collect::<String>())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            Some((url, size))
        })
        .fold(None, |best: Option<(&str, u64)>, (url, size)| match best {
            Some((_, best_size)) if best_size >= size => best,
            _ => Some((url, size)),
        })
        .map(|(url, _)| url.to_string())
}

fn attr<'a>(img: &ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| img.value().attr(name))
        .find(|value| !value.trim().is_empty())
}

/// Image candidates of one `<img>`, richest first.
fn candidates(img: ElementRef) -> Vec<String> {
    let from_srcset = attr(&img, &["srcset", "data-srcset"]).and_then(pick_from_srcset);
    let lazy = attr(&img, &["data-src", "data-original", "data-lazy"]).map(str::to_string);
    let src = attr(&img, &["src"]).map(str::to_string);
    [from_srcset, lazy, src].into_iter().flatten().collect()
}

/// Choose the best image inside a listing entry.
/// The first pass only accepts CDN-hosted images, the second pass accepts any non-placeholder.
pub fn select_image(e: ElementRef) -> Option<String> {
    let images = e.select(&IMAGE).map(candidates).collect::<Vec<_>>();

    let preferred = images
        .iter()
        .flatten()
        .find(|url| PREFERRED_HOST.is_match(url) && !is_placeholder(url));
    preferred
        .or_else(|| images.iter().flatten().find(|url| !is_placeholder(url)))
        .cloned()
}
