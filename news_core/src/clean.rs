// Heuristic cleaning of scraped article text.
// Each stage strips one family of noise; paragraphs that still look like noise are dropped at the end.

use lazy_static::lazy_static;
use regex::Regex;

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources.iter().map(|s| Regex::new(s).unwrap()).collect()
}

lazy_static! {
    static ref SCRIPT_CODE: Vec<Regex> = patterns(&[
        r"(?i)googletag[^;]*;?",
        r"(?i)\bgoogletag\b[^.]*\.[^;]*;?",
        r"(?i)function\s*\([^)]*\)\s*\{[^}]*\}",
        r"(?i)\(\s*function\s*\([^)]*\)[^}]*\}[^)]*\)",
        r"(?i)window\.[^;=]*[;=][^;]*;?",
        r"(?i)document\.[^;=]*[;=][^;]*;?",
        r"(?i)\bvar\s+[^;]*;",
        r"(?i)\blet\s+[^;]*;",
        r"(?i)\bconst\s+[^;]*;",
        r"(?i)\bif\s*\([^)]*\)\s*\{[^}]*\}",
        r"(?i)\belse\s*\{[^}]*\}",
        r"(?i)console\.[^;]*;?",
        r"(?i)\.\s*display\s*\([^)]*\)",
        r"(?i)\.\s*push\s*\([^)]*\)",
        r"(?is)<script[^>]*>.*?</script>",
        r"(?is)<style[^>]*>.*?</style>",
        r"(?s)<!--.*?-->",
        r"(?s)/\*.*?\*/",
        r"(?m)(?:^|\s)//.*$",
        r"(?i)\{[^{}]*googletag[^{}]*\}",
        r"(?i)\{[^{}]*function[^{}]*\}",
        r"(?i)jQuery\([^)]*\)",
        r"\$\([^)]*\)",
        r"(?i)setTimeout\([^)]*\)",
        r"(?i)setInterval\([^)]*\)",
    ]);
    static ref UI_TEXT: Vec<Regex> = patterns(&[
        r"(?i)ADVERTISEMENT|SCROLL TO CONTINUE WITH CONTENT|Continue reading|Read more|Show more|Load more",
        r"(?i)Baca juga:|Lihat juga:|Simak juga:|Simak Video:|Tonton Video:|Saksikan video:",
        r"(?i)Loading\.\.\.|Klik untuk memperbesar",
        r"(?i)\(Foto:\s*[^)]*\)",
        r"(?i)\[Gambas:(Video|Audio)[^\]]*\]",
        r"(?i)Share on Facebook|Tweet this|Pin on Pinterest|Follow us|Subscribe|Newsletter",
    ]);
    static ref ATTRIBUTION: Vec<Regex> = patterns(&[
        r"(?i)–\s*(detikcom|detik\.com|CNN Indonesia|CNBC Indonesia|Kompas|Tempo|Tribun|Okezone|Liputan6)",
        r"(?i)\|\s*(detikcom|detik\.com|CNN Indonesia|CNBC Indonesia)",
        r"(?i)(Sumber|Source):\s*[^\n]*",
        r"(?i)(Reporter|Pewarta):\s*[^\n]*",
        r"(?i)(Editor|Redaktur):\s*[^\n]*",
        r"(?i)(Fotografer|Photographer):\s*[^\n]*",
        r"(?i)\(detik[^)]*\)",
        r"(?i)\(CNN[^)]*\)",
        r"(?i)@detik\w*",
        r"#\w+",
    ]);
    static ref TIMESTAMPS: Vec<Regex> = patterns(&[
        r"(?i)\w+,?\s*\d{1,2}\s+\w+\s+\d{4}\s+\d{1,2}:\d{2}\s+(WIB|WITA|WIT)",
        r"\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{2}",
        r"\([^)]*\d{1,2}/\d{1,2}/\d{4}[^)]*\)",
    ]);
    static ref BRACKET_TAGS: Vec<Regex> = patterns(&[r"(?i)\[(Live|Update|Breaking|FOTO|VIDEO)\]"]);
    static ref CSS_ARTIFACTS: Vec<Regex> = patterns(&[
        r"(?i)important;\s*\}",
        r"(?i)(display|visibility|height|width):\s*[^;]*;",
        r#"(?i)(div-gpt-ad|adSlot_|billboard|firstChild)[^"'\s]*"#,
    ]);

    static ref HORIZONTAL_SPACE: Regex = Regex::new(r"[^\S\n]+").unwrap();
    static ref SPACE_AROUND_NEWLINE: Regex = Regex::new(r" ?\n ?").unwrap();
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n{2,}").unwrap();

    static ref NO_LETTERS: Regex = Regex::new(r"^[^a-zA-Z]{5,}$").unwrap();
    static ref NAVIGATION: Regex =
        Regex::new(r"(?i)^(Next|Previous|Share|Tweet|Like|Follow|Subscribe|Login|Register|Menu|Home|Search)\b").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref SCRIPT_REMNANT: Regex =
        Regex::new(r"\b(function|var\s|let\s|const\s|if\s*\(|else\b|console\.|window\.|document\.)").unwrap();
    static ref CODE_CHARS: Regex = Regex::new(r"[{}();=<>]").unwrap();
}

const MIN_PARAGRAPH_CHARS: usize = 20;
const MAX_PUNCTUATION_RATIO: f64 = 0.4;
const MAX_CODE_CHARS: usize = 3;

/// Cleaned content at or below this length is considered unusable.
pub const MIN_USABLE_CHARS: usize = 50;
/// Fallback excerpts at or below this length are skipped in favour of the title.
pub const MIN_EXCERPT_CHARS: usize = 20;

fn strip(content: String, patterns: &[Regex]) -> String {
    patterns
        .iter()
        .fold(content, |acc, re| re.replace_all(&acc, "").into_owned())
}

fn keep_paragraph(p: &str) -> bool {
    let len = p.chars().count();
    if len < MIN_PARAGRAPH_CHARS || NO_LETTERS.is_match(p) || NAVIGATION.is_match(p) {
        return false;
    }
    if PUNCTUATION.find_iter(p).count() as f64 > len as f64 * MAX_PUNCTUATION_RATIO {
        return false;
    }
    !SCRIPT_REMNANT.is_match(p) && CODE_CHARS.find_iter(p).count() <= MAX_CODE_CHARS
}

fn clean_once(content: &str) -> String {
    let content = [
        &*SCRIPT_CODE,
        &*UI_TEXT,
        &*ATTRIBUTION,
        &*TIMESTAMPS,
        &*BRACKET_TAGS,
        &*CSS_ARTIFACTS,
    ]
    .iter()
    .fold(content.to_string(), |acc, stage| strip(acc, stage));

    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    let content = HORIZONTAL_SPACE.replace_all(&content, " ");
    let content = SPACE_AROUND_NEWLINE.replace_all(&content, "\n");

    PARAGRAPH_BREAK
        .split(content.trim())
        .map(|p| p.replace('\n', " ").trim().to_string())
        .filter(|p| keep_paragraph(p))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Strip script remnants, ads, sharing prompts, attributions and timestamps from scraped text.
/// Paragraphs in the result are separated by blank lines.
///
/// Removing one pattern can expose another, so passes repeat until the text is stable.
/// This makes cleaning idempotent: `clean_content(&clean_content(s)) == clean_content(s)`.
pub fn clean_content(content: &str) -> String {
    let mut current = clean_once(content);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Cut `content` to at most `limit` characters, preferring a paragraph break,
/// then a sentence end, then a word boundary followed by `...`.
pub fn truncate_content(content: &str, limit: usize) -> String {
    if char_count(content) <= limit {
        return content.to_string();
    }
    let truncated = content.chars().take(limit).collect::<String>();

    if let Some(i) = truncated.rfind("\n\n") {
        if char_count(&truncated[..i]) as f64 > limit as f64 * 0.7 {
            return truncated[..i].trim_end().to_string();
        }
    }
    if let Some(i) = truncated.rfind('.') {
        if char_count(&truncated[..i]) as f64 > limit as f64 * 0.8 {
            return truncated[..=i].to_string();
        }
    }
    match truncated.rfind(' ') {
        Some(i) => format!("{}...", truncated[..i].trim_end()),
        None => format!("{}...", truncated),
    }
}

/// Hard cut at `limit` characters.
pub fn cut(text: &str, limit: usize) -> String {
    if char_count(text) > limit {
        format!("{}...", text.chars().take(limit).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Final article content: cleaned page text when usable, otherwise the excerpt or title.
pub fn best_content(raw: Option<&str>, excerpt: Option<&str>, title: &str, limit: Option<usize>) -> String {
    let cleaned = raw.map(clean_content).filter(|s| char_count(s) > MIN_USABLE_CHARS);
    if let Some(cleaned) = cleaned {
        return match limit {
            Some(limit) => truncate_content(&cleaned, limit),
            None => cleaned,
        };
    }

    let fallback = excerpt.filter(|s| char_count(s) > MIN_EXCERPT_CHARS).unwrap_or(title);
    match limit {
        Some(limit) => cut(fallback, limit),
        None => fallback.to_string(),
    }
}
