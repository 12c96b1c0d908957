use chrono::NaiveDate;
use itertools::Itertools;
use lazy_static::lazy_static;
use phf::{phf_map, phf_set};
use regex::Regex;
use serde::Serialize;

use crate::article::Article;
use crate::error::{Error, Result};

// MARK: Merge

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWarning {
    pub tag: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub articles: Vec<Article>,
    pub warnings: Vec<TagWarning>,
}

/// Concatenate per-tag results in request order, tagging every article with its source tag.
/// Failed tags become warnings. Articles are not deduplicated across tags.
pub fn merge(results: Vec<(String, Result<Vec<Article>>)>) -> Aggregate {
    let mut aggregate = Aggregate::default();
    for (tag, result) in results {
        match result {
            Ok(articles) => aggregate.articles.extend(articles.into_iter().map(|mut article| {
                article.source_tag = Some(tag.clone());
                article
            })),
            Err(e) => aggregate.warnings.push(TagWarning {
                tag,
                error: e.to_string(),
            }),
        }
    }
    aggregate
}

// MARK: Filters

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn from_query(s: Option<&str>) -> Self {
        match s {
            Some("oldest") => SortOrder::Oldest,
            _ => SortOrder::Newest,
        }
    }
}

/// Listings are newest first; `oldest` reverses the aggregate.
pub fn sort(articles: &mut [Article], order: SortOrder) {
    if order == SortOrder::Oldest {
        articles.reverse();
    }
}

pub fn filter_keyword(articles: Vec<Article>, keyword: &str) -> Vec<Article> {
    let keyword = keyword.to_lowercase();
    articles.into_iter().filter(|a| a.matches(&keyword)).collect()
}

static MONTHS: phf::Map<&'static str, u32> = phf_map! {
    "jan" => 1, "feb" => 2, "mar" => 3, "apr" => 4, "mei" => 5, "may" => 5,
    "jun" => 6, "jul" => 7, "agu" => 8, "agt" => 8, "aug" => 8, "sep" => 9,
    "okt" => 10, "oct" => 10, "nov" => 11, "des" => 12, "dec" => 12,
};

lazy_static! {
    static ref ABSOLUTE_DATE: Regex = Regex::new(r"\b(\d{1,2})\s+([A-Za-z]{3})[A-Za-z]*\s+(\d{4})\b").unwrap();
}

/// Parse a `YYYY-MM-DD` query date.
pub fn parse_query_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| Error::InvalidParameter(format!("date \"{}\" is not in YYYY-MM-DD format", date)))
}

/// The absolute date in a loose timestamp like `Senin, 12 Agu 2024 10:00 WIB`.
pub fn parse_published_date(published_at: &str) -> Option<NaiveDate> {
    let caps = ABSOLUTE_DATE.captures(published_at)?;
    let day = caps[1].parse().ok()?;
    let month = *MONTHS.get(caps[2].to_lowercase().as_str())?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Drop articles dated on another day. Relative or unparseable timestamps are kept.
pub fn filter_date(articles: Vec<Article>, date: NaiveDate) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| parse_published_date(&a.published_at).map_or(true, |d| d == date))
        .collect()
}

// MARK: Pagination

pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

/// Slice one 1-based page. `limit` is clamped to `1..=100` and `page` to at least 1.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let page = page.max(1);
    let total = items.len();
    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();
    Page {
        total,
        page,
        limit,
        total_pages: (total + limit - 1) / limit,
        items,
    }
}

// MARK: Trending

static STOPWORDS: phf::Set<&'static str> = phf_set! {
    "dan", "di", "ke", "dari", "untuk", "yang", "pada", "dalam",
    "dengan", "oleh", "akan", "telah", "tidak", "ini", "itu",
};

lazy_static! {
    static ref NON_LETTER: Regex = Regex::new(r"[^a-zA-Z\s]").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub keyword: String,
    pub count: usize,
}

/// Most frequent title words, ties broken alphabetically.
pub fn trending<S: AsRef<str>>(titles: &[S], limit: usize) -> Vec<Keyword> {
    titles
        .iter()
        .flat_map(|title| {
            let title = NON_LETTER.replace_all(&title.as_ref().to_lowercase(), "").into_owned();
            title
                .split_whitespace()
                .filter(|w| w.len() > 3 && !STOPWORDS.contains(*w))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(limit)
        .map(|(keyword, count)| Keyword { keyword, count })
        .collect()
}

// MARK: Categories

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORIES: [Category; 8] = [
    Category {
        id: "politik",
        name: "Politik",
        keywords: &["pemilu", "pemerintah", "presiden", "menteri"],
    },
    Category {
        id: "ekonomi",
        name: "Ekonomi",
        keywords: &["rupiah", "inflasi", "bisnis", "saham"],
    },
    Category {
        id: "hukum",
        name: "Hukum",
        keywords: &["pengadilan", "jaksa", "polisi", "kasus"],
    },
    Category {
        id: "pendidikan",
        name: "Pendidikan",
        keywords: &["sekolah", "universitas", "siswa", "guru"],
    },
    Category {
        id: "kesehatan",
        name: "Kesehatan",
        keywords: &["covid", "rumah sakit", "dokter", "obat"],
    },
    Category {
        id: "teknologi",
        name: "Teknologi",
        keywords: &["digital", "internet", "aplikasi", "startup"],
    },
    Category {
        id: "olahraga",
        name: "Olahraga",
        keywords: &["sepak bola", "indonesia", "pertandingan"],
    },
    Category {
        id: "hiburan",
        name: "Hiburan",
        keywords: &["artis", "film", "musik", "selebriti"],
    },
];
