use serde::{Deserialize, Serialize};

use detik_client::ListingEntry;

pub const SOURCE: &str = "Detik";

/// How article content is rendered in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    String,
    Paragraphs,
}

impl ContentFormat {
    /// Anything other than `paragraphs` falls back to a single string.
    pub fn from_query(s: Option<&str>) -> Self {
        match s {
            Some("paragraphs") => ContentFormat::Paragraphs,
            _ => ContentFormat::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: u32,
    pub text: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Paragraphs(Vec<Paragraph>),
}

impl Content {
    /// Render cleaned text, whose paragraphs are separated by blank lines.
    pub fn render(text: &str, format: ContentFormat) -> Self {
        match format {
            ContentFormat::String => Content::Text(text.to_string()),
            ContentFormat::Paragraphs => Content::Paragraphs(
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .enumerate()
                    .map(|(i, p)| Paragraph {
                        id: i as u32 + 1,
                        text: p.to_string(),
                        word_count: p.split_whitespace().count(),
                    })
                    .collect(),
            ),
        }
    }
}

/// The uniform article record returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Loosely formatted, e.g. `2 jam lalu` or `12 Agu 2024`.
    pub published_at: String,
    pub image: Option<String>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// The tag an aggregated article was fetched for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
}

impl Article {
    /// Case-insensitive keyword match on title and excerpt. `keyword` must be lowercase.
    pub fn matches(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword)
            || self
                .excerpt
                .as_ref()
                .is_some_and(|excerpt| excerpt.to_lowercase().contains(keyword))
    }
}

impl From<ListingEntry> for Article {
    fn from(entry: ListingEntry) -> Self {
        Article {
            title: entry.title,
            link: entry.link,
            published_at: entry.time,
            image: entry.image,
            source: SOURCE.to_string(),
            excerpt: entry.excerpt.filter(|s| !s.is_empty()),
            content: None,
            source_tag: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn entry() -> ListingEntry {
        ListingEntry {
            title: "Banjir Rendam Kemang".to_string(),
            link: "https://news.detik.com/berita/d-1/banjir".to_string(),
            time: "2 jam lalu".to_string(),
            excerpt: Some("Hujan deras sejak pagi.".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_normalize() {
        let article = Article::from(entry());
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Banjir Rendam Kemang",
                "link": "https://news.detik.com/berita/d-1/banjir",
                "publishedAt": "2 jam lalu",
                "image": null,
                "source": "Detik",
                "excerpt": "Hujan deras sejak pagi."
            })
        );
    }

    #[test]
    fn test_render_paragraphs() {
        let content = Content::render("Satu dua tiga.\n\nEmpat lima.", ContentFormat::Paragraphs);
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(
            value,
            json!([
                { "id": 1, "text": "Satu dua tiga.", "wordCount": 3 },
                { "id": 2, "text": "Empat lima.", "wordCount": 2 }
            ])
        );

        let content = Content::render("Satu dua tiga.", ContentFormat::String);
        assert_eq!(serde_json::to_value(&content).unwrap(), json!("Satu dua tiga."));
    }

    #[test]
    fn test_matches() {
        let article = Article::from(entry());
        assert!(article.matches("kemang"));
        assert!(article.matches("hujan"));
        assert!(!article.matches("bandung"));
    }

    #[test]
    fn test_content_format_from_query() {
        assert_eq!(ContentFormat::from_query(Some("paragraphs")), ContentFormat::Paragraphs);
        assert_eq!(ContentFormat::from_query(Some("html")), ContentFormat::String);
        assert_eq!(ContentFormat::from_query(None), ContentFormat::String);
    }
}
