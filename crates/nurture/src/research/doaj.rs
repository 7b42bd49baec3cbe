use futures::future::BoxFuture;
use serde::Deserialize;

use crate::config::ResearchConfig;

use super::adapters::{LiteratureSource, SourceError};
use super::domain::ResearchRecord;

/// Directory of Open Access Journals adapter. A single JSON search call per
/// query; records normalize out of the `bibjson` envelope.
pub struct DoajSource {
    client: reqwest::Client,
    base_url: String,
}

impl DoajSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &ResearchConfig) -> Self {
        Self::new(client, config.doaj_base_url.clone())
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<ResearchRecord>, SourceError> {
        let url = format!("{}/search/articles", self.base_url);
        let page_size = limit.to_string();
        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("pageSize", page_size.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_articles(&body)
    }
}

impl LiteratureSource for DoajSource {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<ResearchRecord>, SourceError>> {
        Box::pin(self.fetch(query, limit))
    }
}

#[derive(Debug, Deserialize)]
struct DoajEnvelope {
    #[serde(default)]
    results: Vec<DoajArticle>,
}

#[derive(Debug, Default, Deserialize)]
struct DoajArticle {
    #[serde(default)]
    id: String,
    #[serde(default)]
    bibjson: Bibjson,
}

#[derive(Debug, Default, Deserialize)]
struct Bibjson {
    #[serde(default)]
    title: String,
    #[serde(rename = "abstract", default)]
    abstract_text: String,
    #[serde(default)]
    author: Vec<DoajAuthor>,
    #[serde(default)]
    journal: DoajJournal,
    #[serde(default)]
    year: String,
    #[serde(default)]
    link: Vec<DoajLink>,
}

#[derive(Debug, Default, Deserialize)]
struct DoajAuthor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    given: String,
    #[serde(default)]
    family: String,
}

impl DoajAuthor {
    fn display_name(&self) -> String {
        let leading = if self.name.is_empty() {
            self.given.as_str()
        } else {
            self.name.as_str()
        };
        format!("{} {}", leading, self.family).trim().to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
struct DoajJournal {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct DoajLink {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: String,
}

fn parse_articles(body: &str) -> Result<Vec<ResearchRecord>, SourceError> {
    let envelope: DoajEnvelope =
        serde_json::from_str(body).map_err(|err| SourceError::Decode(err.to_string()))?;

    Ok(envelope.results.into_iter().map(normalize).collect())
}

fn link_content<'a>(links: &'a [DoajLink], kind: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.kind == kind && !link.content.is_empty())
        .map(|link| link.content.as_str())
}

fn normalize(article: DoajArticle) -> ResearchRecord {
    let bibjson = article.bibjson;

    let id = if article.id.is_empty() {
        "N/A".to_string()
    } else {
        article.id
    };

    let title = if bibjson.title.is_empty() {
        "No Title".to_string()
    } else {
        bibjson.title.clone()
    };

    let abstract_text = if bibjson.abstract_text.is_empty() {
        "No abstract available.".to_string()
    } else {
        bibjson.abstract_text.clone()
    };

    let authors = if bibjson.author.is_empty() {
        "N/A".to_string()
    } else {
        bibjson
            .author
            .iter()
            .map(DoajAuthor::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let journal = if bibjson.journal.title.is_empty() {
        "N/A".to_string()
    } else {
        bibjson.journal.title.clone()
    };

    let year = if bibjson.year.is_empty() {
        "N/A".to_string()
    } else {
        bibjson.year.clone()
    };

    let doi = link_content(&bibjson.link, "doi").map(str::to_string);
    let url = link_content(&bibjson.link, "fulltext")
        .or_else(|| link_content(&bibjson.link, "homepage"))
        .unwrap_or("N/A")
        .to_string();

    ResearchRecord {
        id,
        title,
        abstract_text,
        authors,
        journal,
        year,
        doi,
        url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bibjson_payload_normalizes_into_records() {
        let body = r#"{
            "results": [
                {
                    "id": "doaj-77aa",
                    "bibjson": {
                        "title": "Bedtime routines and toddler sleep quality",
                        "abstract": "A cohort study of bedtime routine consistency in toddlers.",
                        "author": [
                            {"name": "L. Femi"},
                            {"given": "Mara", "family": "Stroud"}
                        ],
                        "journal": {"title": "Open Family Studies"},
                        "year": "2022",
                        "link": [
                            {"type": "doi", "content": "10.2000/ofs.22.9"},
                            {"type": "fulltext", "content": "https://openfamilystudies.org/22/9"}
                        ]
                    }
                },
                {
                    "id": "doaj-88bb",
                    "bibjson": {
                        "title": "Untitled dataset note",
                        "link": [
                            {"type": "homepage", "content": "https://example.org/note"}
                        ]
                    }
                }
            ]
        }"#;

        let records = parse_articles(body).expect("payload parses");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "doaj-77aa");
        assert_eq!(first.authors, "L. Femi, Mara Stroud");
        assert_eq!(first.journal, "Open Family Studies");
        assert_eq!(first.year, "2022");
        assert_eq!(first.doi.as_deref(), Some("10.2000/ofs.22.9"));
        assert_eq!(first.url, "https://openfamilystudies.org/22/9");

        let second = &records[1];
        assert_eq!(second.abstract_text, "No abstract available.");
        assert_eq!(second.authors, "N/A");
        assert_eq!(second.url, "https://example.org/note");
        assert!(second.doi.is_none());
    }

    #[test]
    fn empty_results_parse_to_no_records() {
        let records = parse_articles(r#"{"results": []}"#).expect("payload parses");
        assert!(records.is_empty());

        let records = parse_articles(r#"{}"#).expect("payload parses");
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let error = parse_articles("<html>").expect_err("must fail");
        assert!(matches!(error, SourceError::Decode(_)));
    }
}
