use futures::future::BoxFuture;
use serde::Deserialize;

use crate::config::ResearchConfig;

use super::adapters::{LiteratureSource, SourceError};
use super::domain::ResearchRecord;

/// NCBI E-utilities adapter: `esearch` resolves PMIDs for a query, then
/// `esummary` fills in citation metadata. Both endpoints are called in JSON
/// mode; the summary endpoint carries no abstract, so `abstract_text` stays
/// empty and relevance matching for these records rides on the title.
pub struct PubMedSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PubMedSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &ResearchConfig) -> Self {
        Self::new(
            client,
            config.pubmed_base_url.clone(),
            config.ncbi_api_key.clone(),
        )
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<ResearchRecord>, SourceError> {
        let ids = self.search_ids(query, limit).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.summaries(&ids).await
    }

    async fn search_ids(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/esearch.fcgi", self.base_url);
        let retmax = limit.to_string();
        let mut params = vec![
            ("db", "pubmed"),
            ("term", query),
            ("retmax", retmax.as_str()),
            ("sort", "relevance"),
            ("retmode", "json"),
        ];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let response = self.client.get(url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let envelope: EsearchEnvelope = response.json().await?;
        Ok(envelope.esearchresult.idlist)
    }

    async fn summaries(&self, ids: &[String]) -> Result<Vec<ResearchRecord>, SourceError> {
        let url = format!("{}/esummary.fcgi", self.base_url);
        let joined = ids.join(",");
        let mut params = vec![
            ("db", "pubmed"),
            ("id", joined.as_str()),
            ("retmode", "json"),
        ];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let response = self.client.get(url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_summary(&body)
    }
}

impl LiteratureSource for PubMedSource {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<ResearchRecord>, SourceError>> {
        Box::pin(self.fetch(query, limit))
    }
}

#[derive(Debug, Deserialize)]
struct EsearchEnvelope {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EsummaryEnvelope {
    result: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    fulljournalname: String,
    #[serde(default)]
    pubdate: String,
    #[serde(default)]
    authors: Vec<SummaryAuthor>,
    #[serde(default)]
    elocationid: String,
    #[serde(default)]
    articleids: Vec<SummaryArticleId>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryArticleId {
    #[serde(default)]
    idtype: String,
    #[serde(default)]
    value: String,
}

fn parse_summary(body: &str) -> Result<Vec<ResearchRecord>, SourceError> {
    let envelope: EsummaryEnvelope =
        serde_json::from_str(body).map_err(|err| SourceError::Decode(err.to_string()))?;

    let uids: Vec<String> = envelope
        .result
        .get("uids")
        .and_then(|value| value.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut records = Vec::new();
    for uid in uids {
        let Some(raw) = envelope.result.get(&uid) else {
            continue;
        };
        let entry: SummaryEntry = serde_json::from_value(raw.clone())
            .map_err(|err| SourceError::Decode(err.to_string()))?;
        records.push(normalize(&uid, entry));
    }

    Ok(records)
}

fn normalize(pmid: &str, entry: SummaryEntry) -> ResearchRecord {
    let title = if entry.title.is_empty() {
        "No Title".to_string()
    } else {
        entry.title
    };

    let authors = if entry.authors.is_empty() {
        "N/A".to_string()
    } else {
        entry
            .authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let journal = if entry.fulljournalname.is_empty() {
        "N/A".to_string()
    } else {
        entry.fulljournalname
    };

    let year = entry
        .pubdate
        .split_whitespace()
        .next()
        .unwrap_or("N/A")
        .to_string();

    let doi = entry
        .articleids
        .iter()
        .find(|id| id.idtype == "doi" && !id.value.is_empty())
        .map(|id| id.value.clone())
        .or_else(|| {
            entry
                .elocationid
                .strip_prefix("doi: ")
                .map(str::to_string)
        });

    ResearchRecord {
        id: pmid.to_string(),
        title,
        abstract_text: String::new(),
        authors,
        journal,
        year,
        doi,
        url: format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/"),
    }
}
