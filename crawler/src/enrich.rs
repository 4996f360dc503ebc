use anyhow::Result;
use async_trait::async_trait;
use catalog_core::detail::parse_detail_page;
use catalog_core::{CourseCorpus, CourseRecord};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Where course detail pages come from. `None` means "no page": a failed
/// request, a timeout and a non-200 answer all look the same to the enricher.
#[async_trait]
pub trait DetailSource: Send + Sync + 'static {
    async fn fetch_page(&self, url: &str) -> Option<String>;
}

pub struct HttpDetailSource {
    client: Client,
}

impl HttpDetailSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DetailSource for HttpDetailSource {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(%err, url, "detail fetch failed");
                return None;
            }
        };
        if resp.status() != StatusCode::OK {
            tracing::debug!(status = %resp.status(), url, "detail page unavailable");
            return None;
        }
        resp.text().await.ok()
    }
}

/// Fetch one course page and re-derive its record.
pub async fn enrich<S: DetailSource + ?Sized>(source: &S, url: &str) -> Option<CourseRecord> {
    let parsed = Url::parse(url).ok()?;
    let html = source.fetch_page(url).await?;
    parse_detail_page(&parsed, &html)
}

/// Enrich the first `limit` courses of the corpus with at most `concurrency`
/// requests in flight. Each task owns one course; results are merged here, on
/// the caller's task. Courses whose page could not be used keep their harvested data.
pub async fn enrich_corpus<S: DetailSource>(
    source: Arc<S>,
    mut corpus: CourseCorpus,
    limit: usize,
    concurrency: usize,
) -> CourseCorpus {
    let mut pending = corpus
        .iter()
        .take(limit)
        .map(|c| (c.id.clone(), c.url.clone()))
        .collect::<Vec<_>>()
        .into_iter();
    let mut tasks = JoinSet::new();
    let mut results = Vec::new();

    loop {
        while tasks.len() < concurrency.max(1) {
            let Some((id, url)) = pending.next() else { break };
            let source = Arc::clone(&source);
            tasks.spawn(async move {
                let record = enrich(source.as_ref(), &url).await;
                (id, url, record)
            });
        }
        match tasks.join_next().await {
            Some(Ok(result)) => results.push(result),
            Some(Err(err)) => tracing::warn!(%err, "enrichment task failed"),
            None => break,
        }
    }

    let attempted = results.len();
    let mut enriched = 0;
    for (id, url, record) in results {
        if let Some(record) = record {
            // keep the key and link the course was harvested under
            corpus.upsert(CourseRecord { id, url, ..record });
            enriched += 1;
        }
    }
    tracing::info!(attempted, enriched, "enriched course details");
    corpus
}
