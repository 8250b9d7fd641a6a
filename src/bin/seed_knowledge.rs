// ABOUTME: Seeds the nutrition-knowledge vector index from Wikipedia article summaries
// ABOUTME: Fetches, embeds, and upserts a fixed topic list with paced requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Seed the nutrition-knowledge corpus.
//!
//! Fetches summaries for a fixed list of nutrition-science topics from the
//! Wikipedia REST API, embeds each one, and upserts the vectors with their
//! article metadata into the vector index the retriever queries at runtime.
//! Per-topic failures are logged and skipped; the run succeeds with whatever
//! was fetched.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use nutriplan::config::{EmbeddingConfig, VectorIndexConfig};
use nutriplan::knowledge::{
    EmbeddingProvider, OpenAiEmbeddingClient, PineconeIndex, VectorIndex, VectorRecord,
};
use nutriplan::logging::LoggingConfig;

/// Nutrition-science topics mirrored into the corpus
const TOPICS: &[&str] = &[
    "Protein_(nutrient)",
    "Carbohydrate",
    "Dietary_fiber",
    "Essential_fatty_acid",
    "Calorie_restriction",
    "Ketogenic_diet",
    "Mediterranean_diet",
    "Veganism",
    "Micronutrient",
    "Macronutrient",
    "Sports_nutrition",
    "Vitamin_D",
    "Hydration",
    "Intermittent_fasting",
    "Body_mass_index",
    "Muscle_hypertrophy",
    "Basal_metabolic_rate",
];

/// Pause between Wikipedia requests to stay under their rate limits
const FETCH_PACING: Duration = Duration::from_millis(100);

/// Records per upsert batch
const UPSERT_BATCH_SIZE: usize = 50;

const WIKIPEDIA_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

const USER_AGENT: &str = concat!("nutriplan-seed/", env!("CARGO_PKG_VERSION"));

/// Wikipedia page-summary response subset
#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    extract: String,
}

/// A fetched article ready for embedding
struct Article {
    id: String,
    title: String,
    content: String,
}

async fn fetch_articles(client: &reqwest::Client) -> Vec<Article> {
    let mut articles = Vec::new();

    for topic in TOPICS {
        let url = format!("{WIKIPEDIA_SUMMARY_URL}/{topic}");
        let result = async {
            let response = client
                .get(&url)
                .header(reqwest::header::USER_AGENT, USER_AGENT)
                .send()
                .await?
                .error_for_status()?;
            response.json::<PageSummary>().await
        }
        .await;

        match result {
            Ok(summary) => {
                info!(title = %summary.title, "Fetched article");
                articles.push(Article {
                    id: (*topic).to_owned(),
                    title: summary.title,
                    content: summary.extract,
                });
            }
            Err(error) => {
                warn!(topic, %error, "Skipping topic after fetch failure");
            }
        }

        tokio::time::sleep(FETCH_PACING).await;
    }

    articles
}

async fn embed_articles(
    embeddings: &OpenAiEmbeddingClient,
    articles: Vec<Article>,
) -> Vec<VectorRecord> {
    let seeded_at = chrono::Utc::now().to_rfc3339();
    let mut records = Vec::new();

    for article in articles {
        let text = format!("{}\n\n{}", article.title, article.content);
        match embeddings.embed(&text).await {
            Ok(values) => records.push(VectorRecord {
                id: article.id,
                values,
                metadata: serde_json::json!({
                    "title": article.title,
                    "content": article.content,
                    "category": "nutrition-science",
                    "source": "Wikipedia",
                    "seeded_at": seeded_at,
                }),
            }),
            Err(error) => {
                warn!(title = %article.title, %error, "Skipping article after embedding failure");
            }
        }
    }

    records
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let embeddings = OpenAiEmbeddingClient::new(
        EmbeddingConfig::from_env().context("embedding configuration")?,
    )
    .context("embedding client")?;
    let index = PineconeIndex::new(
        VectorIndexConfig::from_env().context("vector index configuration")?,
    )
    .context("vector index client")?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("HTTP client")?;

    info!(topics = TOPICS.len(), "Fetching nutrition articles");
    let articles = fetch_articles(&http).await;
    anyhow::ensure!(!articles.is_empty(), "no articles could be fetched");

    info!(articles = articles.len(), "Embedding articles");
    let records = embed_articles(&embeddings, articles).await;
    anyhow::ensure!(!records.is_empty(), "no articles could be embedded");

    for batch in records.chunks(UPSERT_BATCH_SIZE) {
        index
            .upsert(batch)
            .await
            .context("upserting vector records")?;
    }

    info!(records = records.len(), "Knowledge corpus seeded");
    Ok(())
}
