//! Rewrites free-form user queries into provider-friendly search text.

use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::types::SearchQuery;

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.5;

const SYSTEM_PROMPT: &str = "You optimise restaurant searches for a maps text-search API. \
The goal is to find SOME good dining options rather than a perfect match.

Rules:
- Keep the essential location, simplified to a neighbourhood or city when possible.
- Keep the main cuisine type; drop overly specific requirements.
- Generalise constraints that would likely return nothing.

Examples:
- \"Authentic Peruvian cevicheria in Belgrano near Av. Cabildo\" -> \"Peruvian restaurant Belgrano\"
- \"High-end sushi with omakase near Palermo Soho\" -> \"sushi restaurant Palermo\"
- \"Traditional Italian with homemade pasta in Recoleta\" -> \"Italian restaurant Recoleta\"

Return ONLY the rewritten search query, without quotes or explanation.";

/// Optional query rewriter backed by a completion endpoint.
///
/// Every failure falls back to the raw query, so normalisation can never fail
/// a search.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    client: Option<Arc<CompletionClient>>,
}

impl QueryNormalizer {
    #[must_use]
    pub fn new(client: Option<Arc<CompletionClient>>) -> Self {
        Self { client }
    }

    /// A normalizer that always returns the query unchanged.
    #[must_use]
    pub fn disabled() -> Self {
        Self { client: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Returns `query` carrying the rewritten text, or an unchanged copy when
    /// no client is configured or the rewrite fails.
    pub async fn normalize(&self, query: &SearchQuery) -> SearchQuery {
        let Some(client) = &self.client else {
            return query.clone();
        };

        let user = format!(
            "Make this restaurant search query more likely to find results while keeping \
             the essential intent: {}",
            query.raw()
        );

        match client
            .complete(SYSTEM_PROMPT, &user, MAX_TOKENS, TEMPERATURE)
            .await
        {
            Ok(text) => {
                let rewritten = strip_quotes(&text);
                tracing::info!(original = query.raw(), normalized = rewritten, "query normalized");
                query.with_normalized(rewritten)
            }
            Err(e) => {
                tracing::warn!(query = query.raw(), error = %e, "query normalization failed, using raw query");
                query.clone()
            }
        }
    }
}

/// Models sometimes wrap the answer in quotes despite being told not to.
fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
        .trim()
}
