/// Gemini recommendation provider
///
/// Calls the Gemini REST API's generateContent endpoint with a structured
/// response schema so candidates come back as a JSON array of movie records.
/// Search grounding is enabled so availability claims are checked against the
/// live web rather than model memory.
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{MaxRuntime, Movie},
    services::providers::{RecommendationProvider, RecommendationRequest},
};

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Builds the candidate-request prompt from one session's filters
    fn build_prompt(request: &RecommendationRequest) -> String {
        let platform_list = request.platforms.join(", ");
        let timeframe = request.year_range.phrase();
        let mood = if request.mood != "Any Mood" {
            format!(" with a \"{}\" vibe", request.mood)
        } else {
            String::new()
        };
        let runtime = if request.max_runtime != MaxRuntime::Any {
            format!(" and a runtime of {}", request.max_runtime.as_str())
        } else {
            String::new()
        };

        format!(
            "Two partners are looking for a movie to watch together. \
             Find 12 movies {timeframe}{mood}{runtime}.\n\
             CRITICAL: Availability must be confirmed for: {platform_list}.\n\
             Exclude these IDs: {seen}.\n\
             Never suggest these IDs: {disliked}.\n\
             Include Rotten Tomatoes scores and streaming types (subscription/free/rent).",
            seen = request.seen_ids.join(", "),
            disliked = request.disliked_ids.join(", "),
        )
    }

    /// Response schema for the movie array, in Gemini's OpenAPI-flavored form
    fn response_schema() -> Value {
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "id": { "type": "STRING" },
                    "title": { "type": "STRING" },
                    "year": { "type": "NUMBER" },
                    "conversationalSynopsis": {
                        "type": "STRING",
                        "description": "A short synopsis written like one partner explaining it to the other. Mention lead actors, the director's vibe, and why it's cool."
                    },
                    "posterUrl": { "type": "STRING" },
                    "rottenTomatoesScore": { "type": "STRING" },
                    "trailerUrl": { "type": "STRING" },
                    "genres": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "cast": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Top 3 lead actors"
                    },
                    "runtime": { "type": "STRING", "description": "e.g. 1h 45m" },
                    "streamingPlatforms": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "type": { "type": "STRING" }
                            },
                            "required": ["name", "type"]
                        }
                    }
                },
                "required": [
                    "id", "title", "year", "conversationalSynopsis", "posterUrl",
                    "rottenTomatoesScore", "streamingPlatforms", "cast", "runtime"
                ]
            }
        })
    }

    /// Pulls the model's text out of a generateContent response
    fn extract_text(response: &Value) -> Option<&str> {
        response
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?
            .iter()
            .find_map(|part| part.get("text").and_then(Value::as_str))
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn fetch_candidates(&self, request: &RecommendationRequest) -> AppResult<Vec<Movie>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": Self::build_prompt(request) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema()
            },
            "tools": [{ "googleSearch": {} }]
        });

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let payload: Value = response.json().await?;
        let text = Self::extract_text(&payload).ok_or_else(|| {
            AppError::ExternalApi("Gemini response contained no text part".to_string())
        })?;

        let movies: Vec<Movie> = serde_json::from_str(text).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Gemini candidate list");
            AppError::ExternalApi(format!("Failed to parse Gemini response: {}", e))
        })?;

        tracing::info!(
            mood = %request.mood,
            candidates = movies.len(),
            provider = "gemini",
            "Candidate fetch completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
