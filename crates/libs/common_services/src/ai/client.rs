use crate::ai::error::{AiError, classify_http};
use crate::ai::interfaces::{
    ChatMessage, ChatRequest, ChatResponse, ClothingAnalysis, EmbeddingRequest, EmbeddingResponse,
    ImageUrl, MessageContent, MessagePart, ResponseFormat,
};
use crate::ai::provider::EmbeddingProvider;
use app_state::AiSettings;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bon::bon;
use common_types::{MAX_ITEM_COLORS, Taxonomy};
use serde_json::Value;
use std::time::Duration;

const STYLIST_FALLBACK: &str = "Your closet is looking great today! Time to mix and match.";

/// Client for the external generation + embedding API (OpenAI-compatible
/// surface) and the background removal service.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    generation_model: String,
    embedding_model: String,
    embedding_dimensions: usize,
    taxonomy: Taxonomy,
    background_removal_url: Option<String>,
    background_removal_api_key: Option<String>,
}

#[bon]
impl AiClient {
    #[builder(start_fn = with_base_url)]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        api_key: String,
        generation_model: String,
        embedding_model: String,
        embedding_dimensions: usize,
        taxonomy: Option<Taxonomy>,
        timeout: Option<Duration>,
        background_removal_url: Option<String>,
        background_removal_api_key: Option<String>,
    ) -> Result<Self, AiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            generation_model,
            embedding_model,
            embedding_dimensions,
            taxonomy: taxonomy.unwrap_or_default(),
            background_removal_url,
            background_removal_api_key,
        })
    }
}

impl AiClient {
    pub fn from_settings(ai: &AiSettings, taxonomy: Taxonomy) -> Result<Self, AiError> {
        Self::with_base_url(&ai.base_url)
            .api_key(ai.api_key.clone())
            .generation_model(ai.generation_model.clone())
            .embedding_model(ai.embedding_model.clone())
            .embedding_dimensions(ai.embedding_dimensions)
            .taxonomy(taxonomy)
            .timeout(ai.request_timeout())
            .maybe_background_removal_url(ai.background_removal_url.clone())
            .maybe_background_removal_api_key(ai.background_removal_api_key.clone())
            .build()
    }

    /// Sends the image to the generation model and returns structured,
    /// taxonomy-sanitized tags.
    pub async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<ClothingAnalysis, AiError> {
        let b64 = general_purpose::STANDARD.encode(image);
        let message = ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                MessagePart::Text {
                    text: self.analysis_prompt(),
                },
                MessagePart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{mime_type};base64,{b64}"),
                    },
                },
            ]),
        };
        let raw = self.chat(vec![message], true).await?;
        let analysis: ClothingAnalysis = serde_json::from_str(strip_code_fences(&raw))?;
        Ok(sanitize_analysis(&self.taxonomy, analysis))
    }

    /// A short "message of the day" generated from closet statistics. Falls
    /// back to a canned line when the model returns nothing usable.
    pub async fn stylist_blurb(&self, stats: &Value) -> Result<String, AiError> {
        let prompt = format!(
            "You are a witty, helpful personal stylist. \
             I will give you statistics about a user's closet.\n\n\
             CLOSET DATA:\n{stats}\n\n\
             YOUR TASK:\n\
             Write a short, engaging \"Message of the Day\" (max 2-3 sentences).\n\
             1. Compliment their specific style based on the data.\n\
             2. Give one specific recommendation for what to wear today OR what \
             they should buy next to balance their wardrobe.\n\n\
             Tone: Friendly, encouraging, and slightly fashion-forward. \
             Keep it under 60 words."
        );
        let message = ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Text(prompt),
        };
        match self.chat(vec![message], false).await {
            Ok(blurb) => Ok(blurb.trim().to_string()),
            Err(AiError::EmptyResponse) => Ok(STYLIST_FALLBACK.to_string()),
            Err(err) => Err(err),
        }
    }

    /// Strips the background from an uploaded image via the external
    /// removal API. Returns the cleaned image bytes.
    pub async fn remove_background(
        &self,
        image: &[u8],
        filename: &str,
    ) -> Result<Vec<u8>, AiError> {
        let Some(url) = &self.background_removal_url else {
            return Err(AiError::BackgroundRemovalUnconfigured);
        };
        let part = reqwest::multipart::Part::bytes(image.to_vec()).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("image_file", part);
        let mut request = self.http.post(url).multipart(form);
        if let Some(key) = &self.background_removal_api_key {
            request = request.header("x-api-key", key);
        }
        let response = request.send().await.map_err(classify_http)?;
        if !response.status().is_success() {
            return Err(AiError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.bytes().await.map_err(classify_http)?.to_vec())
    }

    async fn chat(&self, messages: Vec<ChatMessage>, force_json: bool) -> Result<String, AiError> {
        let request = ChatRequest {
            model: self.generation_model.clone(),
            messages,
            stream: false,
            response_format: force_json.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };
        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_http)?;
        if !response.status().is_success() {
            return Err(AiError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let full: ChatResponse = response.json().await.map_err(classify_http)?;
        full.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    fn analysis_prompt(&self) -> String {
        let taxonomy = &self.taxonomy;
        format!(
            "You are a fashion archivist. Analyze this image of a clothing item.\n\n\
             STRICT RULES:\n\
             1. Return ONLY valid JSON.\n\
             2. Use ONLY the allowed values provided below. Do not invent new tags.\n\n\
             ALLOWED VALUES:\n\
             - category: Choose one from [{categories}]\n\
             - sub_category: Choose one from [{sub_categories}]\n\
             - colors: Choose up to {max_colors} from [{colors}]\n\
             - seasons: Choose from [{seasons}]\n\
             - occasions: Choose from [{occasions}]\n\n\
             JSON STRUCTURE:\n\
             {{\n\
               \"name\": \"A creative, short title (e.g. 'Vintage Acid Wash Jeans')\",\n\
               \"category\": \"One value from the allowed list\",\n\
               \"sub_category\": \"One value from the allowed list\",\n\
               \"colors\": [\"Value1\", \"Value2\"],\n\
               \"seasons\": [\"Winter\", \"Fall\"],\n\
               \"occasions\": [\"Casual\"],\n\
               \"description\": \"A detailed visual description for search embedding.\"\n\
             }}",
            categories = Taxonomy::prompt_list(&taxonomy.categories),
            sub_categories = Taxonomy::prompt_list(&taxonomy.sub_categories),
            max_colors = MAX_ITEM_COLORS,
            colors = Taxonomy::prompt_list(&taxonomy.colors),
            seasons = Taxonomy::prompt_list(&taxonomy.seasons),
            occasions = Taxonomy::prompt_list(&taxonomy.occasions),
        )
    }
}

#[async_trait]
impl EmbeddingProvider for AiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: text.to_string(),
        };
        let url = format!("{}/v1/embeddings", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_http)?;
        if !response.status().is_success() {
            return Err(AiError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let parsed: EmbeddingResponse = response.json().await.map_err(classify_http)?;
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or(AiError::EmptyResponse)?;
        if vector.len() != self.embedding_dimensions {
            return Err(AiError::DimensionMismatch {
                expected: self.embedding_dimensions,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }
}

/// Models occasionally wrap their JSON in markdown fences despite the
/// JSON-only instruction.
fn strip_code_fences(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Drops generated tags that fall outside the vocabulary and normalizes the
/// rest to canonical spelling. Category fields keep the generated value when
/// it is unknown; the vocabulary is advisory, not enforced.
fn sanitize_analysis(taxonomy: &Taxonomy, mut analysis: ClothingAnalysis) -> ClothingAnalysis {
    if let Some(canonical) = Taxonomy::canonical(&taxonomy.categories, &analysis.category) {
        analysis.category = canonical.to_string();
    }
    if let Some(canonical) = Taxonomy::canonical(&taxonomy.sub_categories, &analysis.sub_category) {
        analysis.sub_category = canonical.to_string();
    }
    analysis.colors = Taxonomy::retain_known(&taxonomy.colors, &analysis.colors);
    analysis.colors.truncate(MAX_ITEM_COLORS);
    analysis.seasons = Taxonomy::retain_known(&taxonomy.seasons, &analysis.seasons);
    analysis.occasions = Taxonomy::retain_known(&taxonomy.occasions, &analysis.occasions);
    analysis.name = analysis.name.trim().to_string();
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn sanitize_drops_unknown_tags_and_caps_colors() {
        let taxonomy = Taxonomy::default();
        let analysis = ClothingAnalysis {
            name: "  Vintage Denim Jacket ".to_string(),
            category: "outerwear".to_string(),
            sub_category: "jacket".to_string(),
            colors: vec![
                "blue".to_string(),
                "Chartreuse".to_string(),
                "Black".to_string(),
                "White".to_string(),
                "Grey".to_string(),
            ],
            seasons: vec!["fall".to_string(), "Monsoon".to_string()],
            occasions: vec!["casual".to_string()],
            description: "A faded denim jacket.".to_string(),
        };
        let sanitized = sanitize_analysis(&taxonomy, analysis);
        assert_eq!(sanitized.name, "Vintage Denim Jacket");
        assert_eq!(sanitized.category, "Outerwear");
        assert_eq!(sanitized.sub_category, "Jacket");
        assert_eq!(sanitized.colors, vec!["Blue", "Black", "White"]);
        assert_eq!(sanitized.seasons, vec!["Fall"]);
        assert_eq!(sanitized.occasions, vec!["Casual"]);
    }

    #[test]
    fn analysis_json_parses_after_fence_stripping() {
        let raw = "```json\n{\"name\":\"Red Scarf\",\"category\":\"Accessories\",\
                   \"sub_category\":\"Scarf\",\"colors\":[\"Red\"],\"seasons\":[\"Winter\"],\
                   \"occasions\":[\"Casual\"],\"description\":\"A wool scarf.\"}\n```";
        let analysis: ClothingAnalysis =
            serde_json::from_str(strip_code_fences(raw)).expect("should parse");
        assert_eq!(analysis.name, "Red Scarf");
        assert_eq!(analysis.colors, vec!["Red"]);
    }
}
