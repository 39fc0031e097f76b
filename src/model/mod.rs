pub mod types;

use anyhow::anyhow;
use log::{debug, error, info};
use reqwest::Client;
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::error::RelayError;
use crate::web::models::Turn;
use types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, SystemInstruction};

pub const SYSTEM_INSTRUCTION: &str = "Ti si 'Moje selo Šebet', stručni savetnik Mesne Zajednice Šebet, fokusiran na opštinske procedure, angažovanje zajednice i razvoj ruralnog područja Zaplanja. Tvoj ton je profesionalan, analitičan i empatičan. Koristi relevantne informacije iz priloženih dokumenata (Rečnik zaplanjskog govora, Zaplanje D. Simonovića) da bolje razumeš lokalni kontekst. Kada odgovaraš, uvek naglasi transparentnost i dvosmernu komunikaciju. Odgovaraj na srpskom jeziku. Pomoći ćeš meštanima sa pravnim pitanjima, opštinskim procedurama i informacijama o razvoju sela.";

pub const GENERATION_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.7,
    top_k: 40,
    top_p: 0.95,
    max_output_tokens: 2048,
};

/// Returned in place of the model's answer when the reply carries no text.
pub const FALLBACK_ANSWER: &str = "Nisam mogao da generišem odgovor.";

// Client for the Gemini generateContent endpoint
pub struct GeminiModel {
    api_url: String,
    api_key: String,
    timeout: Duration,
    client: Client,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Self {
        info!("Using Gemini endpoint at: {}", config.api_url);

        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.upstream_timeout,
            client: Client::new(),
        }
    }

    /// Appends the new prompt to the caller's history and wraps it with the
    /// fixed instruction and generation settings.
    pub fn build_request(history: Vec<Turn>, prompt: &str) -> GenerateContentRequest {
        let mut contents = history;
        contents.push(Turn::user(prompt));

        GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction::from_text(SYSTEM_INSTRUCTION),
            generation_config: GENERATION_CONFIG,
        }
    }

    pub async fn generate_response(
        &self,
        request: &GenerateContentRequest,
        request_id: Uuid,
    ) -> Result<String, RelayError> {
        match tokio::time::timeout(self.timeout, self.send(request, request_id)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Internal(anyhow!(
                "upstream call timed out after {}s",
                self.timeout.as_secs_f32()
            ))),
        }
    }

    async fn send(
        &self,
        request: &GenerateContentRequest,
        request_id: Uuid,
    ) -> Result<String, RelayError> {
        info!(
            "[{}] Sending {} turn(s) to Gemini",
            request_id,
            request.contents.len()
        );

        // without_url() keeps the API key in the query string out of the logs
        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow::Error::new(e.without_url()).context("upstream request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e.without_url()));
            error!("[{}] Gemini API error ({}): {}", request_id, status, error_text);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            anyhow::Error::new(e.without_url()).context("failed to decode upstream response")
        })?;

        let answer = match body.first_text() {
            Some(text) => text.to_string(),
            None => {
                info!("[{}] Gemini returned no text, using fallback", request_id);
                FALLBACK_ANSWER.to_string()
            }
        };

        debug!("[{}] Response length: {} characters", request_id, answer.len());
        Ok(answer)
    }
}
