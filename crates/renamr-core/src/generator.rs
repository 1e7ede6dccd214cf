//! Filename generation: prompt, one remote call, sanitize.

use crate::api::GenerationClient;
use crate::config::Settings;
use crate::error::RenameError;
use crate::model::DownloadEvent;
use crate::naming;

#[derive(Debug, Clone)]
pub struct FilenameGenerator {
    client: GenerationClient,
}

impl FilenameGenerator {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GenerationClient {
        &self.client
    }

    /// Asks the model for a name for `event` and returns it sanitized, with
    /// the original extension kept.
    ///
    /// Fails with `Config` before any request when no API key is set.
    pub async fn generate(
        &self,
        event: &DownloadEvent,
        settings: &Settings,
    ) -> Result<String, RenameError> {
        if settings.api_key.is_empty() {
            return Err(RenameError::Config("API key not configured".to_string()));
        }

        let prompt = naming::build_prompt(&event.url, &event.filename, &settings.naming_format);
        tracing::debug!(id = %event.id, url = %event.url, "requesting filename suggestion");

        let text = self.client.generate_text(&settings.api_key, &prompt).await?;
        let suggestion = text.trim();

        let ext = naming::extension_of(&event.filename)
            .ok_or_else(|| RenameError::api("could not determine file extension"))?;

        let name = naming::sanitize(suggestion, ext, settings.include_date)?;
        tracing::debug!(id = %event.id, from = %event.filename, to = %name, "generated filename");
        Ok(name)
    }
}
