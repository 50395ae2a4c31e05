use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Address fields as resolved by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub uf: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CepError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Seam between the enrichment job and the external service, so the job
/// can run against a canned resolver in tests.
#[async_trait]
pub trait CepLookup: Send + Sync {
    /// `Ok(None)` means the service answered but does not know the code.
    async fn resolve(&self, cep: &str) -> Result<Option<ResolvedAddress>, CepError>;
}

#[derive(Debug, Deserialize)]
struct ViaCepBody {
    // ViaCEP signals an unknown code with an "erro" marker instead of
    // an HTTP error status.
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepBody {
    fn into_address(self) -> Option<ResolvedAddress> {
        if self.erro.is_some() {
            return None;
        }
        Some(ResolvedAddress {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            uf: self.uf,
        })
    }
}

pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CepError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CepLookup for ViaCepClient {
    async fn resolve(&self, cep: &str) -> Result<Option<ResolvedAddress>, CepError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let raw = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let body: ViaCepBody = serde_json::from_str(&raw)?;
        Ok(body.into_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_found_body() {
        let body: ViaCepBody = serde_json::from_str(
            r#"{"cep":"01310-100","logradouro":"Avenida Paulista","bairro":"Bela Vista","localidade":"São Paulo","uf":"SP"}"#,
        )
        .unwrap();
        let addr = body.into_address().unwrap();
        assert_eq!(addr.street, "Avenida Paulista");
        assert_eq!(addr.city, "São Paulo");
        assert_eq!(addr.uf, "SP");
    }

    #[test]
    fn erro_marker_means_not_found() {
        // Both the boolean and the legacy string form of the marker.
        for raw in [r#"{"erro": true}"#, r#"{"erro": "true"}"#] {
            let body: ViaCepBody = serde_json::from_str(raw).unwrap();
            assert!(body.into_address().is_none());
        }
    }

    #[test]
    fn missing_fields_default_empty() {
        let body: ViaCepBody = serde_json::from_str(r#"{"localidade":"Brasília","uf":"DF"}"#).unwrap();
        let addr = body.into_address().unwrap();
        assert_eq!(addr.street, "");
        assert_eq!(addr.neighborhood, "");
    }
}
