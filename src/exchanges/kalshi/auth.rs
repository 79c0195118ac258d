use std::path::Path;

use base64::Engine;
use pem::parse;
use rand::rngs::OsRng;
use rsa::{
    pkcs1::DecodeRsaPrivateKey,
    pkcs8::DecodePrivateKey,
    pss::BlindedSigningKey,
    signature::{RandomizedSigner, SignatureEncoding},
    RsaPrivateKey,
};
use sha2::Sha256;
use tracing::debug;

use crate::config::KalshiConfig;
use crate::constants::{KALSHI_ACCESS_KEY, KALSHI_ACCESS_SIGNATURE, KALSHI_ACCESS_TIMESTAMP};
use crate::error::{Error, Result};

/// Holds the API key id and RSA key used to sign every request.
pub struct KalshiAuth {
    signing_key: BlindedSigningKey<Sha256>,
    api_key_id: String,
}

impl KalshiAuth {
    /// Reads the key from `private_key_path`, or from inline `private_key`
    /// when no path is configured.
    pub fn from_config(config: &KalshiConfig) -> Result<Self> {
        match (&config.private_key_path, &config.private_key) {
            (Some(path), _) => Self::from_file(&config.key_id, path),
            (None, Some(pem)) => Self::from_pem(&config.key_id, pem.as_bytes()),
            (None, None) => Err(Error::Config("No private key configured".into())),
        }
    }

    pub fn from_file(api_key_id: &str, private_key_path: impl AsRef<Path>) -> Result<Self> {
        let path = private_key_path.as_ref();
        let key_data = std::fs::read(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read private key {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_pem(api_key_id, &key_data)
    }

    pub fn from_pem(api_key_id: &str, key_data: &[u8]) -> Result<Self> {
        let pem_data =
            parse(key_data).map_err(|e| Error::Config(format!("Failed to parse PEM: {}", e)))?;

        let private_key = match pem_data.tag() {
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(pem_data.contents())
                .map_err(|e| Error::Signing(format!("Failed to parse PKCS#8 key: {}", e)))?,
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(pem_data.contents())
                .map_err(|e| Error::Signing(format!("Failed to parse PKCS#1 key: {}", e)))?,
            _ => RsaPrivateKey::from_pkcs8_der(pem_data.contents())
                .or_else(|_| RsaPrivateKey::from_pkcs1_der(pem_data.contents()))
                .map_err(|e| Error::Signing(format!("Failed to parse key: {}", e)))?,
        };

        Ok(Self::from_key(api_key_id, private_key))
    }

    pub fn from_key(api_key_id: &str, private_key: RsaPrivateKey) -> Self {
        Self {
            signing_key: BlindedSigningKey::<Sha256>::new(private_key),
            api_key_id: api_key_id.to_string(),
        }
    }

    pub fn api_key_id(&self) -> &str {
        &self.api_key_id
    }

    /// RSA-PSS (SHA-256, salt = digest length) over `message`, base64 encoded.
    pub fn sign(&self, message: &str) -> Result<String> {
        let mut rng = OsRng;
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut rng, message.as_bytes())
            .map_err(|e| Error::Signing(e.to_string()))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(signature.to_bytes());
        Ok(encoded)
    }

    pub fn generate_headers(&self, method: &str, path: &str) -> Result<AuthHeaders> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.generate_headers_at(timestamp, method, path)
    }

    /// Headers for a request made at `timestamp_ms`. The query string is not
    /// part of the signed message.
    pub fn generate_headers_at(
        &self,
        timestamp_ms: i64,
        method: &str,
        path: &str,
    ) -> Result<AuthHeaders> {
        let timestamp = timestamp_ms.to_string();
        let message = signing_message(&timestamp, method, path);
        debug!("Signing {} {}", method, strip_query(path));
        let signature = self.sign(&message)?;

        Ok(AuthHeaders {
            api_key: self.api_key_id.clone(),
            timestamp,
            signature,
        })
    }
}

impl std::fmt::Debug for KalshiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KalshiAuth")
            .field("api_key_id", &self.api_key_id)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

pub fn signing_message(timestamp: &str, method: &str, path: &str) -> String {
    format!(
        "{}{}{}",
        timestamp,
        method.to_uppercase(),
        strip_query(path)
    )
}

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

#[derive(Debug, Clone)]
pub struct AuthHeaders {
    pub api_key: String,
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    pub fn to_header_tuples(&self) -> Vec<(&'static str, String)> {
        vec![
            (KALSHI_ACCESS_KEY, self.api_key.clone()),
            (KALSHI_ACCESS_TIMESTAMP, self.timestamp.clone()),
            (KALSHI_ACCESS_SIGNATURE, self.signature.clone()),
        ]
    }
}
