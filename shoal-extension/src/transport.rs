//! HTTP(S) transport for extension clients
//!
//! Builds one pooled connection per transport from a [`ConnectionConfig`]
//! and carries the JSON request/response plumbing shared by both client
//! surfaces.

use crate::config::{ConnectionConfig, TlsPolicy};
use crate::error::{ExtensionError, Result};
use crate::metrics::{record_transport_closed, record_transport_opened};
use reqwest::header::WARNING;
use reqwest::Method;
use rustls::pki_types::CertificateDer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// One connection pool plus the request plumbing over it.
///
/// The pool is created when the transport is built and released when the
/// transport is closed (or dropped). Closing is idempotent; requests
/// issued after close fail with [`ExtensionError::Closed`].
pub(crate) struct HttpTransport {
    base_url: String,
    strict_deprecation: bool,
    client: reqwest::Client,
    closed: AtomicBool,
}

impl HttpTransport {
    /// Build the pool for the given config.
    ///
    /// Fails fast when the TLS client configuration cannot be constructed;
    /// no pool exists in that case.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .pool_max_idle_per_host(config.max_idle_connections);

        if config.tls.enabled {
            builder = builder.use_preconfigured_tls(build_client_tls(&config.tls)?);
        }

        let client = builder
            .build()
            .map_err(|e| ExtensionError::Connection(format!("Failed to build connection pool: {}", e)))?;

        debug!("Created extension transport for {}", config.base_url());
        record_transport_opened();

        Ok(Self {
            base_url: config.base_url(),
            strict_deprecation: config.strict_deprecation,
            client,
            closed: AtomicBool::new(false),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close the transport. Safe to call more than once; only the first
    /// call releases the pool.
    pub fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Closed extension transport for {}", self.base_url);
            record_transport_closed();
        }
        Ok(())
    }

    /// Issue one JSON request and decode the typed response.
    pub async fn send<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        if self.is_closed() {
            return Err(ExtensionError::Closed(format!("{} {}", method, path)));
        }

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let deprecation_warning = response
            .headers()
            .get(WARNING)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(decode_remote_error(status.as_u16(), &bytes));
        }

        if self.strict_deprecation {
            if let Some(warning) = deprecation_warning {
                return Err(ExtensionError::Deprecation(warning));
            }
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ExtensionError::Decode(format!("Invalid response body from {}: {}", url, e)))
    }
}

/// Structured error body the cluster attaches to non-2xx responses
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    error: RemoteErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RemoteErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    reason: String,
}

fn decode_remote_error(status: u16, bytes: &[u8]) -> ExtensionError {
    match serde_json::from_slice::<RemoteErrorBody>(bytes) {
        Ok(body) => ExtensionError::Remote {
            status,
            error_type: body.error.error_type,
            reason: body.error.reason,
        },
        Err(_) => ExtensionError::Remote {
            status,
            error_type: "unknown".to_string(),
            reason: String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Build rustls ClientConfig for the given policy
fn build_client_tls(policy: &TlsPolicy) -> Result<rustls::ClientConfig> {
    let config = if policy.skip_verify {
        // The cluster's default security configuration ships self-signed
        // certificates, so peer verification is off unless asked for.
        warn!("Cluster TLS verification disabled - INSECURE");

        rustls::ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(TrustAllVerification))
            .with_no_client_auth()
    } else {
        let mut roots = rustls::RootCertStore::empty();
        let native_certs = rustls_native_certs::load_native_certs();
        for cert in native_certs.certs {
            let _ = roots.add(cert);
        }

        if roots.is_empty() {
            return Err(ExtensionError::Tls(
                "No system root certificates available for peer verification".to_string(),
            ));
        }

        rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    };

    Ok(config)
}

/// Certificate verifier that accepts every peer (INSECURE)
#[derive(Debug)]
struct TrustAllVerification;

impl rustls::client::danger::ServerCertVerifier for TrustAllVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}
