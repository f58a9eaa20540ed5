use std::fs;
use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio_postgres_rustls::MakeRustlsConnect;

use crate::config::DatabaseSettings;
use crate::errors::{FeederError, FeederResult};

pub(crate) fn tls_connector(settings: &DatabaseSettings) -> FeederResult<MakeRustlsConnect> {
    Ok(MakeRustlsConnect::new(client_tls_config(settings)?))
}

/// Without a CA bundle the channel is encrypted but the server certificate
/// is not checked, the same guarantee as libpq's `sslmode=require`. With a
/// bundle the chain must verify against it or the public roots.
fn client_tls_config(settings: &DatabaseSettings) -> FeederResult<ClientConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .map_err(|e| FeederError::Tls(e.to_string()))?;

    let path = match &settings.ca_bundle {
        Some(path) => path,
        None => {
            return Ok(builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(EncryptOnlyVerifier::new(provider)))
                .with_no_client_auth())
        }
    };

    let mut roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let pem = fs::read(path)?;
    let certs = CertificateDer::pem_slice_iter(&pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FeederError::Tls(format!("{}: {}", path.display(), e)))?;
    let (added, ignored) = roots.add_parsable_certificates(certs);
    tracing::debug!(added, ignored, bundle = %path.display(), "Loaded CA bundle");

    Ok(builder
        .with_root_certificates(roots)
        .with_no_client_auth())
}

/// Accepts any server certificate but still checks handshake signatures,
/// so the session key is bound to whatever certificate was presented.
#[derive(Debug)]
struct EncryptOnlyVerifier {
    provider: Arc<CryptoProvider>,
}

impl EncryptOnlyVerifier {
    fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for EncryptOnlyVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(ca_bundle: Option<std::path::PathBuf>) -> DatabaseSettings {
        DatabaseSettings {
            endpoint: Some("panel-db.cluster.example.internal".to_string()),
            db_name: Some("threatintel".to_string()),
            username: Some("collector".to_string()),
            password: Some("secret".to_string()),
            ca_bundle,
            connect_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_no_bundle_builds_encrypt_only_config() {
        assert!(client_tls_config(&settings(None)).is_ok());
        assert!(tls_connector(&settings(None)).is_ok());
    }

    #[test]
    fn test_encrypt_only_accepts_unknown_issuer() {
        let verifier =
            EncryptOnlyVerifier::new(Arc::new(rustls::crypto::ring::default_provider()));
        let server_name = ServerName::try_from("panel-db.abc123.us-east-1.rds.amazonaws.com")
            .unwrap();

        let result = verifier.verify_server_cert(
            &CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0x01]),
            &[],
            &server_name,
            &[],
            UnixTime::now(),
        );

        assert!(result.is_ok());
        assert!(!verifier.supported_verify_schemes().is_empty());
    }

    #[test]
    fn test_unreadable_ca_bundle() {
        let settings = settings(Some("/nonexistent/rds-bundle.pem".into()));
        assert!(matches!(client_tls_config(&settings), Err(FeederError::Io(_))));
    }

    #[test]
    fn test_malformed_ca_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.pem");
        fs::write(
            &path,
            "-----BEGIN CERTIFICATE-----\n%%% not base64 %%%\n-----END CERTIFICATE-----\n",
        )
        .unwrap();

        assert!(matches!(
            client_tls_config(&settings(Some(path))),
            Err(FeederError::Tls(_))
        ));
    }
}
