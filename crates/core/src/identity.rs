// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The local certificate and private key.
//!
//! The certificate's common name is the local device id. The migrator reads
//! it to decide whether identity must be regenerated, and removes both files
//! when it must.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CERTIFICATE_NAME: &str = "certificate.pem";
pub const PRIVATE_KEY_NAME: &str = "private.pem";

/// Location of the identity files in the config directory.
#[derive(Debug, Clone)]
pub struct IdentityFiles {
    certificate: PathBuf,
    private_key: PathBuf,
}

impl IdentityFiles {
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            certificate: config_dir.join(CERTIFICATE_NAME),
            private_key: config_dir.join(PRIVATE_KEY_NAME),
        }
    }

    pub fn certificate(&self) -> &Path {
        &self.certificate
    }

    pub fn private_key(&self) -> &Path {
        &self.private_key
    }

    /// Common name of the certificate subject.
    ///
    /// `Ok(None)` when no certificate exists. A certificate without a
    /// common name yields an empty string, which no id predicate accepts.
    pub fn common_name(&self) -> Result<Option<String>> {
        let data = match fs::read(&self.certificate) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let (_, pem) = x509_parser::pem::parse_x509_pem(&data).map_err(|e| {
            Error::Identity(format!(
                "{} is not PEM encoded: {:?}",
                self.certificate.display(),
                e
            ))
        })?;
        let cert = pem.parse_x509().map_err(|e| {
            Error::Identity(format!(
                "{} is not a valid certificate: {:?}",
                self.certificate.display(),
                e
            ))
        })?;

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|attr| attr.as_str().ok())
            .unwrap_or_default()
            .to_string();
        Ok(Some(common_name))
    }

    /// Delete both files. Failures are logged and skipped.
    ///
    /// Returns the number of files that could not be removed.
    pub fn remove(&self) -> usize {
        let mut failed = 0;
        for path in [&self.certificate, &self.private_key] {
            match fs::remove_file(path) {
                Ok(()) => tracing::info!(path = %path.display(), "removed identity file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove identity file");
                    failed += 1;
                }
            }
        }
        failed
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
