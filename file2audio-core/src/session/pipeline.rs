use std::borrow::Cow;

use crate::crypto::password_cipher::PasswordCipher;
use crate::models::config::CodecConfiguration;
use crate::models::error::CodecError;
use crate::models::named_blob::NamedBlob;
use crate::models::password::PasswordEntry;
use crate::models::report::{self, ContainerInfo, EncodeOutcome, EncodeReport};
use crate::processing::container_header::{ContainerHeader, CONTAINER_HEADER_SIZE};
use crate::processing::{archive, pcm, wav_format};
use crate::storage::checksum;
use crate::traits::payload_cipher::PayloadCipher;

/// Stateless encode/decode orchestrator.
///
/// Data flow:
/// ```text
/// encode: files → archive::pack → [cipher.encrypt] → header ++ payload → pcm → WAV
/// decode: WAV → pcm → header (trim to payload_length) → [cipher.decrypt] → archive::unpack
/// ```
///
/// Holds only configuration, so one instance can be shared across threads
/// and every call is independent of the others.
pub struct Pipeline {
    config: CodecConfiguration,
    cipher: Box<dyn PayloadCipher>,
}

impl Pipeline {
    /// Create a pipeline using the default PBKDF2 + AES-256-GCM cipher.
    pub fn new(config: CodecConfiguration) -> Result<Self, CodecError> {
        let cipher = Box::new(PasswordCipher::new(config.kdf_iterations));
        Self::with_cipher(config, cipher)
    }

    /// Create a pipeline with a custom payload cipher.
    pub fn with_cipher(config: CodecConfiguration, cipher: Box<dyn PayloadCipher>) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self { config, cipher })
    }

    pub fn config(&self) -> &CodecConfiguration {
        &self.config
    }

    pub fn cipher_algorithm(&self) -> &str {
        self.cipher.algorithm()
    }

    /// Encode `files` into a WAV file, encrypting when a password is given.
    pub fn encode(&self, files: &[NamedBlob], password: Option<&PasswordEntry>) -> Result<Vec<u8>, CodecError> {
        Ok(self.encode_with_report(files, password)?.audio)
    }

    /// Same as [`encode`](Self::encode), also returning size/duration statistics.
    pub fn encode_with_report(
        &self,
        files: &[NamedBlob],
        password: Option<&PasswordEntry>,
    ) -> Result<EncodeOutcome, CodecError> {
        // Policy is checked before any encoding work starts.
        if let Some(entry) = password {
            entry.check(self.config.min_password_len)?;
        }

        let file_count = u32::try_from(files.len())
            .map_err(|_| CodecError::CapacityExceeded(format!("{} files exceed the u32 count field", files.len())))?;
        let archive = archive::pack(files)?;
        log::debug!("packed {} files into {} archive bytes", file_count, archive.len());

        let payload = match password {
            Some(entry) => {
                let encrypted_len = archive.len() as u64 + self.cipher.overhead() as u64;
                if encrypted_len > u64::from(u32::MAX) {
                    return Err(CodecError::CapacityExceeded(format!(
                        "encrypted payload would be {encrypted_len} bytes, limit is {}",
                        u32::MAX
                    )));
                }
                let blob = self.cipher.encrypt(&archive, entry.as_str())?;
                log::debug!("encrypted archive with {} ({} bytes)", self.cipher.algorithm(), blob.len());
                blob
            }
            None => archive,
        };

        let payload_length = u32::try_from(payload.len())
            .map_err(|_| CodecError::CapacityExceeded(format!("payload of {} bytes", payload.len())))?;
        let header = ContainerHeader::new(file_count, payload_length, password.is_some());

        let mut container = Vec::with_capacity(CONTAINER_HEADER_SIZE + payload.len());
        container.extend_from_slice(&header.build());
        container.extend_from_slice(&payload);

        let samples = pcm::bytes_to_samples(&container);
        let audio = wav_format::write_wav(&samples, &self.config)?;

        let sample_count = samples.len() as u64;
        let original_size: u64 = files.iter().map(|f| f.data.len() as u64).sum();
        let report = EncodeReport {
            file_count,
            original_size,
            payload_length,
            encrypted: header.encrypted,
            sample_count,
            sample_rate: self.config.sample_rate,
            duration_secs: report::duration_secs(sample_count, self.config.sample_rate),
            audio_size: audio.len() as u64,
            efficiency_percent: report::efficiency_percent(original_size, audio.len() as u64),
            checksum: checksum::sha256_hex(&audio),
        };
        log::info!(
            "encoded {} files into {} samples at {} Hz (encrypted: {})",
            report.file_count,
            report.sample_count,
            report.sample_rate,
            report.encrypted
        );

        Ok(EncodeOutcome { audio, report })
    }

    /// Decode a WAV file produced by [`encode`](Self::encode).
    ///
    /// The password is only consulted when the container is flagged encrypted,
    /// and is trimmed of surrounding whitespace the same way encode trims it.
    pub fn decode(&self, audio: &[u8], password: Option<&str>) -> Result<Vec<NamedBlob>, CodecError> {
        let wav = wav_format::read_wav(audio)?;
        let bytes = pcm::samples_to_bytes(&wav.samples);
        let (header, payload) = ContainerHeader::parse(&bytes)?;
        log::debug!(
            "container at {} Hz: {} files, {} payload bytes, encrypted: {}",
            wav.sample_rate,
            header.file_count,
            header.payload_length,
            header.encrypted
        );

        let archive: Cow<'_, [u8]> = if header.encrypted {
            let password = password.map(str::trim).filter(|p| !p.is_empty()).ok_or(CodecError::MissingPassword)?;
            Cow::Owned(self.cipher.decrypt(payload, password)?)
        } else {
            Cow::Borrowed(payload)
        };

        let files = archive::unpack(&archive)?;
        if files.len() as u64 != u64::from(header.file_count) {
            return Err(CodecError::MalformedArchive(format!(
                "header declares {} files, archive holds {}",
                header.file_count,
                files.len()
            )));
        }

        log::info!("decoded {} files", files.len());
        Ok(files)
    }

    /// Read the WAV and container header without decrypting or unpacking.
    pub fn inspect(&self, audio: &[u8]) -> Result<ContainerInfo, CodecError> {
        let wav = wav_format::read_wav(audio)?;
        let bytes = pcm::samples_to_bytes(&wav.samples);
        let (header, _) = ContainerHeader::parse(&bytes)?;
        let sample_count = wav.samples.len() as u64;

        Ok(ContainerInfo {
            sample_rate: wav.sample_rate,
            sample_count,
            duration_secs: report::duration_secs(sample_count, wav.sample_rate),
            file_count: header.file_count,
            payload_length: header.payload_length,
            encrypted: header.encrypted,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            config: CodecConfiguration::default(),
            cipher: Box::new(PasswordCipher::default()),
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("cipher", &self.cipher.algorithm())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    use approx::assert_relative_eq;

    /// Fast KDF so encrypted round trips stay cheap in tests.
    fn fast_pipeline() -> Pipeline {
        Pipeline::new(CodecConfiguration {
            kdf_iterations: 16,
            ..Default::default()
        })
        .unwrap()
    }

    fn sample_files() -> Vec<NamedBlob> {
        vec![
            NamedBlob::new("a.txt", vec![0x68, 0x69]),
            NamedBlob::new("b.bin", vec![0x00, 0xFF]),
        ]
    }

    fn password() -> PasswordEntry {
        PasswordEntry::confirmed("correct horse battery")
    }

    /// Test double: XOR "encryption" with a fixed prefix/suffix.
    struct XorCipher;

    impl PayloadCipher for XorCipher {
        fn encrypt(&self, plaintext: &[u8], _password: &str) -> Result<Vec<u8>, CodecError> {
            let mut out = vec![0xAA; 4];
            out.extend(plaintext.iter().map(|b| b ^ 0x5A));
            Ok(out)
        }

        fn decrypt(&self, blob: &[u8], password: &str) -> Result<Vec<u8>, CodecError> {
            if password != "correct horse battery" {
                return Err(CodecError::AuthenticationFailure);
            }
            Ok(blob[4..].iter().map(|b| b ^ 0x5A).collect())
        }

        fn overhead(&self) -> usize {
            4
        }

        fn algorithm(&self) -> &str {
            "TEST-XOR"
        }
    }

    /// Test double whose ciphertext could never fit the 32-bit length field.
    struct OversizedCipher {
        called: AtomicBool,
    }

    impl PayloadCipher for OversizedCipher {
        fn encrypt(&self, plaintext: &[u8], _password: &str) -> Result<Vec<u8>, CodecError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(plaintext.to_vec())
        }

        fn decrypt(&self, blob: &[u8], _password: &str) -> Result<Vec<u8>, CodecError> {
            Ok(blob.to_vec())
        }

        fn overhead(&self) -> usize {
            u32::MAX as usize
        }

        fn algorithm(&self) -> &str {
            "TEST-OVERSIZED"
        }
    }

    /// Lets a test keep a handle on a cipher after boxing it into a pipeline.
    struct SharedCipher(Arc<OversizedCipher>);

    impl PayloadCipher for SharedCipher {
        fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>, CodecError> {
            self.0.encrypt(plaintext, password)
        }

        fn decrypt(&self, blob: &[u8], password: &str) -> Result<Vec<u8>, CodecError> {
            self.0.decrypt(blob, password)
        }

        fn overhead(&self) -> usize {
            self.0.overhead()
        }

        fn algorithm(&self) -> &str {
            self.0.algorithm()
        }
    }

    #[test]
    fn concrete_two_file_scenario() {
        let pipeline = Pipeline::default();
        let audio = pipeline.encode(&sample_files(), None).unwrap();

        // 9-byte header + 34-byte archive = 43 bytes -> 22 samples (one pad byte).
        assert_eq!(audio.len(), 44 + 44);
        let bytes = pcm::samples_to_bytes(&wav_format::read_wav(&audio).unwrap().samples);
        assert_eq!(&bytes[0..9], &[0, 0, 0, 2, 0, 0, 0, 34, 0]);
        assert_eq!(&bytes[9..13], &[0, 0, 0, 2]);
        assert_eq!(bytes[43], 0);

        assert_eq!(pipeline.decode(&audio, None).unwrap(), sample_files());
    }

    #[test]
    fn round_trip_without_encryption() {
        let pipeline = Pipeline::default();
        let files = vec![
            NamedBlob::new("empty.dat", Vec::<u8>::new()),
            NamedBlob::new("odd.bin", vec![1, 2, 3]),
            NamedBlob::new("résumé.pdf", (0..=255u8).collect::<Vec<_>>()),
            NamedBlob::new("odd.bin", vec![9]),
        ];
        let audio = pipeline.encode(&files, None).unwrap();
        assert_eq!(pipeline.decode(&audio, None).unwrap(), files);
    }

    #[test]
    fn round_trip_empty_file_set() {
        let pipeline = Pipeline::default();
        let audio = pipeline.encode(&[], None).unwrap();
        assert!(pipeline.decode(&audio, None).unwrap().is_empty());
    }

    #[test]
    fn round_trip_with_encryption() {
        let pipeline = fast_pipeline();
        let audio = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        let decoded = pipeline.decode(&audio, Some("correct horse battery")).unwrap();
        assert_eq!(decoded, sample_files());
    }

    #[test]
    fn encrypted_payload_length_includes_overhead() {
        let pipeline = fast_pipeline();
        let outcome = pipeline.encode_with_report(&sample_files(), Some(&password())).unwrap();
        assert!(outcome.report.encrypted);
        assert_eq!(outcome.report.payload_length, 34 + 44);
    }

    #[test]
    fn encrypting_twice_differs() {
        let pipeline = fast_pipeline();
        let a = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        let b = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_password_fails_authentication() {
        let pipeline = fast_pipeline();
        let audio = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        assert_eq!(
            pipeline.decode(&audio, Some("incorrect horse")),
            Err(CodecError::AuthenticationFailure)
        );
    }

    #[test]
    fn encrypted_without_password_is_missing_password() {
        let pipeline = fast_pipeline();
        let audio = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        assert_eq!(pipeline.decode(&audio, None), Err(CodecError::MissingPassword));
        assert_eq!(pipeline.decode(&audio, Some("")), Err(CodecError::MissingPassword));
    }

    #[test]
    fn password_ignored_for_plain_container() {
        let pipeline = Pipeline::default();
        let audio = pipeline.encode(&sample_files(), None).unwrap();
        assert_eq!(pipeline.decode(&audio, Some("anything")).unwrap(), sample_files());
    }

    #[test]
    fn password_policy_checked_first() {
        let pipeline = fast_pipeline();
        let short = PasswordEntry::confirmed("short");
        assert!(matches!(
            pipeline.encode(&sample_files(), Some(&short)),
            Err(CodecError::PasswordPolicyViolation(_))
        ));

        let mismatch = PasswordEntry::new("long enough one", "long enough two");
        assert!(matches!(
            pipeline.encode(&sample_files(), Some(&mismatch)),
            Err(CodecError::PasswordPolicyViolation(_))
        ));
    }

    #[test]
    fn decode_uses_rate_from_file() {
        let encoder = Pipeline::new(CodecConfiguration {
            sample_rate: 8_000,
            ..Default::default()
        })
        .unwrap();
        let audio = encoder.encode(&sample_files(), None).unwrap();

        let info = Pipeline::default().inspect(&audio).unwrap();
        assert_eq!(info.sample_rate, 8_000);
        assert_eq!(Pipeline::default().decode(&audio, None).unwrap(), sample_files());
    }

    #[test]
    fn report_statistics() {
        let outcome = Pipeline::default().encode_with_report(&sample_files(), None).unwrap();
        let report = outcome.report;
        assert_eq!(report.file_count, 2);
        assert_eq!(report.original_size, 4);
        assert_eq!(report.payload_length, 34);
        assert_eq!(report.sample_count, 22);
        assert_eq!(report.audio_size, outcome.audio.len() as u64);
        assert_relative_eq!(report.duration_secs, 22.0 / 202_860.0);
        assert_relative_eq!(report.efficiency_percent, 4.0 / 88.0 * 100.0);
        assert_eq!(report.checksum, checksum::sha256_hex(&outcome.audio));
    }

    #[test]
    fn inspect_does_not_need_password() {
        let pipeline = fast_pipeline();
        let audio = pipeline.encode(&sample_files(), Some(&password())).unwrap();
        let info = pipeline.inspect(&audio).unwrap();
        assert!(info.encrypted);
        assert_eq!(info.file_count, 2);
        assert_eq!(info.payload_length, 34 + 44);
    }

    #[test]
    fn tiny_audio_is_truncated_header() {
        let audio = wav_format::write_wav(&[0, 0], &CodecConfiguration::default()).unwrap();
        assert_eq!(
            Pipeline::default().decode(&audio, None),
            Err(CodecError::TruncatedHeader { actual: 4 })
        );
    }

    #[test]
    fn overstated_payload_length_is_truncated_payload() {
        let audio = Pipeline::default().encode(&sample_files(), None).unwrap();
        let mut bytes = pcm::samples_to_bytes(&wav_format::read_wav(&audio).unwrap().samples);
        bytes[4..8].copy_from_slice(&100u32.to_be_bytes());
        let forged = wav_format::write_wav(&pcm::bytes_to_samples(&bytes), &CodecConfiguration::default()).unwrap();

        assert_eq!(
            Pipeline::default().decode(&forged, None),
            Err(CodecError::TruncatedPayload { declared: 100, available: 35 })
        );
    }

    #[test]
    fn header_file_count_mismatch_is_malformed() {
        let audio = Pipeline::default().encode(&sample_files(), None).unwrap();
        let mut bytes = pcm::samples_to_bytes(&wav_format::read_wav(&audio).unwrap().samples);
        bytes[3] = 5;
        let forged = wav_format::write_wav(&pcm::bytes_to_samples(&bytes), &CodecConfiguration::default()).unwrap();

        assert!(matches!(
            Pipeline::default().decode(&forged, None),
            Err(CodecError::MalformedArchive(_))
        ));
    }

    #[test]
    fn non_canonical_wav_is_rejected() {
        let mut audio = Pipeline::default().encode(&sample_files(), None).unwrap();
        audio[36..40].copy_from_slice(b"LIST");
        let err = Pipeline::default().decode(&audio, None).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedContainerLayout(_)));
    }

    #[test]
    fn custom_cipher_plugs_in() {
        let pipeline = Pipeline::with_cipher(CodecConfiguration::default(), Box::new(XorCipher)).unwrap();
        assert_eq!(pipeline.cipher_algorithm(), "TEST-XOR");

        let outcome = pipeline.encode_with_report(&sample_files(), Some(&password())).unwrap();
        assert_eq!(outcome.report.payload_length, 34 + 4);
        assert_eq!(
            pipeline.decode(&outcome.audio, Some("correct horse battery")).unwrap(),
            sample_files()
        );
        assert_eq!(
            pipeline.decode(&outcome.audio, Some("nope")),
            Err(CodecError::AuthenticationFailure)
        );
    }

    #[test]
    fn oversized_encrypted_payload_is_capacity_exceeded() {
        let cipher = Arc::new(OversizedCipher {
            called: AtomicBool::new(false),
        });
        let pipeline = Pipeline::with_cipher(CodecConfiguration::default(), Box::new(SharedCipher(Arc::clone(&cipher))))
            .unwrap();

        let result = pipeline.encode(&sample_files(), Some(&password()));
        assert!(matches!(result, Err(CodecError::CapacityExceeded(_))));
        assert!(!cipher.called.load(Ordering::SeqCst));
    }

    #[test]
    fn padded_password_matches_trimmed_password() {
        let pipeline = fast_pipeline();
        let padded = PasswordEntry::confirmed("  correct horse battery \t");
        let audio = pipeline.encode(&sample_files(), Some(&padded)).unwrap();

        assert_eq!(pipeline.decode(&audio, Some("correct horse battery")).unwrap(), sample_files());
        assert_eq!(pipeline.decode(&audio, Some(" correct horse battery\n")).unwrap(), sample_files());
        assert_eq!(pipeline.decode(&audio, Some("   ")), Err(CodecError::MissingPassword));
    }

    #[test]
    fn whitespace_only_password_rejected_before_encoding() {
        let pipeline = fast_pipeline();
        let blank = PasswordEntry::confirmed("            ");
        assert!(matches!(
            pipeline.encode(&sample_files(), Some(&blank)),
            Err(CodecError::PasswordPolicyViolation(_))
        ));
    }

    #[test]
    fn invalid_configuration_rejected() {
        let result = Pipeline::new(CodecConfiguration {
            channels: 2,
            ..Default::default()
        });
        assert!(matches!(result, Err(CodecError::InvalidConfiguration(_))));
    }

    #[test]
    fn runs_on_worker_threads() {
        let pipeline = Arc::new(fast_pipeline());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    let files = vec![NamedBlob::new(format!("f{i}"), vec![i; 3])];
                    let audio = pipeline.encode(&files, Some(&password())).unwrap();
                    assert_eq!(pipeline.decode(&audio, Some("correct horse battery")).unwrap(), files);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
