//! Envelope codec
//!
//! Packs salt, IV and ciphertext into the single blob that is stored remotely:
//!
//! ```text
//! [u32 BE salt length][salt][u32 BE iv length][iv][ciphertext ...]
//! ```
//!
//! No magic header, version byte or checksum. Blobs written by earlier
//! releases must keep decoding, so this layout is frozen.

use tracing::debug;

use crate::crypto::{self, EncryptedData};
use crate::error::{EnvputError, EnvputResult};

/// Size of each length prefix in bytes
const LENGTH_PREFIX_SIZE: usize = 4;

/// Smallest blob that can hold both length prefixes
pub const MIN_ENVELOPE_SIZE: usize = 2 * LENGTH_PREFIX_SIZE;

/// The three fields of a stored blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Vec<u8>,
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypt plaintext under the passphrase and wrap the result
    pub fn seal(plaintext: &[u8], passphrase: &[u8]) -> Self {
        crypto::encrypt(plaintext, passphrase).into()
    }

    /// Decrypt the envelope contents with the passphrase
    pub fn open(&self, passphrase: &[u8]) -> EnvputResult<Vec<u8>> {
        crypto::decrypt(&self.ciphertext, &self.iv, &self.salt, passphrase)
    }

    /// Serialize to the stored byte layout
    pub fn to_bytes(&self) -> EnvputResult<Vec<u8>> {
        pack(&self.salt, &self.iv, &self.ciphertext)
    }

    /// Parse the stored byte layout
    pub fn from_bytes(blob: &[u8]) -> EnvputResult<Self> {
        unpack(blob)
    }
}

impl From<EncryptedData> for Envelope {
    fn from(data: EncryptedData) -> Self {
        Self {
            salt: data.salt.to_vec(),
            iv: data.iv.to_vec(),
            ciphertext: data.ciphertext,
        }
    }
}

/// Concatenate the length-prefixed salt and IV followed by the ciphertext
///
/// Fails only if a field is too long for its 32-bit length prefix.
pub fn pack(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> EnvputResult<Vec<u8>> {
    let salt_len = encode_len("salt", salt)?;
    let iv_len = encode_len("IV", iv)?;

    let mut blob =
        Vec::with_capacity(MIN_ENVELOPE_SIZE + salt.len() + iv.len() + ciphertext.len());
    blob.extend_from_slice(&salt_len);
    blob.extend_from_slice(salt);
    blob.extend_from_slice(&iv_len);
    blob.extend_from_slice(iv);
    blob.extend_from_slice(ciphertext);

    debug!(
        salt_len = salt.len(),
        iv_len = iv.len(),
        ciphertext_len = ciphertext.len(),
        "packed envelope"
    );
    Ok(blob)
}

/// Split a blob back into salt, IV and ciphertext
///
/// Declared lengths are bounds-checked against the bytes actually present;
/// a short blob is rejected rather than truncated.
pub fn unpack(blob: &[u8]) -> EnvputResult<Envelope> {
    if blob.len() < MIN_ENVELOPE_SIZE {
        return Err(EnvputError::MalformedEnvelope(format!(
            "blob is {} bytes, need at least {}",
            blob.len(),
            MIN_ENVELOPE_SIZE
        )));
    }

    let mut reader = Reader { blob, offset: 0 };
    let salt = reader.length_prefixed("salt")?;
    let iv = reader.length_prefixed("IV")?;
    let ciphertext = reader.rest();

    debug!(
        salt_len = salt.len(),
        iv_len = iv.len(),
        ciphertext_len = ciphertext.len(),
        "unpacked envelope"
    );

    Ok(Envelope {
        salt: salt.to_vec(),
        iv: iv.to_vec(),
        ciphertext: ciphertext.to_vec(),
    })
}

fn encode_len(field: &str, bytes: &[u8]) -> EnvputResult<[u8; LENGTH_PREFIX_SIZE]> {
    u32::try_from(bytes.len())
        .map(u32::to_be_bytes)
        .map_err(|_| {
            EnvputError::MalformedEnvelope(format!(
                "{} of {} bytes does not fit a 32-bit length",
                field,
                bytes.len()
            ))
        })
}

/// Cursor over a blob that never reads past its end
struct Reader<'a> {
    blob: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, field: &str, len: usize) -> EnvputResult<&'a [u8]> {
        let remaining = self.blob.len() - self.offset;
        if len > remaining {
            return Err(EnvputError::MalformedEnvelope(format!(
                "{} needs {} bytes at offset {}, only {} remain",
                field, len, self.offset, remaining
            )));
        }

        let slice = &self.blob[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn length_prefixed(&mut self, field: &str) -> EnvputResult<&'a [u8]> {
        let prefix = self.take(&format!("{} length", field), LENGTH_PREFIX_SIZE)?;
        let mut len = [0u8; LENGTH_PREFIX_SIZE];
        len.copy_from_slice(prefix);

        let len = usize::try_from(u32::from_be_bytes(len)).map_err(|_| {
            EnvputError::MalformedEnvelope(format!("{} length overflows this platform", field))
        })?;
        self.take(field, len)
    }

    fn rest(self) -> &'a [u8] {
        &self.blob[self.offset..]
    }
}

/// Known blobs shared by tests across the crate
#[cfg(test)]
pub(crate) mod fixtures {
    /// Blob written by the 1.x releases for
    /// "DATABASE_URL=postgres://localhost/db" under "correct-horse-battery-staple",
    /// salt 00..0f and IV f0 e0 .. 00.
    pub const LEGACY_BLOB_HEX: &str = "00000010000102030405060708090a0b0c0d0e0f00000010\
        f0e0d0c0b0a0908070605040302010008d3fb4f240ae11416e82ad9ec5ff85d8c0e8666b1cd8a2\
        47c85cc4f9cbb1a5bd7e5e30349c3e8786b925dd0c9ec7bd60";

    pub const LEGACY_PASSPHRASE: &[u8] = b"correct-horse-battery-staple";

    pub const LEGACY_PLAINTEXT: &[u8] = b"DATABASE_URL=postgres://localhost/db";

    pub fn legacy_blob() -> Vec<u8> {
        hex::decode(LEGACY_BLOB_HEX).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::fixtures::legacy_blob;

    #[test]
    fn test_pack_layout() {
        let blob = pack(&[0xAA; 2], &[0xBB; 3], &[0xCC, 0xDD]).unwrap();
        assert_eq!(
            blob,
            vec![0, 0, 0, 2, 0xAA, 0xAA, 0, 0, 0, 3, 0xBB, 0xBB, 0xBB, 0xCC, 0xDD]
        );
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let cases: [(&[u8], &[u8], &[u8]); 4] = [
            (&[1u8; 16], &[2u8; 16], &[3u8; 48]),
            (&[], &[], &[]),
            (&[9u8; 5], &[], &[0u8; 1]),
            (&[0u8; 300], &[7u8; 16], &[]),
        ];

        for (salt, iv, ciphertext) in cases {
            let unpacked = unpack(&pack(salt, iv, ciphertext).unwrap()).unwrap();
            assert_eq!(unpacked.salt, salt);
            assert_eq!(unpacked.iv, iv);
            assert_eq!(unpacked.ciphertext, ciphertext);
        }
    }

    #[test]
    fn test_short_blob_rejected() {
        for len in 0..MIN_ENVELOPE_SIZE {
            let result = unpack(&vec![0u8; len]);
            assert!(matches!(result, Err(EnvputError::MalformedEnvelope(_))));
        }
    }

    #[test]
    fn test_salt_length_beyond_end_rejected() {
        let mut blob = vec![0, 0, 0, 100];
        blob.extend_from_slice(&[0u8; 10]);
        assert!(matches!(
            unpack(&blob),
            Err(EnvputError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_iv_length_beyond_end_rejected() {
        let mut blob = pack(&[1u8; 16], &[2u8; 16], &[3u8; 32]).unwrap();
        // Rewrite the IV length prefix (after 4 + 16 bytes) to claim more than exists
        blob[20..24].copy_from_slice(&1000u32.to_be_bytes());
        assert!(matches!(
            unpack(&blob),
            Err(EnvputError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_missing_iv_prefix_rejected() {
        // Salt consumes everything, leaving no room for the IV length
        let mut blob = vec![0, 0, 0, 6];
        blob.extend_from_slice(&[0u8; 6]);
        assert!(matches!(
            unpack(&blob),
            Err(EnvputError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_max_declared_length_rejected() {
        let mut blob = vec![0xFF, 0xFF, 0xFF, 0xFF];
        blob.extend_from_slice(&[0u8; 8]);
        assert!(matches!(
            unpack(&blob),
            Err(EnvputError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_seal_pack_unpack_open() {
        let plaintext = b"DATABASE_URL=postgres://localhost/db";
        let passphrase = b"correct-horse-battery-staple";

        let blob = Envelope::seal(plaintext, passphrase).to_bytes().unwrap();
        let envelope = Envelope::from_bytes(&blob).unwrap();

        assert_eq!(envelope.salt.len(), crypto::SALT_SIZE);
        assert_eq!(envelope.iv.len(), crypto::IV_SIZE);
        assert_eq!(envelope.open(passphrase).unwrap(), plaintext);
    }

    #[test]
    fn test_decodes_legacy_blob() {
        let envelope = unpack(&legacy_blob()).unwrap();

        assert_eq!(envelope.salt, (0u8..16).collect::<Vec<_>>());
        assert_eq!(envelope.ciphertext.len(), 48);

        let plaintext = envelope.open(super::fixtures::LEGACY_PASSPHRASE).unwrap();
        assert_eq!(plaintext, super::fixtures::LEGACY_PLAINTEXT);
    }

    #[test]
    fn test_legacy_blob_wrong_passphrase() {
        let envelope = unpack(&legacy_blob()).unwrap();
        assert!(matches!(
            envelope.open(b"wrong-password"),
            Err(EnvputError::Decryption(_))
        ));
    }
}
