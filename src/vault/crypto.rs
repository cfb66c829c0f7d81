use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Result, VaultkeepError};
use crate::types::*;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// AES-128 key length; passwords are padded up to this.
pub const KEY_LEN: usize = 16;

const NONCE_LEN: usize = 12;

/// A symmetric primitive keyed directly by the store password.
pub trait Cipher {
    fn encrypt(&self, plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8], password: &[u8]) -> Result<Vec<u8>>;
}

/// AES-128-CBC with the padded password doubling as the IV.
///
/// Matches files written by the original tool byte for byte. There is no MAC:
/// a corrupted ciphertext whose padding happens to check out decrypts to garbage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCbc;

/// AES-128-GCM with a random nonce prepended to every ciphertext.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonceGcm;

impl Cipher for LegacyCbc {
    fn encrypt(&self, plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        let key = pad_key(password)?;
        let enc = Aes128CbcEnc::new_from_slices(&key[..], &key[..])
            .map_err(|e| VaultkeepError::Encryption(e.to_string()))?;
        Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    fn decrypt(&self, ciphertext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        let key = pad_key(password)?;
        let dec = Aes128CbcDec::new_from_slices(&key[..], &key[..])
            .map_err(|e| VaultkeepError::Decryption(e.to_string()))?;
        if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
            return Err(VaultkeepError::Decryption(format!(
                "ciphertext length {} is not a whole number of blocks",
                ciphertext.len()
            )));
        }
        dec.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| VaultkeepError::Decryption("invalid padding".into()))
    }
}

impl Cipher for NonceGcm {
    fn encrypt(&self, plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        let key = pad_key(password)?;
        let cipher = Aes128Gcm::new_from_slice(&key[..])
            .map_err(|e| VaultkeepError::Encryption(e.to_string()))?;
        let nonce = Aes128Gcm::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| VaultkeepError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_LEN {
            return Err(VaultkeepError::Decryption("ciphertext too short".into()));
        }
        let key = pad_key(password)?;
        let cipher = Aes128Gcm::new_from_slice(&key[..])
            .map_err(|e| VaultkeepError::Decryption(e.to_string()))?;
        let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);
        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| VaultkeepError::Decryption("authentication tag mismatch".into()))
    }
}

/// The cipher a store seals its records with. Absent from legacy files, which
/// are always CBC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CipherSuite {
    #[default]
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
}

impl CipherSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherSuite::Aes128Cbc => "aes-128-cbc",
            CipherSuite::Aes128Gcm => "aes-128-gcm",
        }
    }

    fn engine(&self) -> &'static dyn Cipher {
        match self {
            CipherSuite::Aes128Cbc => &LegacyCbc,
            CipherSuite::Aes128Gcm => &NonceGcm,
        }
    }

    /// Encrypt a value and return it as standard base64 text.
    pub fn seal(&self, plaintext: &str, password: &str) -> Result<String> {
        let ciphertext = self.engine().encrypt(plaintext.as_bytes(), password.as_bytes())?;
        Ok(STANDARD.encode(ciphertext))
    }

    /// Decode and decrypt a base64 record back into its plaintext.
    pub fn open(&self, data: &str, password: &str) -> Result<String> {
        let ciphertext = STANDARD
            .decode(data.trim())
            .map_err(|e| VaultkeepError::Decryption(format!("base64 decode failed: {}", e)))?;
        let plaintext = Zeroizing::new(self.engine().decrypt(&ciphertext, password.as_bytes())?);
        String::from_utf8(plaintext.to_vec())
            .map_err(|_| VaultkeepError::Decryption("plaintext is not valid UTF-8".into()))
    }
}

impl std::fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CipherSuite {
    type Err = VaultkeepError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aes-128-cbc" => Ok(CipherSuite::Aes128Cbc),
            "aes-128-gcm" => Ok(CipherSuite::Aes128Gcm),
            other => Err(VaultkeepError::Other(format!("Unknown cipher suite: {}", other))),
        }
    }
}

/// PKCS#7-pad a password up to the AES-128 key length. A 16-byte password is
/// used unchanged; anything longer cannot key AES-128.
pub fn pad_key(password: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if password.is_empty() || password.len() > KEY_LEN {
        return Err(VaultkeepError::Validation(format!(
            "password must be 1 to {} bytes, got {}",
            KEY_LEN,
            password.len()
        )));
    }
    let fill = (KEY_LEN - password.len()) as u8;
    let mut key = Zeroizing::new([fill; KEY_LEN]);
    key[..password.len()].copy_from_slice(password);
    Ok(key)
}

/// Derive a sub-key using HKDF-SHA256.
pub fn derive_key(master: &[u8], info: &[u8], output_len: usize) -> Result<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(None, master);
    let mut okm = vec![0u8; output_len];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultkeepError::Other(format!("HKDF expand failed: {}", e)))?;
    Ok(okm)
}
