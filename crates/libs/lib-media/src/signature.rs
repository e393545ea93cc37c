//! # Upload Signatures
//!
//! Cloudinary signs uploads with `sha1(sorted "k=v" pairs joined by '&' + api_secret)`.
//! `file`, `api_key`, `cloud_name` and `resource_type` never take part in the signature.

use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

const UNSIGNED_PARAMS: &[&str] = &["file", "api_key", "cloud_name", "resource_type"];

/// Lowercase hex SHA-1 digest (40 characters).
pub fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Build the canonical parameter string, keys ascending, empty values skipped.
pub fn string_to_sign(params: &BTreeMap<&str, String>) -> String {
    params
        .iter()
        .filter(|(key, value)| !UNSIGNED_PARAMS.contains(key) && !value.is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sign a parameter set with the account's API secret.
pub fn sign_params(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    sha1_hex(&format!("{}{}", string_to_sign(params), api_secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_vectors() {
        assert_eq!(sha1_hex(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(sha1_hex("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_sha1_is_deterministic_hex() {
        let first = sha1_hex("folder=steel&timestamp=1700000000secret");
        let second = sha1_hex("folder=steel&timestamp=1700000000secret");

        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(first, sha1_hex("folder=steel&timestamp=1700000001secret"));
    }

    #[test]
    fn test_string_to_sign_sorts_and_skips_unsigned() {
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1315060510".to_string());
        params.insert("public_id", "sample_image".to_string());
        params.insert("api_key", "1234".to_string());
        params.insert("file", "@bytes".to_string());
        params.insert("folder", String::new());

        assert_eq!(string_to_sign(&params), "public_id=sample_image&timestamp=1315060510");
    }

    #[test]
    fn test_sign_params_matches_cloudinary_reference() {
        let mut params = BTreeMap::new();
        params.insert("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string());
        params.insert("public_id", "sample_image".to_string());
        params.insert("timestamp", "1315060510".to_string());

        assert_eq!(sign_params(&params, "abcd"), "bfd09f95f331f558cbd1320e67aa8d488770583e");
    }
}
