// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., R_K7NP3X for resumes)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User (U_)
    User,
    /// Resume (R_)
    Resume,
    /// Job description (D_)
    JobDescription,
    /// Generated document (G_)
    GeneratedDocument,
    /// File record (F_)
    File,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Resume => "R",
            EntityPrefix::JobDescription => "D",
            EntityPrefix::GeneratedDocument => "G",
            EntityPrefix::File => "F",
        }
    }
}

/// Generate a random Crockford Base32 string of specified length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID using Crockford Base32 encoding
///
/// # Arguments
/// * `prefix` - The entity type prefix
///
/// # Returns
/// A string in format "PREFIX_XXXXXX" (e.g., "R_K7NP3X")
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a Resume ID (R_XXXXXX)
pub fn generate_resume_id() -> String {
    generate_id(EntityPrefix::Resume)
}

/// Generate a Job Description ID (D_XXXXXX)
pub fn generate_job_description_id() -> String {
    generate_id(EntityPrefix::JobDescription)
}

/// Generate a Generated Document ID (G_XXXXXX)
pub fn generate_document_id() -> String {
    generate_id(EntityPrefix::GeneratedDocument)
}

/// Generate a File Record ID (F_XXXXXX)
pub fn generate_file_id() -> String {
    generate_id(EntityPrefix::File)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let resume_id = generate_resume_id();
        assert!(resume_id.starts_with("R_"));
        assert_eq!(resume_id.len(), 8); // "R_" + 6 chars

        let doc_id = generate_document_id();
        assert!(doc_id.starts_with("G_"));
        assert_eq!(doc_id.len(), 8);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_user_id();
        let random_part = &id[2..]; // Skip "U_"

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }

        // Verify no ambiguous characters
        assert!(!random_part.contains('I'));
        assert!(!random_part.contains('L'));
        assert!(!random_part.contains('O'));
        assert!(!random_part.contains('U'));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let id = generate_file_id();
            assert!(ids.insert(id), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_all_prefixes() {
        assert!(generate_user_id().starts_with("U_"));
        assert!(generate_resume_id().starts_with("R_"));
        assert!(generate_job_description_id().starts_with("D_"));
        assert!(generate_document_id().starts_with("G_"));
        assert!(generate_file_id().starts_with("F_"));
    }
}
