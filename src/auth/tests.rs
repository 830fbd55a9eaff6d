//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token validation
//! - Password hashing and verification
//! - Claims structure

#[cfg(test)]
mod tests {
    use super::super::*;
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
        Argon2,
    };
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    #[test]
    fn test_claims_structure() {
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 1234567890,
        };

        assert_eq!(claims.sub, "U_TEST01");
        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_jwt_encoding_and_decoding() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999, // Far future
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "U_TEST01");
        assert_eq!(decoded.claims.exp, 9999999999);
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let secret = "test_secret_key";
        let wrong_secret = "wrong_secret_key";

        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 9999999999,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(wrong_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(result.is_err(), "Decoding with wrong secret must fail");
    }

    #[test]
    fn test_jwt_validation_fails_when_expired() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            exp: 1000, // 1970, long expired
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(result.is_err(), "Decoding an expired token must fail");
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"correct horse battery staple", &salt)
            .expect("hashing failed")
            .to_string();

        let parsed = PasswordHash::new(&hash).expect("hash parse failed");
        assert!(Argon2::default()
            .verify_password(b"correct horse battery staple", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong password", &parsed)
            .is_err());
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let salt_a = SaltString::generate(&mut OsRng);
        let salt_b = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash_a = argon2.hash_password(b"password123", &salt_a).unwrap().to_string();
        let hash_b = argon2.hash_password(b"password123", &salt_b).unwrap().to_string();

        assert_ne!(hash_a, hash_b, "Same password must hash differently per salt");
    }
}
