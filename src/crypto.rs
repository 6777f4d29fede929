//! Password hashing and OTP code generation

use rand::Rng;

/// bcrypt cost factor, matching the legacy backend
pub const BCRYPT_COST: u32 = 12;

/// Hash a password with bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Generate a random one-time password, zero-padded to six digits.
///
/// Drawn uniformly over 000000-999999; codes below 100000 keep their
/// leading zeros so every issued code is exactly six characters.
pub fn generate_otp_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{code:06}")
}
