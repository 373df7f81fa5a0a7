//! Authentication tokens and password credentials

use anyhow::{bail, Result};

use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use std::str::FromStr;
use std::time::SystemTime;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthToken {
    pub user_no: usize,
    pub created: SystemTime,
    pub last_used: Option<SystemTime>,
    pub value: AuthTokenValue,
}

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

mod listify_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
        Argon2,
    };

    /// 16 random bytes, the length argon2 recommends.
    pub fn generate_b64_salt() -> Result<String> {
        let bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&bytes).map_err(|err| anyhow!("{}", err))?;
        Ok(salt.to_string())
    }

    pub fn hash<T: AsRef<str>>(plain: &[u8], b64_salt: T) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::from_b64(b64_salt.as_ref()).map_err(|err| anyhow!("{}", err))?;
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum ListifyHasher {
    Argon2,
    /// Fast test-only hasher - DO NOT use in production!
    #[cfg(feature = "test-fast-hasher")]
    TestFast,
}

impl FromStr for ListifyHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(ListifyHasher::Argon2),
            #[cfg(feature = "test-fast-hasher")]
            "test_fast" => Ok(ListifyHasher::TestFast),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl std::fmt::Display for ListifyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListifyHasher::Argon2 => write!(f, "argon2"),
            #[cfg(feature = "test-fast-hasher")]
            ListifyHasher::TestFast => write!(f, "test_fast"),
        }
    }
}

impl ListifyHasher {
    /// Hasher used for newly set passwords.
    pub fn for_new_credentials() -> Self {
        #[cfg(feature = "test-fast-hasher")]
        return ListifyHasher::TestFast;
        #[cfg(not(feature = "test-fast-hasher"))]
        return ListifyHasher::Argon2;
    }

    pub fn generate_b64_salt(&self) -> Result<String> {
        match self {
            ListifyHasher::Argon2 => listify_argon2::generate_b64_salt(),
            #[cfg(feature = "test-fast-hasher")]
            ListifyHasher::TestFast => Ok("test_salt".to_string()),
        }
    }

    pub fn hash<T: AsRef<str>>(&self, plain: &[u8], b64_salt: T) -> Result<String> {
        match self {
            ListifyHasher::Argon2 => listify_argon2::hash(plain, b64_salt),
            #[cfg(feature = "test-fast-hasher")]
            ListifyHasher::TestFast => {
                let hex: String = plain.iter().map(|b| format!("{:02x}", b)).collect();
                Ok(format!("$testfast${}${}", b64_salt.as_ref(), hex))
            }
        }
    }

    pub fn verify<T: AsRef<str>>(&self, plain_pw: T, target_hash: T) -> Result<bool> {
        match self {
            ListifyHasher::Argon2 => {
                listify_argon2::verify(plain_pw.as_ref().as_bytes(), target_hash)
            }
            #[cfg(feature = "test-fast-hasher")]
            ListifyHasher::TestFast => {
                let hex: String = plain_pw
                    .as_ref()
                    .bytes()
                    .map(|b| format!("{:02x}", b))
                    .collect();
                Ok(target_hash
                    .as_ref()
                    .strip_prefix("$testfast$")
                    .and_then(|s| s.split('$').nth(1))
                    == Some(hex.as_str()))
            }
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct UserPasswordCredentials {
    pub user_no: usize,
    pub salt: String,
    pub hash: String,
    pub hasher: ListifyHasher,

    pub created: SystemTime,
    pub last_tried: Option<SystemTime>,
    pub last_used: Option<SystemTime>,
}

impl UserPasswordCredentials {
    pub fn create(user_no: usize, password: &str) -> Result<Self> {
        let hasher = ListifyHasher::for_new_credentials();
        let salt = hasher.generate_b64_salt()?;
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        Ok(UserPasswordCredentials {
            user_no,
            salt,
            hash,
            hasher,
            created: SystemTime::now(),
            last_tried: None,
            last_used: None,
        })
    }

    pub fn verify(&self, password: &str) -> Result<bool> {
        self.hasher.verify(password, &self.hash)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn argon2_hash() {
        let pw = "123mypw";
        let b64_salt = ListifyHasher::Argon2.generate_b64_salt().unwrap();

        let hash1 = ListifyHasher::Argon2.hash(pw.as_bytes(), &b64_salt).unwrap();
        let hash2 = ListifyHasher::Argon2.hash(b"123mypw", &b64_salt).unwrap();
        assert_eq!(hash1, hash2);

        assert!(ListifyHasher::Argon2.verify("123mypw", &hash1).unwrap());
        assert!(!ListifyHasher::Argon2.verify("not the pw", &hash1).unwrap());
    }

    #[test]
    fn argon2_salts_are_random_and_parseable() {
        let a = ListifyHasher::Argon2.generate_b64_salt().unwrap();
        let b = ListifyHasher::Argon2.generate_b64_salt().unwrap();
        assert_ne!(a, b);
        assert!(ListifyHasher::Argon2.hash(b"pw", &a).is_ok());
    }

    #[test]
    fn hasher_names_round_trip() {
        let hasher = ListifyHasher::for_new_credentials();
        assert_eq!(
            ListifyHasher::from_str(&hasher.to_string()).unwrap(),
            hasher
        );
        assert!(ListifyHasher::from_str("md5").is_err());
    }

    #[test]
    fn credentials_verify_password() {
        let credentials = UserPasswordCredentials::create(7, "secret-pw").unwrap();
        assert_eq!(credentials.user_no, 7);
        assert!(credentials.verify("secret-pw").unwrap());
        assert!(!credentials.verify("secret-pW").unwrap());
    }

    #[test]
    fn generated_tokens_are_distinct_alphanumeric() {
        let a = AuthTokenValue::generate();
        let b = AuthTokenValue::generate();
        assert_eq!(a.0.len(), 64);
        assert!(a.0.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
