//! Session tokens.

use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, instrument};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 7;
const MAX_LEN: usize = 64;
const KEY_PREFIX: &str = "tictactoe_";

/// Reason a string is not a valid token.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TokenError {
    /// Nothing to parse.
    #[display("Token is empty")]
    Empty,
    /// Longer than any generated token could be.
    #[display("Token is longer than {} characters", MAX_LEN)]
    TooLong,
    /// Contains something other than `[0-9a-z]`.
    #[display("Token contains invalid character {:?}", _0)]
    InvalidChar(#[error(not(source))] char),
}

/// Opaque identifier of one shareable game session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a new token: a random base36 part followed by the current
    /// time in base36 milliseconds.
    ///
    /// Clients allocate tokens independently, so the time suffix keeps two
    /// clients apart even when their random parts collide.
    #[instrument]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut token: String = (0..RANDOM_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        token.push_str(&to_base36(millis));
        debug!(token = %token, "Generated session token");
        Self(token)
    }

    /// Validates a token typed by a user or read from a link.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the input is empty, too long, or holds
    /// anything but lowercase ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TokenError::Empty);
        }
        if s.len() > MAX_LEN {
            return Err(TokenError::TooLong);
        }
        let invalid = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()));
        if let Some(c) = invalid {
            return Err(TokenError::InvalidChar(c));
        }
        Ok(Self(s.to_string()))
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which this session's record is stored.
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.0)
    }
}

impl FromStr for SessionToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}
