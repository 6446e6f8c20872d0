//! Bot credentials
//!
//! The five values the leech bot reads from `credentials.json`. Built once at
//! startup and passed by reference; the only transformation ever applied is the
//! dump chat id normalization performed by [`Credentials::new`].

use serde::{Deserialize, Serialize};

use crate::error::{ProvisionError, ProvisionResult};

/// Offset that turns a bare channel id into its `-100…` supergroup form.
const SUPERGROUP_OFFSET: i64 = 1_000_000_000_000;

/// Number of digits in a bare channel id.
const BARE_CHANNEL_ID_DIGITS: usize = 10;

/// Credentials persisted for the bot.
///
/// Field order matches the key order of the written JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "API_ID")]
    pub api_id: i64,
    #[serde(rename = "API_HASH")]
    pub api_hash: String,
    #[serde(rename = "BOT_TOKEN")]
    pub bot_token: String,
    #[serde(rename = "USER_ID")]
    pub user_id: i64,
    #[serde(rename = "DUMP_ID")]
    pub dump_id: i64,
}

impl Credentials {
    /// Build credentials, normalizing `dump_id` to the supergroup convention.
    pub fn new(
        api_id: i64,
        api_hash: impl Into<String>,
        bot_token: impl Into<String>,
        user_id: i64,
        dump_id: i64,
    ) -> Self {
        Self {
            api_id,
            api_hash: api_hash.into(),
            bot_token: bot_token.into(),
            user_id,
            dump_id: normalize_dump_id(dump_id),
        }
    }

    /// Names of required fields that are zero or blank, in declaration order.
    ///
    /// `DUMP_ID` is optional: the bot falls back to the owner chat without it.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_id == 0 {
            missing.push("API_ID");
        }
        if self.api_hash.trim().is_empty() {
            missing.push("API_HASH");
        }
        if self.bot_token.trim().is_empty() {
            missing.push("BOT_TOKEN");
        }
        if self.user_id == 0 {
            missing.push("USER_ID");
        }
        missing
    }

    /// Fail with [`ProvisionError::MissingCredentials`] if any required field is unset.
    pub fn validate(&self) -> ProvisionResult<()> {
        let fields = self.missing_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ProvisionError::MissingCredentials { fields })
        }
    }
}

/// Rewrite a bare ten-digit channel id as `-100<id>`.
///
/// Any other value, including an id that already carries the `-100` prefix
/// (which is negative and therefore never all digits), is returned unchanged.
pub fn normalize_dump_id(dump_id: i64) -> i64 {
    let repr = dump_id.to_string();
    if repr.len() == BARE_CHANNEL_ID_DIGITS && repr.bytes().all(|b| b.is_ascii_digit()) {
        return -(SUPERGROUP_OFFSET + dump_id);
    }
    dump_id
}
