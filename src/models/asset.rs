use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Identifier used for the chain's native currency.
pub const NATIVE_IDENTIFIER: &str = "native";

const POLICY_ID_HEX_LEN: usize = 56;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Asset {
    pub policy_id: String,
    pub name_hex: String,
    pub decimals: u8,
}

impl Asset {
    pub fn new(policy_id: &str, name_hex: &str, decimals: u8) -> Self {
        Self {
            policy_id: policy_id.to_string(),
            name_hex: name_hex.to_string(),
            decimals,
        }
    }

    pub fn identifier(&self, delimiter: &str) -> String {
        format!("{}{}{}", self.policy_id, delimiter, self.name_hex)
    }

    pub fn asset_name(&self) -> String {
        String::from_utf8_lossy(&hex::decode(&self.name_hex).unwrap_or_default()).to_string()
    }
}

/// A currency on either side of a swap: the native coin or an issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Token {
    Native,
    Issued(Asset),
}

impl Token {
    pub fn decimals(&self) -> u8 {
        match self {
            Token::Native => 6,
            Token::Issued(a) => a.decimals,
        }
    }

    /// Identity comparison that ignores decimals metadata.
    pub fn same_currency(&self, other: &Token) -> bool {
        token_identifier(self) == token_identifier(other)
    }
}

/// Parse a `native` or `<policy_id>[.]<name_hex>` identifier.
///
/// Anything other than the native aliases must be ASCII hex holding at least
/// a full policy id.
pub fn from_identifier(id: &str, decimals: u8) -> Result<Token, RouteError> {
    let id = id.replace('.', "");
    if id.is_empty() || id == NATIVE_IDENTIFIER || id == "lovelace" {
        return Ok(Token::Native);
    }
    if id.len() < POLICY_ID_HEX_LEN || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RouteError::InvalidIdentifier(id));
    }
    let (policy_id, name_hex) = id.split_at(POLICY_ID_HEX_LEN);
    Ok(Token::Issued(Asset::new(policy_id, name_hex, decimals)))
}

pub fn token_name(token: &Token) -> String {
    match token {
        Token::Native => "ADA".to_string(),
        Token::Issued(a) => a.asset_name(),
    }
}

pub fn token_identifier(token: &Token) -> String {
    match token {
        Token::Native => NATIVE_IDENTIFIER.to_string(),
        Token::Issued(a) => a.identifier(""),
    }
}
