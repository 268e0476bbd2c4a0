use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid block hash: {0}. Must be 64 hexadecimal characters")]
    InvalidBlockHash(String),

    #[error("Invalid Bitcoin address format: {0}")]
    InvalidBitcoinAddress(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub fn validate_block_hash(hash: &str) -> Result<(), ValidationError> {
    if hash.trim().is_empty() {
        return Err(ValidationError::MissingParameter("block_hash".to_string()));
    }

    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidBlockHash(hash.to_string()));
    }

    Ok(())
}

/// Shape check only: covers base58 and bech32 encodings without verifying checksums
pub fn validate_bitcoin_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    if !(14..=90).contains(&address.len()) || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidBitcoinAddress(address.to_string()));
    }

    Ok(())
}

pub fn validate_days(days: &str, max_days: u32) -> Result<u32, ValidationError> {
    if days.trim().is_empty() {
        return Err(ValidationError::MissingParameter("days".to_string()));
    }

    let days: u32 = days
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidParameter(format!("days must be a positive integer, got {}", days)))?;

    if days == 0 || days > max_days {
        return Err(ValidationError::InvalidParameter(format!(
            "days must be between 1 and {}",
            max_days
        )));
    }

    Ok(days)
}
