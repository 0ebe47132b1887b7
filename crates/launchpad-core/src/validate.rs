//! Token metadata validation for new sales
//!
//! Names are free text within a length bound; tickers are short ASCII
//! alphanumeric symbols.
use crate::constants::{MAX_NAME_LENGTH, MAX_TICKER_LENGTH};
use crate::errors::{LaunchpadError, LaunchpadResult};

/// Validate a token name
pub fn validate_name(name: &str) -> LaunchpadResult<()> {
    if name.trim().is_empty() {
        return Err(LaunchpadError::InvalidMetadata("name is empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(LaunchpadError::InvalidMetadata("name is too long"));
    }
    Ok(())
}

/// Validate a ticker symbol
pub fn validate_ticker(ticker: &str) -> LaunchpadResult<()> {
    if ticker.is_empty() {
        return Err(LaunchpadError::InvalidMetadata("ticker is empty"));
    }
    if ticker.len() > MAX_TICKER_LENGTH {
        return Err(LaunchpadError::InvalidMetadata("ticker is too long"));
    }
    if !ticker.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LaunchpadError::InvalidMetadata("ticker is not alphanumeric"));
    }
    Ok(())
}

/// Validate token creation parameters
pub fn validate_token(name: &str, ticker: &str) -> LaunchpadResult<()> {
    validate_name(name)?;
    validate_ticker(ticker)
}

#[test]
fn test_valid_metadata() {
    assert!(validate_token("DAPP Uni", "DAPP").is_ok());
    assert!(validate_token("x", "A1").is_ok());
    assert!(validate_token(&"n".repeat(MAX_NAME_LENGTH), &"T".repeat(MAX_TICKER_LENGTH)).is_ok());
}

#[test]
fn test_invalid_names() {
    assert!(validate_name("").is_err());
    assert!(validate_name("   ").is_err());
    assert!(validate_name(&"n".repeat(MAX_NAME_LENGTH + 1)).is_err());
}

#[test]
fn test_invalid_tickers() {
    assert!(validate_ticker("").is_err());
    assert!(validate_ticker("MY-TOKEN").is_err());
    assert!(validate_ticker("MY TOKEN").is_err());
    assert!(validate_ticker("MY_TOKEN").is_err());
    assert!(validate_ticker("AAAAAAAAAAAAAAAAAAAAAAAAA").is_err());
}
