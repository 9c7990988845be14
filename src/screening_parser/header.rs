//! Header row validation
//!
//! The v1 export starts with a fixed row of captions. Every caption must match
//! exactly; the first mismatch aborts the parse.

use tracing::debug;

use super::tokenizer::Tokenizer;
use crate::constants::HEADER_CAPTIONS;
use crate::error::{Result, ScreeningError};

/// Consume the header captions, leaving the cursor on the first data token
pub fn validate_header(tokens: &mut Tokenizer<'_>) -> Result<()> {
    for expected in HEADER_CAPTIONS {
        let token = match tokens.next_token() {
            Some(token) if !(token.is_final() && token.is_blank()) => token,
            Some(token) => {
                return Err(ScreeningError::TruncatedInput {
                    expected,
                    position: token.position(),
                });
            }
            None => {
                return Err(ScreeningError::TruncatedInput {
                    expected,
                    position: tokens.last_position(),
                });
            }
        };

        let found = token.text();
        if found != expected {
            return Err(ScreeningError::HeaderMismatch {
                expected,
                found: found.into_owned(),
                position: token.position(),
            });
        }
    }

    debug!(
        "Header validated: {} captions ending on line {}",
        HEADER_CAPTIONS.len(),
        tokens.line()
    );
    Ok(())
}
