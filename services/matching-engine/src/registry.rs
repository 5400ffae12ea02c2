//! Instrument registry
//!
//! The universe of tradable instruments. Symbols and company names are each
//! unique, compared case-insensitively, across the whole registry. The set is
//! validated once when installed; lookups afterwards never re-check it.

use tracing::{info, warn};
use types::errors::{LookupError, ValidationError};

use crate::instrument::Instrument;

/// Owned, injectable registry of instruments
///
/// `None` means nothing has been loaded yet, which callers can tell apart
/// from a symbol that is simply absent.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    instruments: Option<Vec<Instrument>>,
}

impl Registry {
    /// An empty, not yet loaded registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and install a complete instrument set
    ///
    /// The previous set is replaced only if every pair of instruments has
    /// distinct symbols and distinct company names.
    pub fn load(&mut self, instruments: Vec<Instrument>) -> Result<(), ValidationError> {
        if let Err(err) = validate_instruments(&instruments) {
            warn!(error = %err, "Rejected instrument set");
            return Err(err);
        }
        info!(count = instruments.len(), "Loaded instrument set");
        self.instruments = Some(instruments);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.instruments.is_some()
    }

    /// The live instrument set, in load order
    pub fn instruments(&self) -> Result<&[Instrument], LookupError> {
        self.instruments.as_deref().ok_or(LookupError::RegistryEmpty)
    }

    pub(crate) fn instruments_mut(&mut self) -> Result<&mut [Instrument], LookupError> {
        self.instruments.as_deref_mut().ok_or(LookupError::RegistryEmpty)
    }

    /// Find an instrument by symbol, ignoring case
    pub fn lookup(&self, symbol: &str) -> Result<&Instrument, LookupError> {
        self.instruments()?
            .iter()
            .find(|instrument| eq_ignore_case(instrument.symbol(), symbol))
            .ok_or_else(|| LookupError::NoSuchSymbol {
                symbol: symbol.to_string(),
            })
    }

    pub(crate) fn lookup_mut(&mut self, symbol: &str) -> Result<&mut Instrument, LookupError> {
        self.instruments_mut()?
            .iter_mut()
            .find(|instrument| eq_ignore_case(instrument.symbol(), symbol))
            .ok_or_else(|| LookupError::NoSuchSymbol {
                symbol: symbol.to_string(),
            })
    }
}

/// Pairwise uniqueness check over a candidate instrument set
///
/// For each pair the symbol is checked before the company name, and the
/// first collision found is reported with both colliding values.
pub fn validate_instruments(instruments: &[Instrument]) -> Result<(), ValidationError> {
    for (i, first) in instruments.iter().enumerate() {
        for second in instruments[i + 1..].iter().rev() {
            if eq_ignore_case(first.symbol(), second.symbol()) {
                return Err(ValidationError::DuplicateSymbol {
                    first: first.symbol().to_string(),
                    second: second.symbol().to_string(),
                });
            }
            if eq_ignore_case(first.company_name(), second.company_name()) {
                return Err(ValidationError::DuplicateCompanyName {
                    first: first.company_name().to_string(),
                    second: second.company_name().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
