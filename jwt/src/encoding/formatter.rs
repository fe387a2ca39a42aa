//! Shapes claims into their wire form right before they get encoded

use indexmap::IndexMap;

use crate::encoding::date;
use crate::prelude::*;

/// A step rewriting claims into what gets JSON encoded
pub trait ClaimsFormatter: std::fmt::Debug + Send + Sync {
    /// Rewrites claims in place
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>);
}

/// Always encodes `aud` as an array, even with a single audience
#[derive(Debug, Default, Copy, Clone)]
pub struct AudienceAsList;

impl ClaimsFormatter for AudienceAsList {
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>) {
        if let Some(aud) = claims.get_mut(RegisteredClaims::AUDIENCE) {
            if !matches!(aud, ClaimValue::List(_)) {
                let single = std::mem::replace(aud, ClaimValue::Null);
                *aud = ClaimValue::List(vec![single]);
            }
        }
    }
}

/// Encodes a lone audience as a plain string, for consumers which do not accept an array
#[derive(Debug, Default, Copy, Clone)]
pub struct UnifyAudience;

impl ClaimsFormatter for UnifyAudience {
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>) {
        if let Some(aud) = claims.get_mut(RegisteredClaims::AUDIENCE) {
            let single = match aud {
                ClaimValue::List(list) if list.len() == 1 => list.pop(),
                _ => None,
            };
            if let Some(single) = single {
                *aud = single;
            }
        }
    }
}

/// Encodes date claims as integer seconds, or as a number carrying microseconds when they have a
/// sub-second part
#[derive(Debug, Default, Copy, Clone)]
pub struct MicrosecondBasedDateConversion;

impl ClaimsFormatter for MicrosecondBasedDateConversion {
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>) {
        convert_dates(claims, date::microsecond_value)
    }
}

/// Encodes date claims as integer seconds, dropping any sub-second part
#[derive(Debug, Default, Copy, Clone)]
pub struct UnixTimestampDates;

impl ClaimsFormatter for UnixTimestampDates {
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>) {
        convert_dates(claims, date::unix_timestamp_value)
    }
}

fn convert_dates(claims: &mut IndexMap<String, ClaimValue>, convert: fn(&time::OffsetDateTime) -> ClaimValue) {
    for name in RegisteredClaims::DATE_CLAIMS {
        if let Some(value) = claims.get_mut(name) {
            if let ClaimValue::Timestamp(at) = *value {
                *value = convert(&at);
            }
        }
    }
}

/// Runs formatters one after the other
#[derive(Debug)]
pub struct ChainedFormatter(Vec<Box<dyn ClaimsFormatter>>);

impl ChainedFormatter {
    /// Chains the given formatters, applied in order
    pub fn new(formatters: Vec<Box<dyn ClaimsFormatter>>) -> Self {
        Self(formatters)
    }

    /// Like the default chain but with dates as integer seconds
    pub fn with_unix_timestamp_dates() -> Self {
        Self(vec![Box::new(AudienceAsList), Box::new(UnixTimestampDates)])
    }

    /// Like the default chain but a lone audience is encoded as a string
    pub fn with_unified_audience() -> Self {
        Self(vec![Box::new(UnifyAudience), Box::new(MicrosecondBasedDateConversion)])
    }
}

impl Default for ChainedFormatter {
    fn default() -> Self {
        Self(vec![Box::new(AudienceAsList), Box::new(MicrosecondBasedDateConversion)])
    }
}

impl ClaimsFormatter for ChainedFormatter {
    fn format_claims(&self, claims: &mut IndexMap<String, ClaimValue>) {
        for formatter in &self.0 {
            formatter.format_claims(claims);
        }
    }
}
