//! BTC / satoshi conversions

use crate::constants::{MAX_MONEY, SATOSHIS_PER_BTC};
use crate::error::{Result, TxError};

/// Convert a BTC amount to satoshis, rounding to the nearest satoshi.
///
/// Fails for negative, non-finite or above-supply amounts.
pub fn btc_to_satoshi(btc: f64) -> Result<u64> {
    if !btc.is_finite() || btc < 0.0 {
        return Err(TxError::InvalidAmount(format!("{} BTC", btc)));
    }
    let satoshis = (btc * SATOSHIS_PER_BTC as f64).round();
    if satoshis > MAX_MONEY as f64 {
        return Err(TxError::InvalidAmount(format!(
            "{} BTC exceeds the money supply",
            btc
        )));
    }
    Ok(satoshis as u64)
}

pub fn satoshi_to_btc(satoshis: u64) -> f64 {
    satoshis as f64 / SATOSHIS_PER_BTC as f64
}
