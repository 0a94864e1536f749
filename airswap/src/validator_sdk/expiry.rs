use alloy::primitives::U256;
use chrono::Utc;

use super::check::{CheckKind, CheckReport, Finding};
use crate::swap_sdk::order::Order;

/// Wall-clock seconds since the epoch.
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Compares against wall-clock time rather than the queried block's time.
pub fn check_expiry(order: &Order, now: u64) -> CheckReport {
    let mut findings = Vec::new();
    if U256::from(now) > order.expiry {
        findings.push(Finding::Expired {
            expiry: order.expiry,
            now,
        });
    }
    CheckReport::completed(CheckKind::Expiry, findings)
}
