//! Ticket domain model.
//!
//! The tier is an explicit enum carrying its own capacity and price
//! multiplier; nothing downstream matches on display names.

use chrono::{DateTime, Datelike, FixedOffset, Utc};

/// Pricing/capacity tier of a ticket type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketTier {
    Standard,
    EarlyBird,
}

impl TicketTier {
    /// Seats available for this tier.
    pub fn capacity(self) -> u32 {
        match self {
            TicketTier::EarlyBird => 3,
            TicketTier::Standard => 5,
        }
    }

    /// Fraction of the base per-seat price charged for this tier.
    pub fn price_multiplier(self) -> f64 {
        match self {
            TicketTier::EarlyBird => 0.85,
            TicketTier::Standard => 1.0,
        }
    }
}

/// One ticket type to create. Two fixed instances are used per run.
#[derive(Clone, Debug)]
pub struct TicketSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: TicketTier,
}

impl TicketSpec {
    pub fn early_bird() -> Self {
        Self {
            name: "Early Bird Ticket",
            description: "Discounted early-bird admission, limited seats.",
            tier: TicketTier::EarlyBird,
        }
    }

    pub fn general() -> Self {
        Self {
            name: "General Ticket",
            description: "General admission.",
            tier: TicketTier::Standard,
        }
    }

    /// Tier-adjusted price, rounded to two decimals.
    pub fn effective_price(&self, base: f64) -> f64 {
        (base * self.tier.price_multiplier() * 100.0).round() / 100.0
    }
}

/// Wall-clock pieces of a purchase deadline as the site's pickers expect
/// them: a month panel key, a day-of-month cell label, and a 12-hour time
/// option label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadlineParts {
    /// `"{year}-{month}"`, month unpadded.
    pub month_key: String,
    /// Day-of-month as rendered in the calendar cell.
    pub day: String,
    /// `"HH:MM AM/PM"`, hour zero-padded.
    pub time_label: String,
}

impl DeadlineParts {
    /// Convert an absolute instant to picker labels under a fixed offset.
    /// The offset is configuration, not a tz-database zone; daylight-saving
    /// transitions are the operator's problem.
    pub fn from_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local = instant.with_timezone(&offset);
        Self {
            month_key: format!("{}-{}", local.year(), local.month()),
            day: local.day().to_string(),
            time_label: local.format("%I:%M %p").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pdt_like() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).expect("valid offset")
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn capacity_by_tier() {
        assert_eq!(TicketTier::EarlyBird.capacity(), 3);
        assert_eq!(TicketTier::Standard.capacity(), 5);
    }

    #[test]
    fn early_bird_price_is_discounted_and_rounded() {
        assert_eq!(TicketSpec::early_bird().effective_price(40.0), 34.0);
        assert_eq!(TicketSpec::general().effective_price(40.0), 40.0);
        // rounding, not truncation
        assert_eq!(TicketSpec::early_bird().effective_price(33.33), 28.33);
    }

    #[test]
    fn afternoon_utc_maps_to_morning_wall_clock() {
        let parts = DeadlineParts::from_instant(at(2025, 6, 10, 15, 0), pdt_like());
        assert_eq!(parts.month_key, "2025-6");
        assert_eq!(parts.day, "10");
        assert_eq!(parts.time_label, "08:00 AM");
    }

    #[test]
    fn midnight_wraps_to_twelve_am() {
        let parts = DeadlineParts::from_instant(at(2025, 6, 10, 7, 0), pdt_like());
        assert_eq!(parts.day, "10");
        assert_eq!(parts.time_label, "12:00 AM");
    }

    #[test]
    fn noon_wraps_to_twelve_pm() {
        let parts = DeadlineParts::from_instant(at(2025, 6, 10, 19, 0), pdt_like());
        assert_eq!(parts.time_label, "12:00 PM");
    }

    #[test]
    fn offset_can_cross_a_month_boundary() {
        let parts = DeadlineParts::from_instant(at(2025, 7, 1, 3, 0), pdt_like());
        assert_eq!(parts.month_key, "2025-6");
        assert_eq!(parts.day, "30");
        assert_eq!(parts.time_label, "08:00 PM");
    }

    #[test]
    fn month_key_is_unpadded() {
        let parts = DeadlineParts::from_instant(at(2025, 12, 25, 20, 0), pdt_like());
        assert_eq!(parts.month_key, "2025-12");
        let parts = DeadlineParts::from_instant(at(2025, 3, 25, 20, 0), pdt_like());
        assert_eq!(parts.month_key, "2025-3");
    }
}
