// src/domain/pricing.rs
use serde::Serialize;
use std::collections::HashMap;

use crate::money::Amount;
use super::catalog::Catalog;
use super::core::Errors;
use super::showtime::{DiscountBand, Showtime};

/// Discount configuration: one percentage per time-of-day band, flat
/// holiday and member percentages, and a flat per-ticket admin fee.
/// Percentages are whole numbers in 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountSchedule {
    pub time_discounts: TimeDiscounts,
    pub holiday_discount_pct: u32,
    pub member_discount_pct: u32,
    pub admin_fee: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDiscounts {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
}

impl TimeDiscounts {
    pub fn for_band(&self, band: DiscountBand) -> u32 {
        match band {
            DiscountBand::Morning => self.morning,
            DiscountBand::Afternoon => self.afternoon,
            DiscountBand::Evening => self.evening,
        }
    }
}

/// One discount line in a quote: the percentage applied and the resulting
/// whole-currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountLine {
    pub percent: u32,
    pub amount: Amount,
}

/// Itemized price for a number of tickets. Every field is part of the
/// caller-facing receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub film: String,
    pub showtime: Showtime,
    pub base_price: Amount,
    pub time_discount: DiscountLine,
    pub holiday_discount: DiscountLine,
    pub member_discount: DiscountLine,
    pub total_discount: Amount,
    pub price_after_discount: Amount,
    pub admin_fee: Amount,
    pub price_per_ticket: Amount,
    pub ticket_count: u32,
    pub total_price: Amount,
}

/// Stateless price computation over a fixed film price table and discount
/// schedule. Quoting has no side effects.
#[derive(Debug, Clone)]
pub struct PriceEngine {
    schedule: DiscountSchedule,
    base_prices: HashMap<String, Amount>,
}

impl PriceEngine {
    pub fn new<I>(schedule: DiscountSchedule, base_prices: I) -> Self
    where
        I: IntoIterator<Item = (String, Amount)>,
    {
        let base_prices = base_prices
            .into_iter()
            .map(|(title, price)| (title.to_lowercase(), price))
            .collect();
        PriceEngine { schedule, base_prices }
    }

    pub fn from_catalog(schedule: DiscountSchedule, catalog: &Catalog) -> Self {
        Self::new(
            schedule,
            catalog
                .films()
                .iter()
                .map(|f| (f.title.clone(), f.base_price)),
        )
    }

    pub fn schedule(&self) -> &DiscountSchedule {
        &self.schedule
    }

    pub fn base_price(&self, film_title: &str) -> Option<Amount> {
        self.base_prices.get(&film_title.to_lowercase()).copied()
    }

    /// Price `ticket_count` tickets for a film at a given showtime.
    ///
    /// The film title and showtime are assumed already validated against the
    /// catalog; an unknown title still fails cleanly with `FilmNotFound`.
    /// Discounts are taken from the base price in whole currency units and
    /// are deliberately not clamped: a schedule summing over 100% produces a
    /// negative pre-fee price, matching the configured arithmetic.
    pub fn quote(
        &self,
        film_title: &str,
        showtime: Showtime,
        is_holiday: bool,
        is_member: bool,
        ticket_count: u32,
    ) -> Result<PriceBreakdown, Errors> {
        let base = self
            .base_price(film_title)
            .ok_or_else(|| Errors::FilmNotFound(film_title.to_string()))?;

        let time_pct = self.schedule.time_discounts.for_band(showtime.band());
        let time_discount = DiscountLine {
            percent: time_pct,
            amount: base.percent(time_pct),
        };

        let holiday_pct = if is_holiday { self.schedule.holiday_discount_pct } else { 0 };
        let holiday_discount = DiscountLine {
            percent: holiday_pct,
            amount: base.percent(holiday_pct),
        };

        let member_pct = if is_member { self.schedule.member_discount_pct } else { 0 };
        let member_discount = DiscountLine {
            percent: member_pct,
            amount: base.percent(member_pct),
        };

        let total_discount =
            ((time_discount.amount + holiday_discount.amount)? + member_discount.amount)?;
        let price_after_discount = (base - total_discount)?;
        let price_per_ticket = (price_after_discount + self.schedule.admin_fee)?;
        let total_price = price_per_ticket.times(ticket_count);

        Ok(PriceBreakdown {
            film: film_title.to_string(),
            showtime,
            base_price: base,
            time_discount,
            holiday_discount,
            member_discount,
            total_discount,
            price_after_discount,
            admin_fee: self.schedule.admin_fee,
            price_per_ticket,
            ticket_count,
            total_price,
        })
    }
}
