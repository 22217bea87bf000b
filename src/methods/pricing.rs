use crate::model::DumpsterType;

// Clients submit the totals they displayed; the server recomputes from the
// rate card and accepts only if the two agree within a cent. What gets
// persisted is always the server-computed snapshot.
pub const TOTAL_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub base_rate: f64,
    pub daily_rate: f64,
    pub delivery_fee: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// Weekly/daily composition: full weeks bill at the weekly rate, leftover
// days at the daily rate, capped so a partial week never costs more than
// a full one.
pub fn rental_charge(dumpster_type: &DumpsterType, rental_days: i32) -> f64 {
    let days = rental_days.max(1);
    let full_weeks = days / 7;
    let leftover_days = days % 7;
    let leftover_charge =
        (leftover_days as f64 * dumpster_type.daily_rate).min(dumpster_type.weekly_rate);
    round_cents(full_weeks as f64 * dumpster_type.weekly_rate + leftover_charge)
}

pub fn compute_quote(
    dumpster_type: &DumpsterType,
    rental_days: i32,
    delivery_fee: f64,
    tax_rate: f64,
) -> PriceQuote {
    let base_rate = rental_charge(dumpster_type, rental_days);
    let subtotal = round_cents(base_rate + delivery_fee);
    let tax_amount = round_cents(subtotal * tax_rate);
    let total_amount = round_cents(subtotal + tax_amount);
    PriceQuote {
        base_rate,
        daily_rate: dumpster_type.daily_rate,
        delivery_fee,
        subtotal,
        tax_amount,
        total_amount,
    }
}

pub fn totals_match(server_total: f64, client_total: f64) -> bool {
    (server_total - client_total).abs() <= TOTAL_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty_yard() -> DumpsterType {
        DumpsterType {
            id: 1,
            organization_id: 1,
            name: "20 Yard".into(),
            size_yards: 20,
            description: None,
            daily_rate: 60.0,
            weekly_rate: 350.0,
            weight_limit_tons: 3.0,
            overage_fee_per_ton: 75.0,
            is_active: true,
        }
    }

    #[test]
    fn one_week_bills_the_weekly_rate() {
        assert_eq!(rental_charge(&twenty_yard(), 7), 350.0);
    }

    #[test]
    fn partial_week_bills_daily_but_never_above_weekly() {
        assert_eq!(rental_charge(&twenty_yard(), 3), 180.0);
        // 6 days at $60 would be $360; capped at the weekly rate
        assert_eq!(rental_charge(&twenty_yard(), 6), 350.0);
    }

    #[test]
    fn ten_days_mixes_weekly_and_daily() {
        assert_eq!(rental_charge(&twenty_yard(), 10), 350.0 + 3.0 * 60.0);
    }

    #[test]
    fn zero_days_clamps_to_one() {
        assert_eq!(rental_charge(&twenty_yard(), 0), 60.0);
    }

    #[test]
    fn quote_totals_are_internally_consistent() {
        let quote = compute_quote(&twenty_yard(), 7, 50.0, 0.07);
        assert_eq!(quote.subtotal, 400.0);
        assert_eq!(quote.tax_amount, 28.0);
        assert_eq!(quote.total_amount, 428.0);
        assert_eq!(
            quote.total_amount,
            round_cents(quote.subtotal + quote.tax_amount)
        );
    }

    #[test]
    fn tolerance_accepts_rounding_noise_only() {
        assert!(totals_match(428.0, 428.004));
        assert!(totals_match(428.0, 427.995));
        assert!(!totals_match(428.0, 427.50));
        assert!(!totals_match(428.0, 430.0));
    }
}
