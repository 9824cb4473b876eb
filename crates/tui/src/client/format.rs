use chrono::{DateTime, Datelike, TimeZone, Utc};

const CURRENCY_PREFIX: &str = "Rp\u{a0}";
const THOUSANDS_SEPARATOR: char = '.';

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats an amount as Indonesian Rupiah with no fraction digits.
///
/// Rounds half away from zero. Amounts that round to zero are rendered
/// without a sign.
///
/// ```
/// use finbot_tui::client::format_currency;
///
/// assert_eq!(format_currency(1_000_000.0), "Rp\u{a0}1.000.000");
/// assert_eq!(format_currency(-2500.4), "-Rp\u{a0}2.500");
/// ```
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    // `as` saturates on overflow.
    let units = rounded.abs() as u64;
    format!("{sign}{CURRENCY_PREFIX}{}", group_thousands(units))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Long Indonesian date (`17 Oktober 2026`) as seen from `tz`.
#[must_use]
pub fn format_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String {
    let local = at.with_timezone(tz);
    format!(
        "{} {} {}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year()
    )
}

/// One fraction digit, as used for category shares.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_without_decimals() {
        assert_eq!(format_currency(1_000_000.0), "Rp\u{a0}1.000.000");
        assert_eq!(format_currency(999.0), "Rp\u{a0}999");
        assert_eq!(format_currency(1000.0), "Rp\u{a0}1.000");
        assert_eq!(format_currency(123_456_789.0), "Rp\u{a0}123.456.789");
    }

    #[test]
    fn currency_zero_has_no_sign() {
        assert_eq!(format_currency(0.0), "Rp\u{a0}0");
        assert_eq!(format_currency(-0.0), "Rp\u{a0}0");
        assert_eq!(format_currency(-0.4), "Rp\u{a0}0");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(1500.5), "Rp\u{a0}1.501");
        assert_eq!(format_currency(-1500.5), "-Rp\u{a0}1.501");
        assert_eq!(format_currency(1500.49), "Rp\u{a0}1.500");
    }

    #[test]
    fn date_is_long_form_in_zone() {
        let at = DateTime::parse_from_rfc3339("2026-10-17T03:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(&at, &chrono_tz::Asia::Jakarta), "17 Oktober 2026");
    }

    #[test]
    fn date_follows_zone_across_midnight() {
        let at = DateTime::parse_from_rfc3339("2026-01-31T18:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(&at, &Utc), "31 Januari 2026");
        assert_eq!(format_date(&at, &chrono_tz::Asia::Jakarta), "1 Februari 2026");
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(format_percentage(42.0), "42.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }
}
