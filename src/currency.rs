//! Currency catalogue and amount formatting.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision, Scales};

/// The currency used when the user has not chosen one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A currency the user can pick as their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// ISO 4217 code, e.g. "USD".
    pub code: &'static str,
    /// Display text for currency pickers.
    pub label: &'static str,
    /// The locale the currency is usually displayed in.
    pub locale: &'static str,
}

/// The currencies a user may select in their settings.
pub const CURRENCIES: &[Currency] = &[
    Currency {
        code: "USD",
        label: "$ US Dollar (USD)",
        locale: "en-US",
    },
    Currency {
        code: "EUR",
        label: "€ Euro (EUR)",
        locale: "de-DE",
    },
    Currency {
        code: "INR",
        label: "₹ Indian Rupee (INR)",
        locale: "en-IN",
    },
    Currency {
        code: "GBP",
        label: "£ British Pound (GBP)",
        locale: "en-GB",
    },
    Currency {
        code: "JPY",
        label: "¥ Japanese Yen (JPY)",
        locale: "ja-JP",
    },
    Currency {
        code: "CAD",
        label: "$ Canadian Dollar (CAD)",
        locale: "en-CA",
    },
    Currency {
        code: "AUD",
        label: "$ Australian Dollar (AUD)",
        locale: "en-AU",
    },
    Currency {
        code: "CNY",
        label: "¥ Chinese Yuan (CNY)",
        locale: "zh-CN",
    },
    Currency {
        code: "CHF",
        label: "₣ Swiss Franc (CHF)",
        locale: "de-CH",
    },
];

/// Look up a supported currency by its code.
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|currency| currency.code == code)
}

/// The prefix printed in front of amounts for `code`.
///
/// Codes without a known symbol are printed verbatim.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF",
        "SEK" => "kr",
        "NZD" => "NZ$",
        _ => code,
    }
}

/// Format `amount` for display in the currency `code`.
///
/// The sign is dropped, the direction of a transaction is shown by its type.
/// The result always has two decimal places and a comma between groups of
/// thousands, e.g. `$1,234.50`.
pub fn format_amount(amount: f64, code: &str) -> String {
    format!("{}{}", currency_symbol(code), format_number(amount.abs()))
}

fn format_number(number: f64) -> String {
    // NaN and infinity are printed as is.
    if !number.is_finite() {
        return number.to_string();
    }

    // Zero is hardcoded as "0", so we must specify the formatted string for zero
    if number == 0.0 {
        return "0.00".to_owned();
    }

    static FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::new()
            .scales(Scales::none())
            .separator(',')
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
            .ok()
    });

    let formatted = match fmt {
        Some(fmt) => fmt.fmt_string(number),
        None => format!("{number:.2}"),
    };

    pad_decimals(formatted)
}

/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3" and
/// "7.00" as "7", so add them back.
fn pad_decimals(mut formatted: String) -> String {
    let decimals = formatted
        .split_once('.')
        .map(|(_, fraction)| fraction.len());

    match decimals {
        None => formatted.push_str(".00"),
        Some(0) => formatted.push_str("00"),
        Some(1) => formatted.push('0'),
        Some(_) => {}
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CURRENCY, currency_symbol, find_currency, format_amount};

    #[test]
    fn formats_usd_with_separator_and_two_decimals() {
        assert_eq!("$1,234.50", format_amount(1234.5, "USD"));
    }

    #[test]
    fn formats_small_and_whole_amounts() {
        assert_eq!("$0.00", format_amount(0.0, "USD"));
        assert_eq!("$7.00", format_amount(7.0, "USD"));
        assert_eq!("$999.99", format_amount(999.99, "USD"));
        assert_eq!("$1,000.00", format_amount(1000.0, "USD"));
    }

    #[test]
    fn formats_large_amounts() {
        assert_eq!("€12,345,678.90", format_amount(12_345_678.9, "EUR"));
    }

    #[test]
    fn pads_trailing_zeros() {
        assert_eq!("$12.30", format_amount(12.3, "USD"));
        assert_eq!("$0.10", format_amount(0.1, "USD"));
        assert_eq!("$1,234,567.00", format_amount(1_234_567.0, "USD"));
    }

    #[test]
    fn drops_the_sign() {
        assert_eq!("£42.10", format_amount(-42.1, "GBP"));
    }

    #[test]
    fn unknown_currency_prints_code() {
        let got = format_amount(1234.5, "ZZZ");

        assert!(got.starts_with("ZZZ"), "got {got}");
        assert_eq!("ZZZ1,234.50", got);
    }

    #[test]
    fn empty_currency_code_does_not_panic() {
        assert_eq!("5.00", format_amount(5.0, ""));
    }

    #[test]
    fn uses_table_symbols() {
        assert_eq!("C$", currency_symbol("CAD"));
        assert_eq!("A$", currency_symbol("AUD"));
        assert_eq!("NZ$", currency_symbol("NZD"));
        assert_eq!("kr", currency_symbol("SEK"));
    }

    #[test]
    fn non_finite_amounts_do_not_panic() {
        assert_eq!("$NaN", format_amount(f64::NAN, "USD"));
        assert_eq!("$inf", format_amount(f64::INFINITY, "USD"));
    }

    #[test]
    fn default_currency_is_supported() {
        let got = find_currency(DEFAULT_CURRENCY).map(|currency| currency.locale);

        assert_eq!(Some("en-US"), got);
        assert_eq!(None, find_currency("SEK"));
    }
}
