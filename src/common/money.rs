// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Maior valor que cabe em NUMERIC(10, 2).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2); // 99_999_999.99

/// Arredonda para centavos (meio para longe do zero), como o NUMERIC(10, 2) faria.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Valor monetário que pode ser zero. Devolve o código do erro de validação.
pub fn non_negative(value: Decimal) -> Result<Decimal, &'static str> {
    let value = to_cents(value);
    if value.is_sign_negative() && !value.is_zero() {
        return Err("must_not_be_negative");
    }
    if value > MAX_AMOUNT {
        return Err("value_too_large");
    }
    Ok(value)
}

/// Valor monetário estritamente positivo.
pub fn positive(value: Decimal) -> Result<Decimal, &'static str> {
    let value = non_negative(value).map_err(|code| match code {
        "must_not_be_negative" => "must_be_positive",
        other => other,
    })?;
    if value.is_zero() {
        return Err("must_be_positive");
    }
    Ok(value)
}

/// Divide `total` em `count` parcelas em centavos.
///
/// As parcelas 1..n-1 recebem o quociente truncado em centavos e a última
/// absorve a sobra, de modo que a soma é exatamente `total`.
pub fn split_in_cents(total: Decimal, count: u8) -> Vec<Decimal> {
    let count = count.max(1);
    let regular = (total / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let last = total - regular * Decimal::from(count - 1);

    let mut parts = vec![regular; usize::from(count - 1)];
    parts.push(last);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn max_amount_matches_numeric_10_2() {
        assert_eq!(MAX_AMOUNT, d("99999999.99"));
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        assert_eq!(to_cents(d("10.005")), d("10.01"));
        assert_eq!(to_cents(d("10.004")), d("10.00"));
        assert_eq!(non_negative(d("0.001")), Ok(d("0.00")));
    }

    #[test]
    fn negative_and_oversized_amounts_are_rejected() {
        assert_eq!(non_negative(d("-0.01")), Err("must_not_be_negative"));
        assert_eq!(non_negative(d("100000000")), Err("value_too_large"));
        assert_eq!(positive(d("0")), Err("must_be_positive"));
        assert_eq!(positive(d("-5")), Err("must_be_positive"));
        assert_eq!(positive(d("0.004")), Err("must_be_positive"));
        assert_eq!(positive(d("12.5")), Ok(d("12.50")));
    }

    #[test]
    fn remainder_goes_to_last_installment() {
        let parts = split_in_cents(d("100.00"), 3);
        assert_eq!(parts, vec![d("33.33"), d("33.33"), d("33.34")]);
    }

    #[test]
    fn split_always_sums_to_total() {
        for total in ["0.11", "1.06", "350.50", "999.99", "1234.57"] {
            for count in 1..=12u8 {
                let parts = split_in_cents(d(total), count);
                assert_eq!(parts.len(), usize::from(count));
                assert_eq!(parts.iter().copied().sum::<Decimal>(), d(total), "{total} / {count}");
                assert!(parts.iter().all(|p| p.scale() <= 2));
            }
        }
    }

    #[test]
    fn single_installment_is_the_total() {
        assert_eq!(split_in_cents(d("49.90"), 1), vec![d("49.90")]);
    }
}
