pub mod auth;
pub mod categories;
pub mod finance;
pub mod orders;
pub mod people;
pub mod products;
pub mod roles;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Uma alteração parcial aplicada sobre o registro atual.
/// Campos ausentes no payload mantêm o valor gravado.
pub trait Patch<T> {
    fn apply_to(self, current: T) -> T;
}

/// Texto em branco conta como ausente (o front-end envia "" para "não mudou").
pub(crate) fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Distingue "campo ausente" (`None`) de "campo enviado como null" (`Some(None)`).
/// Use junto com `#[serde(default)]`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Maior valor que cabe nas colunas NUMERIC(12, 2).
pub(crate) fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Arredonda para centavos como o NUMERIC do Postgres (meio para longe do zero).
/// `None` quando o valor não cabe na coluna.
pub(crate) fn to_cents(value: Decimal) -> Option<Decimal> {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (rounded.abs() <= max_amount()).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(335, 3), Decimal::new(34, 2))]
    #[case(Decimal::new(-335, 3), Decimal::new(-34, 2))]
    #[case(Decimal::new(1004, 3), Decimal::new(100, 2))]
    #[case(Decimal::new(950, 2), Decimal::new(950, 2))]
    fn rounds_to_cents(#[case] raw: Decimal, #[case] expected: Decimal) {
        assert_eq!(to_cents(raw), Some(expected));
    }

    #[test]
    fn rejects_what_the_column_cannot_hold() {
        assert_eq!(to_cents(max_amount()), Some(max_amount()));
        assert_eq!(to_cents(Decimal::new(10_000_000_000, 0)), None);
        assert_eq!(to_cents(Decimal::from_scientific("1e25").unwrap()), None);
    }
}
