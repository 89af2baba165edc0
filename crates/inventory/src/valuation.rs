//! Inventory valuation.
//!
//! Value of a record = quantity × unit price, in exact decimal arithmetic.
//! A record contributes nothing when:
//! - it has no product,
//! - its quantity is absent or not positive,
//! - its product has no price (logged as a warning).
//!
//! A line or running total beyond `Decimal::MAX` is an `Internal` error.

use rust_decimal::Decimal;

use stockroom_core::{DomainError, DomainResult};

use crate::record::Inventory;

/// Totals produced by a valuation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValuationSummary {
    /// Records seen.
    pub records: usize,
    /// Records that contributed to `total_value`.
    pub valued: usize,
    /// Records skipped by one of the rules above.
    pub skipped: usize,
    pub total_value: Decimal,
}

/// Contribution of a single record, or `None` when it is skipped.
pub fn line_value(record: &Inventory) -> DomainResult<Option<Decimal>> {
    let Some(product) = record.product.as_ref() else {
        return Ok(None);
    };
    let Some(quantity) = record.quantity.filter(|q| *q > 0) else {
        return Ok(None);
    };

    let Some(price) = product.price else {
        tracing::warn!(
            product_id = %product.id,
            product = %product.name,
            "product has no price; skipping it in inventory valuation"
        );
        return Ok(None);
    };

    price
        .checked_mul(Decimal::from(quantity))
        .map(Some)
        .ok_or_else(|| {
            DomainError::internal(format!(
                "inventory value overflow: {quantity} x {price} for product {}",
                product.id
            ))
        })
}

/// Value the given records.
pub fn summarize<'a, I>(records: I) -> DomainResult<ValuationSummary>
where
    I: IntoIterator<Item = &'a Inventory>,
{
    records
        .into_iter()
        .try_fold(ValuationSummary::default(), |mut acc, record| {
            acc.records += 1;
            match line_value(record)? {
                Some(value) => {
                    acc.valued += 1;
                    acc.total_value = acc.total_value.checked_add(value).ok_or_else(|| {
                        DomainError::internal(format!(
                            "inventory value overflow after {} records",
                            acc.records
                        ))
                    })?;
                }
                None => acc.skipped += 1,
            }
            Ok(acc)
        })
}

/// Total monetary value of the given records. Empty input yields zero.
pub fn total_value<'a, I>(records: I) -> DomainResult<Decimal>
where
    I: IntoIterator<Item = &'a Inventory>,
{
    summarize(records).map(|summary| summary.total_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::{DomainError, InventoryId, ProductId};
    use stockroom_products::Product;

    fn product(id: i64, price: Option<Decimal>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price,
            category: None,
            created_at: Utc::now(),
        }
    }

    fn record(id: i64, quantity: Option<i32>, price: Option<Decimal>) -> Inventory {
        Inventory {
            id: InventoryId::new(id),
            product: Some(product(id, price)),
            quantity,
            min_stock: Some(1),
            updated_at: Utc::now(),
        }
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn sums_quantity_times_price_skipping_empty_stock() {
        let records = vec![
            record(1, Some(10), Some(dec(100))),
            record(2, Some(5), Some(dec(200))),
            record(3, Some(0), Some(dec(50))),
        ];

        assert_eq!(total_value(&records).unwrap(), dec(2000));
    }

    #[test]
    fn skips_products_without_price() {
        let records = vec![record(1, Some(10), Some(dec(100))), record(2, Some(5), None)];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total_value, dec(1000));
        assert_eq!(summary.valued, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn skips_records_without_product() {
        let mut orphan = record(1, Some(10), Some(dec(100)));
        orphan.product = None;
        let records = vec![orphan, record(2, Some(5), Some(dec(200)))];

        assert_eq!(total_value(&records).unwrap(), dec(1000));
    }

    #[test]
    fn skips_absent_and_negative_quantities() {
        let records = vec![
            record(1, None, Some(dec(100))),
            record(2, Some(-3), Some(dec(100))),
            record(3, Some(5), Some(dec(200))),
        ];

        assert_eq!(total_value(&records).unwrap(), dec(1000));
    }

    #[test]
    fn empty_input_is_exactly_zero() {
        let summary = summarize(&Vec::<Inventory>::new()).unwrap();
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.records, 0);
    }

    #[test]
    fn keeps_exact_decimal_cents() {
        // 3 × 0.10 would drift in binary floating point.
        let records = vec![record(1, Some(3), Some(Decimal::new(10, 2)))];
        assert_eq!(total_value(&records).unwrap(), Decimal::new(30, 2));
    }

    #[test]
    fn line_past_decimal_max_is_an_error() {
        let price = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        let records = vec![record(1, Some(1_000_000_000), Some(price))];

        let err = total_value(&records).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn running_total_past_decimal_max_is_an_error() {
        let half = Decimal::MAX / Decimal::TWO;
        let records = vec![
            record(1, Some(1), Some(half)),
            record(2, Some(1), Some(half)),
            record(3, Some(1), Some(half)),
        ];

        let err = summarize(&records).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_record() -> impl Strategy<Value = Inventory> {
            (
                1i64..10_000,
                any::<bool>(),
                proptest::option::of(-50i32..10_000),
                proptest::option::of(0i64..10_000_000),
            )
                .prop_map(|(id, has_product, quantity, cents)| {
                    let mut r = record(id, quantity, cents.map(|c| Decimal::new(c, 2)));
                    if !has_product {
                        r.product = None;
                    }
                    r
                })
        }

        proptest! {
            /// Property: the total is the exact sum over eligible records only.
            #[test]
            fn total_is_sum_over_eligible_records(records in proptest::collection::vec(arb_record(), 0..40)) {
                let expected: Decimal = records
                    .iter()
                    .filter_map(|r| {
                        let price = r.product.as_ref()?.price?;
                        let q = r.quantity?;
                        (q > 0).then(|| price * Decimal::from(q))
                    })
                    .sum();

                prop_assert_eq!(total_value(&records).unwrap(), expected);
            }

            /// Property: valuation does not depend on record order.
            #[test]
            fn total_is_order_independent(
                records in proptest::collection::vec(arb_record(), 0..40).prop_shuffle()
            ) {
                let mut reversed = records.clone();
                reversed.reverse();
                let mut sorted = records.clone();
                sorted.sort_by_key(|r| r.id);

                let total = total_value(&records).unwrap();
                prop_assert_eq!(total, total_value(&reversed).unwrap());
                prop_assert_eq!(total, total_value(&sorted).unwrap());
            }

            /// Property: the total is never negative and counts always add up.
            #[test]
            fn summary_counts_are_consistent(records in proptest::collection::vec(arb_record(), 0..40)) {
                let summary = summarize(&records).unwrap();
                prop_assert!(summary.total_value >= Decimal::ZERO);
                prop_assert_eq!(summary.records, records.len());
                prop_assert_eq!(summary.valued + summary.skipped, summary.records);
            }
        }
    }
}
