//! Property tests over the slab tax calculator and the engine.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use tax_core::calculations::calculate_slab_tax;
use tax_core::{AgeGroup, Regime, SlabSchedule, TaxEngine, TaxpayerProfile};

fn table_for(
    age_index: usize,
    regime_index: usize,
) -> tax_core::SlabTable {
    SlabSchedule::default()
        .table(AgeGroup::ALL[age_index], Regime::ALL[regime_index])
        .clone()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn prop_slab_tax_is_monotonic(
        a in 0u64..50_000_000,
        b in 0u64..50_000_000,
        age_index in 0usize..3,
        regime_index in 0usize..2
    ) {
        let table = table_for(age_index, regime_index);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = calculate_slab_tax(Decimal::from(low), &table).total_tax;
        let high_tax = calculate_slab_tax(Decimal::from(high), &table).total_tax;

        prop_assert!(low_tax <= high_tax);
    }

    #[test]
    fn prop_one_more_rupee_costs_at_most_the_top_rate(
        income in 0u64..50_000_000,
        age_index in 0usize..3,
        regime_index in 0usize..2
    ) {
        let table = table_for(age_index, regime_index);
        let top_rate = table
            .slabs()
            .iter()
            .map(|s| s.rate_percent)
            .max()
            .unwrap_or_default();

        let here = calculate_slab_tax(Decimal::from(income), &table).total_tax;
        let next = calculate_slab_tax(Decimal::from(income + 1), &table).total_tax;

        prop_assert!(next - here <= top_rate / Decimal::ONE_HUNDRED);
    }

    #[test]
    fn prop_breakdown_sums_to_total(
        income in 0u64..50_000_000,
        age_index in 0usize..3,
        regime_index in 0usize..2
    ) {
        let table = table_for(age_index, regime_index);

        let outcome = calculate_slab_tax(Decimal::from(income), &table);
        let taxed: Decimal = outcome.breakdown.iter().map(|b| b.taxable_amount).sum();
        let tax: Decimal = outcome.breakdown.iter().map(|b| b.tax).sum();

        prop_assert_eq!(taxed, Decimal::from(income));
        prop_assert_eq!(tax, outcome.total_tax);
        prop_assert!(outcome.breakdown.iter().all(|b| b.taxable_amount > Decimal::ZERO));
    }

    #[test]
    fn prop_compute_tax_is_idempotent_and_non_negative(
        salary in 0u64..20_000_000,
        section_80c in 0u64..400_000,
        age_index in 0usize..3,
        regime_index in 0usize..2
    ) {
        let engine = TaxEngine::default();
        let mut profile = TaxpayerProfile::new(
            Decimal::from(salary),
            AgeGroup::ALL[age_index],
            Regime::ALL[regime_index],
        );
        profile.deductions.section_80c = Decimal::from(section_80c);

        let first = engine.compute_tax(&profile).unwrap();
        let second = engine.compute_tax(&profile).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(first.taxable_income >= Decimal::ZERO);
        prop_assert!(first.final_tax >= Decimal::ZERO);
        prop_assert!(first.final_tax <= first.gross_salary);
    }
}

#[test]
fn tax_at_each_upper_bound_equals_sum_of_full_brackets() {
    let schedule = SlabSchedule::default();

    for regime in Regime::ALL {
        for age_group in AgeGroup::ALL {
            let table = schedule.table(age_group, regime);
            let mut running = Decimal::ZERO;

            for slab in table.slabs() {
                let Some(upper) = slab.max_income else {
                    continue;
                };
                running += (upper - slab.min_income) * slab.rate_percent / Decimal::ONE_HUNDRED;

                assert_eq!(calculate_slab_tax(upper, table).total_tax, running);
            }
        }
    }
}
