use fin_domain::{default_allocation, format_inr, round2, AssetClass, DomainError, ProjectedReturns,
                 RiskTier, SavingsSplit};

#[test]
fn test_medium_profile_end_to_end_amounts() -> Result<(), DomainError> {
    let split = SavingsSplit::from_monthly(100_000.0, 60_000.0)?;
    let (allocation, description) = default_allocation(RiskTier::Medium);
    let normalized = allocation.normalized();

    let amounts: Vec<(AssetClass, f64)> =
        normalized.entries()
                  .iter()
                  .filter(|(_, ratio)| *ratio > 0.0)
                  .map(|(class, ratio)| (*class, round2(ratio * split.monthly_investment())))
                  .collect();

    assert_eq!(amounts, vec![(AssetClass::Equity, 22_800.0),
                             (AssetClass::FixedIncome, 11_400.0),
                             (AssetClass::Cash, 3_800.0)]);
    assert_eq!(description, "Balanced portfolio with moderate growth potential");

    let projected = ProjectedReturns::over(&amounts, split.monthly_investment())?;
    assert_eq!(projected.total(), 3_078.0);
    assert_eq!(format_inr(projected.total()), "₹3,078.00");
    Ok(())
}

#[test]
fn test_split_partition_property_over_many_inputs() {
    // emergency_fund + monthly_investment debe reconstruir el disponible
    // dentro de la tolerancia de redondeo para cualquier par válido.
    let cases = [(100_000.0, 60_000.0),
                 (85_500.5, 12_333.25),
                 (5_000.0, 4_999.0),
                 (77_777.77, 33_333.33)];
    for (income, expenses) in cases {
        let split = SavingsSplit::from_monthly(income, expenses)
            .unwrap_or_else(|e| panic!("split({income}, {expenses}): {e}"));
        let rebuilt = split.emergency_fund() + split.monthly_investment();
        assert!((rebuilt - split.disposable()).abs() < 0.011,
                "partición no cierra para ({income}, {expenses})");
        assert!((split.emergency_fund() - round2(split.disposable() * 0.05)).abs() < 0.011);
    }
}

#[test]
fn test_every_tier_has_a_normalized_table() {
    for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
        let (allocation, _) = default_allocation(tier);
        let normalized = allocation.normalized();
        assert!((normalized.sum() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_unknown_risk_input_is_not_a_tier() {
    assert_eq!(RiskTier::from_input("extreme"), None);
    assert_eq!(RiskTier::from_input(""), None);
    assert_eq!(RiskTier::from_input("HIGH"), Some(RiskTier::High));
}
