//! Input validation
//!
//! Runs before any computation. Every failure names the offending field.
//! Amounts, rates and measures are capped so that no accepted input can push
//! decimal arithmetic past its range.

use shared::models::{
    AdjustmentType, CampaignAdjustment, CampaignParameters, Incentive, ListingRequest,
    PricingInput, PricingTarget, ProductDimensions,
};

use crate::core::{EngineResult, PricingError};

/// Upper bound on any quantity a listing may carry
pub const MAX_QUANTITY: i32 = 1_000_000;
/// Upper bound on any money amount: costs, prices, overrides, incentives
pub const MAX_AMOUNT: f64 = 1_000_000.0;
/// Upper bound on the magnitude of any rate or margin, in percent
pub const MAX_PERCENT: f64 = 1_000.0;
/// Upper bound on a weight in kg or a side in cm
pub const MAX_MEASURE: f64 = 1_000_000.0;

fn require_finite(value: f64, field: &str) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(PricingError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Ok(())
}

fn require_non_negative(value: f64, field: &str) -> EngineResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(PricingError::invalid_input(
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

fn require_at_most(value: f64, max: f64, field: &str) -> EngineResult<()> {
    if value.abs() > max {
        return Err(PricingError::invalid_input(
            field,
            format!("exceeds maximum allowed ({}), got {}", max, value),
        ));
    }
    Ok(())
}

/// Finite, non-negative and at most [`MAX_AMOUNT`]
pub(crate) fn require_amount(value: f64, field: &str) -> EngineResult<()> {
    require_non_negative(value, field)?;
    require_at_most(value, MAX_AMOUNT, field)
}

fn require_percent(value: f64, field: &str) -> EngineResult<()> {
    require_non_negative(value, field)?;
    require_at_most(value, MAX_PERCENT, field)
}

fn require_measure(value: f64, field: &str) -> EngineResult<()> {
    require_non_negative(value, field)?;
    require_at_most(value, MAX_MEASURE, field)
}

fn validate_target(target: &PricingTarget) -> EngineResult<()> {
    match *target {
        // Margins may be negative (pricing below cost on purpose)
        PricingTarget::DesiredMargin(m) => {
            require_finite(m, "desired_margin_percent")?;
            require_at_most(m, MAX_PERCENT, "desired_margin_percent")
        }
        PricingTarget::SalePrice(p) if p < 0.0 => Err(PricingError::NegativeSalePrice(p)),
        PricingTarget::SalePrice(p) => require_amount(p, "sale_price"),
    }
}

fn validate_dimensions(dims: &ProductDimensions) -> EngineResult<()> {
    require_measure(dims.real_weight_kg, "real_weight_kg")?;
    require_measure(dims.height_cm, "height_cm")?;
    require_measure(dims.width_cm, "width_cm")?;
    require_measure(dims.length_cm, "length_cm")
}

/// Validate a fully resolved per-plan input
pub fn validate_input(input: &PricingInput) -> EngineResult<()> {
    require_amount(input.cost_total, "cost_total")?;
    require_percent(input.tax_percent, "tax_percent")?;
    require_percent(input.installment_percent, "installment_percent")?;
    require_percent(input.other_percent, "other_percent")?;
    require_percent(input.commission_percent, "commission_percent")?;
    require_measure(input.weight_kg, "weight_kg")?;
    if let Some(shipping) = input.shipping_override {
        require_amount(shipping, "shipping_override")?;
    }
    validate_target(&input.target)
}

/// Validate the raw listing values before they are resolved per plan
pub fn validate_listing(request: &ListingRequest) -> EngineResult<()> {
    require_amount(request.unit_cost, "unit_cost")?;

    if request.quantity <= 0 {
        return Err(PricingError::invalid_input(
            "quantity",
            format!("must be positive, got {}", request.quantity),
        ));
    }
    if request.quantity > MAX_QUANTITY {
        return Err(PricingError::invalid_input(
            "quantity",
            format!(
                "exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, request.quantity
            ),
        ));
    }
    let cost_total = request.unit_cost * f64::from(request.quantity);
    if cost_total > MAX_AMOUNT {
        return Err(PricingError::invalid_input(
            "cost_total",
            format!(
                "unit_cost × quantity exceeds maximum allowed ({}), got {}",
                MAX_AMOUNT, cost_total
            ),
        ));
    }

    if let Some(tax) = request.tax_percent {
        require_percent(tax, "tax_percent")?;
    }
    require_percent(request.installment_percent, "installment_percent")?;
    require_percent(request.other_percent, "other_percent")?;
    validate_dimensions(&request.dimensions)?;

    if let Some(supplier) = request.supplier_unit_cost {
        require_finite(supplier, "supplier_unit_cost")?;
        require_at_most(supplier, MAX_AMOUNT, "supplier_unit_cost")?;
    }

    for plan in [&request.classico, &request.premium] {
        if let Some(target) = &plan.target {
            validate_target(target)?;
        }
        if let Some(shipping) = plan.shipping_override {
            require_amount(shipping, "shipping_override")?;
        }
    }
    Ok(())
}

fn campaign_value(value: f64, max: f64, what: &str) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::InvalidCampaign(format!(
            "{} must be a non-negative number, got {}",
            what, value
        )));
    }
    if value > max {
        return Err(PricingError::InvalidCampaign(format!(
            "{} exceeds maximum allowed ({}), got {}",
            what, max, value
        )));
    }
    Ok(())
}

/// Non-positive bounds count as absent, so only the top end is checked
fn campaign_bound(bound: Option<f64>, what: &str) -> EngineResult<()> {
    match bound {
        Some(b) if !b.is_finite() || b > MAX_AMOUNT => Err(PricingError::InvalidCampaign(format!(
            "{} must be a number no greater than {}, got {}",
            what, MAX_AMOUNT, b
        ))),
        _ => Ok(()),
    }
}

fn validate_incentive(incentive: &Incentive, what: &str) -> EngineResult<()> {
    match incentive.kind {
        AdjustmentType::Percentage => campaign_value(incentive.value, 100.0, what),
        AdjustmentType::FixedAmount => campaign_value(incentive.value, MAX_AMOUNT, what),
    }
}

/// Validate campaign parameters
///
/// Floor and ceiling may be zero or negative (treated as absent) but not
/// above [`MAX_AMOUNT`].
pub fn validate_campaign(params: &CampaignParameters) -> EngineResult<()> {
    match &params.adjustment {
        CampaignAdjustment::Delta {
            delta_percent,
            floor_price,
            ceiling_price,
        } => {
            if !delta_percent.is_finite() || delta_percent.abs() > MAX_PERCENT {
                return Err(PricingError::InvalidCampaign(format!(
                    "delta_percent must be a number within ±{}, got {}",
                    MAX_PERCENT, delta_percent
                )));
            }
            campaign_bound(*floor_price, "floor_price")?;
            campaign_bound(*ceiling_price, "ceiling_price")?;
        }
        CampaignAdjustment::Discount {
            discount_type,
            discount_value,
        } => {
            let max = match discount_type {
                AdjustmentType::Percentage => MAX_PERCENT,
                AdjustmentType::FixedAmount => MAX_AMOUNT,
            };
            campaign_value(*discount_value, max, "discount_value")?;
        }
    }

    if let Some(coupon) = &params.coupon {
        validate_incentive(coupon, "coupon")?;
    }
    if let Some(cashback) = &params.cashback {
        validate_incentive(cashback, "cashback")?;
    }

    if let Some(window) = &params.window
        && window.ends_at <= window.starts_at
    {
        return Err(PricingError::InvalidCampaignWindow(format!(
            "campaign must end after it starts ({} .. {})",
            window.starts_at, window.ends_at
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{CampaignWindow, PlanRequest};

    fn input() -> PricingInput {
        PricingInput {
            cost_total: 50.0,
            tax_percent: 6.0,
            installment_percent: 0.0,
            other_percent: 0.0,
            commission_percent: 12.0,
            weight_kg: 0.3,
            shipping_override: None,
            target: PricingTarget::SalePrice(100.0),
        }
    }

    fn listing() -> ListingRequest {
        ListingRequest {
            unit_cost: 25.0,
            quantity: 2,
            tax_percent: None,
            fulfillment: false,
            installment_percent: 0.0,
            other_percent: 0.0,
            commission_rule: "padrao".into(),
            dimensions: ProductDimensions::weight_only(0.3),
            category: None,
            supplier_unit_cost: None,
            classico: PlanRequest::margin(20.0),
            premium: PlanRequest::price(120.0),
        }
    }

    fn field_of(err: PricingError) -> String {
        match err {
            PricingError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_input(&input()).is_ok());
        assert!(validate_listing(&listing()).is_ok());
    }

    #[test]
    fn test_negative_sale_price_rejected() {
        let bad = input().at_price(-1.0);
        assert_eq!(validate_input(&bad), Err(PricingError::NegativeSalePrice(-1.0)));
    }

    #[test]
    fn test_amounts_capped() {
        assert!(validate_input(&input().at_price(MAX_AMOUNT)).is_ok());
        let bad = input().at_price(MAX_AMOUNT + 0.01);
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "sale_price");

        // Large enough to overflow decimal arithmetic if accepted
        let bad = input().at_price(1e28);
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "sale_price");

        let mut bad = input();
        bad.cost_total = 1e26;
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "cost_total");

        let mut bad = input();
        bad.shipping_override = Some(MAX_AMOUNT + 1.0);
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "shipping_override");
    }

    #[test]
    fn test_rates_and_margin_capped() {
        let mut bad = input();
        bad.commission_percent = MAX_PERCENT + 0.1;
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "commission_percent");

        let mut edge = input();
        edge.target = PricingTarget::DesiredMargin(-MAX_PERCENT);
        assert!(validate_input(&edge).is_ok());

        edge.target = PricingTarget::DesiredMargin(-MAX_PERCENT - 0.1);
        assert_eq!(
            field_of(validate_input(&edge).unwrap_err()),
            "desired_margin_percent"
        );

        let mut bad = input();
        bad.weight_kg = MAX_MEASURE + 1.0;
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "weight_kg");
    }

    #[test]
    fn test_listing_amounts_capped() {
        let mut bad = listing();
        bad.unit_cost = MAX_AMOUNT + 0.01;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "unit_cost");

        // Each unit is in range, the total is not
        let mut bad = listing();
        bad.unit_cost = 600_000.0;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "cost_total");

        let mut bad = listing();
        bad.supplier_unit_cost = Some(-MAX_AMOUNT - 1.0);
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "supplier_unit_cost");

        let mut bad = listing();
        bad.other_percent = MAX_PERCENT + 1.0;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "other_percent");

        let mut bad = listing();
        bad.dimensions.length_cm = MAX_MEASURE + 1.0;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "length_cm");
    }

    #[test]
    fn test_negative_margin_allowed() {
        let mut below_cost = input();
        below_cost.target = PricingTarget::DesiredMargin(-10.0);
        assert!(validate_input(&below_cost).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut bad = input();
        bad.tax_percent = f64::NAN;
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "tax_percent");

        let mut bad = input();
        bad.cost_total = f64::INFINITY;
        assert_eq!(field_of(validate_input(&bad).unwrap_err()), "cost_total");
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut bad = listing();
        bad.quantity = 0;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "quantity");
    }

    #[test]
    fn test_negative_unit_cost_rejected() {
        let mut bad = listing();
        bad.unit_cost = -0.01;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "unit_cost");
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut bad = listing();
        bad.dimensions.height_cm = -3.0;
        assert_eq!(field_of(validate_listing(&bad).unwrap_err()), "height_cm");
    }

    #[test]
    fn test_campaign_negative_coupon_rejected() {
        let params = CampaignParameters::delta(-10.0).with_coupon(AdjustmentType::FixedAmount, -5.0);
        assert!(matches!(
            validate_campaign(&params),
            Err(PricingError::InvalidCampaign(_))
        ));
    }

    #[test]
    fn test_campaign_window_must_end_after_start() {
        let day = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        let start = day.and_hms_opt(0, 0, 0).unwrap();
        let window = CampaignWindow {
            starts_at: start,
            ends_at: start,
        };
        let params = CampaignParameters::delta(-10.0).with_window(window);
        assert!(matches!(
            validate_campaign(&params),
            Err(PricingError::InvalidCampaignWindow(_))
        ));

        let ok = CampaignParameters::delta(-10.0).with_window(CampaignWindow {
            starts_at: start,
            ends_at: day.and_hms_opt(23, 59, 59).unwrap(),
        });
        assert!(validate_campaign(&ok).is_ok());
    }

    #[test]
    fn test_campaign_values_capped() {
        let rejected = |params: CampaignParameters| {
            matches!(validate_campaign(&params), Err(PricingError::InvalidCampaign(_)))
        };

        let with_bounds = |floor: Option<f64>, ceiling: Option<f64>| CampaignParameters {
            adjustment: CampaignAdjustment::Delta {
                delta_percent: -10.0,
                floor_price: floor,
                ceiling_price: ceiling,
            },
            ..CampaignParameters::delta(-10.0)
        };
        assert!(validate_campaign(&with_bounds(Some(-5.0), Some(MAX_AMOUNT))).is_ok());
        assert!(rejected(with_bounds(Some(MAX_AMOUNT + 0.01), None)));
        assert!(rejected(with_bounds(None, Some(1e30))));
        assert!(rejected(with_bounds(Some(f64::INFINITY), None)));

        assert!(rejected(CampaignParameters::delta(MAX_PERCENT + 1.0)));
        assert!(rejected(CampaignParameters::discount(
            AdjustmentType::FixedAmount,
            MAX_AMOUNT + 0.01
        )));
        assert!(rejected(CampaignParameters::discount(
            AdjustmentType::Percentage,
            MAX_PERCENT + 1.0
        )));
        assert!(rejected(
            CampaignParameters::delta(0.0).with_cashback(AdjustmentType::FixedAmount, MAX_AMOUNT + 1.0)
        ));
        assert!(rejected(
            CampaignParameters::delta(0.0).with_coupon(AdjustmentType::Percentage, 100.5)
        ));
    }
}
