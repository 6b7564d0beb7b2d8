//! Price Engine
//!
//! Orchestrates fee lookup, commission resolution, forward pricing, margin
//! solving and campaign adjustment for the two standard plans.
//!
//! An engine is built once per loaded set of tables and reused across any
//! number of calculations. It holds no mutable state, so it can be shared
//! freely between threads.

use std::sync::Arc;

use rust_decimal::prelude::*;
use shared::models::{
    CampaignParameters, CampaignPricingResult, CampaignQuote, CostDivergence, ListingQuote,
    ListingRequest, MarketplaceTables, Plan, PricingInput, PricingResult, PricingTarget,
    StoreConfig, DEFAULT_VOLUMETRIC_DIVISOR,
};
use tracing::instrument;

use super::campaign::CampaignAdjuster;
use super::commission;
use super::forward::ForwardPricer;
use super::money::{to_decimal, to_f64};
use super::solver::{MarginSolver, SolverSettings};
use super::validation::{validate_campaign, validate_listing};
use crate::core::{EngineConfig, EngineResult, PricingError};

/// Entered and supplier costs closer than this are considered equal
const COST_DIVERGENCE_TOLERANCE: f64 = 0.001;

/// Listing values resolved for both plans
struct ResolvedListing {
    cost_total: f64,
    billable_weight_kg: f64,
    classico: PricingInput,
    premium: PricingInput,
}

impl ResolvedListing {
    fn input(&self, plan: Plan) -> &PricingInput {
        match plan {
            Plan::Classico => &self.classico,
            Plan::Premium => &self.premium,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceEngine {
    tables: Arc<MarketplaceTables>,
    settings: SolverSettings,
    volumetric_divisor: f64,
}

impl PriceEngine {
    pub fn new(tables: Arc<MarketplaceTables>) -> Self {
        Self {
            tables,
            settings: SolverSettings::default(),
            volumetric_divisor: DEFAULT_VOLUMETRIC_DIVISOR,
        }
    }

    /// Engine tuned by environment configuration
    ///
    /// Fails on a configuration [`EngineConfig::validate`] rejects.
    pub fn from_config(
        tables: Arc<MarketplaceTables>,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        config.validate()?;
        let settings = config.solver_settings();
        settings.validate()?;
        Ok(Self {
            tables,
            settings,
            volumetric_divisor: config.volumetric_divisor,
        })
    }

    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tables(&self) -> &MarketplaceTables {
        &self.tables
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    fn pricer(&self, plan: Plan) -> ForwardPricer<'_> {
        ForwardPricer::new(self.tables.schedule_for(plan))
    }

    /// Forward pricing for one plan
    pub fn price_to_result(&self, plan: Plan, input: &PricingInput) -> EngineResult<PricingResult> {
        self.pricer(plan).price_to_result(input)
    }

    /// Margin solving for one plan
    pub fn margin_to_price(&self, plan: Plan, input: &PricingInput) -> EngineResult<PricingResult> {
        MarginSolver::new(self.pricer(plan), self.settings).margin_to_price(input)
    }

    /// Forward or solve, depending on the input's target
    pub fn resolve(&self, plan: Plan, input: &PricingInput) -> EngineResult<PricingResult> {
        match input.target {
            PricingTarget::SalePrice(_) => self.price_to_result(plan, input),
            PricingTarget::DesiredMargin(_) => self.margin_to_price(plan, input),
        }
    }

    /// Adjust one plan's base price with campaign parameters
    pub fn campaign_price(
        &self,
        plan: Plan,
        input: &PricingInput,
        base_price: f64,
        params: &CampaignParameters,
    ) -> EngineResult<CampaignPricingResult> {
        CampaignAdjuster::new(self.pricer(plan)).adjust(input, base_price, params)
    }

    /// Resolve a listing's raw values into a per-plan input
    pub fn build_input(
        &self,
        plan: Plan,
        request: &ListingRequest,
        store: &StoreConfig,
    ) -> EngineResult<PricingInput> {
        validate_listing(request)?;
        let default_margin = self.default_margin(request)?;
        self.input_for(plan, request, store, default_margin)
    }

    fn default_margin(&self, request: &ListingRequest) -> EngineResult<Option<f64>> {
        match &request.category {
            Some(name) => {
                let category = self
                    .tables
                    .category(name)
                    .ok_or_else(|| PricingError::UnknownCategory(name.clone()))?;
                Ok(Some(category.default_margin_percent))
            }
            None => Ok(None),
        }
    }

    fn cost_total(request: &ListingRequest) -> f64 {
        to_f64(to_decimal(request.unit_cost) * Decimal::from(request.quantity))
    }

    fn input_for(
        &self,
        plan: Plan,
        request: &ListingRequest,
        store: &StoreConfig,
        default_margin: Option<f64>,
    ) -> EngineResult<PricingInput> {
        let plan_request = request.plan(plan);
        let target = plan_request
            .target
            .or(default_margin.map(PricingTarget::DesiredMargin))
            .unwrap_or(PricingTarget::SalePrice(0.0));

        Ok(PricingInput {
            cost_total: Self::cost_total(request),
            tax_percent: request
                .tax_percent
                .unwrap_or_else(|| store.tax_percent(request.fulfillment)),
            installment_percent: request.installment_percent,
            other_percent: request.other_percent,
            commission_percent: commission::resolve(
                &request.commission_rule,
                plan,
                &store.commission_rules,
            )?,
            weight_kg: request.dimensions.billable_weight_kg(self.volumetric_divisor),
            shipping_override: plan_request.shipping_override,
            target,
        })
    }

    fn resolve_listing(
        &self,
        request: &ListingRequest,
        store: &StoreConfig,
    ) -> EngineResult<ResolvedListing> {
        validate_listing(request)?;
        let default_margin = self.default_margin(request)?;
        let classico = self.input_for(Plan::Classico, request, store, default_margin)?;
        let premium = self.input_for(Plan::Premium, request, store, default_margin)?;

        Ok(ResolvedListing {
            cost_total: classico.cost_total,
            billable_weight_kg: classico.weight_kg,
            classico,
            premium,
        })
    }

    fn cost_divergence(request: &ListingRequest) -> Option<CostDivergence> {
        let supplier = request.supplier_unit_cost.filter(|s| *s > 0.0)?;
        let difference = request.unit_cost - supplier;
        if difference.abs() <= COST_DIVERGENCE_TOLERANCE {
            return None;
        }
        tracing::warn!(
            entered = request.unit_cost,
            supplier,
            "Entered unit cost differs from the supplier's registered cost"
        );
        Some(CostDivergence {
            entered: request.unit_cost,
            supplier,
            difference: to_f64(to_decimal(difference)),
        })
    }

    /// Price a listing for both standard plans
    #[instrument(skip_all, fields(rule = %request.commission_rule))]
    pub fn quote_listing(
        &self,
        request: &ListingRequest,
        store: &StoreConfig,
    ) -> EngineResult<ListingQuote> {
        let resolved = self.resolve_listing(request, store)?;
        let classico = self.resolve(Plan::Classico, &resolved.classico)?;
        let premium = self.resolve(Plan::Premium, &resolved.premium)?;

        tracing::debug!(
            classico = classico.sale_price,
            premium = premium.sale_price,
            "Listing quoted"
        );

        Ok(ListingQuote {
            cost_total: resolved.cost_total,
            billable_weight_kg: resolved.billable_weight_kg,
            classico,
            premium,
            cost_divergence: Self::cost_divergence(request),
        })
    }

    /// Quote a listing, then apply the same campaign to both plans' prices
    ///
    /// A plan whose base margin is infeasible stays unpriced: no floor or
    /// discount turns it into a positive campaign price.
    #[instrument(skip_all, fields(rule = %request.commission_rule))]
    pub fn quote_campaign(
        &self,
        request: &ListingRequest,
        store: &StoreConfig,
        params: &CampaignParameters,
    ) -> EngineResult<CampaignQuote> {
        let resolved = self.resolve_listing(request, store)?;

        let adjust = |plan: Plan| -> EngineResult<CampaignPricingResult> {
            let input = resolved.input(plan);
            let base = self.resolve(plan, input)?;
            let adjuster = CampaignAdjuster::new(self.pricer(plan));
            if base.is_infeasible() {
                validate_campaign(params)?;
                tracing::warn!(%plan, "Base margin is infeasible, campaign left unpriced");
                return Ok(adjuster.unpriced(input, base.sale_price));
            }
            adjuster.adjust(input, base.sale_price, params)
        };

        Ok(CampaignQuote {
            classico: adjust(Plan::Classico)?,
            premium: adjust(Plan::Premium)?,
        })
    }
}
