//! Core quotation calculation functions.
//!
//! Pure functions for the financial math - no database access, no caching.
//! Everything the calculation needs (validated input, global parameters,
//! employee-type daily costs) is passed in by the caller.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::settings::GlobalParameters;
use crate::models::QuotationSummary;
use crate::quoting::models::{ChargedTo, CostBasis, PaymentChannel, Platform, QuotationInput};
use crate::quoting::responses::{
    CustomCostLine, OperationalCostBreakdown, PaymentFeeBreakdown, QuotationBreakdown,
};

/// Average days per month, used to pro-rate monthly fixed costs over a
/// report date range.
const AVERAGE_DAYS_PER_MONTH: Decimal = dec!(30.44);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use eventquote_api::quoting::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Percentage of a value, zero-guarded against a zero base.
///
/// `(part / whole) × 100`, or 0 when `whole` is not positive, so a
/// revenue-less quotation reports 0% profitability instead of NaN.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        round_money(part / whole * Decimal::ONE_HUNDRED, 2)
    } else {
        Decimal::ZERO
    }
}

fn percent(value: Decimal, percentage: Decimal) -> Decimal {
    value * percentage / Decimal::ONE_HUNDRED
}

/// Compute the full financial breakdown of a quotation.
///
/// Deterministic and side-effect free. Employee allocations referencing a
/// type missing from `employee_costs` contribute zero (the type may have
/// been deleted after a draft was started); the caller decides whether to
/// log them. Fails with a domain error when the sectors carry no positive
/// ticket volume or sale value.
pub fn compute_quotation(
    input: &QuotationInput,
    params: &GlobalParameters,
    employee_costs: &HashMap<Uuid, Decimal>,
) -> Result<QuotationBreakdown> {
    let is_palco4 = input.platform.name == Platform::Palco4;

    // 1. Ticket aggregation over every sector variation.
    let mut total_value = Decimal::ZERO;
    let mut ticket_quantity: i64 = 0;
    for sector in &input.ticket_sectors {
        for variation in &sector.variations {
            total_value += variation.price * Decimal::from(variation.quantity);
            ticket_quantity += variation.quantity;
        }
    }
    if total_value <= Decimal::ZERO || ticket_quantity <= 0 {
        return Err(AppError::Domain(
            "no valid ticket quantity or price defined".to_string(),
        ));
    }

    // 2. Platform fee: flat per ticket under PALCO4, percentage otherwise.
    let platform_fee = if is_palco4 {
        Decimal::from(ticket_quantity) * params.palco4_fee_per_ticket
    } else {
        let fee_percentage = input
            .platform
            .percentage
            .unwrap_or(params.platform_fee_percentage);
        percent(total_value, fee_percentage)
    };
    let palco4_cost = if is_palco4 { platform_fee } else { Decimal::ZERO };

    // 3. Revenue fees. These two are the company's own take.
    let ticketing_fee = percent(total_value, input.service_charge);
    let additional_services = percent(total_value, input.additional_services_percentage);
    let total_revenue = ticketing_fee + additional_services;

    // 4. Payment fees. Only fees charged to US enter our cost total.
    let mut payment_fees = PaymentFeeBreakdown::default();
    for method in &input.payment_methods {
        let fee = percent(total_value, method.percentage);
        match method.channel {
            PaymentChannel::Credit => payment_fees.credit = fee,
            PaymentChannel::Debit => payment_fees.debit = fee,
            PaymentChannel::Cash => payment_fees.cash = fee,
        }
        if method.charged_to == ChargedTo::Us {
            payment_fees.total += fee;
        }
    }

    // 5. Line cost, subsumed by the flat per-ticket fee under PALCO4.
    let line_cost = if is_palco4 {
        Decimal::ZERO
    } else {
        percent(total_value, params.line_cost_percentage)
    };

    // 6. Employee costs. Unknown types contribute zero.
    let mut employee_total = Decimal::ZERO;
    for allocation in &input.employees {
        if let Some(cost_per_day) = employee_costs.get(&allocation.employee_type_id) {
            employee_total +=
                *cost_per_day * Decimal::from(allocation.quantity) * Decimal::from(allocation.days);
        }
    }

    // 7. Mobility: fuel derived from distance, plus tolls.
    let fuel_cost = if params.km_per_liter > Decimal::ZERO {
        input.mobility.kilometers * (params.fuel_cost_per_liter / params.km_per_liter)
    } else {
        Decimal::ZERO
    };
    let mobility_total =
        fuel_cost + Decimal::from(input.mobility.number_of_tolls) * input.mobility.toll_cost;

    // 8. Custom operational costs, each per its own basis.
    let mut custom_lines = Vec::with_capacity(input.custom_costs.len());
    let mut custom_total = Decimal::ZERO;
    for cost in &input.custom_costs {
        let amount = match cost.basis {
            CostBasis::Fixed => cost.amount,
            CostBasis::PercentOfSales => percent(total_value, cost.amount),
            CostBasis::PerDay => cost.amount * Decimal::from(cost.days.unwrap_or(1)),
            CostBasis::PerDayPerPerson => {
                cost.amount
                    * Decimal::from(cost.days.unwrap_or(1))
                    * Decimal::from(cost.people.unwrap_or(1))
            }
            CostBasis::PerTicketSystem => cost.amount * Decimal::from(ticket_quantity),
            CostBasis::PerTicketSector => {
                // An unknown sector name contributes zero, like a deleted
                // employee type.
                let sector_quantity: i64 = input
                    .ticket_sectors
                    .iter()
                    .filter(|s| Some(&s.name) == cost.sector.as_ref())
                    .flat_map(|s| s.variations.iter())
                    .map(|v| v.quantity)
                    .sum();
                cost.amount * Decimal::from(sector_quantity)
            }
        };
        custom_total += amount;
        custom_lines.push(CustomCostLine {
            name: cost.name.clone(),
            amount,
        });
    }

    // 9. Operational total. The per-ticket ticketing cost is waived under
    // PALCO4.
    let ticketing_cost = if is_palco4 {
        Decimal::ZERO
    } else {
        Decimal::from(ticket_quantity) * params.ticketing_cost_per_ticket
    };
    let operational_total =
        params.credentials_cost + ticketing_cost + employee_total + mobility_total + custom_total;

    // 10. Aggregate totals.
    let total_costs = platform_fee + line_cost + operational_total + payment_fees.total;
    let gross_margin = total_revenue - total_costs;
    let gross_profitability = percentage_of(gross_margin, total_revenue);

    Ok(QuotationBreakdown {
        ticket_quantity,
        total_value,
        platform_fee,
        ticketing_fee,
        additional_services,
        payment_fees,
        palco4_cost,
        line_cost,
        operational_costs: OperationalCostBreakdown {
            credentials: params.credentials_cost,
            ticketing: ticketing_cost,
            employees: employee_total,
            mobility: mobility_total,
            custom: custom_lines,
            total: operational_total,
        },
        total_revenue,
        total_costs,
        gross_margin,
        gross_profitability,
    })
}

/// A quotation inside a profitability report, annotated with its own
/// profitability figure for drill-down.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportLine {
    #[serde(flatten)]
    pub quotation: QuotationSummary,
    #[serde(with = "rust_decimal::serde::str")]
    pub profitability: Decimal,
}

/// Aggregate profitability over a set of quotations and a date range.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfitabilityReport {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub days_in_range: i64,
    pub quotation_count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_costs: Decimal,
    /// Pro-rated share of monthly fixed costs for the range.
    #[serde(with = "rust_decimal::serde::str")]
    pub fixed_costs: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profitability: Decimal,
    pub quotations: Vec<ReportLine>,
}

/// Sum quotation figures over a date range into a profitability report.
///
/// The range is inclusive on both ends; fixed costs are pro-rated by
/// `days / 30.44`. Uses the same zero-guarded percentage as the
/// per-quotation calculation.
pub fn summarize_report(
    quotations: Vec<QuotationSummary>,
    date_from: NaiveDate,
    date_to: NaiveDate,
    monthly_fixed_costs: Decimal,
) -> ProfitabilityReport {
    let days_in_range = (date_to - date_from).num_days() + 1;
    let fixed_costs =
        monthly_fixed_costs * Decimal::from(days_in_range) / AVERAGE_DAYS_PER_MONTH;

    let mut total_revenue = Decimal::ZERO;
    let mut total_costs = Decimal::ZERO;
    let mut lines = Vec::with_capacity(quotations.len());
    for quotation in quotations {
        total_revenue += quotation.total_revenue;
        total_costs += quotation.total_costs;
        let profitability = percentage_of(quotation.gross_margin, quotation.total_revenue);
        lines.push(ReportLine {
            quotation,
            profitability,
        });
    }

    let profit = total_revenue - (total_costs + fixed_costs);
    let profitability = percentage_of(profit, total_revenue);

    ProfitabilityReport {
        date_from,
        date_to,
        days_in_range,
        quotation_count: lines.len(),
        total_revenue,
        total_costs,
        fixed_costs,
        profit,
        profitability,
        quotations: lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoting::models::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    /// Parameters with every default cost zeroed, so individual tests only
    /// see the figures they set up.
    fn bare_params() -> GlobalParameters {
        GlobalParameters {
            platform_fee_percentage: dec!(10),
            credit_fee_percentage: dec!(0),
            debit_fee_percentage: dec!(0),
            cash_fee_percentage: dec!(0),
            credentials_cost: dec!(0),
            supervisors_cost: dec!(0),
            operators_cost: dec!(0),
            mobility_cost: dec!(0),
            palco4_fee_per_ticket: dec!(180),
            line_cost_percentage: dec!(0),
            ticketing_cost_per_ticket: dec!(0),
            fuel_cost_per_liter: dec!(0),
            km_per_liter: dec!(10),
            monthly_fixed_costs: dec!(0),
            ..GlobalParameters::default()
        }
    }

    fn one_sector(price: Decimal, quantity: i64) -> Vec<TicketSector> {
        vec![TicketSector {
            name: "General".to_string(),
            variations: vec![TicketVariation {
                name: "Entrada".to_string(),
                price,
                quantity,
            }],
        }]
    }

    fn base_input(platform: Platform) -> QuotationInput {
        QuotationInput {
            event_type: EventType::A,
            platform: PlatformChoice {
                name: platform,
                percentage: None,
            },
            service_charge: dec!(3),
            additional_services_percentage: dec!(0),
            payment_methods: vec![],
            employees: vec![],
            mobility: Mobility::default(),
            custom_costs: vec![],
            ticket_sectors: one_sector(dec!(1000), 100),
        }
    }

    fn compute(input: &QuotationInput, params: &GlobalParameters) -> QuotationBreakdown {
        compute_quotation(input, params, &HashMap::new()).unwrap()
    }

    // ---- ticket aggregation ----

    #[test]
    fn test_sectors_aggregate_value_and_quantity() {
        let mut input = base_input(Platform::TicketPlus);
        input.ticket_sectors = vec![
            TicketSector {
                name: "Platea".to_string(),
                variations: vec![
                    TicketVariation {
                        name: "Preventa".to_string(),
                        price: dec!(500),
                        quantity: 40,
                    },
                    TicketVariation {
                        name: "General".to_string(),
                        price: dec!(800),
                        quantity: 60,
                    },
                ],
            },
            TicketSector {
                name: "Campo".to_string(),
                variations: vec![TicketVariation {
                    name: "General".to_string(),
                    price: dec!(300),
                    quantity: 200,
                }],
            },
        ];
        let result = compute(&input, &bare_params());
        assert_eq!(result.ticket_quantity, 300);
        assert_eq!(result.total_value, dec!(128000));
    }

    #[test]
    fn test_worthless_sectors_are_a_domain_error() {
        let mut input = base_input(Platform::TicketPlus);
        // Non-empty array, but no variation carries positive price × quantity.
        input.ticket_sectors = vec![TicketSector {
            name: "General".to_string(),
            variations: vec![
                TicketVariation {
                    name: "Gratis".to_string(),
                    price: dec!(0),
                    quantity: 100,
                },
                TicketVariation {
                    name: "Agotada".to_string(),
                    price: dec!(1000),
                    quantity: 0,
                },
            ],
        }];
        let err = compute_quotation(&input, &bare_params(), &HashMap::new()).unwrap_err();
        match err {
            AppError::Domain(message) => {
                assert_eq!(message, "no valid ticket quantity or price defined")
            }
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    // ---- platform fee ----

    #[test]
    fn test_ticket_plus_fee_is_percentage_of_value() {
        let mut input = base_input(Platform::TicketPlus);
        input.platform.percentage = Some(dec!(12));
        let result = compute(&input, &bare_params());
        assert_eq!(result.platform_fee, dec!(12000));
        assert_eq!(result.palco4_cost, dec!(0));
    }

    #[test]
    fn test_ticket_plus_falls_back_to_default_percentage() {
        let input = base_input(Platform::TicketPlus);
        let result = compute(&input, &bare_params());
        // bare_params has platform_fee_percentage = 10
        assert_eq!(result.platform_fee, dec!(10000));
    }

    #[test]
    fn test_palco4_fee_is_per_ticket_and_waives_line_cost() {
        let mut params = bare_params();
        params.line_cost_percentage = dec!(2);
        params.ticketing_cost_per_ticket = dec!(50);
        let input = base_input(Platform::Palco4);
        let result = compute(&input, &params);
        assert_eq!(result.platform_fee, dec!(18000));
        assert_eq!(result.palco4_cost, dec!(18000));
        assert_eq!(result.line_cost, dec!(0));
        assert_eq!(result.operational_costs.ticketing, dec!(0));
    }

    #[test]
    fn test_line_cost_applies_off_palco4() {
        let mut params = bare_params();
        params.line_cost_percentage = dec!(2);
        let input = base_input(Platform::TicketPlus);
        let result = compute(&input, &params);
        assert_eq!(result.line_cost, dec!(2000));
    }

    // ---- revenue ----

    #[test]
    fn test_revenue_is_ticketing_fee_plus_additional_services() {
        let mut input = base_input(Platform::TicketPlus);
        input.service_charge = dec!(3);
        input.additional_services_percentage = dec!(1.5);
        let result = compute(&input, &bare_params());
        assert_eq!(result.ticketing_fee, dec!(3000));
        assert_eq!(result.additional_services, dec!(1500));
        assert_eq!(
            result.total_revenue,
            result.ticketing_fee + result.additional_services
        );
    }

    // ---- payment fees ----

    #[test]
    fn test_only_fees_charged_to_us_enter_costs() {
        let mut input = base_input(Platform::TicketPlus);
        input.payment_methods = vec![
            PaymentMethod {
                channel: PaymentChannel::Credit,
                percentage: dec!(3.5),
                charged_to: ChargedTo::Us,
            },
            PaymentMethod {
                channel: PaymentChannel::Debit,
                percentage: dec!(2.5),
                charged_to: ChargedTo::Client,
            },
            PaymentMethod {
                channel: PaymentChannel::Cash,
                percentage: dec!(1),
                charged_to: ChargedTo::Consumer,
            },
        ];
        let result = compute(&input, &bare_params());
        // All three are computed for display.
        assert_eq!(result.payment_fees.credit, dec!(3500));
        assert_eq!(result.payment_fees.debit, dec!(2500));
        assert_eq!(result.payment_fees.cash, dec!(1000));
        // Only the US-charged one is a cost of ours.
        assert_eq!(result.payment_fees.total, dec!(3500));
    }

    #[test]
    fn test_each_channel_contributes_when_charged_to_us() {
        for channel in [
            PaymentChannel::Credit,
            PaymentChannel::Debit,
            PaymentChannel::Cash,
        ] {
            let mut input = base_input(Platform::TicketPlus);
            input.payment_methods = vec![PaymentMethod {
                channel,
                percentage: dec!(2),
                charged_to: ChargedTo::Us,
            }];
            let result = compute(&input, &bare_params());
            assert_eq!(result.payment_fees.total, dec!(2000), "{channel:?}");
        }
    }

    // ---- employees ----

    #[test]
    fn test_employee_costs_multiply_out() {
        let type_id = Uuid::new_v4();
        let mut input = base_input(Platform::TicketPlus);
        input.employees = vec![EmployeeAllocation {
            employee_type_id: type_id,
            quantity: 4,
            days: 3,
        }];
        let costs = HashMap::from([(type_id, dec!(12000))]);
        let result = compute_quotation(&input, &bare_params(), &costs).unwrap();
        assert_eq!(result.operational_costs.employees, dec!(144000));
    }

    #[test]
    fn test_unknown_employee_type_contributes_zero() {
        let known = Uuid::new_v4();
        let mut input = base_input(Platform::TicketPlus);
        input.employees = vec![
            EmployeeAllocation {
                employee_type_id: known,
                quantity: 2,
                days: 1,
            },
            EmployeeAllocation {
                employee_type_id: Uuid::new_v4(), // deleted since the draft
                quantity: 10,
                days: 10,
            },
        ];
        let costs = HashMap::from([(known, dec!(500))]);
        let result = compute_quotation(&input, &bare_params(), &costs).unwrap();
        assert_eq!(result.operational_costs.employees, dec!(1000));
    }

    // ---- mobility ----

    #[test]
    fn test_mobility_combines_fuel_and_tolls() {
        let mut params = bare_params();
        params.fuel_cost_per_liter = dec!(700);
        params.km_per_liter = dec!(10);
        let mut input = base_input(Platform::TicketPlus);
        input.mobility = Mobility {
            kilometers: dec!(300),
            number_of_tolls: 4,
            toll_cost: dec!(250),
        };
        let result = compute(&input, &params);
        // 300 km × (700 / 10) + 4 × 250
        assert_eq!(result.operational_costs.mobility, dec!(22000));
    }

    // ---- custom costs ----

    #[test]
    fn test_custom_cost_bases() {
        let mut input = base_input(Platform::TicketPlus);
        input.custom_costs = vec![
            CustomCost {
                name: "Seguro".to_string(),
                amount: dec!(30000),
                basis: CostBasis::Fixed,
                days: None,
                people: None,
                sector: None,
            },
            CustomCost {
                name: "Comision".to_string(),
                amount: dec!(1), // 1% of sales
                basis: CostBasis::PercentOfSales,
                days: None,
                people: None,
                sector: None,
            },
            CustomCost {
                name: "Generador".to_string(),
                amount: dec!(5000),
                basis: CostBasis::PerDay,
                days: Some(3),
                people: None,
                sector: None,
            },
            CustomCost {
                name: "Viaticos".to_string(),
                amount: dec!(800),
                basis: CostBasis::PerDayPerPerson,
                days: Some(2),
                people: Some(5),
                sector: None,
            },
            CustomCost {
                name: "Pulseras".to_string(),
                amount: dec!(20),
                basis: CostBasis::PerTicketSystem,
                days: None,
                people: None,
                sector: None,
            },
            CustomCost {
                name: "Sillas".to_string(),
                amount: dec!(50),
                basis: CostBasis::PerTicketSector,
                days: None,
                people: None,
                sector: Some("General".to_string()),
            },
        ];
        let result = compute(&input, &bare_params());
        let amounts: Vec<Decimal> = result
            .operational_costs
            .custom
            .iter()
            .map(|line| line.amount)
            .collect();
        assert_eq!(
            amounts,
            vec![
                dec!(30000), // fixed
                dec!(1000),  // 1% of 100 000
                dec!(15000), // 5 000 × 3 days
                dec!(8000),  // 800 × 2 days × 5 people
                dec!(2000),  // 20 × 100 tickets
                dec!(5000),  // 50 × 100 tickets in "General"
            ]
        );
        assert_eq!(result.operational_costs.total, dec!(61000));
    }

    #[test]
    fn test_custom_cost_for_unknown_sector_is_zero() {
        let mut input = base_input(Platform::TicketPlus);
        input.custom_costs = vec![CustomCost {
            name: "Sillas".to_string(),
            amount: dec!(50),
            basis: CostBasis::PerTicketSector,
            days: None,
            people: None,
            sector: Some("Palco VIP".to_string()),
        }];
        let result = compute(&input, &bare_params());
        assert_eq!(result.operational_costs.custom[0].amount, dec!(0));
    }

    // ---- totals ----

    #[test]
    fn test_total_identities_hold() {
        let type_id = Uuid::new_v4();
        let mut params = bare_params();
        params.credentials_cost = dec!(15000);
        params.line_cost_percentage = dec!(2);
        params.ticketing_cost_per_ticket = dec!(50);
        params.fuel_cost_per_liter = dec!(700);
        let mut input = base_input(Platform::TicketPlus);
        input.additional_services_percentage = dec!(1);
        input.payment_methods = vec![PaymentMethod {
            channel: PaymentChannel::Credit,
            percentage: dec!(3.5),
            charged_to: ChargedTo::Us,
        }];
        input.employees = vec![EmployeeAllocation {
            employee_type_id: type_id,
            quantity: 2,
            days: 2,
        }];
        input.mobility = Mobility {
            kilometers: dec!(100),
            number_of_tolls: 2,
            toll_cost: dec!(300),
        };
        let costs = HashMap::from([(type_id, dec!(10000))]);
        let result = compute_quotation(&input, &params, &costs).unwrap();

        assert_eq!(
            result.total_revenue,
            result.ticketing_fee + result.additional_services
        );
        assert_eq!(
            result.total_costs,
            result.platform_fee
                + result.line_cost
                + result.operational_costs.total
                + result.payment_fees.total
        );
        assert_eq!(result.gross_margin, result.total_revenue - result.total_costs);
    }

    #[test]
    fn test_zero_revenue_means_zero_profitability() {
        let mut input = base_input(Platform::TicketPlus);
        input.service_charge = dec!(0);
        input.additional_services_percentage = dec!(0);
        let result = compute(&input, &bare_params());
        assert_eq!(result.total_revenue, dec!(0));
        assert_eq!(result.gross_profitability, dec!(0));
    }

    /// Worked PALCO4 scenario: 100 tickets at 1000 each, 180/ticket
    /// platform fee, 3% service charge, nothing else.
    #[test]
    fn test_palco4_worked_example() {
        let input = base_input(Platform::Palco4);
        let result = compute(&input, &bare_params());
        assert_eq!(result.total_value, dec!(100000));
        assert_eq!(result.ticket_quantity, 100);
        assert_eq!(result.platform_fee, dec!(18000));
        assert_eq!(result.ticketing_fee, dec!(3000));
        assert_eq!(result.total_revenue, dec!(3000));
        assert_eq!(result.line_cost, dec!(0));
        assert_eq!(result.operational_costs.ticketing, dec!(0));
        assert_eq!(result.total_costs, dec!(18000));
        assert_eq!(result.gross_margin, dec!(-15000));
        assert_eq!(result.gross_profitability, dec!(-500.00));
    }

    // ---- rounding helpers ----

    #[test]
    fn test_round_money_uses_bankers_rounding() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.675), 2), dec!(2.68));
        assert_eq!(round_money(dec!(2.665), 2), dec!(2.66));
    }

    #[test]
    fn test_percentage_of_zero_guard() {
        assert_eq!(percentage_of(dec!(500), dec!(0)), dec!(0));
        assert_eq!(percentage_of(dec!(-15000), dec!(3000)), dec!(-500.00));
    }

    // ---- reporting ----

    fn summary(revenue: Decimal, costs: Decimal) -> QuotationSummary {
        QuotationSummary {
            id: Uuid::new_v4(),
            name: "Recital".to_string(),
            event_type: "A".to_string(),
            status: "APPROVED".to_string(),
            payment_status: "PENDING".to_string(),
            estimated_payment_date: None,
            created_by: Uuid::new_v4(),
            total_revenue: revenue,
            total_costs: costs,
            gross_margin: revenue - costs,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_sums_and_pro_rates_fixed_costs() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let report = summarize_report(
            vec![summary(dec!(100000), dec!(40000)), summary(dec!(50000), dec!(60000))],
            from,
            to,
            dec!(304400),
        );
        assert_eq!(report.days_in_range, 31);
        assert_eq!(report.quotation_count, 2);
        assert_eq!(report.total_revenue, dec!(150000));
        assert_eq!(report.total_costs, dec!(100000));
        // 304 400 × 31 / 30.44 = 310 000
        assert_eq!(report.fixed_costs, dec!(310000));
        assert_eq!(report.profit, dec!(-260000));
        // -260 000 / 150 000 × 100
        assert_eq!(report.profitability, dec!(-173.33));
    }

    #[test]
    fn test_report_lines_carry_individual_profitability() {
        let from = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let report = summarize_report(
            vec![summary(dec!(1000), dec!(750)), summary(dec!(0), dec!(500))],
            from,
            from,
            dec!(0),
        );
        assert_eq!(report.days_in_range, 1);
        assert_eq!(report.quotations[0].profitability, dec!(25.00));
        // Revenue-less quotation reports 0%, never NaN.
        assert_eq!(report.quotations[1].profitability, dec!(0));
    }

    #[test]
    fn test_empty_report_is_zero_guarded() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let report = summarize_report(vec![], from, from, dec!(0));
        assert_eq!(report.quotation_count, 0);
        assert_eq!(report.profitability, dec!(0));
    }
}
