//! Request normalization.
//!
//! Turns a raw [`CalculateQuotationRequest`] into a typed
//! [`QuotationInput`], or fails with the complete list of field-level
//! violations. Range and length constraints come from the `validator`
//! derives on the request DTOs; enum membership and defaulting happen
//! here so both kinds of failure land in the same response.

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{AppError, FieldViolation, Result};
use crate::quoting::models::{
    ChargedTo, CostBasis, CustomCost, EmployeeAllocation, EventType, Mobility, PaymentChannel,
    PaymentMethod, Platform, PlatformChoice, QuotationInput, TicketSector, TicketVariation,
};
use crate::quoting::requests::{CalculateQuotationRequest, SaveQuotationRequest};

/// Flatten validator's nested error tree into field-path violations
/// (`ticket_sectors[0].variations[1].price` style).
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    walk(None, errors, &mut out);
    out
}

fn walk(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    out.push(FieldViolation {
                        field: path.clone(),
                        code: e.code.to_string(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => walk(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    walk(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

fn violation(field: String, code: &str, message: String) -> FieldViolation {
    FieldViolation {
        field,
        code: code.to_string(),
        message,
    }
}

/// Validate and normalize a raw calculation request.
pub fn normalize(req: &CalculateQuotationRequest) -> Result<QuotationInput> {
    let mut violations = match req.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_errors(&errors),
    };

    let event_type = EventType::parse(&req.event_type);
    if event_type.is_none() {
        violations.push(violation(
            "event_type".to_string(),
            "one_of",
            "must be one of A, B, C, D".to_string(),
        ));
    }

    let platform_name = Platform::parse(&req.platform.name);
    if platform_name.is_none() {
        violations.push(violation(
            "platform.name".to_string(),
            "one_of",
            "must be one of TICKET_PLUS, PALCO4".to_string(),
        ));
    }

    let mut payment_methods = Vec::with_capacity(req.payment_methods.len());
    let mut seen_channels: Vec<PaymentChannel> = Vec::new();
    for (i, pm) in req.payment_methods.iter().enumerate() {
        let channel = match PaymentChannel::parse(&pm.channel) {
            Some(c) => c,
            None => {
                violations.push(violation(
                    format!("payment_methods[{i}].channel"),
                    "one_of",
                    "must be one of credit, debit, cash".to_string(),
                ));
                continue;
            }
        };
        if seen_channels.contains(&channel) {
            violations.push(violation(
                format!("payment_methods[{i}].channel"),
                "unique",
                "each payment channel may appear only once".to_string(),
            ));
            continue;
        }
        seen_channels.push(channel);

        let charged_to = match &pm.charged_to {
            None => ChargedTo::Consumer,
            Some(raw) => match ChargedTo::parse(raw) {
                Some(c) => c,
                None => {
                    violations.push(violation(
                        format!("payment_methods[{i}].charged_to"),
                        "one_of",
                        "must be one of US, CLIENT, CONSUMER".to_string(),
                    ));
                    continue;
                }
            },
        };
        payment_methods.push(PaymentMethod {
            channel,
            percentage: pm.percentage,
            charged_to,
        });
    }

    let mut custom_costs = Vec::with_capacity(req.custom_costs.len());
    for (i, cost) in req.custom_costs.iter().enumerate() {
        let basis = match &cost.calculation_type {
            None => CostBasis::Fixed,
            Some(raw) => match CostBasis::parse(raw) {
                Some(b) => b,
                None => {
                    violations.push(violation(
                        format!("custom_costs[{i}].calculation_type"),
                        "one_of",
                        "must be one of FIXED, PERCENT_OF_SALES, PER_DAY, \
                         PER_DAY_PER_PERSON, PER_TICKET_SYSTEM, PER_TICKET_SECTOR"
                            .to_string(),
                    ));
                    continue;
                }
            },
        };
        if basis == CostBasis::PercentOfSales && cost.amount > Decimal::ONE_HUNDRED {
            violations.push(violation(
                format!("custom_costs[{i}].amount"),
                "percent_range",
                "must be between 0 and 100 for PERCENT_OF_SALES".to_string(),
            ));
            continue;
        }
        if basis == CostBasis::PerTicketSector && cost.sector.is_none() {
            violations.push(violation(
                format!("custom_costs[{i}].sector"),
                "required",
                "PER_TICKET_SECTOR requires a sector name".to_string(),
            ));
            continue;
        }
        custom_costs.push(CustomCost {
            name: cost.name.clone(),
            amount: cost.amount,
            basis,
            days: cost.days,
            people: cost.people,
            sector: cost.sector.clone(),
        });
    }

    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    // Both parsed above; violations would have short-circuited otherwise.
    let event_type = event_type.ok_or_else(|| AppError::Internal("event type".to_string()))?;
    let platform_name =
        platform_name.ok_or_else(|| AppError::Internal("platform name".to_string()))?;

    let mobility = req
        .mobility
        .as_ref()
        .map(|m| Mobility {
            kilometers: m.kilometers.unwrap_or(Decimal::ZERO),
            number_of_tolls: m.number_of_tolls.unwrap_or(0),
            toll_cost: m.toll_cost.unwrap_or(Decimal::ZERO),
        })
        .unwrap_or_default();

    Ok(QuotationInput {
        event_type,
        platform: PlatformChoice {
            name: platform_name,
            percentage: req.platform.percentage,
        },
        service_charge: req.service_charge,
        additional_services_percentage: req
            .additional_services_percentage
            .unwrap_or(Decimal::ZERO),
        payment_methods,
        employees: req
            .employees
            .iter()
            .map(|e| EmployeeAllocation {
                employee_type_id: e.employee_type_id,
                quantity: e.quantity,
                days: e.days,
            })
            .collect(),
        mobility,
        custom_costs,
        ticket_sectors: req
            .ticket_sectors
            .iter()
            .map(|s| TicketSector {
                name: s.name.clone(),
                variations: s
                    .variations
                    .iter()
                    .map(|v| TicketVariation {
                        name: v.name.clone(),
                        price: v.price,
                        quantity: v.quantity,
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Validate a persistence request.
///
/// Field-level failures (including an unknown event type) come back as
/// one complete violation list, the same shape the calculation path
/// produces; sectors carrying no sellable ticket are the same business
/// precondition the calculator enforces and fail as a domain error.
pub fn check_save_request(req: &SaveQuotationRequest) -> Result<()> {
    let mut violations = match req.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten_errors(&errors),
    };
    if EventType::parse(&req.event_type).is_none() {
        violations.push(violation(
            "event_type".to_string(),
            "one_of",
            "must be one of A, B, C, D".to_string(),
        ));
    }
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let has_sellable_ticket = req
        .ticket_sectors
        .iter()
        .flat_map(|s| s.variations.iter())
        .any(|v| v.price > Decimal::ZERO && v.quantity > 0);
    if !has_sellable_ticket {
        return Err(AppError::Domain(
            "no valid ticket quantity or price defined".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn base_request() -> CalculateQuotationRequest {
        serde_json::from_value(serde_json::json!({
            "event_type": "B",
            "platform": { "name": "TICKET_PLUS", "percentage": 10 },
            "service_charge": 3,
            "ticket_sectors": [
                { "name": "General", "variations": [
                    { "name": "Entrada", "price": 1000, "quantity": 100 }
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_defaults() {
        let input = normalize(&base_request()).unwrap();
        assert_eq!(input.event_type, EventType::B);
        assert_eq!(input.additional_services_percentage, dec!(0));
        assert_eq!(input.mobility, Mobility::default());
        assert!(input.payment_methods.is_empty());
    }

    #[test]
    fn test_charged_to_defaults_to_consumer() {
        let mut req = base_request();
        req.payment_methods = serde_json::from_value(serde_json::json!([
            { "channel": "credit", "percentage": 3.5 }
        ]))
        .unwrap();
        let input = normalize(&req).unwrap();
        assert_eq!(input.payment_methods[0].charged_to, ChargedTo::Consumer);
    }

    #[test]
    fn test_duplicate_channel_is_a_violation() {
        let mut req = base_request();
        req.payment_methods = serde_json::from_value(serde_json::json!([
            { "channel": "cash", "percentage": 1 },
            { "channel": "cash", "percentage": 2 }
        ]))
        .unwrap();
        let err = normalize(&req).unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "payment_methods[1].channel");
                assert_eq!(violations[0].code, "unique");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut req = base_request();
        req.event_type = "X".to_string();
        req.platform.name = "EVENTBRITE".to_string();
        req.service_charge = dec!(-5);
        let err = normalize(&req).unwrap_err();
        match err {
            AppError::Validation(violations) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert!(fields.contains(&"event_type"));
                assert!(fields.contains(&"platform.name"));
                assert!(fields.contains(&"service_charge"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_per_ticket_sector_requires_sector_name() {
        let mut req = base_request();
        req.custom_costs = serde_json::from_value(serde_json::json!([
            { "name": "Limpieza", "amount": 50, "calculation_type": "PER_TICKET_SECTOR" }
        ]))
        .unwrap();
        let err = normalize(&req).unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations[0].field, "custom_costs[0].sector");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_cost_basis_rejected() {
        let mut req = base_request();
        req.custom_costs = serde_json::from_value(serde_json::json!([
            { "name": "Seguridad", "amount": 50, "calculation_type": "PER_HOUR" }
        ]))
        .unwrap();
        assert!(normalize(&req).is_err());
    }

    fn save_request(event_type: &str, price: i64, quantity: i64) -> SaveQuotationRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Recital en el estadio",
            "event_type": event_type,
            "ticket_sectors": [
                { "name": "General", "variations": [
                    { "name": "Entrada", "price": price, "quantity": quantity }
                ]}
            ],
            "breakdown": {
                "ticket_quantity": quantity,
                "total_value": "100000",
                "platform_fee": "18000",
                "ticketing_fee": "3000",
                "additional_services": "0",
                "payment_fees": { "credit": "0", "debit": "0", "cash": "0", "total": "0" },
                "palco4_cost": "18000",
                "line_cost": "0",
                "operational_costs": {
                    "credentials": "0", "ticketing": "0", "employees": "0",
                    "mobility": "0", "custom": [], "total": "0"
                },
                "total_revenue": "3000",
                "total_costs": "18000",
                "gross_margin": "-15000",
                "gross_profitability": "-500.00"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_save_request_accepts_valid_payload() {
        assert!(check_save_request(&save_request("A", 1000, 100)).is_ok());
    }

    #[test]
    fn test_save_request_unknown_event_type_is_a_field_violation() {
        let err = check_save_request(&save_request("X", 1000, 100)).unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "event_type");
                assert_eq!(violations[0].code, "one_of");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_request_without_sellable_ticket_is_a_domain_error() {
        let err = check_save_request(&save_request("A", 0, 100)).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
        let err = check_save_request(&save_request("A", 1000, 0)).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[test]
    fn test_employee_allocations_carry_through() {
        let mut req = base_request();
        let type_id = Uuid::new_v4();
        req.employees = serde_json::from_value(serde_json::json!([
            { "employee_type_id": type_id, "quantity": 4, "days": 2 }
        ]))
        .unwrap();
        let input = normalize(&req).unwrap();
        assert_eq!(input.employees[0].employee_type_id, type_id);
        assert_eq!(input.employees[0].quantity, 4);
        assert_eq!(input.employees[0].days, 2);
    }
}
