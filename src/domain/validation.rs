use crate::domain::model::{Address, Package, RateRequest};
use crate::utils::error::{AppError, FieldIssue, Result};

/// Checks a rate request against the domain invariants, collecting every
/// problem instead of stopping at the first one. Fails with
/// `AppError::Validation` carrying the full issue list; no network call has
/// been made at this point.
pub fn validate_rate_request(request: &RateRequest) -> Result<()> {
    let mut issues = Vec::new();

    check_address("shipper", &request.shipper, &mut issues);
    if let Some(ship_from) = &request.ship_from {
        check_address("ship_from", ship_from, &mut issues);
    }
    check_address("ship_to", &request.ship_to, &mut issues);

    if request.packages.is_empty() {
        issues.push(FieldIssue::new(
            "packages",
            "at least one package is required",
        ));
    }
    for (index, package) in request.packages.iter().enumerate() {
        check_package(&format!("packages[{index}]"), package, &mut issues);
    }

    if let Some(code) = &request.service_code {
        if code.trim().is_empty() {
            issues.push(FieldIssue::new("service_code", "must not be empty"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation {
            message: "rate request validation failed".to_string(),
            issues,
        })
    }
}

fn check_address(field: &str, address: &Address, issues: &mut Vec<FieldIssue>) {
    check_non_empty(&format!("{field}.address1"), &address.address1, issues);
    check_non_empty(&format!("{field}.city"), &address.city, issues);
    check_non_empty(&format!("{field}.state"), &address.state, issues);
    check_non_empty(&format!("{field}.postal_code"), &address.postal_code, issues);

    if address.country_code.chars().count() != 2 {
        issues.push(FieldIssue::new(
            format!("{field}.country_code"),
            "must be a 2-letter country code",
        ));
    }

    check_present_non_empty(&format!("{field}.name"), &address.name, issues);
    check_present_non_empty(&format!("{field}.company"), &address.company, issues);
    check_present_non_empty(&format!("{field}.phone"), &address.phone, issues);
    check_present_non_empty(&format!("{field}.address2"), &address.address2, issues);
    if let Some(email) = &address.email {
        check_email(&format!("{field}.email"), email, issues);
    }
}

fn check_package(field: &str, package: &Package, issues: &mut Vec<FieldIssue>) {
    check_positive(
        &format!("{field}.weight.value"),
        package.weight.value,
        issues,
    );

    if let Some(dimensions) = &package.dimensions {
        check_positive(
            &format!("{field}.dimensions.length"),
            dimensions.length,
            issues,
        );
        check_positive(
            &format!("{field}.dimensions.width"),
            dimensions.width,
            issues,
        );
        check_positive(
            &format!("{field}.dimensions.height"),
            dimensions.height,
            issues,
        );
    }
}

fn check_non_empty(field: &str, value: &str, issues: &mut Vec<FieldIssue>) {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(field, "must not be empty"));
    }
}

// Optional fields may be omitted, but not present and empty.
fn check_present_non_empty(field: &str, value: &Option<String>, issues: &mut Vec<FieldIssue>) {
    if let Some(value) = value {
        if value.trim().is_empty() {
            issues.push(FieldIssue::new(field, "must not be empty when present"));
        }
    }
}

fn check_email(field: &str, value: &str, issues: &mut Vec<FieldIssue>) {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        issues.push(FieldIssue::new(field, "must be a valid email address"));
    }
}

fn check_positive(field: &str, value: f64, issues: &mut Vec<FieldIssue>) {
    if !(value.is_finite() && value > 0.0) {
        issues.push(FieldIssue::new(field, "must be a positive number"));
    }
}
