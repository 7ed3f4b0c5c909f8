//! Input validation utilities
//!
//! Catches malformed identifiers before they are sent to the EC2 API, so a
//! typo fails fast with a `Validation` error instead of an opaque upstream one.

use crate::error::{Result, SpotPriceError};

/// Validate EC2 instance type format
///
/// Instance types look like `<family>.<size>` (e.g. `t2.medium`, `u-6tb1.metal`):
/// lowercase alphanumerics and hyphens, with a single dot separating family and size.
pub fn validate_instance_type(instance_type: &str) -> Result<()> {
    if instance_type.is_empty() {
        return Err(SpotPriceError::validation(
            "instance_type",
            "Instance type cannot be empty",
        ));
    }

    if instance_type.len() > 64 {
        return Err(SpotPriceError::validation(
            "instance_type",
            format!(
                "Instance type must be at most 64 characters, got: {} (len: {})",
                instance_type,
                instance_type.len()
            ),
        ));
    }

    let parts: Vec<&str> = instance_type.split('.').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(SpotPriceError::validation(
            "instance_type",
            format!(
                "Instance type must look like <family>.<size> (e.g. t2.medium), got: {}",
                instance_type
            ),
        ));
    }

    let valid_chars = |s: &str| {
        s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    };
    if !parts.iter().all(|p| valid_chars(p)) {
        return Err(SpotPriceError::validation(
            "instance_type",
            format!(
                "Instance type must contain only lowercase letters, digits and hyphens, got: {}",
                instance_type
            ),
        ));
    }

    Ok(())
}

/// Validate availability zone identifier format
///
/// Zones are `<region><letter>` (e.g. `us-east-2a`), local zones
/// (`us-east-1-bos-1a`) or wavelength zones (`us-east-1-wl1-bos-wlz-1`).
/// Only wavelength zones may end in a digit, which keeps bare region names out.
pub fn validate_zone(zone: &str) -> Result<()> {
    if zone.is_empty() {
        return Err(SpotPriceError::validation("az", "Availability zone cannot be empty"));
    }

    if !zone
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SpotPriceError::validation(
            "az",
            format!(
                "Availability zone must contain only lowercase letters, digits and hyphens, got: {}",
                zone
            ),
        ));
    }

    let is_wavelength = zone.contains("-wlz-");
    if !zone
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_lowercase() || (is_wavelength && c.is_ascii_digit()))
    {
        return Err(SpotPriceError::validation(
            "az",
            format!("Availability zone must end with a zone letter, got: {}", zone),
        ));
    }

    Ok(())
}
