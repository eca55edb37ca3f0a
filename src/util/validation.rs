//! Client-side form checks.
//!
//! Every check returns the first failure in the order the fields appear on
//! the form. Failures stay inside the form and never reach the network.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::{ClusterInput, SystemImageUpdate, SystemImageUpload, VmOfferInput};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const RESET_CODE_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("the reset code is {} digits", RESET_CODE_LEN)]
    InvalidResetCode,
    #[error("{0} must be a whole number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("available {0} cannot exceed the total")]
    AvailableExceedsTotal(&'static str),
    #[error("{0} must be between 0 and 100")]
    OutOfRange(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
}

fn required(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() { Err(FieldError::Required(field)) } else { Ok(()) }
}

/// Required, then a loose `local@domain.tld` shape check.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::InvalidEmail`].
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    required("email", email)?;
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(FieldError::InvalidEmail);
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

fn new_password(password: &str, confirmation: &str) -> Result<(), FieldError> {
    required("password", password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

/// # Errors
///
/// The first failing field.
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldError> {
    validate_email(email)?;
    required("password", password)
}

/// # Errors
///
/// The first failing field.
pub fn validate_signup(username: &str, email: &str, password: &str, confirmation: &str) -> Result<(), FieldError> {
    required("username", username)?;
    validate_email(email)?;
    new_password(password, confirmation)
}

/// # Errors
///
/// The first failing field.
pub fn validate_profile(username: &str, email: &str) -> Result<(), FieldError> {
    required("username", username)?;
    validate_email(email)
}

/// # Errors
///
/// The first failing field.
pub fn validate_change_password(current: &str, password: &str, confirmation: &str) -> Result<(), FieldError> {
    required("current password", current)?;
    new_password(password, confirmation)
}

/// Exactly six ASCII digits, surrounding whitespace ignored.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::InvalidResetCode`].
pub fn validate_reset_code(code: &str) -> Result<(), FieldError> {
    required("code", code)?;
    let code = code.trim();
    if code.len() != RESET_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidResetCode);
    }
    Ok(())
}

/// Final step of the reset wizard.
///
/// # Errors
///
/// The first failing field.
pub fn validate_password_reset(email: &str, code: &str, password: &str, confirmation: &str) -> Result<(), FieldError> {
    validate_email(email)?;
    validate_reset_code(code)?;
    new_password(password, confirmation)
}

/// Parse a strictly positive whole number from a text input.
///
/// # Errors
///
/// [`FieldError::Required`], [`FieldError::NotANumber`] or
/// [`FieldError::NotPositive`].
pub fn parse_positive(field: &'static str, raw: &str) -> Result<u32, FieldError> {
    required(field, raw)?;
    let value: u32 = raw.trim().parse().map_err(|_| FieldError::NotANumber(field))?;
    if value == 0 {
        return Err(FieldError::NotPositive(field));
    }
    Ok(value)
}

/// Name plus positive CPU, memory and disk for a new machine.
///
/// # Errors
///
/// The first failing field.
pub fn validate_vm(name: &str, cpu_count: u32, memory_size_mib: u32, disk_size_gb: u32) -> Result<(), FieldError> {
    required("name", name)?;
    for (field, value) in [("CPU count", cpu_count), ("memory", memory_size_mib), ("disk size", disk_size_gb)] {
        if value == 0 {
            return Err(FieldError::NotPositive(field));
        }
    }
    Ok(())
}

/// Root password for a new machine, with confirmation.
///
/// # Errors
///
/// [`FieldError::Required`], [`FieldError::PasswordTooShort`] or
/// [`FieldError::PasswordMismatch`].
pub fn validate_root_password(password: &str, confirmation: &str) -> Result<(), FieldError> {
    new_password(password, confirmation)
}

/// # Errors
///
/// The first failing field.
pub fn validate_cluster(input: &ClusterInput) -> Result<(), FieldError> {
    required("name", &input.name)?;
    required("MAC address", &input.mac_address)?;
    required("IP address", &input.ip)?;
    required("processor", &input.processor)?;
    for (field, total, available) in [("storage", input.rom, input.available_rom), ("memory", input.ram, input.available_ram)] {
        if total == 0 {
            return Err(FieldError::NotPositive(field));
        }
        if available > total {
            return Err(FieldError::AvailableExceedsTotal(field));
        }
    }
    if input.number_of_core == 0 {
        return Err(FieldError::NotPositive("core count"));
    }
    if !(0.0..=100.0).contains(&input.available_processor) {
        return Err(FieldError::OutOfRange("available processor"));
    }
    Ok(())
}

/// # Errors
///
/// The first failing field.
pub fn validate_offer(input: &VmOfferInput) -> Result<(), FieldError> {
    validate_vm(&input.name, input.cpu_count, input.memory_size_mib, input.disk_size_gb)?;
    if !input.price_per_hour.is_finite() || input.price_per_hour < 0.0 {
        return Err(FieldError::Negative("price per hour"));
    }
    Ok(())
}

/// # Errors
///
/// The first failing field.
pub fn validate_image_upload(upload: &SystemImageUpload) -> Result<(), FieldError> {
    required("name", &upload.name)?;
    required("OS type", &upload.os_type)?;
    required("version", &upload.version)?;
    required("image file", &upload.file_name)
}

/// # Errors
///
/// The first failing field.
pub fn validate_image_update(update: &SystemImageUpdate) -> Result<(), FieldError> {
    required("name", &update.name)?;
    required("OS type", &update.os_type)?;
    required("version", &update.version)
}
