//! Input validation utilities

use crate::models::ContactForm;

/// Validate that a session token is present
pub fn validate_token(token: Option<&str>, message: &str) -> Result<(), String> {
    match token {
        Some(_) => Ok(()),
        None => Err(message.to_string()),
    }
}

/// Validate a contact form
pub fn validate_contact_form(form: &ContactForm) -> Result<(), String> {
    let fields = [&form.name, &form.email, &form.subject, &form.message];

    if fields.iter().any(|field| field.is_empty()) {
        return Err("All fields are required".to_string());
    }

    Ok(())
}
