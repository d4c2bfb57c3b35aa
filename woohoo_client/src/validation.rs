use regex::Regex;
use woohoo_protocol::{Language, PHONE_MIN_DIGITS, USERNAME_MIN_LENGTH, VERIFICATION_CODE_LENGTH};
use crate::error::ClientError;

pub fn validate_phone_number(phone_number: &str, language: Language) -> Result<(), ClientError> {
    if phone_number.trim().is_empty() {
        return Err(crate::i18n::phone_number_required(language));
    }
    if phone_number.chars().filter(|c| c.is_ascii_digit()).count() < PHONE_MIN_DIGITS {
        return Err(crate::i18n::invalid_phone_number(language));
    }
    Ok(())
}

pub fn validate_code(code: &str, language: Language) -> Result<(), ClientError> {
    if code.chars().count() != VERIFICATION_CODE_LENGTH {
        return Err(crate::i18n::incomplete_code(language));
    }
    Ok(())
}

pub fn validate_first_name(name: &str, language: Language) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(crate::i18n::first_name_required(language));
    }
    Ok(())
}

pub fn validate_username(username: &str, language: Language) -> Result<(), ClientError> {
    if username.trim().is_empty() {
        return Err(crate::i18n::username_required(language));
    }
    if username.chars().count() < USERNAME_MIN_LENGTH {
        return Err(crate::i18n::username_too_short(language));
    }
    if !is_valid_username(username) {
        return Err(crate::i18n::invalid_username(language));
    }
    Ok(())
}

pub fn is_valid_username(username: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9_]+$")
        .map(|re| re.is_match(username))
        .unwrap_or(false)
}
