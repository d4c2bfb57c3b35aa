use woohoo_protocol::{Language, PHONE_MIN_DIGITS, USERNAME_MIN_LENGTH};
use crate::error::ClientError;

pub fn phone_number_required(lang: Language) -> ClientError {
    match lang {
        Language::English => "Please enter your phone number".into(),
        Language::Spanish => "Por favor, introduce tu número de teléfono".into(),
        Language::French => "Veuillez saisir votre numéro de téléphone".into(),
    }
}

pub fn invalid_phone_number(lang: Language) -> ClientError {
    match lang {
        Language::English => "Please enter a valid phone number".into(),
        Language::Spanish => format!("Introduce un número de teléfono válido de al menos {} dígitos", PHONE_MIN_DIGITS).into(),
        Language::French => format!("Veuillez saisir un numéro de téléphone valide d'au moins {} chiffres", PHONE_MIN_DIGITS).into(),
    }
}

pub fn incomplete_code(lang: Language) -> ClientError {
    match lang {
        Language::English => "Please enter the complete verification code".into(),
        Language::Spanish => "Introduce el código de verificación completo".into(),
        Language::French => "Veuillez saisir le code de vérification complet".into(),
    }
}

pub fn invalid_code(lang: Language) -> ClientError {
    match lang {
        Language::English => "Invalid code. Please try again.".into(),
        Language::Spanish => "Código inválido. Inténtalo de nuevo.".into(),
        Language::French => "Code invalide. Veuillez réessayer.".into(),
    }
}

pub fn resend_too_soon(lang: Language, seconds: u64) -> ClientError {
    match lang {
        Language::English => format!("You can resend the code in {}s", seconds).into(),
        Language::Spanish => format!("Podrás reenviar el código en {}s", seconds).into(),
        Language::French => format!("Vous pourrez renvoyer le code dans {}s", seconds).into(),
    }
}

pub fn first_name_required(lang: Language) -> ClientError {
    match lang {
        Language::English => "Please enter your first name".into(),
        Language::Spanish => "Por favor, introduce tu nombre".into(),
        Language::French => "Veuillez saisir votre prénom".into(),
    }
}

pub fn username_required(lang: Language) -> ClientError {
    match lang {
        Language::English => "Please enter a username".into(),
        Language::Spanish => "Por favor, introduce un nombre de usuario".into(),
        Language::French => "Veuillez saisir un nom d'utilisateur".into(),
    }
}

pub fn username_too_short(lang: Language) -> ClientError {
    match lang {
        Language::English => format!("Username must be at least {} characters", USERNAME_MIN_LENGTH).into(),
        Language::Spanish => format!("El nombre de usuario debe tener al menos {} caracteres", USERNAME_MIN_LENGTH).into(),
        Language::French => format!("Le nom d'utilisateur doit comporter au moins {} caractères", USERNAME_MIN_LENGTH).into(),
    }
}

pub fn invalid_username(lang: Language) -> ClientError {
    match lang {
        Language::English => "Username can only contain letters, numbers, and underscores".into(),
        Language::Spanish => "El nombre de usuario solo puede contener letras, números y guiones bajos".into(),
        Language::French => "Le nom d'utilisateur ne peut contenir que des lettres, des chiffres et des traits de soulignement".into(),
    }
}

pub fn request_failed(lang: Language) -> ClientError {
    match lang {
        Language::English => "Something went wrong. Please try again.".into(),
        Language::Spanish => "Algo salió mal. Inténtalo de nuevo.".into(),
        Language::French => "Une erreur s'est produite. Veuillez réessayer.".into(),
    }
}

pub fn scan_failed(lang: Language) -> ClientError {
    match lang {
        Language::English => "Failed to detect nearby device. Please try again.".into(),
        Language::Spanish => "No se detectó ningún dispositivo cercano. Inténtalo de nuevo.".into(),
        Language::French => "Aucun appareil à proximité détecté. Veuillez réessayer.".into(),
    }
}

pub fn nfc_not_supported(lang: Language) -> ClientError {
    match lang {
        Language::English => "NFC is not available on this device".into(),
        Language::Spanish => "NFC no está disponible en este dispositivo".into(),
        Language::French => "Le NFC n'est pas disponible sur cet appareil".into(),
    }
}
