//! Error types surfaced to the user.
//!
//! Every variant displays as the localized message shown by the front-end.

use thiserror::Error;

/// Failures of the position query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("La géolocalisation n'est pas supportée par cette plateforme")]
    Unsupported,
    #[error("Accès à la localisation refusé par l'utilisateur")]
    PermissionDenied,
    #[error("Position non disponible")]
    PositionUnavailable,
    #[error("Timeout lors de la récupération de la position")]
    Timeout,
    #[error("Erreur de géolocalisation")]
    Unknown,
}

/// Failures of the weather API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Ville non trouvée")]
    NotFound,
    #[error("Clé API invalide")]
    Unauthorized,
    #[error("Trop de requêtes, veuillez réessayer plus tard")]
    RateLimited,
    #[error("Pas de connexion internet")]
    NoConnection,
    #[error("Erreur lors de la récupération des données météo")]
    UnknownApiError(u16),
    #[error("Erreur lors de la récupération des données météo")]
    InvalidResponse(String),
}

impl ApiError {
    /// Maps an HTTP status to the error shown for it. Status 0 stands for
    /// "no response at all".
    pub fn from_status(status: u16) -> Self {
        match status {
            0 => ApiError::NoConnection,
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            429 => ApiError::RateLimited,
            other => ApiError::UnknownApiError(other),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::from_status(status.as_u16()),
            None if err.is_decode() => ApiError::InvalidResponse(err.to_string()),
            None => ApiError::NoConnection,
        }
    }
}

/// Failures of a whole lookup, as displayed by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Veuillez entrer une ville")]
    EmptyCity,
    #[error("Erreur: {0}")]
    Search(ApiError),
    #[error("Erreur météo: {0}")]
    Weather(ApiError),
    #[error("{0}")]
    Location(#[from] GeolocationError),
}
