//! Fixed user-facing messages.

/// Shown when Google linking is attempted without a stored token.
pub const LOGIN_REQUIRED_FOR_OAUTH: &str = "Veuillez d'abord vous connecter pour obtenir un JWT.";

/// Shown by authenticated pages when no token is stored.
pub const LOGIN_REQUIRED: &str = "Veuillez d'abord vous connecter.";

/// Fallback when the initiation response has no URL and no message.
pub const OAUTH_FALLBACK: &str = "Erreur OAuth";

/// Initial callback page status.
pub const CALLBACK_PROCESSING: &str = "Traitement en cours...";

/// Callback reached without a `code` parameter.
pub const CALLBACK_MISSING_CODE: &str = "Code OAuth manquant dans l'URL.";

/// Google account linked.
pub const CALLBACK_LINKED: &str = "Compte Google ajouté avec succès !";

/// Fallback when the completion response has no message.
pub const CALLBACK_FALLBACK: &str = "Erreur lors de l'ajout du compte Google.";

/// Fallback when the refresh response has no message.
pub const REFRESH_FALLBACK: &str = "Erreur lors du rafraîchissement du jeton.";

/// Fallback when the profile response has no message.
pub const PROFILE_FALLBACK: &str = "Impossible de récupérer le profil.";

/// Logout removed a stored token.
pub const LOGGED_OUT: &str = "Déconnecté.";

/// Logout found nothing to remove.
pub const NO_SESSION: &str = "Aucune session active.";

/// The server could not be reached.
#[must_use]
pub fn transport_failure(detail: &str) -> String {
    format!("Impossible de joindre le serveur : {detail}")
}

/// The server answered with something that is not the expected JSON.
#[must_use]
pub fn invalid_response(detail: &str) -> String {
    format!("Réponse invalide du serveur : {detail}")
}

/// Reading or writing the stored session failed.
#[must_use]
pub fn storage_failure(detail: &str) -> String {
    format!("Erreur de stockage de session : {detail}")
}
