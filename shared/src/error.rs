use thiserror::Error;

/// Failures talking to the dashboard backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// What to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(message) if !message.is_empty() => message.clone(),
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let rejected = ApiError::Rejected("Campos obrigatórios faltando.".to_string());
        assert_eq!(rejected.user_message("Erro"), "Campos obrigatórios faltando.");

        let not_found = ApiError::Status {
            status: 404,
            message: Some("Transação não encontrada.".to_string()),
        };
        assert_eq!(not_found.user_message("Erro"), "Transação não encontrada.");
    }

    #[test]
    fn test_user_message_falls_back() {
        let network = ApiError::Network("offline".to_string());
        assert_eq!(network.user_message("Erro ao adicionar transação"), "Erro ao adicionar transação");
        assert_eq!(ApiError::Rejected(String::new()).user_message("Erro"), "Erro");

        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "HTTP error! status: 500");
        assert_eq!(bare.user_message("Erro"), "Erro");
    }
}
