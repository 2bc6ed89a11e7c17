use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderBridgeError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Compose error: {message}")]
    Compose { message: String },

    #[error("Reference resolution error: {message}")]
    ReferenceResolution { message: String },

    #[error("Protocol error: {message}")]
    Protocol { message: String },

    #[error("Record store error: {message}")]
    Store { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl OrderBridgeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn compose(message: impl Into<String>) -> Self {
        Self::Compose {
            message: message.into(),
        }
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::ReferenceResolution {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderBridgeError>;
