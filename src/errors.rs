use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Input domain violations. Permanent for the given input: the caller must
/// correct the parameters, retrying is pointless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Spot price S must be positive; got {0}")]
    NonPositiveSpot(f64),

    #[error("Strike price K must be positive; got {0}")]
    NonPositiveStrike(f64),

    #[error("Time to expiry T must be non-negative; got {0}")]
    NegativeExpiry(f64),

    #[error("Volatility sigma must be non-negative; got {0}")]
    NegativeVolatility(f64),

    #[error("{field} must be a finite number; got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("S and sigma must have the same shape; got {spot:?} and {vol:?}")]
    ShapeMismatch { spot: Vec<usize>, vol: Vec<usize> },

    #[error("n_shocks must be between 1 and {max}; got {got}")]
    ShockCount { got: usize, max: usize },
}

/// Top-level error type for the pricing service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not implemented")]
    NotImplemented(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            EngineError::Config(_) | EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
