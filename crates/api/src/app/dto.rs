use serde::Serialize;

/// `GET /api` banner.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: &'static str,
}

impl ApiInfo {
    pub fn current() -> Self {
        Self {
            message: "API Filmoteca 100% funcional".to_string(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Successful `POST /filme/cadastro` response.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub message: &'static str,
    pub access_token: String,
}
