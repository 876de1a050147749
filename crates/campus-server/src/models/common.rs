use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use campus::Page;

/// Offset pagination query (`?limit=&offset=`)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page size, clamped to 1..=500 (default 100)
    pub limit: Option<u32>,
    /// Rows to skip (default 0)
    pub offset: Option<u32>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(
            params.limit.unwrap_or(Page::DEFAULT_LIMIT),
            params.offset.unwrap_or(0),
        )
    }
}

/// Error payload returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
