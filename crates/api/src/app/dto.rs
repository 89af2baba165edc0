use std::str::FromStr;

use axum::http::StatusCode;
use serde::Deserialize;

use stockroom_core::DomainError;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `?cantidad=N` on the stock availability check.
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub cantidad: i32,
}

// -------------------------
// Helpers
// -------------------------

/// Parse a path identifier, answering 400 when it is not a number.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|e: DomainError| errors::json_error(StatusCode::BAD_REQUEST, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductId;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_id::<ProductId>("12").unwrap(), ProductId::new(12));
    }

    #[test]
    fn rejects_non_numeric_ids_with_400() {
        let resp = parse_id::<ProductId>("abc").unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
