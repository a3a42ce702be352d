// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Mapping of gateway errors onto HTTP responses.
//!
//! Transport problems get a non-200 status; anything the engine reports about
//! the query itself is a 200 carrying an error envelope.

use std::fmt::{self, Display, Formatter};

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use conduit_sub_server::Response as Envelope;
use conduit_type::Error;

#[derive(Debug)]
pub struct AppError(pub Error);

impl AppError {
	pub fn status(&self) -> StatusCode {
		match &self.0 {
			Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			Error::MissingBody | Error::MalformedBody(_) | Error::UpgradeFailed => StatusCode::BAD_REQUEST,
			Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
			_ => StatusCode::OK,
		}
	}
}

impl From<Error> for AppError {
	fn from(err: Error) -> Self {
		AppError(err)
	}
}

impl Display for AppError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let status = self.status();
		match &self.0 {
			Error::Internal(msg) => tracing::error!("Internal error: {}", msg),
			Error::Timeout => tracing::error!("Query execution timed out"),
			err => tracing::debug!("Request failed with {}: {}", err.code(), err),
		}

		(status, Json(Envelope::from(&self.0))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert_eq!(AppError(Error::MethodNotAllowed).status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(AppError(Error::MissingBody).status(), StatusCode::BAD_REQUEST);
		assert_eq!(AppError(Error::MalformedBody("eof".into())).status(), StatusCode::BAD_REQUEST);
		assert_eq!(AppError(Error::validation("bad")).status(), StatusCode::OK);
		assert_eq!(AppError(Error::Timeout).status(), StatusCode::OK);
		assert_eq!(AppError(Error::internal("boom")).status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_app_error_display() {
		let err = AppError(Error::MissingBody);
		assert_eq!(err.to_string(), "request must include a query");
	}
}
