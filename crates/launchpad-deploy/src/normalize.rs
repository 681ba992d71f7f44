//! Folding of orchestration errors into [`DeploymentFailure`].
//!
//! The failure message is the error's display text. The kind records which
//! stage failed and is only used for logging.

use crate::{DeployError, SessionError};
use launchpad_types::{DeploymentFailure, FailureKind, ValidationError};

impl From<&SessionError> for FailureKind {
	fn from(_: &SessionError) -> Self {
		FailureKind::NetworkResolution
	}
}

impl From<&DeployError> for FailureKind {
	fn from(err: &DeployError) -> Self {
		match err {
			DeployError::NoSigner { .. } => FailureKind::NoSigner,
			DeployError::FactoryResolution { .. } => FailureKind::FactoryResolution,
			DeployError::Encoding(_) | DeployError::Transaction(_) => FailureKind::Transaction,
		}
	}
}

impl From<SessionError> for DeploymentFailure {
	fn from(err: SessionError) -> Self {
		DeploymentFailure::from_error(FailureKind::from(&err), &err)
	}
}

impl From<DeployError> for DeploymentFailure {
	fn from(err: DeployError) -> Self {
		DeploymentFailure::from_error(FailureKind::from(&err), &err)
	}
}

/// Failure for input rejected before a session was opened.
pub fn invalid_request(err: &ValidationError) -> DeploymentFailure {
	DeploymentFailure::from_error(FailureKind::InvalidRequest, err)
}
