mod client;
mod credentials;
mod gateway_error;

pub use client::ProposalGateway;
pub use credentials::{CredentialProvider, StaticToken};
pub use gateway_error::GatewayError;
