//! Client-credentials token exchange

pub mod ports;
pub mod token_acquirer;

pub use ports::AccessTokenProvider;
pub use token_acquirer::{ClientCredentialsTokens, TokenAcquirer};
