//! Galaxy Oracle — the gateway to the narrative-generation service.
//!
//! Renders a turn into the oracle's two-message prompt, invokes an
//! [`OracleClient`](galaxy_core::oracle::OracleClient), and normalizes the raw
//! completion into a [`TurnResult`](turn_result::TurnResult) or a
//! [`OracleParseFailure`](turn_result::OracleParseFailure). No retries, no
//! rate limiting.

pub mod directive;
pub mod gateway;
pub mod openai;
pub mod prompt;
pub mod turn_result;

pub use gateway::OracleGateway;
pub use openai::{OpenAiClient, OpenAiConfig};
pub use turn_result::{OracleOutcome, OracleParseFailure, TurnResult};
