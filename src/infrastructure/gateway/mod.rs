pub mod http_gateway;
pub mod local_gateway;

pub use http_gateway::HttpSynthesisGateway;
pub use local_gateway::LocalSynthesisGateway;
