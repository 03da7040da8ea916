mod hf_gateway;
mod mock_gateway;

pub use hf_gateway::HfInferenceGateway;
pub use mock_gateway::{FailingTranscriptionGateway, MockModelGateway};
