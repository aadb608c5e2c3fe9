pub mod audio_filename;
pub mod endpoint_validation;
pub use audio_filename::is_valid_audio_filename;
pub use endpoint_validation::{EndpointValidationError, validate_service_endpoint};
