pub mod cleanup;
pub mod fan_out;
pub mod request_builder;
pub mod signing;
pub mod submission;

pub use cleanup::notify_delete;
pub use fan_out::resolve_outputs;
pub use request_builder::build_wire_request;
pub use signing::request_signed_url;
pub use submission::submit;
