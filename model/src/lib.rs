pub mod authorizer;
pub mod event;
pub mod raw_request;
pub mod stage;
