//! gRPC layer - transport adapter over the user usecase.

mod interceptor;
mod user_grpc;

pub use interceptor::{require_request_id, to_status, MISSING_REQUEST_ID};
pub use user_grpc::UserGrpcService;
