//! Request extractors that report failures as transport errors.

mod context;
mod user_id;
mod validated_json;

pub use context::Ctx;
pub use user_id::UserIdPath;
pub use validated_json::ValidatedJson;
