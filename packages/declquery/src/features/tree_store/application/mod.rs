//! Tree store application layer

mod load_store;
mod session;

pub use load_store::LoadStoreUseCase;
pub use session::QuerySession;
