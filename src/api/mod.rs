//! In-process dispatch surface

mod handlers;
mod router;

pub use handlers::{build_router, AppState, IdSequence};
pub use router::{Envelope, Handler, RequestContext, RouteKey, Router};
