//! Wire protocol of the bridge control API.
//!
//! The control server speaks JSON over plain HTTP.  This module defines:
//!
//! - **`messages`** – The `{success, error?}` envelope returned by every
//!   lifecycle action.
//! - **`routes`**   – The five endpoints the panel consumes.
//! - **`sequence`** – Request sequence numbers used to drop stale responses.

pub mod messages;
pub mod routes;
pub mod sequence;

pub use messages::ActionResponse;
pub use routes::Endpoint;
pub use sequence::LatestWins;
