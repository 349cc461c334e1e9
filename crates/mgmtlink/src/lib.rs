//! Typed binary marshalling protocol for a proxy management control channel.
//!
//! mgmtlink connects a coordinating process to its managed proxy processes
//! and administrative clients. Each logical operation has a statically
//! declared field schema per direction; messages are marshalled against
//! that schema, length-prefix framed, and exchanged as synchronous
//! request/response pairs.
//!
//! # Crate Structure
//!
//! - [`transport`] — Unix domain socket control channel
//! - [`marshal`] — field types, measure/encode/decode engine
//! - [`schema`] — operation codes and the schema registry
//! - [`frame`] — length-prefix framing, blocking reader/writer
//! - [`dispatch`] — public send/receive entry points

/// Re-export transport types.
pub mod transport {
    pub use mgmtlink_transport::*;
}

/// Re-export marshalling types.
pub mod marshal {
    pub use mgmtlink_marshal::*;
}

/// Re-export schema types.
pub mod schema {
    pub use mgmtlink_schema::*;
}

/// Re-export frame types.
pub mod frame {
    pub use mgmtlink_frame::*;
}

/// Re-export dispatch entry points.
pub mod dispatch {
    pub use mgmtlink_dispatch::*;
}
