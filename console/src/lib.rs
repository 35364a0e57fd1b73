//! Terminal client for the FDE Dashboard execution bridge.
//!
//! Maintains the append-only terminal log, handles the purely local
//! commands (`clear`, `help`) without a network round trip, and streams
//! everything else through `POST /api/terminal/execute`.

pub mod decode;
pub mod session;
