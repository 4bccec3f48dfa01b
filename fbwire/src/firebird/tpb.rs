//! Transaction parameter buffer tags.

/// Buffer version, always the first byte.
pub const VERSION3: u8 = 3;

pub const CONSISTENCY: u8 = 1;
pub const CONCURRENCY: u8 = 2;
pub const SHARED: u8 = 3;
pub const PROTECTED: u8 = 4;
pub const EXCLUSIVE: u8 = 5;
pub const WAIT: u8 = 6;
pub const NOWAIT: u8 = 7;
pub const READ: u8 = 8;
pub const WRITE: u8 = 9;
pub const LOCK_READ: u8 = 10;
pub const LOCK_WRITE: u8 = 11;
pub const READ_COMMITTED: u8 = 15;
pub const AUTOCOMMIT: u8 = 16;
pub const REC_VERSION: u8 = 17;
pub const NO_REC_VERSION: u8 = 18;
pub const RESTART_REQUESTS: u8 = 19;
pub const NO_AUTO_UNDO: u8 = 20;
/// Followed by length `2` and the timeout in seconds.
pub const LOCK_TIMEOUT: u8 = 21;
pub const READ_CONSISTENCY: u8 = 22;
