//! Process exit codes (BSD sysexits.h compatible)

/// Invalid input (empty or too long title, non-numeric id)
pub const USAGE: i32 = 64;

/// Remote store unreachable or returned an error
pub const UNAVAILABLE: i32 = 69;

/// Missing or incomplete configuration file
pub const CONFIG: i32 = 78;
