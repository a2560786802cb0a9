mod test_utils;

pub use test_utils::{
    CapturedLogs, ImageServer, RawServer, RecordingThrottle, init_tracing, plan_for,
    quiet_options, unreachable_addr,
};
