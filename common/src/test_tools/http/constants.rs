/// 2023-11-14T22:13:20Z
pub const RECEIVED_TIMESTAMP_FOR_MOCK_REQUESTS: i64 = 1_700_000_000_000;
pub const REQUEST_TIME_FOR_MOCK_REQUESTS: &str = "14/Nov/2023:22:13:20 +0000";
pub const REMOTE_ADDRESS_FOR_MOCK_REQUESTS: &str = "127.0.0.1";
pub const STAGE_FOR_MOCK_REQUESTS: &str = "dev";
