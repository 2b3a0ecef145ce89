pub const BYTE: usize = 8;
pub const FIELD_HASH_SIZE: usize = 64 / BYTE;
pub const GOLDEN_RATIO: u64 = 0x9e37_79b9;
pub const GENESIS_PREVIOUS_HASH: u64 = 0;
pub const DEFAULT_NONCE: u64 = 0;
/// Same layout as C `asctime`, e.g. `Thu Sep 13 12:26:40 2020`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
