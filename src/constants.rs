/// Image variants generated for every character, in insertion order.
pub const IMAGE_LIST: &[&str] = &[
    "common.png",
    "rare.png",
    "epic.png",
    "illustration.gif",
    "set_1.gif",
];

pub const DEFAULT_SET_ID: &str = "1";

pub mod codes {

    pub const PREFIX: &str = "ca";

    pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    pub const INITIAL_LENGTH: usize = 3;

    pub const INITIAL_ATTEMPTS: usize = 5;

    /// Consecutive duplicate-code rejections tolerated for a single insert.
    pub const MAX_INSERT_RETRIES: usize = 8;
}

pub mod database {

    pub const URI: &str = "mongodb://localhost:27017/";

    pub const NAME: &str = "hakari";

    pub const CHARACTERS: &str = "characters";

    pub const CARDS: &str = "cards";

    pub const SERVER_SELECTION_TIMEOUT_SECS: u64 = 10;

    /// Server error code for a unique index violation.
    pub const DUPLICATE_KEY_CODE: i32 = 11000;
}
