// src/config/consts.rs

// Net config
pub const LISTING_URL: &str =
    "https://www.moh.gov.gr/articles/citizen/efhmeries-nosokomeiwn/68-efhmeries-nosokomeiwn-attikhs";
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) hospital_duty/0.1";
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const MAX_DOCUMENT_BYTES: u64 = 32 * 1024 * 1024;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const DUTY_CACHE_FILE: &str = "hospitals_on_duty.json";
pub const SHIFT_CACHE_FILE: &str = "shifts_cache.json";
pub const LOG_FILE: &str = "debug.log";

// Environment overrides
pub const LOG_ENV: &str = "HOSPITAL_DUTY_LOG";
pub const STORE_ENV: &str = "HOSPITAL_DUTY_STORE";
pub const LISTING_ENV: &str = "HOSPITAL_DUTY_LISTING";
pub const DEFAULT_LOG_DIRECTIVE: &str = "hospital_duty=info";

// Duty schedule tables
pub const HEADER_SENTINEL: &str = "Κλινικές";
pub const HEADER_SCAN_ROWS: usize = 5;

// Monthly shift document
pub const SHIFT_TABLES: usize = 2;
pub const ATTENDING_MIN_CELLS: usize = 4;
pub const RESIDENT_MIN_CELLS: usize = 6;

// PDF geometry, in points
pub const MIN_RULING_LEN: f32 = 5.0;
pub const RULING_SNAP: f32 = 2.0;
pub const LINE_SNAP_RATIO: f32 = 0.5;
pub const GLYPH_ADVANCE: f32 = 0.5;
pub const TJ_SPACE_THRESHOLD: f32 = 250.0;
