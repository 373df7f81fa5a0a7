//! Shared constants for end-to-end tests
//!
//! When test data changes (user credentials, catalog rows, provider data),
//! update only this file.
#![allow(dead_code)]

// ============================================================================
// Test User Credentials
// ============================================================================

/// Regular test user, user number 1
pub const TEST_USER: &str = "testuser@listify.test";
pub const TEST_PASS: &str = "testpass123";
pub const TEST_USER_NICKNAME: &str = "tester";
pub const TEST_USER_NO: usize = 1;

/// Admin test user, user number 2
pub const ADMIN_USER: &str = "admin@listify.test";
pub const ADMIN_PASS: &str = "adminpass123";
pub const ADMIN_NICKNAME: &str = "admin";
pub const ADMIN_USER_NO: usize = 2;

/// Second regular user, user number 3, used for ownership checks
pub const OTHER_USER: &str = "other@listify.test";
pub const OTHER_PASS: &str = "otherpass123";
pub const OTHER_USER_NO: usize = 3;

// ============================================================================
// Test Catalog Rows
// ============================================================================

/// "Blueming" by IU, K-Pop, 2019, popularity 80
pub const TRACK_1_NO: usize = 1;
pub const TRACK_1_NAME: &str = "Blueming";
pub const TRACK_1_ARTIST: &str = "IU";

/// "Love wins all" by IU, K-Pop, 2024, popularity 90
pub const TRACK_2_NO: usize = 2;
pub const TRACK_2_NAME: &str = "Love wins all";

/// "Yellow" by Coldplay, Rock, 2000, popularity 70
pub const TRACK_3_NO: usize = 3;
pub const TRACK_3_NAME: &str = "Yellow";

pub const CATALOG_TRACK_COUNT: usize = 3;

/// A music number that is not in the catalog
pub const MISSING_MUSIC_NO: usize = 9999;

// ============================================================================
// Fake Provider Data
// ============================================================================

/// Number of search matches the fake provider reports for any query
pub const PROVIDER_SEARCH_TOTAL: usize = 120;

/// Number of tracks in the fake chart playlist
pub const PROVIDER_PLAYLIST_SIZE: usize = 10;

/// Query on which the fake provider fails
pub const PROVIDER_FAILING_QUERY: &str = "explode";

pub const TOP50_PLAYLIST_ID: &str = "test-top50";

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
