//! Storage key constants.

/// Storage keys used by the client.
///
/// The literal values match the keys the mobile app wrote, so an upgraded
/// install keeps its session.
pub struct StorageKeys;

impl StorageKeys {
    /// Access token (opaque bearer credential)
    pub const ACCESS_TOKEN: &'static str = "token";

    /// Refresh token (persisted, not actively rotated)
    pub const REFRESH_TOKEN: &'static str = "refreshToken";

    /// Serialized user object (JSON)
    pub const USER: &'static str = "user";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_unique_and_nonempty() {
        let keys = [
            StorageKeys::ACCESS_TOKEN,
            StorageKeys::REFRESH_TOKEN,
            StorageKeys::USER,
        ];
        for key in keys {
            assert!(!key.is_empty());
        }
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
