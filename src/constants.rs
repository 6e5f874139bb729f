// Frame clock
pub const DEFAULT_FPS: u32 = 30;
pub const MIN_FPS: u32 = 5;
pub const MAX_FPS: u32 = 120;

// Preferences directory layout
pub const APP_NAME: &str = "bfruit";
pub const SCORE_FILE: &str = "score";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "bfruit.log";

// High score shown before anything has been saved
pub const DEFAULT_HIGH_SCORE: u32 = 1;

/// Milliseconds per frame at `fps`, clamped to the supported range.
pub fn frame_interval_ms(fps: u32) -> u64 {
    1000 / u64::from(fps.clamp(MIN_FPS, MAX_FPS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval_ms(30), 33);
        assert_eq!(frame_interval_ms(60), 16);
        assert_eq!(frame_interval_ms(0), 200);
        assert_eq!(frame_interval_ms(10_000), 8);
    }
}
