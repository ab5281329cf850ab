//! Redelivery delay for handler-issued retries.

/// Seconds to wait before the next delivery of a message that has been
/// attempted `attempts` times: `(attempts + 1) * step_secs`, capped at
/// `max_secs`.
pub fn redelivery_delay(attempts: u32, step_secs: u32, max_secs: u32) -> u32 {
    attempts
        .saturating_add(1)
        .saturating_mul(step_secs)
        .min(max_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redelivery_delay() {
        assert_eq!(redelivery_delay(1, 10, 3600), 20);
        assert_eq!(redelivery_delay(2, 10, 3600), 30);
        assert_eq!(redelivery_delay(0, 10, 3600), 10);
    }

    #[test]
    fn test_redelivery_delay_capped() {
        assert_eq!(redelivery_delay(500, 10, 3600), 3600);
        assert_eq!(redelivery_delay(u32::MAX, u32::MAX, 43_200), 43_200);
    }
}
