use std::time::Duration;

use crate::config::CooldownConfig;

/// Pause inserted after a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    Short(Duration),
    Long(Duration),
}

impl Cooldown {
    pub fn duration(&self) -> Duration {
        match self {
            Cooldown::Short(d) | Cooldown::Long(d) => *d,
        }
    }
}

/// Pauses due after the batch with the given 1-based index.
///
/// The short and long checks are independent: a batch index divisible by both
/// periods yields the short pause followed by the long one.
pub fn cooldowns_after(batch_index: usize, schedule: &CooldownConfig) -> Vec<Cooldown> {
    let mut pauses = Vec::new();

    if batch_index % schedule.short_every.max(1) == 0 {
        pauses.push(Cooldown::Short(schedule.short_duration()));
    }
    if batch_index % schedule.long_every.max(1) == 0 {
        pauses.push(Cooldown::Long(schedule.long_duration()));
    }

    pauses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = CooldownConfig::default();
        let short = Cooldown::Short(Duration::from_secs(300));
        let long = Cooldown::Long(Duration::from_secs(1800));

        assert!(cooldowns_after(1, &schedule).is_empty());
        assert_eq!(cooldowns_after(2, &schedule), vec![short]);
        assert!(cooldowns_after(3, &schedule).is_empty());
        assert_eq!(cooldowns_after(4, &schedule), vec![short]);
        assert_eq!(cooldowns_after(6, &schedule), vec![short, long]);
        assert_eq!(cooldowns_after(12, &schedule), vec![short, long]);
    }

    #[test]
    fn test_schedule_matches_divisibility() {
        let schedule = CooldownConfig::default();
        for index in 1..=60 {
            let pauses = cooldowns_after(index, &schedule);
            let has_short = pauses.iter().any(|p| matches!(p, Cooldown::Short(_)));
            let has_long = pauses.iter().any(|p| matches!(p, Cooldown::Long(_)));
            assert_eq!(has_short, index % 2 == 0, "batch {}", index);
            assert_eq!(has_long, index % 6 == 0, "batch {}", index);
        }
    }

    #[test]
    fn test_zero_period_means_every_batch() {
        let schedule = CooldownConfig {
            short_every: 0,
            short_secs: 1,
            long_every: 0,
            long_secs: 2,
        };
        assert_eq!(
            cooldowns_after(1, &schedule),
            vec![
                Cooldown::Short(Duration::from_secs(1)),
                Cooldown::Long(Duration::from_secs(2)),
            ]
        );
    }

    #[test]
    fn test_long_without_short_when_periods_are_coprime() {
        let schedule = CooldownConfig {
            short_every: 2,
            short_secs: 1,
            long_every: 3,
            long_secs: 10,
        };
        assert_eq!(
            cooldowns_after(3, &schedule),
            vec![Cooldown::Long(Duration::from_secs(10))]
        );
        assert_eq!(cooldowns_after(3, &schedule)[0].duration(), Duration::from_secs(10));
    }
}
