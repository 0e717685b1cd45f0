//! Visit lifecycle configuration.

use chrono::{FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Expiry and calendar settings for visits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitsConfig {
    /// A pending visit expires once its scheduled date is this many hours
    /// in the past.
    #[serde(default = "default_expiry_ttl")]
    pub expiry_ttl_hours: i64,
    /// Cron expression (with seconds) for the expiry sweep.
    #[serde(default = "default_sweep_cron")]
    pub sweep_cron: String,
    /// Offset from UTC, in minutes, of the gate's local calendar day.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for VisitsConfig {
    fn default() -> Self {
        Self {
            expiry_ttl_hours: default_expiry_ttl(),
            sweep_cron: default_sweep_cron(),
            utc_offset_minutes: 0,
        }
    }
}

impl VisitsConfig {
    /// The configured expiry TTL. Negative or unrepresentable values are a
    /// configuration error.
    pub fn expiry_ttl(&self) -> Result<TimeDelta, AppError> {
        if self.expiry_ttl_hours < 0 {
            return Err(AppError::configuration(format!(
                "visits.expiry_ttl_hours must not be negative: {}",
                self.expiry_ttl_hours
            )));
        }
        TimeDelta::try_hours(self.expiry_ttl_hours).ok_or_else(|| {
            AppError::configuration(format!(
                "visits.expiry_ttl_hours out of range: {}",
                self.expiry_ttl_hours
            ))
        })
    }

    /// The configured local offset.
    pub fn local_offset(&self) -> Result<FixedOffset, AppError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::configuration(format!(
                "visits.utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

fn default_expiry_ttl() -> i64 {
    24
}

fn default_sweep_cron() -> String {
    "0 0 * * * *".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_offset_rejects_out_of_range() {
        let config = VisitsConfig {
            utc_offset_minutes: 24 * 60,
            ..VisitsConfig::default()
        };
        assert!(config.local_offset().is_err());
    }

    #[test]
    fn test_expiry_ttl_range() {
        let ttl = |hours| {
            VisitsConfig {
                expiry_ttl_hours: hours,
                ..VisitsConfig::default()
            }
            .expiry_ttl()
        };

        assert_eq!(ttl(24).unwrap(), TimeDelta::hours(24));
        assert_eq!(ttl(0).unwrap(), TimeDelta::zero());
        assert!(ttl(-1).is_err());
        assert!(ttl(i64::MAX).is_err());
    }

    #[test]
    fn test_local_offset_accepts_negative() {
        let config = VisitsConfig {
            utc_offset_minutes: -300,
            ..VisitsConfig::default()
        };
        assert_eq!(config.local_offset().unwrap().local_minus_utc(), -300 * 60);
    }
}
