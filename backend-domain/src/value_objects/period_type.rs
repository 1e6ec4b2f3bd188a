// Period selector value object

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Hoje,
    Mes,
    Intervalo,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Hoje => "hoje",
            PeriodType::Mes => "mes",
            PeriodType::Intervalo => "intervalo",
        }
    }

    /// Inclusive date bounds for this period. `Intervalo` passes the
    /// explicit bounds through, either of which may be open.
    pub fn resolve(
        &self,
        today: NaiveDate,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            PeriodType::Hoje => (Some(today), Some(today)),
            PeriodType::Mes => (today.with_day(1), Some(today)),
            PeriodType::Intervalo => (from, to),
        }
    }
}

impl From<&str> for PeriodType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mes" => PeriodType::Mes,
            "intervalo" => PeriodType::Intervalo,
            _ => PeriodType::Hoje,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn month_starts_on_the_first() {
        let (from, to) = PeriodType::Mes.resolve(date(2025, 3, 17), None, None);
        assert_eq!(from, Some(date(2025, 3, 1)));
        assert_eq!(to, Some(date(2025, 3, 17)));
    }

    #[test]
    fn interval_keeps_open_bounds() {
        let (from, to) = PeriodType::Intervalo.resolve(date(2025, 3, 17), Some(date(2025, 1, 1)), None);
        assert_eq!(from, Some(date(2025, 1, 1)));
        assert_eq!(to, None);
    }

    #[test]
    fn unknown_period_falls_back_to_today() {
        assert_eq!(PeriodType::from("semana"), PeriodType::Hoje);
        assert_eq!(PeriodType::from("MES"), PeriodType::Mes);
    }
}
