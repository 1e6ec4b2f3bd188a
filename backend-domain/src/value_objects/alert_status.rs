// Alert status filter value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertStatusFilter {
    ALERTA,
    OK,
    #[default]
    ANY,
}

impl AlertStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatusFilter::ALERTA => "ALERTA",
            AlertStatusFilter::OK => "OK",
            AlertStatusFilter::ANY => "",
        }
    }

    pub fn accepts(&self, alerted: bool) -> bool {
        match self {
            AlertStatusFilter::ALERTA => alerted,
            AlertStatusFilter::OK => !alerted,
            AlertStatusFilter::ANY => true,
        }
    }
}

impl From<&str> for AlertStatusFilter {
    fn from(s: &str) -> Self {
        match s.trim() {
            "ALERTA" => AlertStatusFilter::ALERTA,
            "OK" => AlertStatusFilter::OK,
            _ => AlertStatusFilter::ANY,
        }
    }
}
