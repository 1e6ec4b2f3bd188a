// Filter criteria entity
// What the operator selected on the dashboard, with the period already resolved

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{AlertStatusFilter, PeriodType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub filial: Option<String>,
    pub vendedor: Option<String>,
    pub lancamento: Option<String>,
    pub tabela: Option<String>,
    pub operacao: Option<String>,
    pub alerta_status: AlertStatusFilter,
    pub desconto_minimo: Decimal,
}

/// Raw query string shape of the dashboard filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesFilterQuery {
    pub period: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub filial: Option<String>,
    pub vendedor: Option<String>,
    pub lancamento: Option<String>,
    pub tabela: Option<String>,
    pub operacao: Option<String>,
    pub alerta_status: Option<String>,
    pub desconto_minimo: Option<Decimal>,
}

impl SalesFilterQuery {
    pub fn resolve(self, today: NaiveDate) -> SalesFilter {
        let period = self
            .period
            .as_deref()
            .map(PeriodType::from)
            .unwrap_or_default();
        let (from, to) = period.resolve(today, self.from, self.to);
        SalesFilter {
            from,
            to,
            filial: non_empty(self.filial),
            vendedor: non_empty(self.vendedor),
            lancamento: non_empty(self.lancamento),
            tabela: non_empty(self.tabela),
            operacao: non_empty(self.operacao),
            alerta_status: self
                .alerta_status
                .as_deref()
                .map(AlertStatusFilter::from)
                .unwrap_or_default(),
            desconto_minimo: self.desconto_minimo.unwrap_or(Decimal::ZERO),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}
