// Sale entity
// One transaction as stored in the datastore, with its line items

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Value recorded in `teve_liberacao` when a price override was authorized.
pub const LIBERACAO_SIM: &str = "SIM";

const TABLE_SEPARATOR: &str = " | ";
const PRICE_SEPARATOR: &str = ": ";

/// A sale row. The row-level `alerta_auditoria` column is not modeled on
/// purpose: alert status is always derived from `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub numero_lancamento: i64,
    pub data_emissao: String,
    #[serde(default)]
    pub hora_emissao: Option<String>,
    #[serde(default)]
    pub nome_filial: Option<String>,
    #[serde(default)]
    pub nome_vendedor: Option<String>,
    #[serde(default)]
    pub nome_cliente: Option<String>,
    #[serde(default)]
    pub operacao: Option<String>,
    #[serde(default)]
    pub vlr_bruto: Option<Decimal>,
    #[serde(default)]
    pub vlr_desconto: Option<Decimal>,
    #[serde(default)]
    pub vlr_liquido: Option<Decimal>,
    #[serde(default)]
    pub perc_desconto: Option<Decimal>,
    #[serde(default)]
    pub margem_perc: Option<Decimal>,
    #[serde(default)]
    pub lucro_reais: Option<Decimal>,
    #[serde(default)]
    pub formas_pagamento: Option<String>,
    #[serde(default)]
    pub teve_liberacao: Option<String>,
    #[serde(default)]
    pub quem_autorizou: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<SaleItem>>,
}

impl Sale {
    pub fn items(&self) -> &[SaleItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Calendar date of emission, read from the `YYYY-MM-DD` prefix of
    /// `data_emissao`. Time of day and offset are ignored.
    pub fn emission_date(&self) -> Option<NaiveDate> {
        let prefix = self.data_emissao.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    pub fn had_price_override(&self) -> bool {
        self.teve_liberacao.as_deref() == Some(LIBERACAO_SIM)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleItem {
    #[serde(deserialize_with = "null_as_empty")]
    pub sku: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub produto: String,
    pub qtd: Option<Decimal>,
    pub vlr_bruto: Option<Decimal>,
    pub vlr_liquido: Option<Decimal>,
    pub vlr_desconto: Option<Decimal>,
    pub perc_desconto: Option<Decimal>,
    pub margem_perc: Option<Decimal>,
    pub lucro_reais: Option<Decimal>,
    pub prc_venda_unitario: Option<Decimal>,
    pub tabela_usada: Option<String>,
    pub tabelas_onde_existe: Option<String>,
    pub alerta_auditoria: Option<String>,
    pub local_estoque: Option<String>,
}

impl SaleItem {
    /// Parses `tabelas_onde_existe` ("name: price | name: price").
    /// A pair without the price separator keeps its name and has no price.
    pub fn table_prices(&self) -> Vec<TablePrice> {
        let Some(raw) = self.tabelas_onde_existe.as_deref() else {
            return Vec::new();
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        raw.split(TABLE_SEPARATOR)
            .map(|pair| match pair.split_once(PRICE_SEPARATOR) {
                Some((tabela, preco)) => TablePrice {
                    tabela: tabela.to_string(),
                    preco: Some(preco.to_string()),
                },
                None => TablePrice {
                    tabela: pair.to_string(),
                    preco: None,
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePrice {
    pub tabela: String,
    pub preco: Option<String>,
}

/// `items` is untyped JSON in the datastore, so text keys may hold `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null-to-zero coercion for nullable financial fields. Applied only where
/// values are compared or aggregated.
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}
