// Dashboard summary entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::Sale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    pub total_vendas: usize,
    pub vendas_com_alerta: usize,
    pub vendas_com_liberacao: usize,
    pub total_faturamento: Decimal,
    pub total_desconto_reais: Decimal,
    pub total_lucro: Decimal,
    pub percentual_desconto_medio: String,
    pub margem_media: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub filiais: Vec<String>,
    pub vendedores: Vec<String>,
    pub tabelas: Vec<String>,
    pub operacoes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesView {
    pub sales: Vec<Sale>,
    pub metrics: SalesMetrics,
    pub total_itens: usize,
}
