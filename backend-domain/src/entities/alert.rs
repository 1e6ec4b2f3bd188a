// Alert webhook entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::{Sale, SaleItem, TablePrice};

/// Body posted to the external alert webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertWebhookPayload {
    pub venda: SaleSummary,
    pub alertas: Vec<String>,
    pub itens_com_alerta: Vec<SaleItem>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSummary {
    pub id: String,
    pub numero_lancamento: i64,
    pub data_emissao: String,
    pub hora_emissao: Option<String>,
    pub filial: Option<String>,
    pub vendedor: Option<String>,
    pub cliente: Option<String>,
    pub operacao: Option<String>,
    pub vlr_bruto: Option<Decimal>,
    pub vlr_liquido: Option<Decimal>,
    pub vlr_desconto: Option<Decimal>,
    pub perc_desconto: Option<Decimal>,
    pub margem_perc: Option<Decimal>,
    pub lucro_reais: Option<Decimal>,
    pub formas_pagamento: Option<String>,
    pub teve_liberacao: Option<String>,
    pub quem_autorizou: Option<String>,
}

impl From<&Sale> for SaleSummary {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.clone(),
            numero_lancamento: sale.numero_lancamento,
            data_emissao: sale.data_emissao.clone(),
            hora_emissao: sale.hora_emissao.clone(),
            filial: sale.nome_filial.clone(),
            vendedor: sale.nome_vendedor.clone(),
            cliente: sale.nome_cliente.clone(),
            operacao: sale.operacao.clone(),
            vlr_bruto: sale.vlr_bruto,
            vlr_liquido: sale.vlr_liquido,
            vlr_desconto: sale.vlr_desconto,
            perc_desconto: sale.perc_desconto,
            margem_perc: sale.margem_perc,
            lucro_reais: sale.lucro_reais,
            formas_pagamento: sale.formas_pagamento.clone(),
            teve_liberacao: sale.teve_liberacao.clone(),
            quem_autorizou: sale.quem_autorizou.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlertDeliveryRecord {
    pub timestamp_ms: i64,
    pub sale_id: String,
    pub numero_lancamento: i64,
    pub status: String,
    pub alert_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    pub sale: Sale,
    pub alerted: bool,
    pub alert_reasons: Vec<String>,
    pub items: Vec<SaleItemDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleItemDetail {
    pub item: SaleItem,
    pub alerted: bool,
    pub tabelas: Vec<TablePrice>,
}
