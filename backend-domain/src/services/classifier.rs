use crate::entities::{Sale, SaleDetail, SaleItem, SaleItemDetail};

const OK_STATUS: &str = "OK";
const ALERT_MARKER: &str = "alerta";

/// An item is alerted when its audit text is present, is not the literal
/// `OK`, and mentions "alerta" in any case. Other non-OK texts are treated
/// as anomalies that do not trigger a notification.
pub fn is_item_alerted(item: &SaleItem) -> bool {
    match item.alerta_auditoria.as_deref() {
        Some(status) => status != OK_STATUS && status.to_lowercase().contains(ALERT_MARKER),
        None => false,
    }
}

pub fn is_alerted(sale: &Sale) -> bool {
    sale.items().iter().any(is_item_alerted)
}

pub fn alerted_items(sale: &Sale) -> Vec<SaleItem> {
    sale.items()
        .iter()
        .filter(|item| is_item_alerted(item))
        .cloned()
        .collect()
}

/// `"<produto>: <alerta_auditoria>"` for every alerted item, in item order.
pub fn alert_reasons(sale: &Sale) -> Vec<String> {
    sale.items()
        .iter()
        .filter_map(|item| match item.alerta_auditoria.as_deref() {
            Some(status) if is_item_alerted(item) => Some(format!("{}: {}", item.produto, status)),
            _ => None,
        })
        .collect()
}

pub fn sale_detail(sale: &Sale) -> SaleDetail {
    let items = sale
        .items()
        .iter()
        .map(|item| SaleItemDetail {
            item: item.clone(),
            alerted: is_item_alerted(item),
            tabelas: item.table_prices(),
        })
        .collect();
    SaleDetail {
        sale: sale.clone(),
        alerted: is_alerted(sale),
        alert_reasons: alert_reasons(sale),
        items,
    }
}
