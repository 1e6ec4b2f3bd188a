use std::collections::{BTreeSet, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::entities::{or_zero, FilterOptions, Sale, SalesFilter, SalesMetrics};
use crate::services::classifier::is_alerted;

pub fn filter_sales(sales: &[Sale], filter: &SalesFilter) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| matches_filter(sale, filter))
        .cloned()
        .collect()
}

pub fn matches_filter(sale: &Sale, filter: &SalesFilter) -> bool {
    // Unparseable dates are never excluded by a bound.
    if let Some(date) = sale.emission_date() {
        if filter.from.is_some_and(|from| date < from) {
            return false;
        }
        if filter.to.is_some_and(|to| date > to) {
            return false;
        }
    }

    if !matches_exact(sale.nome_filial.as_deref(), filter.filial.as_deref()) {
        return false;
    }
    if !matches_exact(sale.nome_vendedor.as_deref(), filter.vendedor.as_deref()) {
        return false;
    }
    if !matches_exact(sale.operacao.as_deref(), filter.operacao.as_deref()) {
        return false;
    }
    if let Some(lancamento) = filter.lancamento.as_deref() {
        if !sale.numero_lancamento.to_string().contains(lancamento) {
            return false;
        }
    }
    if let Some(tabela) = filter.tabela.as_deref() {
        let used = sale
            .items()
            .iter()
            .any(|item| item.tabela_usada.as_deref() == Some(tabela));
        if !used {
            return false;
        }
    }
    if !filter.alerta_status.accepts(is_alerted(sale)) {
        return false;
    }
    if filter.desconto_minimo > Decimal::ZERO && or_zero(sale.perc_desconto) < filter.desconto_minimo {
        return false;
    }
    true
}

fn matches_exact(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(wanted) if !wanted.is_empty() => value == Some(wanted),
        _ => true,
    }
}

/// Counts are per distinct `numero_lancamento`; money totals and averages
/// are per record, so records sharing a transaction number are all summed.
pub fn compute_metrics(sales: &[Sale]) -> SalesMetrics {
    let mut groups: HashMap<i64, (bool, bool)> = HashMap::new();
    for sale in sales {
        let group = groups.entry(sale.numero_lancamento).or_default();
        group.0 |= is_alerted(sale);
        group.1 |= sale.had_price_override();
    }

    let total_faturamento: Decimal = sales.iter().map(|sale| or_zero(sale.vlr_liquido)).sum();
    let total_desconto_reais: Decimal = sales.iter().map(|sale| or_zero(sale.vlr_desconto)).sum();
    let total_lucro: Decimal = sales.iter().map(|sale| or_zero(sale.lucro_reais)).sum();
    let desconto_sum: Decimal = sales.iter().map(|sale| or_zero(sale.perc_desconto)).sum();
    let margem_sum: Decimal = sales.iter().map(|sale| or_zero(sale.margem_perc)).sum();

    SalesMetrics {
        total_vendas: groups.len(),
        vendas_com_alerta: groups.values().filter(|(alerted, _)| *alerted).count(),
        vendas_com_liberacao: groups.values().filter(|(_, liberacao)| *liberacao).count(),
        total_faturamento,
        total_desconto_reais,
        total_lucro,
        percentual_desconto_medio: format_mean(desconto_sum, sales.len()),
        margem_media: format_mean(margem_sum, sales.len()),
    }
}

fn format_mean(sum: Decimal, count: usize) -> String {
    if count == 0 {
        return "0.00".to_string();
    }
    let mut mean = (sum / Decimal::from(count as u64))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    mean.rescale(2);
    mean.to_string()
}

pub fn total_items(sales: &[Sale]) -> usize {
    sales.iter().map(|sale| sale.items().len()).sum()
}

pub fn filter_options(sales: &[Sale]) -> FilterOptions {
    let mut filiais = BTreeSet::new();
    let mut vendedores = BTreeSet::new();
    let mut tabelas = BTreeSet::new();
    let mut operacoes = BTreeSet::new();
    for sale in sales {
        insert_present(&mut filiais, sale.nome_filial.as_deref());
        insert_present(&mut vendedores, sale.nome_vendedor.as_deref());
        insert_present(&mut operacoes, sale.operacao.as_deref());
        for item in sale.items() {
            insert_present(&mut tabelas, item.tabela_usada.as_deref());
        }
    }
    FilterOptions {
        filiais: filiais.into_iter().collect(),
        vendedores: vendedores.into_iter().collect(),
        tabelas: tabelas.into_iter().collect(),
        operacoes: operacoes.into_iter().collect(),
    }
}

fn insert_present(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|raw| !raw.is_empty()) {
        set.insert(value.to_string());
    }
}
