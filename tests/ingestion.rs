use caixa_ingest::models::{ExpenseCategory, Month};
use caixa_ingest::services::excel::{Cell, Sheet, Workbook};
use caixa_ingest::services::ingest::{
    ExpenseClassifier, Ingestor, SectionKind, SectionLayout, SectionLocation,
};

fn t(s: &str) -> Cell {
    Cell::from(s)
}

fn january_sheet() -> Sheet {
    Sheet::new(vec![
        vec![t("CLIENTES"), t("VALOR"), t("STATUS")],
        vec![t("Acme"), t("1.500,00"), t("PAGO")],
    ])
}

/// Revenue on the left, expenses to the right starting one row lower. Labels
/// are matched left to right across the whole row, so the two sections must
/// not share a header row.
fn side_by_side_sheet() -> Sheet {
    Sheet::new(vec![
        vec![t("CLIENTES/ENTRADA"), t("VALOR"), t("STATUS")],
        vec![t("Acme"), t("2.500"), t("PAGO"), t(""), t("SAÍDA MENSAL"), t("VALOR"), t("STATUS")],
        vec![t("Globex"), t(""), t(""), t("R$ 800,00"), t("ALUGUEL LOJA"), t("2.000"), t("PAGO")],
        vec![t("Initech"), t("0"), t("ABERTO"), t(""), t("MARKETING DIGITAL"), t("500"), t("PENDENTE")],
        vec![t(""), t(""), t(""), t(""), t("x"), t(""), t("")],
    ])
}

#[test]
fn january_revenue_row_is_extracted() {
    let workbook = Workbook::new().with_sheet("JANEIRO", january_sheet());
    let result = Ingestor::default().ingest(&workbook);

    assert_eq!(result.revenue_entries.len(), 1);
    let entry = &result.revenue_entries[0];
    assert_eq!(entry.id, 1);
    assert_eq!(entry.month, Month::January);
    assert_eq!(entry.client, "Acme");
    assert_eq!(entry.amount, 1500.0);
    assert_eq!(entry.status, "PAGO");

    assert_eq!(result.monthly_series[0].month, Month::January);
    assert_eq!(result.monthly_series[0].inflow, 1500.0);
    assert_eq!(result.monthly_series[0].net, 1500.0);
    assert!(result.expense_entries.is_empty());
}

#[test]
fn side_by_side_sections_are_both_read() {
    let workbook = Workbook::new().with_sheet("MARÇO", side_by_side_sheet());
    let result = Ingestor::default().ingest(&workbook);

    let clients: Vec<_> = result
        .revenue_entries
        .iter()
        .map(|e| (e.client.as_str(), e.amount, e.status.as_str()))
        .collect();
    assert_eq!(
        clients,
        vec![
            ("Acme", 2500.0, "PAGO"),
            ("Globex", 800.0, "PENDENTE"),
            ("Initech", 0.0, "ABERTO"),
        ]
    );

    let expenses: Vec<_> = result
        .expense_entries
        .iter()
        .map(|e| (e.name.as_str(), e.amount, e.category))
        .collect();
    assert_eq!(
        expenses,
        vec![
            ("ALUGUEL LOJA", 2000.0, ExpenseCategory::Fixed),
            ("MARKETING DIGITAL", 500.0, ExpenseCategory::Variable),
        ]
    );

    let march = &result.monthly_series[2];
    assert_eq!(march.inflow, 3300.0);
    assert_eq!(march.outflow, 2500.0);
    assert_eq!(march.net, 800.0);
}

#[test]
fn entry_ids_are_sequential_across_months() {
    let workbook = Workbook::new()
        .with_sheet("FEVEREIRO", january_sheet())
        .with_sheet("JANEIRO", january_sheet());
    let result = Ingestor::default().ingest(&workbook);

    let ids: Vec<_> = result.revenue_entries.iter().map(|e| (e.id, e.month)).collect();
    assert_eq!(ids, vec![(1, Month::January), (2, Month::February)]);
}

#[test]
fn summary_tab_totals_are_recomputed() {
    let workbook = Workbook::new().with_sheet(
        "CAIXA BUG",
        Sheet::new(vec![vec![t("..."), t("ENTRADA TOTAL"), t(""), t("10.000,00")]]),
    );
    let result = Ingestor::default().ingest(&workbook);

    assert_eq!(result.annual_summary.total_inflow, 0.0);
    assert_eq!(result.annual_summary.total_outflow, 0.0);
    assert_eq!(result.annual_summary.current_balance, 0.0);
}

#[test]
fn reported_balance_survives_reconciliation() {
    let workbook = Workbook::new()
        .with_sheet("MARÇO", side_by_side_sheet())
        .with_sheet(
            "Resumo Anual",
            Sheet::new(vec![
                vec![t("TOTAL ENTRADAS"), Cell::Number(99999.0)],
                vec![t("SALDO EM CAIXA"), t(""), t("12.345,67")],
            ]),
        );
    let result = Ingestor::default().ingest(&workbook);

    assert_eq!(result.annual_summary.total_inflow, 3300.0);
    assert_eq!(result.annual_summary.total_outflow, 2500.0);
    assert_eq!(result.annual_summary.current_balance, 12345.67);
}

#[test]
fn totals_always_match_entry_sums() {
    let workbook = Workbook::new()
        .with_sheet("JANEIRO", january_sheet())
        .with_sheet("MARÇO", side_by_side_sheet())
        .with_sheet("DEZEMBRO", side_by_side_sheet());
    let result = Ingestor::default().ingest(&workbook);

    let inflow: f64 = result.revenue_entries.iter().map(|e| e.amount).sum();
    let outflow: f64 = result.expense_entries.iter().map(|e| e.amount).sum();
    assert_eq!(result.annual_summary.total_inflow, inflow);
    assert_eq!(result.annual_summary.total_outflow, outflow);
    assert_eq!(result.annual_summary.current_balance, inflow - outflow);
}

#[test]
fn monthly_series_is_complete_with_one_sheet() {
    let workbook = Workbook::new().with_sheet("JULHO", january_sheet());
    let result = Ingestor::default().ingest(&workbook);

    assert_eq!(result.monthly_series.len(), 12);
    let months: Vec<_> = result.monthly_series.iter().map(|p| p.month).collect();
    assert_eq!(months, Month::ALL.to_vec());
    for point in &result.monthly_series {
        assert_eq!(point.net, point.inflow - point.outflow);
    }
    assert_eq!(result.monthly_series[6].inflow, 1500.0);
}

#[test]
fn sheet_without_markers_yields_nothing() {
    let workbook = Workbook::new().with_sheet(
        "ABRIL",
        Sheet::new(vec![vec![t("Nome"), t("Total")], vec![t("Acme"), t("100")]]),
    );
    let result = Ingestor::default().ingest(&workbook);

    assert!(result.revenue_entries.is_empty());
    assert!(result.expense_entries.is_empty());
}

#[test]
fn month_names_must_match_exactly() {
    let workbook = Workbook::new()
        .with_sheet("Janeiro", january_sheet())
        .with_sheet("MARCO", january_sheet());
    let result = Ingestor::default().ingest(&workbook);

    assert!(result.revenue_entries.is_empty());
}

#[test]
fn ingestion_is_repeatable() {
    let workbook = Workbook::new()
        .with_sheet("JANEIRO", january_sheet())
        .with_sheet("MARÇO", side_by_side_sheet())
        .with_sheet("CAIXA", Sheet::new(vec![vec![t("SALDO"), Cell::Number(10.0)]]));
    let ingestor = Ingestor::default();

    assert_eq!(ingestor.ingest(&workbook), ingestor.ingest(&workbook));
}

#[test]
fn serialized_result_uses_wire_names() {
    let workbook = Workbook::new().with_sheet("MARÇO", side_by_side_sheet());
    let result = Ingestor::default().ingest(&workbook);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["annualSummary"]["total_entradas"], 3300.0);
    assert_eq!(json["monthlySeries"][2]["mes"], "MARÇO");
    assert_eq!(json["monthlySeries"][2]["saldo"], 800.0);
    assert_eq!(json["revenueEntries"][0]["cliente"], "Acme");
    assert_eq!(json["expenseEntries"][0]["nome_despesa"], "ALUGUEL LOJA");
    assert_eq!(json["expenseEntries"][0]["tipo"], "FIXA");
    assert_eq!(json["expenseEntries"][1]["tipo"], "VARIÁVEL");
}

#[test]
fn oversized_amounts_never_produce_nan() {
    let huge = "9".repeat(400);
    let workbook = Workbook::new().with_sheet(
        "JANEIRO",
        Sheet::new(vec![
            vec![t("CLIENTES"), t("VALOR"), t("STATUS")],
            vec![t("Acme"), t(&huge), t("PAGO"), t(""), t("SAÍDAS"), t("VALOR"), t("STATUS")],
            vec![t(""), t(""), t(""), t(""), t("Luz"), t(&huge), t("PAGO")],
        ]),
    );
    let result = Ingestor::default().ingest(&workbook);

    let january = &result.monthly_series[0];
    assert!(january.net.is_finite());
    assert_eq!(january.net, january.inflow - january.outflow);
    assert!(result.annual_summary.current_balance.is_finite());

    let json = serde_json::to_value(&result.annual_summary).unwrap();
    assert_eq!(json["saldo_atual"], 0.0);
}

/// Layout for tabs with fixed columns and no section labels.
struct FixedColumns;

impl SectionLayout for FixedColumns {
    fn locate(&self, _sheet: &Sheet, kind: SectionKind) -> Option<SectionLocation> {
        match kind {
            SectionKind::Revenue => {
                Some(SectionLocation { header_row: 0, name_col: 0, value_col: 1, status_col: 2 })
            }
            SectionKind::Expense => None,
        }
    }
}

#[test]
fn custom_layouts_plug_into_the_ingestor() {
    let workbook = Workbook::new().with_sheet(
        "MAIO",
        Sheet::new(vec![vec![t("Nome"), t("Quanto")], vec![t("Acme"), t("42")]]),
    );
    let ingestor = Ingestor::new(Box::new(FixedColumns), ExpenseClassifier::default());
    let result = ingestor.ingest(&workbook);

    assert_eq!(result.revenue_entries.len(), 1);
    assert_eq!(result.revenue_entries[0].amount, 42.0);
    assert_eq!(result.monthly_series[4].inflow, 42.0);
}
