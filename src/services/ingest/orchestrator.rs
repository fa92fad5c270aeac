use super::classifier::ExpenseClassifier;
use super::extractor::extract;
use super::locator::{HeaderScanLayout, SectionKind, SectionLayout};
use super::summary::extract_summary;
use crate::models::{
    AnnualSummary, ExpenseEntry, IngestionResult, Month, MonthlySeriesPoint, RevenueEntry,
};
use crate::services::excel::Workbook;

/// Turns a decoded workbook into the normalized record set.
///
/// Holds only configuration; every call starts from empty accumulators, so a
/// single `Ingestor` can serve concurrent ingestions.
pub struct Ingestor {
    layout: Box<dyn SectionLayout>,
    classifier: ExpenseClassifier,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(Box::new(HeaderScanLayout), ExpenseClassifier::default())
    }
}

impl Ingestor {
    pub fn new(layout: Box<dyn SectionLayout>, classifier: ExpenseClassifier) -> Self {
        Self { layout, classifier }
    }

    pub fn ingest(&self, workbook: &Workbook) -> IngestionResult {
        let start = std::time::Instant::now();
        tracing::info!("Ingesting workbook with {} sheets", workbook.len());
        let mut revenue: Vec<RevenueEntry> = Vec::new();
        let mut expenses: Vec<ExpenseEntry> = Vec::new();

        for month in Month::ALL {
            let Some(sheet) = workbook.sheet(month.label()) else {
                tracing::debug!("No sheet for {}, skipping", month);
                continue;
            };

            match self.layout.locate(sheet, SectionKind::Revenue) {
                Some(location) => {
                    for record in extract(sheet, &location, SectionKind::Revenue) {
                        revenue.push(RevenueEntry {
                            id: revenue.len() as u64 + 1,
                            month,
                            client: record.name,
                            amount: record.amount,
                            status: record.status,
                        });
                    }
                }
                None => tracing::debug!("No revenue section found in {}", month),
            }

            match self.layout.locate(sheet, SectionKind::Expense) {
                Some(location) => {
                    for record in extract(sheet, &location, SectionKind::Expense) {
                        let category = self.classifier.classify(&record.name);
                        expenses.push(ExpenseEntry {
                            id: expenses.len() as u64 + 1,
                            month,
                            name: record.name,
                            amount: record.amount,
                            status: record.status,
                            category,
                        });
                    }
                }
                None => tracing::debug!("No expense section found in {}", month),
            }
        }

        let reported = extract_summary(workbook);
        if reported.is_none() {
            tracing::info!("No summary sheet found, deriving annual summary from entries");
        }

        let annual_summary = reconcile(reported, &revenue, &expenses);
        let monthly_series = monthly_series(&revenue, &expenses);

        tracing::info!(
            "Ingested {} revenue and {} expense entries in {:?}",
            revenue.len(),
            expenses.len(),
            start.elapsed()
        );

        IngestionResult {
            annual_summary,
            monthly_series,
            revenue_entries: revenue,
            expense_entries: expenses,
        }
    }
}

/// Totals always come from the entries; the reported balance is kept unless
/// it is zero.
pub fn reconcile(
    reported: Option<AnnualSummary>,
    revenue: &[RevenueEntry],
    expenses: &[ExpenseEntry],
) -> AnnualSummary {
    let inflow: f64 = revenue.iter().map(|e| e.amount).sum();
    let outflow: f64 = expenses.iter().map(|e| e.amount).sum();

    let Some(reported) = reported else {
        return AnnualSummary {
            total_inflow: inflow,
            total_outflow: outflow,
            current_balance: inflow - outflow,
        };
    };

    if reported.total_inflow != inflow || reported.total_outflow != outflow {
        tracing::warn!(
            "Summary sheet totals differ from monthly tabs: reported in/out {:.2}/{:.2}, computed {:.2}/{:.2}",
            reported.total_inflow,
            reported.total_outflow,
            inflow,
            outflow
        );
    }

    AnnualSummary {
        total_inflow: inflow,
        total_outflow: outflow,
        current_balance: if reported.current_balance == 0.0 {
            inflow - outflow
        } else {
            reported.current_balance
        },
    }
}

pub fn monthly_series(revenue: &[RevenueEntry], expenses: &[ExpenseEntry]) -> Vec<MonthlySeriesPoint> {
    Month::ALL
        .into_iter()
        .map(|month| {
            let inflow: f64 = revenue.iter().filter(|e| e.month == month).map(|e| e.amount).sum();
            let outflow: f64 = expenses.iter().filter(|e| e.month == month).map(|e| e.amount).sum();
            MonthlySeriesPoint { month, inflow, outflow, net: inflow - outflow }
        })
        .collect()
}
