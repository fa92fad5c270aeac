use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "JANEIRO")]
    January,
    #[serde(rename = "FEVEREIRO")]
    February,
    #[serde(rename = "MARÇO")]
    March,
    #[serde(rename = "ABRIL")]
    April,
    #[serde(rename = "MAIO")]
    May,
    #[serde(rename = "JUNHO")]
    June,
    #[serde(rename = "JULHO")]
    July,
    #[serde(rename = "AGOSTO")]
    August,
    #[serde(rename = "SETEMBRO")]
    September,
    #[serde(rename = "OUTUBRO")]
    October,
    #[serde(rename = "NOVEMBRO")]
    November,
    #[serde(rename = "DEZEMBRO")]
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Sheet name of the month tab, matched case-sensitively.
    pub fn label(self) -> &'static str {
        match self {
            Month::January => "JANEIRO",
            Month::February => "FEVEREIRO",
            Month::March => "MARÇO",
            Month::April => "ABRIL",
            Month::May => "MAIO",
            Month::June => "JUNHO",
            Month::July => "JULHO",
            Month::August => "AGOSTO",
            Month::September => "SETEMBRO",
            Month::October => "OUTUBRO",
            Month::November => "NOVEMBRO",
            Month::December => "DEZEMBRO",
        }
    }

    pub fn from_label(label: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "FIXA")]
    Fixed,
    #[serde(rename = "VARIÁVEL")]
    Variable,
}

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Fixed => "FIXA",
            ExpenseCategory::Variable => "VARIÁVEL",
        }
    }

    pub fn from_label(label: &str) -> Option<ExpenseCategory> {
        match label {
            "FIXA" => Some(ExpenseCategory::Fixed),
            "VARIÁVEL" => Some(ExpenseCategory::Variable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub id: u64,
    #[serde(rename = "mes")]
    pub month: Month,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: u64,
    #[serde(rename = "mes")]
    pub month: Month,
    #[serde(rename = "nome_despesa")]
    pub name: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    pub status: String,
    #[serde(rename = "tipo")]
    pub category: ExpenseCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualSummary {
    #[serde(rename = "total_entradas")]
    pub total_inflow: f64,
    #[serde(rename = "total_saidas")]
    pub total_outflow: f64,
    #[serde(rename = "saldo_atual")]
    pub current_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesPoint {
    #[serde(rename = "mes")]
    pub month: Month,
    #[serde(rename = "entradas")]
    pub inflow: f64,
    #[serde(rename = "saidas")]
    pub outflow: f64,
    #[serde(rename = "saldo")]
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionResult {
    pub annual_summary: AnnualSummary,
    pub monthly_series: Vec<MonthlySeriesPoint>,
    pub revenue_entries: Vec<RevenueEntry>,
    pub expense_entries: Vec<ExpenseEntry>,
}
