use crate::models::ExpenseCategory;

/// Recurring vendors and obligations that mark an expense as fixed.
pub const FIXED_EXPENSE_KEYWORDS: [&str; 8] = [
    "ALUGUEL",
    "ENVATO",
    "SIMPLES",
    "CONTADOR",
    "INSS",
    "ICARO",
    "CHATGPT",
    "ADOBE",
];

#[derive(Debug, Clone)]
pub struct ExpenseClassifier {
    keywords: Vec<String>,
}

impl Default for ExpenseClassifier {
    fn default() -> Self {
        Self {
            keywords: FIXED_EXPENSE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ExpenseClassifier {
    /// Built-in keywords plus `extra`; extras can only widen the fixed set.
    pub fn with_extra_keywords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classifier = Self::default();
        for keyword in extra {
            let keyword = keyword.as_ref().trim().to_uppercase();
            if !keyword.is_empty() && !classifier.keywords.contains(&keyword) {
                classifier.keywords.push(keyword);
            }
        }
        classifier
    }

    pub fn classify(&self, name: &str) -> ExpenseCategory {
        let name = name.to_uppercase();
        if self.keywords.iter().any(|k| name.contains(k.as_str())) {
            ExpenseCategory::Fixed
        } else {
            ExpenseCategory::Variable
        }
    }
}
