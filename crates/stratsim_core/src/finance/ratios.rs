//! Financial ratio analysis from a simplified income statement and balance sheet.

/// Inputs for [`calculate_financial_ratios`].
///
/// Balance-sheet items are optional; ratios that depend on a missing item
/// are reported as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialStatement {
    /// Total revenue.
    pub revenue: f64,
    /// Cost of goods sold.
    pub cost_of_goods_sold: f64,
    /// Operating expenses.
    pub operating_expenses: f64,
    /// Interest expense.
    pub interest_expense: f64,
    /// Tax rate on positive pre-tax income, as a decimal.
    pub tax_rate: f64,
    /// Shareholders' equity.
    pub equity: Option<f64>,
    /// Total assets.
    pub assets: Option<f64>,
    /// Total debt.
    pub debt: Option<f64>,
    /// Current assets.
    pub current_assets: Option<f64>,
    /// Current liabilities.
    pub current_liabilities: Option<f64>,
}

/// Margin, return, leverage and liquidity ratios.
///
/// Margins and returns are percentages; leverage and liquidity are plain
/// ratios.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialRatios {
    /// Revenue.
    pub revenue: f64,
    /// Cost of goods sold plus operating expenses.
    pub costs: f64,
    /// Net income after interest and tax.
    pub net_income: f64,
    /// Gross margin, %.
    pub gross_margin: f64,
    /// Operating margin, %.
    pub operating_margin: f64,
    /// Net margin, %.
    pub net_margin: f64,
    /// Return on equity, %.
    pub roe: Option<f64>,
    /// Return on assets, %.
    pub roa: Option<f64>,
    /// Debt to equity.
    pub debt_to_equity: Option<f64>,
    /// Current assets over current liabilities.
    pub current_ratio: Option<f64>,
}

/// Computes financial ratios.
///
/// Margins are 0 when revenue is not positive. Tax applies only to positive
/// pre-tax income (operating income minus interest).
///
/// # Examples
///
/// ```
/// use stratsim_core::finance::{calculate_financial_ratios, FinancialStatement};
///
/// let statement = FinancialStatement {
///     revenue: 1000.0,
///     cost_of_goods_sold: 400.0,
///     operating_expenses: 300.0,
///     equity: Some(1500.0),
///     ..Default::default()
/// };
/// let ratios = calculate_financial_ratios(&statement);
/// assert_eq!(ratios.gross_margin, 60.0);
/// assert_eq!(ratios.operating_margin, 30.0);
/// assert_eq!(ratios.roe, Some(20.0));
/// assert_eq!(ratios.roa, None);
/// ```
pub fn calculate_financial_ratios(statement: &FinancialStatement) -> FinancialRatios {
    let s = statement;
    let gross_profit = s.revenue - s.cost_of_goods_sold;
    let operating_income = gross_profit - s.operating_expenses;
    let pre_tax_income = operating_income - s.interest_expense;
    let tax = pre_tax_income.max(0.0) * s.tax_rate;
    let net_income = pre_tax_income - tax;

    let margin = |value: f64| {
        if s.revenue > 0.0 {
            value / s.revenue * 100.0
        } else {
            0.0
        }
    };
    let positive = |value: Option<f64>| value.filter(|v| *v > 0.0);

    FinancialRatios {
        revenue: s.revenue,
        costs: s.cost_of_goods_sold + s.operating_expenses,
        net_income,
        gross_margin: margin(gross_profit),
        operating_margin: margin(operating_income),
        net_margin: margin(net_income),
        roe: positive(s.equity).map(|equity| net_income / equity * 100.0),
        roa: positive(s.assets).map(|assets| net_income / assets * 100.0),
        debt_to_equity: positive(s.equity).and_then(|equity| s.debt.map(|debt| debt / equity)),
        current_ratio: positive(s.current_liabilities)
            .and_then(|liabilities| s.current_assets.map(|assets| assets / liabilities)),
    }
}
