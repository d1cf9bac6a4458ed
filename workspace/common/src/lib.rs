//! Transport-layer types shared between the domain ledger and the API
//! handlers: reporting periods with their date math, and the analytics /
//! billing payload shapes returned by the dashboard endpoints.

mod period;
mod reports;

pub use period::{month_start, SummaryPeriod, TrendInterval};
pub use reports::{
    BillingLine, BillingReport, FinancialSnapshot, LowStockItem, LowStockReport,
    RevenueSummaryReport, RevenueTotals, RevenueTrendPoint, SalesTrendPoint, ShopLowStockAlert,
    ShopPerformance, ShopRevenue, ShopSalesSummary, SlowMovingItem, TopProduct,
};
