// Core data structures for the polo analytics engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::analytics::descriptive::DescriptiveStats;

/// Enrollment record for one hub in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String, // "{index}_{period}"
    pub hub: String,
    pub absolute_count: f64,
    pub relative_percent: f64,
    pub period: i32,
    pub region: Option<String>,
}

impl Record {
    /// Create a record with the conventional `{index}_{period}` id
    pub fn new(
        index: usize,
        hub: impl Into<String>,
        absolute_count: f64,
        relative_percent: f64,
        period: i32,
        region: Option<String>,
    ) -> Self {
        Self {
            id: format!("{index}_{period}"),
            hub: hub.into(),
            absolute_count,
            relative_percent,
            period,
            region,
        }
    }

    /// Region name, or the empty string when the record has none
    pub fn region_or_empty(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }
}

/// Period-over-period trend of a single hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Classify a growth percentage against a symmetric threshold
    ///
    /// `Up` strictly above `threshold`, `Down` strictly below `-threshold`.
    #[must_use]
    pub fn from_growth(growth: f64, threshold: f64) -> Self {
        if growth > threshold {
            Self::Up
        } else if growth < -threshold {
            Self::Down
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }

    /// Localized label
    pub fn label(&self) -> String {
        match self {
            Self::Up => crate::i18n::t!("trend.up").to_string(),
            Self::Down => crate::i18n::t!("trend.down").to_string(),
            Self::Stable => crate::i18n::t!("trend.stable").to_string(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current-period record enriched with comparison and distribution metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    #[serde(flatten)]
    pub record: Record,

    /// Growth against the comparison period in percent.
    /// `Some(0.0)` when the hub has no comparison match, `None` when the
    /// prior count is zero.
    pub growth_percent: Option<f64>,

    pub trend: Trend,

    /// `None` when the current period has zero variance
    pub z_score: Option<f64>,

    /// Fitted regression value at this record's rank
    pub predicted: Option<f64>,

    /// `absolute_count - predicted`
    pub residual: Option<f64>,
}

impl DerivedRecord {
    pub fn hub(&self) -> &str {
        &self.record.hub
    }

    pub fn absolute_count(&self) -> f64 {
        self.record.absolute_count
    }

    /// Growth with "not computable" folded to zero, as used for ranking
    pub fn growth_or_zero(&self) -> f64 {
        self.growth_percent.unwrap_or(0.0)
    }
}

/// Field used to order derived records before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Hub,
    #[default]
    AbsoluteCount,
    RelativePercent,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Chart presentation chosen by the caller. Never affects computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Line,
    Area,
    Scatter,
    Composed,
}

/// Record selection criteria
///
/// Empty `periods` or `regions` place no restriction on that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub periods: BTreeSet<i32>,
    pub regions: BTreeSet<String>,
    pub min_count: f64,
    pub max_count: f64,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    /// Criteria accepting every record
    pub fn all() -> Self {
        Self {
            periods: BTreeSet::new(),
            regions: BTreeSet::new(),
            min_count: 0.0,
            max_count: f64::MAX,
            search_term: String::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }

    pub fn with_periods<I: IntoIterator<Item = i32>>(mut self, periods: I) -> Self {
        self.periods = periods.into_iter().collect();
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_count_range(mut self, min_count: f64, max_count: f64) -> Self {
        self.min_count = min_count;
        self.max_count = max_count;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }
}

impl Default for FilterCriteria {
    /// Initial widget state: latest period only, counts 0..=10000, largest first
    fn default() -> Self {
        Self {
            periods: BTreeSet::from([2024]),
            max_count: 10_000.0,
            ..Self::all()
        }
    }
}

/// Ordinary-least-squares fit of count by rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// `None` when every count is equal, since `SStot` is zero and the
    /// fraction of variance explained is undefined
    pub r_squared: Option<f64>,
    /// Display text only, `y = {slope}x + {intercept}` at two decimals
    pub equation: String,
}

impl Regression {
    /// Fitted value at `rank`
    #[must_use]
    pub fn predict(&self, rank: f64) -> f64 {
        self.slope * rank + self.intercept
    }
}

/// Direction of the fitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastTrend {
    Growing,
    Declining,
    Stable,
}

impl ForecastTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }

    /// Localized label
    pub fn label(&self) -> String {
        match self {
            Self::Growing => crate::i18n::t!("forecast.growing").to_string(),
            Self::Declining => crate::i18n::t!("forecast.declining").to_string(),
            Self::Stable => crate::i18n::t!("forecast.stable").to_string(),
        }
    }
}

/// Short-range extrapolation of the regression line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Values at ranks `n+1..=n+3`, clamped to zero and rounded
    pub next: [f64; 3],
    /// `|r²| × 100`, `None` whenever `r_squared` is
    pub confidence_percent: Option<f64>,
    pub trend: ForecastTrend,
}

/// Performance tier assigned by rank quantile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn all() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Localized display name
    pub fn display_name(&self) -> String {
        match self {
            Self::High => crate::i18n::t!("tier.high").to_string(),
            Self::Medium => crate::i18n::t!("tier.medium").to_string(),
            Self::Low => crate::i18n::t!("tier.low").to_string(),
        }
    }
}

/// Hub names grouped by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiers {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Tiers {
    pub fn get(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }

    /// Tier of a hub, if it was assigned one
    pub fn tier_of(&self, hub: &str) -> Option<Tier> {
        Tier::all()
            .into_iter()
            .find(|tier| self.get(*tier).iter().any(|h| h == hub))
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derived analysis of the selected records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Pearson correlation of count by rank, 0 when not computable
    pub correlation: f64,

    /// `None` when fewer than two ranks are available
    pub regression: Option<Regression>,

    /// Present whenever `regression` is
    pub forecast: Option<Forecast>,

    pub outlier_hubs: Vec<String>,

    pub tiers: Tiers,
}

/// Mean growth of one region's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGrowth {
    pub region: String,
    pub average_growth: f64,
    pub hubs: usize,
}

/// Period comparison highlights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub growth_leaders: Vec<DerivedRecord>,
    pub decline_leaders: Vec<DerivedRecord>,
    pub stable_performers: Vec<DerivedRecord>,
    pub regional_growth: Vec<RegionGrowth>,
}

/// Output of one recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub records: Vec<DerivedRecord>,
    pub statistics: DescriptiveStats,
    pub result: AnalysisResult,
    pub comparison: ComparisonSummary,
}

/// Everything the presentation layer can change between recomputations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub filters: FilterCriteria,
    pub comparison_period: Option<i32>,
    pub top_n: Option<usize>,
    pub chart_kind: ChartKind,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            filters: FilterCriteria::default(),
            comparison_period: Some(2023),
            top_n: Some(20),
            chart_kind: ChartKind::default(),
        }
    }
}
