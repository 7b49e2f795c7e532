// =====================================================================================
// INVENTORY ANALYTICS
// =====================================================================================
//
// Every report is recomputed from the in-memory transaction log and waste
// records on each call. Usage reports only look at `treatment_use`
// transactions; revenue is estimated as units x product unit price.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::models::{
    AnalyticsParams, AreaUsage, ClinicAverage, InventorySummary, InventoryTransaction, Period,
    Product, ProductProfitability, ProfitabilitySummary, ProfitabilityReport,
    ProviderComparisonReport, ProviderInventoryStats, ProviderOutlier, ProviderProductUsage,
    ProviderReport, SummaryReport, TransactionType, TreatmentCostAnalysis, TreatmentCostReport,
    TreatmentCostSummary, TreatmentProductBreakdown, UsageBucket, UsageTrendsReport,
    VarianceDirection, WasteByProduct, WasteByProvider, WasteByReason, WasteRecord, WasteReport,
    WasteSummary, WasteTally,
};

pub const OUTLIER_THRESHOLD_PERCENT: f64 = 20.0;
pub const HIGH_WASTE_INSIGHT_THRESHOLD: f64 = 500.0;
pub const LOW_MARGIN_INSIGHT_PERCENT: f64 = 30.0;
pub const RECENT_WASTE_LIMIT: usize = 20;
const UNKNOWN_PROVIDER: &str = "unknown";
const UNKNOWN_TREATMENT: &str = "Unknown Treatment";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

pub fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn ratio(total: f64, count: u32) -> f64 {
    if count > 0 {
        total / f64::from(count)
    } else {
        0.0
    }
}

fn count_where(values: &[f64], predicate: impl Fn(f64) -> bool) -> u32 {
    values.iter().filter(|v| predicate(**v)).count() as u32
}

pub fn treatment_slug(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned()
}

#[derive(Default)]
struct UsageTally {
    units: f64,
    treatments: u32,
}

#[derive(Default)]
struct ProviderAccumulator {
    name: Option<String>,
    total_units: f64,
    treatments: u32,
    cost: f64,
    revenue: f64,
    products: BTreeMap<String, UsageTally>,
    areas: BTreeMap<String, UsageTally>,
}

pub struct InventoryAnalytics<'a> {
    products: HashMap<&'a str, &'a Product>,
    transactions: &'a [InventoryTransaction],
    waste: &'a [WasteRecord],
    params: &'a AnalyticsParams,
    now: DateTime<Utc>,
}

impl<'a> InventoryAnalytics<'a> {
    pub fn new(
        products: &'a [Product],
        transactions: &'a [InventoryTransaction],
        waste: &'a [WasteRecord],
        params: &'a AnalyticsParams,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            products: products.iter().map(|p| (p.id.as_str(), p)).collect(),
            transactions,
            waste,
            params,
            now,
        }
    }

    fn period(&self) -> Period {
        self.params.period
    }

    fn product(&self, product_id: &str) -> Option<&'a Product> {
        self.products.get(product_id).copied()
    }

    fn product_name(&self, product_id: &str) -> String {
        self.product(product_id)
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| product_id.to_string())
    }

    fn revenue(&self, transaction: &InventoryTransaction) -> Option<f64> {
        self.product(&transaction.product_id)
            .map(|p| transaction.units() * p.unit_price)
    }

    fn in_location(&self, location_id: Option<&str>) -> bool {
        match &self.params.location_id {
            Some(wanted) => location_id == Some(wanted.as_str()),
            None => true,
        }
    }

    fn in_product(&self, product_id: &str) -> bool {
        match &self.params.product_id {
            Some(wanted) => product_id == wanted,
            None => true,
        }
    }

    fn transactions_in_period(&self) -> impl Iterator<Item = &'a InventoryTransaction> + '_ {
        self.transactions
            .iter()
            .filter(move |t| self.period().contains(t.timestamp))
            .filter(move |t| self.in_location(Some(t.location_id.as_str())))
    }

    /// Treatment usage in the period, honouring location and product filters.
    fn treatment_usage(&self, by_product: bool) -> Vec<&'a InventoryTransaction> {
        self.transactions_in_period()
            .filter(|t| t.transaction_type == TransactionType::TreatmentUse)
            .filter(|t| !by_product || self.in_product(&t.product_id))
            .collect()
    }

    fn waste_in_period(&self) -> Vec<&'a WasteRecord> {
        self.waste
            .iter()
            .filter(|w| self.period().contains(w.recorded_at))
            .filter(|w| self.in_location(w.location_id.as_deref()))
            .collect()
    }

    // =================================================================================
    // PROVIDER
    // =================================================================================

    pub fn provider_report(&self) -> ProviderReport {
        self.provider_stats(self.params.provider_id.as_deref())
    }

    fn provider_stats(&self, provider_filter: Option<&str>) -> ProviderReport {
        let usage = self.treatment_usage(false);

        let mut providers: BTreeMap<String, ProviderAccumulator> = BTreeMap::new();
        let mut clinic_products: HashMap<&str, UsageTally> = HashMap::new();

        for t in &usage {
            let pid = t.practitioner_id.as_deref().unwrap_or(UNKNOWN_PROVIDER);
            if provider_filter.is_some_and(|wanted| wanted != pid) {
                continue;
            }

            let units = t.units();
            let product_tally = clinic_products.entry(t.product_id.as_str()).or_default();
            product_tally.units += units;
            product_tally.treatments += 1;

            let acc = providers.entry(pid.to_string()).or_default();
            if acc.name.is_none() {
                acc.name = t.practitioner_name.clone();
            }
            acc.total_units += units;
            acc.treatments += 1;
            acc.cost += t.total_cost;
            if let Some(revenue) = self.revenue(t) {
                acc.revenue += revenue;
            }

            let product = acc.products.entry(t.product_id.clone()).or_default();
            product.units += units;
            product.treatments += 1;

            if let Some(details) = &t.treatment_details {
                for area in &details.areas_injected {
                    let tally = acc.areas.entry(area.name.clone()).or_default();
                    tally.units += area.units;
                    tally.treatments += 1;
                }
            }
        }

        let total_units: f64 = providers.values().map(|p| p.total_units).sum();
        let total_treatments: u32 = providers.values().map(|p| p.treatments).sum();
        let clinic_avg = ratio(total_units, total_treatments);

        let waste = self.waste_in_period();
        let period = self.period();

        let mut stats: Vec<ProviderInventoryStats> = providers
            .into_iter()
            .map(|(pid, acc)| {
                let avg_units = ratio(acc.total_units, acc.treatments);
                let variance = if clinic_avg > 0.0 {
                    (avg_units - clinic_avg) / clinic_avg * 100.0
                } else {
                    0.0
                };

                let provider_waste: Vec<&&WasteRecord> = waste
                    .iter()
                    .filter(|w| w.practitioner_id.as_deref() == Some(pid.as_str()))
                    .collect();
                let waste_units: f64 = provider_waste.iter().map(|w| w.units_wasted).sum();
                let waste_value: f64 = provider_waste.iter().map(|w| w.total_waste_value).sum();

                let by_product = acc
                    .products
                    .iter()
                    .map(|(product_id, tally)| {
                        let avg = ratio(tally.units, tally.treatments);
                        let clinic_product_avg = clinic_products
                            .get(product_id.as_str())
                            .map(|c| ratio(c.units, c.treatments))
                            .unwrap_or(0.0);
                        ProviderProductUsage {
                            product_id: product_id.clone(),
                            product_name: self.product_name(product_id),
                            units_used: tally.units,
                            treatments: tally.treatments,
                            avg_per_treatment: avg,
                            vs_clinic_average: if clinic_product_avg > 0.0 {
                                (avg - clinic_product_avg) / clinic_product_avg * 100.0
                            } else {
                                0.0
                            },
                        }
                    })
                    .collect();

                let by_area = acc
                    .areas
                    .iter()
                    .map(|(area, tally)| AreaUsage {
                        area: area.clone(),
                        units_used: tally.units,
                        treatments: tally.treatments,
                        avg_per_treatment: ratio(tally.units, tally.treatments),
                    })
                    .collect();

                let gross_profit = acc.revenue - acc.cost;

                ProviderInventoryStats {
                    provider_name: acc.name.unwrap_or_else(|| pid.clone()),
                    provider_id: pid,
                    total_units_used: acc.total_units,
                    total_treatments: acc.treatments,
                    average_units_per_treatment: avg_units,
                    average_units_vs_clinic_average: variance,
                    is_above_average: variance > 0.0,
                    variance_percent: variance.abs(),
                    by_product,
                    by_area,
                    waste_units,
                    waste_value,
                    waste_percent: percent(waste_units, acc.total_units),
                    revenue_generated: acc.revenue,
                    cost_of_goods_used: acc.cost,
                    gross_profit,
                    profit_margin: percent(gross_profit, acc.revenue),
                    period_start: period.start,
                    period_end: period.end,
                    calculated_at: self.now,
                }
            })
            .collect();

        stats.sort_by(|a, b| b.total_units_used.total_cmp(&a.total_units_used));

        ProviderReport {
            providers: stats,
            clinic_average: ClinicAverage {
                units_per_treatment: clinic_avg,
                total_treatments,
                total_units,
            },
            period,
        }
    }

    /// Always compares every provider; a provider filter is ignored.
    pub fn provider_comparison(&self) -> ProviderComparisonReport {
        let report = self.provider_stats(None);
        let outliers = report
            .providers
            .iter()
            .filter(|p| p.variance_percent > OUTLIER_THRESHOLD_PERCENT)
            .map(|p| ProviderOutlier {
                provider_id: p.provider_id.clone(),
                provider_name: p.provider_name.clone(),
                variance_percent: p.variance_percent,
                direction: if p.is_above_average {
                    VarianceDirection::Above
                } else {
                    VarianceDirection::Below
                },
            })
            .collect();

        ProviderComparisonReport {
            report,
            outlier_threshold_percent: OUTLIER_THRESHOLD_PERCENT,
            outliers,
        }
    }

    // =================================================================================
    // COST PER TREATMENT
    // =================================================================================

    pub fn treatment_cost_report(&self) -> TreatmentCostReport {
        #[derive(Default)]
        struct TreatmentAccumulator {
            costs: Vec<f64>,
            units: Vec<f64>,
            revenues: Vec<f64>,
            products: BTreeMap<String, (f64, f64)>,
        }

        let mut treatments: BTreeMap<String, TreatmentAccumulator> = BTreeMap::new();

        for t in self.treatment_usage(true) {
            let name = t
                .treatment_details
                .as_ref()
                .map(|d| d.service_name.clone())
                .unwrap_or_else(|| UNKNOWN_TREATMENT.to_string());
            let acc = treatments.entry(name).or_default();

            let units = t.units();
            acc.costs.push(t.total_cost);
            acc.units.push(units);

            if let Some(revenue) = self.revenue(t) {
                acc.revenues.push(revenue);
                let (product_units, product_cost) =
                    acc.products.entry(t.product_id.clone()).or_insert((0.0, 0.0));
                *product_units += units;
                *product_cost += t.total_cost;
            }
        }

        let period = self.period();
        let mut analyses: Vec<TreatmentCostAnalysis> = treatments
            .into_iter()
            .map(|(name, acc)| {
                let count = acc.costs.len() as u32;
                let total_cost: f64 = acc.costs.iter().sum();
                let total_units: f64 = acc.units.iter().sum();
                let total_revenue: f64 = acc.revenues.iter().sum();

                let avg_cost = ratio(total_cost, count);
                let avg_units = ratio(total_units, count);
                let avg_revenue = ratio(total_revenue, count);
                let avg_profit = avg_revenue - avg_cost;

                let cost_variance = if count > 1 {
                    (acc.costs.iter().map(|c| (c - avg_cost).powi(2)).sum::<f64>()
                        / f64::from(count))
                    .sqrt()
                } else {
                    0.0
                };

                let product_breakdown = acc
                    .products
                    .iter()
                    .map(|(product_id, (units, cost))| TreatmentProductBreakdown {
                        product_id: product_id.clone(),
                        product_name: self.product_name(product_id),
                        avg_units_used: ratio(*units, count),
                        avg_cost: ratio(*cost, count),
                        percent_of_total_cost: percent(*cost, total_cost),
                    })
                    .collect();

                TreatmentCostAnalysis {
                    treatment_id: treatment_slug(&name),
                    treatment_name: name,
                    avg_product_cost: avg_cost,
                    avg_units_used: avg_units,
                    avg_cost_per_unit: if avg_units > 0.0 { avg_cost / avg_units } else { 0.0 },
                    avg_revenue_per_treatment: avg_revenue,
                    avg_profit_per_treatment: avg_profit,
                    avg_profit_margin: percent(avg_profit, avg_revenue),
                    product_breakdown,
                    cost_variance,
                    high_cost_treatments: count_where(&acc.costs, |c| c > avg_cost * 1.2),
                    low_cost_treatments: count_where(&acc.costs, |c| c < avg_cost * 0.8),
                    total_treatments: count,
                    period_start: period.start,
                    period_end: period.end,
                    calculated_at: self.now,
                }
            })
            .collect();

        analyses.sort_by(|a, b| b.total_treatments.cmp(&a.total_treatments));

        let total_treatments = analyses.iter().map(|a| a.total_treatments).sum();
        let avg_profit_margin = if analyses.is_empty() {
            0.0
        } else {
            analyses.iter().map(|a| a.avg_profit_margin).sum::<f64>() / analyses.len() as f64
        };

        TreatmentCostReport {
            treatments: analyses,
            summary: TreatmentCostSummary {
                total_treatments,
                avg_profit_margin,
            },
            period,
        }
    }

    // =================================================================================
    // WASTE
    // =================================================================================

    pub fn waste_report(&self) -> WasteReport {
        let records: Vec<&WasteRecord> = self
            .waste_in_period()
            .into_iter()
            .filter(|w| match &self.params.provider_id {
                Some(wanted) => w.practitioner_id.as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .collect();

        let mut by_reason: BTreeMap<_, WasteTally> = BTreeMap::new();
        let mut by_product: BTreeMap<&str, WasteTally> = BTreeMap::new();
        let mut by_provider: BTreeMap<&str, (WasteTally, Option<&str>)> = BTreeMap::new();

        for w in &records {
            tally(by_reason.entry(w.reason).or_default(), w);
            tally(by_product.entry(w.product_id.as_str()).or_default(), w);
            if let Some(pid) = w.practitioner_id.as_deref() {
                let (provider_tally, name) = by_provider.entry(pid).or_default();
                tally(provider_tally, w);
                if name.is_none() {
                    *name = w.practitioner_name.as_deref();
                }
            }
        }

        let total_value: f64 = records.iter().map(|w| w.total_waste_value).sum();
        let total_units: f64 = records.iter().map(|w| w.units_wasted).sum();

        let mut reasons: Vec<WasteByReason> = by_reason
            .into_iter()
            .map(|(reason, tally)| WasteByReason {
                reason,
                percent_of_total: percent(tally.value, total_value),
                tally,
            })
            .collect();
        reasons.sort_by(|a, b| b.tally.value.total_cmp(&a.tally.value));

        let mut products: Vec<WasteByProduct> = by_product
            .into_iter()
            .map(|(product_id, tally)| WasteByProduct {
                product_id: product_id.to_string(),
                product_name: self.product_name(product_id),
                percent_of_total: percent(tally.value, total_value),
                tally,
            })
            .collect();
        products.sort_by(|a, b| b.tally.value.total_cmp(&a.tally.value));

        let mut providers: Vec<WasteByProvider> = by_provider
            .into_iter()
            .map(|(provider_id, (tally, name))| WasteByProvider {
                provider_id: provider_id.to_string(),
                provider_name: name.unwrap_or(provider_id).to_string(),
                tally,
            })
            .collect();
        providers.sort_by(|a, b| b.tally.value.total_cmp(&a.tally.value));

        let mut recent: Vec<WasteRecord> = records.iter().map(|w| (*w).clone()).collect();
        recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        recent.truncate(RECENT_WASTE_LIMIT);

        WasteReport {
            summary: WasteSummary {
                total_records: records.len() as u32,
                total_units_wasted: total_units,
                total_waste_value: total_value,
                avg_waste_per_incident: if records.is_empty() {
                    0.0
                } else {
                    total_value / records.len() as f64
                },
            },
            by_reason: reasons,
            by_product: products,
            by_provider: providers,
            recent_records: recent,
            period: self.period(),
        }
    }

    // =================================================================================
    // PROFITABILITY
    // =================================================================================

    pub fn profitability_report(&self) -> ProfitabilityReport {
        #[derive(Default)]
        struct ProductAccumulator {
            units: f64,
            cost: f64,
            revenue: f64,
            treatments: u32,
        }

        let mut per_product: BTreeMap<&str, ProductAccumulator> = BTreeMap::new();
        for t in self.treatment_usage(true) {
            let Some(product) = self.product(&t.product_id) else {
                continue;
            };
            let acc = per_product.entry(product.id.as_str()).or_default();
            acc.units += t.units();
            acc.cost += t.total_cost;
            acc.revenue += t.units() * product.unit_price;
            acc.treatments += 1;
        }

        let waste: Vec<&WasteRecord> = self
            .waste_in_period()
            .into_iter()
            .filter(|w| self.in_product(&w.product_id))
            .collect();
        let total_waste_value: f64 = waste.iter().map(|w| w.total_waste_value).sum();

        let mut by_product: Vec<ProductProfitability> = per_product
            .into_iter()
            .map(|(product_id, acc)| {
                let gross_profit = acc.revenue - acc.cost;
                let waste_value: f64 = waste
                    .iter()
                    .filter(|w| w.product_id == product_id)
                    .map(|w| w.total_waste_value)
                    .sum();
                let net_profit = gross_profit - waste_value;

                ProductProfitability {
                    product_id: product_id.to_string(),
                    product_name: self.product_name(product_id),
                    units_used: acc.units,
                    cost: acc.cost,
                    revenue: acc.revenue,
                    gross_profit,
                    waste_value,
                    net_profit,
                    gross_margin: percent(gross_profit, acc.revenue),
                    net_margin: percent(net_profit, acc.revenue),
                    treatments: acc.treatments,
                    revenue_per_treatment: ratio(acc.revenue, acc.treatments),
                    cost_per_treatment: ratio(acc.cost, acc.treatments),
                }
            })
            .collect();
        by_product.sort_by(|a, b| b.net_profit.total_cmp(&a.net_profit));

        let total_revenue: f64 = by_product.iter().map(|p| p.revenue).sum();
        let total_cost: f64 = by_product.iter().map(|p| p.cost).sum();
        let total_gross_profit = total_revenue - total_cost;
        let total_net_profit = total_gross_profit - total_waste_value;

        let insights = profitability_insights(&by_product, total_waste_value);

        ProfitabilityReport {
            summary: ProfitabilitySummary {
                total_revenue,
                total_cost,
                total_gross_profit,
                total_waste_value,
                total_net_profit,
                gross_margin: percent(total_gross_profit, total_revenue),
                net_margin: percent(total_net_profit, total_revenue),
                waste_impact_percent: percent(total_waste_value, total_gross_profit),
            },
            by_product,
            insights,
            period: self.period(),
        }
    }

    // =================================================================================
    // USAGE TRENDS
    // =================================================================================

    /// Weekly buckets from the period start, empty weeks included. The last
    /// bucket is cut at the period end.
    pub fn usage_trends(&self) -> UsageTrendsReport {
        let period = self.period();
        let week = Duration::weeks(1);

        let mut buckets = Vec::new();
        let mut bucket_start = period.start;
        loop {
            let next = bucket_start + week;
            buckets.push(UsageBucket {
                week_start: bucket_start,
                week_end: next.min(period.end),
                units_used: 0.0,
                treatments: 0,
                cost: 0.0,
            });
            if next >= period.end {
                break;
            }
            bucket_start = next;
        }

        let last = buckets.len() - 1;
        for t in self.treatment_usage(true) {
            let offset = (t.timestamp - period.start).num_seconds() / week.num_seconds();
            let Ok(index) = usize::try_from(offset) else {
                continue;
            };
            let bucket = &mut buckets[index.min(last)];
            bucket.units_used += t.units();
            bucket.treatments += 1;
            bucket.cost += t.total_cost;
        }

        UsageTrendsReport { buckets, period }
    }

    // =================================================================================
    // SUMMARY
    // =================================================================================

    pub fn summary(&self) -> SummaryReport {
        let usage = self.treatment_usage(false);
        let treatments = usage.len() as u32;

        let total_units: f64 = usage.iter().map(|t| t.units()).sum();
        let total_cost: f64 = usage.iter().map(|t| t.total_cost).sum();
        let total_revenue: f64 = usage.iter().filter_map(|t| self.revenue(t)).sum();

        let unique_patients: HashSet<&str> =
            usage.iter().filter_map(|t| t.patient_id.as_deref()).collect();
        let unique_providers: HashSet<&str> =
            usage.iter().filter_map(|t| t.practitioner_id.as_deref()).collect();

        let total_waste_value: f64 = self
            .waste_in_period()
            .iter()
            .map(|w| w.total_waste_value)
            .sum();

        SummaryReport {
            summary: InventorySummary {
                total_treatments: treatments,
                total_units_used: total_units,
                total_cost,
                total_revenue,
                gross_profit: total_revenue - total_cost,
                gross_margin: percent(total_revenue - total_cost, total_revenue),
                total_waste_value,
                waste_percent: percent(total_waste_value, total_cost),
                unique_patients: unique_patients.len(),
                unique_providers: unique_providers.len(),
                avg_units_per_treatment: ratio(total_units, treatments),
                avg_cost_per_treatment: ratio(total_cost, treatments),
            },
            period: self.period(),
        }
    }
}

fn tally(target: &mut WasteTally, record: &WasteRecord) {
    target.count += 1;
    target.units += record.units_wasted;
    target.value += record.total_waste_value;
}

pub fn profitability_insights(
    products: &[ProductProfitability],
    total_waste_value: f64,
) -> Vec<String> {
    let mut insights = Vec::new();

    if total_waste_value > HIGH_WASTE_INSIGHT_THRESHOLD {
        insights.push(format!(
            "High waste detected: ${:.2} in product waste this period. Consider reviewing vial management practices.",
            total_waste_value
        ));
    }

    let low_margin = products
        .iter()
        .filter(|p| p.net_margin < LOW_MARGIN_INSIGHT_PERCENT)
        .count();
    if low_margin > 0 {
        insights.push(format!(
            "{} product(s) have net margins below {:.0}%. Consider pricing adjustments.",
            low_margin, LOW_MARGIN_INSIGHT_PERCENT
        ));
    }

    if let Some(top) = products.first() {
        insights.push(format!(
            "Top performer: {} with ${:.2} net profit.",
            top.product_name, top.net_profit
        ));
    }

    let high_waste = products
        .iter()
        .filter(|p| p.waste_value > p.gross_profit * 0.1)
        .count();
    if high_waste > 0 {
        insights.push(format!(
            "{} product(s) have waste exceeding 10% of gross profit.",
            high_waste
        ));
    }

    insights
}
