//! Core schedule engine: parameter validation, installment and the monthly recurrence

use chrono::NaiveDate;

use super::aggregate::aggregate;
use super::calendar::add_months;
use super::records::{MonthlyRecord, ScheduleResult};
use super::state::AmortizationState;
use super::summary::summarize;
use crate::error::ParameterError;
use crate::loan::{Frequency, LoanParameters};

/// Longest loan the engine will amortize (100 years)
pub const DEFAULT_MAX_TOTAL_MONTHS: u32 = 1200;

/// Environment variable overriding the month ceiling
pub const MAX_TOTAL_MONTHS_ENV: &str = "EMI_MAX_TOTAL_MONTHS";

/// Relative tolerance on principal repaid and on the final balance
pub const CLOSURE_TOLERANCE: f64 = 1e-6;

/// Configuration for schedule generation
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Parameter sets with more months than this produce no schedule
    pub max_total_months: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_total_months: DEFAULT_MAX_TOTAL_MONTHS,
        }
    }
}

impl ScheduleConfig {
    /// Default config with overrides from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(max) = std::env::var(MAX_TOTAL_MONTHS_ENV)
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            config.max_total_months = max;
        }
        config
    }
}

/// Loan parameters that passed validation, with the derived installment
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub monthly_rate: f64,
    pub total_months: u32,
    pub start_date: NaiveDate,
    pub frequency: Frequency,

    /// Fixed monthly installment
    pub installment: f64,
}

/// Annuity installment that fully amortizes `principal` over `total_months`
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), evaluated as
/// P * r / (1 - (1 + r)^-n) with `ln_1p`/`exp_m1` so small rates keep
/// their precision.
pub fn monthly_installment(principal: f64, monthly_rate: f64, total_months: u32) -> f64 {
    let discount = -(-f64::from(total_months) * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / discount
}

/// Main schedule engine
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
}

impl ScheduleEngine {
    /// Create a new engine with the given config
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Check parameters and derive the loan terms
    pub fn validate(&self, params: &LoanParameters) -> Result<LoanTerms, ParameterError> {
        // negated comparisons so NaN is rejected too
        if !(params.principal > 0.0) {
            return Err(ParameterError::NonPositivePrincipal {
                principal: params.principal,
            });
        }

        let monthly_rate = params.monthly_rate();
        if !(monthly_rate > 0.0) {
            return Err(ParameterError::NonPositiveRate {
                annual_rate_percent: params.annual_rate_percent,
            });
        }

        let total_months = params.total_months();
        if total_months == 0 {
            return Err(ParameterError::EmptyTerm);
        }
        if total_months > u64::from(self.config.max_total_months) {
            return Err(ParameterError::TermTooLong {
                total_months,
                max: self.config.max_total_months,
            });
        }
        let total_months = total_months as u32;

        let installment = monthly_installment(params.principal, monthly_rate, total_months);
        if !installment.is_finite() || installment <= 0.0 {
            return Err(ParameterError::NonFiniteInstallment {
                monthly_rate,
                total_months,
            });
        }

        if add_months(params.start_date, total_months - 1).is_none() {
            return Err(ParameterError::DateOutOfRange);
        }

        Ok(LoanTerms {
            principal: params.principal,
            monthly_rate,
            total_months,
            start_date: params.start_date,
            frequency: params.frequency,
            installment,
        })
    }

    /// Canonical monthly schedule, or `None` for invalid parameters
    pub fn monthly_schedule(&self, params: &LoanParameters) -> Option<Vec<MonthlyRecord>> {
        self.validate(params)
            .and_then(|terms| self.amortize(&terms))
            .map_err(|e| log_rejection(params, &e))
            .ok()
    }

    /// Full result: monthly schedule, periodic view and totals
    ///
    /// `None` is the normal outcome for invalid parameters; use
    /// [`ScheduleEngine::try_compute`] to learn why.
    pub fn compute(&self, params: &LoanParameters) -> Option<ScheduleResult> {
        self.try_compute(params)
            .map_err(|e| log_rejection(params, &e))
            .ok()
    }

    /// Full result, or the reason the parameters produce none
    pub fn try_compute(&self, params: &LoanParameters) -> Result<ScheduleResult, ParameterError> {
        let terms = self.validate(params)?;
        let monthly = self.amortize(&terms)?;
        let periods = aggregate(&monthly, terms.frequency);
        let summary = summarize(&monthly, terms.installment, terms.frequency);

        log::debug!(
            "computed {} months ({} {} periods), installment {:.6}",
            monthly.len(),
            periods.len(),
            terms.frequency,
            terms.installment
        );

        Ok(ScheduleResult {
            monthly_installment: terms.installment,
            installment_amount: summary.period_installment,
            total_interest: summary.total_interest,
            total_payment: summary.total_payment,
            frequency: terms.frequency,
            monthly,
            periods,
        })
    }

    /// Run the recurrence from a full balance down to zero
    ///
    /// A schedule that does not repay the principal within
    /// [`CLOSURE_TOLERANCE`] is rejected rather than returned.
    fn amortize(&self, terms: &LoanTerms) -> Result<Vec<MonthlyRecord>, ParameterError> {
        let mut records = Vec::with_capacity(terms.total_months as usize);
        let mut state = AmortizationState::from_terms(terms);

        for _month in 1..=terms.total_months {
            state
                .advance_month()
                .ok_or(ParameterError::DateOutOfRange)?;
            records.push(self.calculate_month(terms, &mut state));
        }

        check_closure(terms.principal, &records)?;
        Ok(records)
    }

    /// Split one installment into interest and principal
    ///
    /// Full precision throughout; rounding is left to presentation.
    fn calculate_month(&self, terms: &LoanTerms, state: &mut AmortizationState) -> MonthlyRecord {
        let interest_portion = state.opening_balance * terms.monthly_rate;
        let principal_portion = terms.installment - interest_portion;
        state.apply_principal(principal_portion);

        MonthlyRecord {
            month: state.month,
            date: state.date,
            opening_balance: state.opening_balance,
            installment: terms.installment,
            principal_portion,
            interest_portion,
            remaining_balance: state.closing_balance,
        }
    }
}

/// Principal portions must sum to the principal and the balance must reach zero
fn check_closure(principal: f64, records: &[MonthlyRecord]) -> Result<(), ParameterError> {
    let repaid: f64 = records.iter().map(|r| r.principal_portion).sum();
    let closure_error = (repaid - principal).abs() / principal;
    let final_balance = records.last().map_or(principal, |r| r.remaining_balance);

    // negated so a NaN anywhere also fails
    if !(closure_error <= CLOSURE_TOLERANCE && final_balance <= CLOSURE_TOLERANCE * principal) {
        return Err(ParameterError::IllConditioned {
            closure_error,
            final_balance,
        });
    }
    Ok(())
}

fn log_rejection(params: &LoanParameters, error: &ParameterError) {
    log::warn!("no schedule for {:?}: {}", params, error);
}

/// Monthly schedule with the default config
pub fn generate_monthly_schedule(params: &LoanParameters) -> Option<Vec<MonthlyRecord>> {
    ScheduleEngine::default().monthly_schedule(params)
}

/// Full schedule result with the default config
pub fn compute_schedule(params: &LoanParameters) -> Option<ScheduleResult> {
    ScheduleEngine::default().compute(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference_loan() -> LoanParameters {
        LoanParameters::new(270_000.0, 6.0, 6, 0, ymd(2026, 2, 12), Frequency::Monthly)
    }

    #[test]
    fn test_reference_installment() {
        // 270000 at 0.5% a month over 72 months
        let installment = monthly_installment(270_000.0, 0.005, 72);
        assert_abs_diff_eq!(installment, 4474.68, epsilon = 0.005);
    }

    #[test]
    fn test_reference_schedule() {
        let schedule = generate_monthly_schedule(&reference_loan()).unwrap();
        assert_eq!(schedule.len(), 72);

        let first = &schedule[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.date, ymd(2026, 2, 12));
        assert_relative_eq!(first.opening_balance, 270_000.0);
        assert_relative_eq!(first.interest_portion, 1350.0, max_relative = 1e-12);
        assert_abs_diff_eq!(first.principal_portion, 3124.68, epsilon = 0.005);
        assert_abs_diff_eq!(first.remaining_balance, 266_875.32, epsilon = 0.005);

        let second = &schedule[1];
        assert_eq!(second.date, ymd(2026, 3, 12));
        assert_abs_diff_eq!(second.interest_portion, 1334.38, epsilon = 0.005);

        let last = &schedule[71];
        assert_eq!(last.month, 72);
        assert_eq!(last.date, ymd(2032, 1, 12));
        assert_abs_diff_eq!(last.remaining_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_amortization_closure() {
        for params in [
            reference_loan(),
            LoanParameters::new(10_000_000.0, 20.0, 30, 0, ymd(2025, 1, 31), Frequency::Monthly),
            LoanParameters::new(10_000.0, 1.0, 0, 7, ymd(2024, 2, 29), Frequency::Monthly),
            LoanParameters::new(2_500_000.0, 8.75, 25, 11, ymd(2026, 6, 1), Frequency::Monthly),
        ] {
            let schedule = generate_monthly_schedule(&params).unwrap();
            let total_principal: f64 = schedule.iter().map(|r| r.principal_portion).sum();
            assert_relative_eq!(total_principal, params.principal, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_balance_monotone_and_closes() {
        let params =
            LoanParameters::new(2_500_000.0, 8.75, 25, 11, ymd(2026, 6, 1), Frequency::Monthly);
        let schedule = generate_monthly_schedule(&params).unwrap();

        for pair in schedule.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
            assert_eq!(pair[1].opening_balance, pair[0].remaining_balance);
            assert_eq!(pair[1].month, pair[0].month + 1);
        }
        assert!(schedule.iter().all(|r| r.remaining_balance >= 0.0));

        let last = schedule.last().unwrap();
        assert_abs_diff_eq!(last.remaining_balance, 0.0, epsilon = 1e-6 * params.principal);
    }

    #[test]
    fn test_installment_invariance() {
        let schedule = generate_monthly_schedule(&reference_loan()).unwrap();
        let installment = schedule[0].installment;
        for record in &schedule[..schedule.len() - 1] {
            assert_relative_eq!(
                record.principal_portion + record.interest_portion,
                installment,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_interest_falls_principal_rises() {
        let schedule = generate_monthly_schedule(&reference_loan()).unwrap();
        for pair in schedule.windows(2) {
            assert!(pair[1].interest_portion < pair[0].interest_portion);
            assert!(pair[1].principal_portion > pair[0].principal_portion);
        }
    }

    #[test]
    fn test_idempotent() {
        let params = reference_loan().with_frequency(Frequency::Quarterly);
        let a = compute_schedule(&params).unwrap();
        let b = compute_schedule(&params).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.monthly.iter().zip(&b.monthly) {
            assert_eq!(x.principal_portion.to_bits(), y.principal_portion.to_bits());
            assert_eq!(x.remaining_balance.to_bits(), y.remaining_balance.to_bits());
        }
    }

    #[test]
    fn test_invalid_inputs_produce_no_schedule() {
        let zero_principal = LoanParameters {
            principal: 0.0,
            ..reference_loan()
        };
        let zero_rate = LoanParameters {
            annual_rate_percent: 0.0,
            ..reference_loan()
        };
        let zero_term = LoanParameters {
            term_years: 0,
            extra_months: 0,
            ..reference_loan()
        };
        let negative = LoanParameters {
            principal: -5.0,
            ..reference_loan()
        };

        for params in [&zero_principal, &zero_rate, &zero_term, &negative] {
            assert!(generate_monthly_schedule(params).is_none());
            assert!(compute_schedule(params).is_none());
        }
    }

    #[test]
    fn test_validation_reasons() {
        let engine = ScheduleEngine::default();

        let nan = LoanParameters {
            principal: f64::NAN,
            ..reference_loan()
        };
        assert!(matches!(
            engine.validate(&nan),
            Err(ParameterError::NonPositivePrincipal { .. })
        ));

        let zero_rate = reference_loan().with_rate(0.0);
        assert_eq!(
            engine.validate(&zero_rate),
            Err(ParameterError::NonPositiveRate {
                annual_rate_percent: 0.0
            })
        );

        let empty = LoanParameters {
            term_years: 0,
            ..reference_loan()
        };
        assert_eq!(engine.validate(&empty), Err(ParameterError::EmptyTerm));

        let huge_rate = reference_loan().with_rate(f64::INFINITY);
        assert!(matches!(
            engine.validate(&huge_rate),
            Err(ParameterError::NonFiniteInstallment { .. })
        ));
    }

    #[test]
    fn test_term_ceiling() {
        let engine = ScheduleEngine::default();

        let at_ceiling = LoanParameters {
            term_years: 100,
            ..reference_loan()
        };
        assert_eq!(engine.monthly_schedule(&at_ceiling).unwrap().len(), 1200);

        let over = LoanParameters {
            term_years: 100,
            extra_months: 1,
            ..reference_loan()
        };
        assert_eq!(
            engine.validate(&over),
            Err(ParameterError::TermTooLong {
                total_months: 1201,
                max: 1200
            })
        );

        let wrapping = LoanParameters {
            term_years: u32::MAX,
            ..reference_loan()
        };
        assert!(matches!(
            engine.validate(&wrapping),
            Err(ParameterError::TermTooLong { .. })
        ));
    }

    #[test]
    fn test_custom_ceiling() {
        let engine = ScheduleEngine::new(ScheduleConfig {
            max_total_months: 60,
        });
        assert!(engine.compute(&reference_loan()).is_none());

        let five_years = LoanParameters {
            term_years: 5,
            ..reference_loan()
        };
        assert!(engine.compute(&five_years).is_some());
    }

    #[test]
    fn test_date_out_of_range() {
        let params = LoanParameters {
            start_date: NaiveDate::MAX,
            ..reference_loan()
        };
        assert_eq!(
            ScheduleEngine::default().validate(&params),
            Err(ParameterError::DateOutOfRange)
        );
    }

    #[test]
    fn test_month_end_start_dates() {
        let params =
            LoanParameters::new(12_000.0, 12.0, 0, 4, ymd(2024, 1, 31), Frequency::Monthly);
        let dates: Vec<_> = generate_monthly_schedule(&params)
            .unwrap()
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(
            dates,
            vec![ymd(2024, 1, 31), ymd(2024, 2, 29), ymd(2024, 3, 31), ymd(2024, 4, 30)]
        );
    }

    #[test]
    fn test_compute_fills_result() {
        let params = reference_loan().with_frequency(Frequency::HalfYearly);
        let result = compute_schedule(&params).unwrap();

        assert_eq!(result.frequency, Frequency::HalfYearly);
        assert_eq!(result.monthly.len(), 72);
        assert_eq!(result.periods.len(), 12);
        assert_relative_eq!(result.installment_amount, result.monthly_installment * 6.0);
        assert_relative_eq!(result.total_payment, result.monthly_installment * 72.0);
        assert_relative_eq!(result.total_interest, result.total_payment - 270_000.0);
        assert_abs_diff_eq!(result.total_interest, 52_176.94, epsilon = 0.01);
    }

    #[test]
    fn test_installment_matches_textbook_form() {
        let cases = [(270_000.0, 0.005, 72), (1_000.0, 0.02, 12), (5e6, 0.0075, 360)];
        for (principal, rate, months) in cases {
            let compound: f64 = (1.0_f64 + rate).powf(f64::from(months));
            let textbook = principal * rate * compound / (compound - 1.0);
            assert_relative_eq!(
                monthly_installment(principal, rate, months),
                textbook,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_tiny_rates_still_close() {
        for annual_rate_percent in [1e-12, 1e-10, 1e-6] {
            let params = reference_loan().with_rate(annual_rate_percent);
            let schedule = generate_monthly_schedule(&params).unwrap();

            let repaid: f64 = schedule.iter().map(|r| r.principal_portion).sum();
            assert_relative_eq!(repaid, 270_000.0, max_relative = 1e-9);
            assert_abs_diff_eq!(schedule[71].remaining_balance, 0.0, epsilon = 1e-6);
            // practically an interest-free loan
            assert_relative_eq!(schedule[0].installment, 3750.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_installment_swallowed_by_interest_rejected() {
        // (1.03)^1200 is ~2.5e15: the principal part of the installment is
        // below the precision of the balance
        let params = LoanParameters {
            annual_rate_percent: 36.0,
            term_years: 100,
            ..reference_loan()
        };
        assert!(matches!(
            ScheduleEngine::default().try_compute(&params),
            Err(ParameterError::IllConditioned { .. })
        ));
        assert!(generate_monthly_schedule(&params).is_none());
        assert!(compute_schedule(&params).is_none());
    }

    #[test]
    fn test_schedule_properties_over_rate_and_term_grid() {
        let engine = ScheduleEngine::default();
        let rates = [1e-6, 1e-3, 0.5, 3.0, 6.0, 12.0, 24.0, 36.0, 48.0, 60.0];
        let months = [1, 2, 7, 12, 72, 240, 360, 600, 1200];

        for &annual_rate_percent in &rates {
            for &extra_months in &months {
                let params = LoanParameters {
                    annual_rate_percent,
                    term_years: 0,
                    extra_months,
                    ..reference_loan()
                };

                let result = match engine.try_compute(&params) {
                    Ok(result) => result,
                    Err(e) => {
                        // moderate rates amortize at every term up to the ceiling
                        assert!(annual_rate_percent > 12.0, "{}", e);
                        assert!(
                            matches!(e, ParameterError::IllConditioned { .. }),
                            "{}% over {} months: {}",
                            annual_rate_percent,
                            extra_months,
                            e
                        );
                        continue;
                    }
                };

                let schedule = &result.monthly;
                assert_eq!(schedule.len(), extra_months as usize);

                let repaid: f64 = schedule.iter().map(|r| r.principal_portion).sum();
                assert!(
                    ((repaid - params.principal) / params.principal).abs() <= 1e-6,
                    "{}% over {} months repaid {}",
                    annual_rate_percent,
                    extra_months,
                    repaid
                );

                for pair in schedule.windows(2) {
                    assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
                }
                let last = &schedule[schedule.len() - 1];
                assert!(last.remaining_balance >= 0.0);
                assert!(last.remaining_balance <= 1e-6 * params.principal);

                for record in &schedule[..schedule.len() - 1] {
                    assert_relative_eq!(
                        record.principal_portion + record.interest_portion,
                        result.monthly_installment,
                        max_relative = 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn test_config_default() {
        assert_eq!(ScheduleConfig::default().max_total_months, 1200);
    }
}
