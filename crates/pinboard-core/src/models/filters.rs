//! Filter criteria for listing plans.

use jiff::civil::Date;

use super::Plan;

/// Filter criteria for calendar-style plan listing.
///
/// A plan matches a date window when its span `date..=end_date()` overlaps
/// the window; multi-day plans therefore show up on every day they cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Inclusive lower bound on the plan's date span
    pub from: Option<Date>,

    /// Inclusive upper bound on the plan's date span
    pub until: Option<Date>,

    /// Filter by completion state
    pub completion: Option<CompletionFilter>,
}

/// Completion states a plan filter can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Only completed plans
    Completed,

    /// Only plans still open
    Open,
}

impl PlanFilter {
    /// Convenience constructor for a single-day window.
    pub fn on(day: Date) -> Self {
        Self {
            from: Some(day),
            until: Some(day),
            completion: None,
        }
    }

    /// Whether the given plan satisfies this filter.
    pub fn matches(&self, plan: &Plan) -> bool {
        if let Some(from) = self.from {
            if plan.end_date() < from {
                return false;
            }
        }
        if let Some(until) = self.until {
            if plan.date > until {
                return false;
            }
        }
        match self.completion {
            Some(CompletionFilter::Completed) => plan.completed,
            Some(CompletionFilter::Open) => !plan.completed,
            None => true,
        }
    }
}
