//! Analyzer
//!
//! The analyzer turns an unresolved plan into a resolved one by applying a
//! sequence of named rules. Every pass runs all rules in order; analysis
//! stops at the first pass that leaves the plan unchanged.

pub mod resolve_functions;
pub mod resolve_tables;

pub use resolve_functions::ResolveFunctions;
pub use resolve_tables::ResolveTables;

use crate::common::config::AnalyzerConfig;
use crate::common::error::{PrismError, PrismResult};
use crate::execution::ExecutionContext;
use crate::planner::LogicalPlan;
use std::fmt;
use std::sync::Arc;

/// A single plan rewrite applied by the analyzer
pub trait AnalyzerRule: Send + Sync {
    /// Rule name, also used as the span label of each application
    fn name(&self) -> &str;

    /// Rewrite the plan. Rules must leave resolved subtrees untouched.
    fn apply(
        &self,
        ctx: &ExecutionContext,
        analyzer: &Analyzer,
        plan: &LogicalPlan,
    ) -> PrismResult<LogicalPlan>;
}

/// Rules every analyzer starts with, in application order
pub fn default_rules() -> Vec<Arc<dyn AnalyzerRule>> {
    vec![Arc::new(ResolveTables), Arc::new(ResolveFunctions)]
}

/// Rule-driven plan analyzer
pub struct Analyzer {
    rules: Vec<Arc<dyn AnalyzerRule>>,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Analyzer with the default rules and configuration
    pub fn new() -> Self {
        AnalyzerBuilder::new(AnalyzerConfig::default())
            .with_default_rules()
            .build()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Names of the configured rules in application order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Find a rule by name
    pub fn rule(&self, name: &str) -> Option<Arc<dyn AnalyzerRule>> {
        self.rules.iter().find(|rule| rule.name() == name).cloned()
    }

    /// Emit a debug line when debug logging is enabled
    pub fn log(&self, message: fmt::Arguments<'_>) {
        if self.config.debug {
            tracing::debug!(target: "prism_analyzer::analyzer", "{}", message);
        }
    }

    /// Run every rule once, in order
    pub fn apply_rules(&self, ctx: &ExecutionContext, plan: &LogicalPlan) -> PrismResult<LogicalPlan> {
        let mut current = plan.clone();
        for rule in &self.rules {
            self.log(format_args!("applying rule {}", rule.name()));
            current = rule.apply(ctx, self, &current)?;
        }
        Ok(current)
    }

    /// Apply the rules until the plan stops changing. At most
    /// `max_iterations` passes run; once they are spent, a resolved plan is
    /// returned as is and an unresolved one is an error.
    pub fn analyze(&self, ctx: &ExecutionContext, plan: &LogicalPlan) -> PrismResult<LogicalPlan> {
        let mut current = plan.clone();
        for pass in 1..=self.config.max_iterations {
            let next = self.apply_rules(ctx, &current)?;
            if next == current {
                self.log(format_args!("analysis reached a fixed point after {} passes", pass));
                return Ok(next);
            }
            current = next;
        }

        if current.resolved() {
            self.log(format_args!(
                "analysis budget of {} passes spent on a resolved plan",
                self.config.max_iterations
            ));
            return Ok(current);
        }
        Err(PrismError::MaxAnalysisIterations(self.config.max_iterations))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("rules", &self.rule_names())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`Analyzer`]
pub struct AnalyzerBuilder {
    rules: Vec<Arc<dyn AnalyzerRule>>,
    config: AnalyzerConfig,
}

impl AnalyzerBuilder {
    /// Start from an empty rule list
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Append a rule after the ones already added
    pub fn add_rule(mut self, rule: Arc<dyn AnalyzerRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append the default rules
    pub fn with_default_rules(mut self) -> Self {
        self.rules.extend(default_rules());
        self
    }

    pub fn build(self) -> Analyzer {
        Analyzer {
            rules: self.rules,
            config: self.config,
        }
    }
}
