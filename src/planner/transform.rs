//! Bottom-up plan rewriting
//!
//! Each primitive takes a plan by reference and returns a new plan. Children
//! are rewritten before their parent, the parent is rebuilt over the new
//! children, then the rewrite function is applied to the rebuilt node. The
//! first error aborts the whole rewrite.

use crate::common::error::PrismResult;
use crate::expression::Expression;
use crate::planner::LogicalPlan;

impl LogicalPlan {
    /// Rewrite every node of the plan, children before parents
    pub fn transform_up<F>(&self, f: &mut F) -> PrismResult<LogicalPlan>
    where
        F: FnMut(LogicalPlan) -> PrismResult<LogicalPlan>,
    {
        let mut children = Vec::new();
        for child in self.children() {
            children.push(child.transform_up(f)?);
        }
        f(self.with_children(children)?)
    }

    /// Like [`LogicalPlan::transform_up`], but resolved subtrees are kept as
    /// they are: `f` is not called on them and they are not descended into.
    pub fn transform_unresolved_up<F>(&self, f: &mut F) -> PrismResult<LogicalPlan>
    where
        F: FnMut(LogicalPlan) -> PrismResult<LogicalPlan>,
    {
        if self.resolved() {
            return Ok(self.clone());
        }

        let mut children = Vec::new();
        for child in self.children() {
            children.push(child.transform_unresolved_up(f)?);
        }
        f(self.with_children(children)?)
    }

    /// Rewrite the expressions embedded in this node (not its children),
    /// each expression tree bottom-up. Nodes without expressions are
    /// returned unchanged.
    pub fn transform_expressions_up<F>(&self, f: &mut F) -> PrismResult<LogicalPlan>
    where
        F: FnMut(Expression) -> PrismResult<Expression>,
    {
        let expressions = self.expressions();
        if expressions.is_empty() {
            return Ok(self.clone());
        }

        let mut rewritten = Vec::with_capacity(expressions.len());
        for expr in expressions {
            rewritten.push(expr.transform_up(f)?);
        }
        self.with_expressions(rewritten)
    }

    /// Like [`LogicalPlan::transform_expressions_up`], skipping resolved
    /// expression subtrees
    pub fn transform_unresolved_expressions_up<F>(&self, f: &mut F) -> PrismResult<LogicalPlan>
    where
        F: FnMut(Expression) -> PrismResult<Expression>,
    {
        let expressions = self.expressions();
        if expressions.is_empty() {
            return Ok(self.clone());
        }

        let mut rewritten = Vec::with_capacity(expressions.len());
        for expr in expressions {
            rewritten.push(expr.transform_unresolved_up(f)?);
        }
        self.with_expressions(rewritten)
    }
}
