//! Bottom-up expression rewriting
//!
//! Rewrites never mutate the input tree: children are rewritten first, the
//! parent is rebuilt over them and the rewrite function sees the rebuilt node.

use crate::common::error::PrismResult;
use crate::expression::Expression;

impl Expression {
    /// Rewrite every node of this tree, children before parents
    pub fn transform_up<F>(&self, f: &mut F) -> PrismResult<Expression>
    where
        F: FnMut(Expression) -> PrismResult<Expression>,
    {
        let mut children = Vec::new();
        for child in self.children() {
            children.push(child.transform_up(f)?);
        }
        f(self.with_children(children)?)
    }

    /// Like [`Expression::transform_up`], but resolved subtrees are returned
    /// as they are, without descending into them or calling `f`.
    pub fn transform_unresolved_up<F>(&self, f: &mut F) -> PrismResult<Expression>
    where
        F: FnMut(Expression) -> PrismResult<Expression>,
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
}
